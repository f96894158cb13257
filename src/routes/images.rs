use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{base_context, redirect, render_template};
use tera::Tera;

use crate::forms::images::AddImageForm;
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::images::{create_image, load_images, remove_image};

const IMAGES_URL: &str = "/admin/images";

#[get("/images")]
pub async fn show_images(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match load_images(repo.get_ref(), &user) {
        Ok(images) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "images",
                &server_config.auth_service_url,
            );
            context.insert("images", &images);
            render_template(&tera, "admin/images.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to list images: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/images/add")]
pub async fn add_image(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddImageForm>,
) -> impl Responder {
    match create_image(repo.get_ref(), &user, form) {
        Ok(image) => {
            FlashMessage::success(format!("Image «{}» added.", image.title)).send();
            redirect(IMAGES_URL)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(IMAGES_URL)
        }
        Err(err) => {
            log::error!("Failed to add image: {err}");
            FlashMessage::error("Failed to add the image.").send();
            redirect(IMAGES_URL)
        }
    }
}

#[post("/images/{image_id}/delete")]
pub async fn delete_image(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let image_id = path.into_inner();

    match remove_image(repo.get_ref(), &user, image_id) {
        Ok(()) => {
            FlashMessage::success("Image deleted.").send();
            redirect(IMAGES_URL)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Image not found.").send();
            redirect(IMAGES_URL)
        }
        Err(err) => {
            log::error!("Failed to delete image {image_id}: {err}");
            FlashMessage::error("Failed to delete the image.").send();
            redirect(IMAGES_URL)
        }
    }
}
