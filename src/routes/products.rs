use actix_web::{Responder, post, web};
use actix_web_flash_messages::FlashMessage;
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::redirect;

use crate::forms::custom_fields::AddCustomFieldForm;
use crate::forms::images::AddImageLinkForm;
use crate::forms::products::{AddProductForm, EditProductForm};
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::products::{
    add_product_custom_field, add_product_image, create_product, modify_product,
};

fn editor_url(product_id: i32) -> String {
    format!("/admin/pages/{product_id}")
}

#[post("/products/add")]
pub async fn add_product(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddProductForm>,
) -> impl Responder {
    let parent_url = editor_url(form.parent_id);

    match create_product(repo.get_ref(), &user, form) {
        Ok(product) => {
            FlashMessage::success(format!("Product «{}» created.", product.title)).send();
            redirect(&editor_url(product.id))
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&parent_url)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Parent page not found.").send();
            redirect("/admin/")
        }
        Err(ServiceError::Conflict) => {
            FlashMessage::error("A page with this address already exists.").send();
            redirect(&parent_url)
        }
        Err(err) => {
            log::error!("Failed to create product: {err}");
            FlashMessage::error("Failed to create the product.").send();
            redirect(&parent_url)
        }
    }
}

#[post("/products/{product_id}/edit")]
pub async fn edit_product(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<EditProductForm>,
) -> impl Responder {
    let product_id = path.into_inner();

    match modify_product(repo.get_ref(), &user, product_id, form) {
        Ok(product) => {
            FlashMessage::success(format!("Product «{}» saved.", product.title)).send();
            redirect(&editor_url(product.id))
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&editor_url(product_id))
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Product not found.").send();
            redirect("/admin/")
        }
        Err(err) => {
            log::error!("Failed to update product {product_id}: {err}");
            FlashMessage::error("Failed to save the product.").send();
            redirect(&editor_url(product_id))
        }
    }
}

#[post("/products/{product_id}/fields/add")]
pub async fn add_product_field(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddCustomFieldForm>,
) -> impl Responder {
    let product_id = path.into_inner();

    match add_product_custom_field(repo.get_ref(), &user, product_id, form) {
        Ok(field) => {
            FlashMessage::success(format!("Field «{}» added.", field.name)).send();
            redirect(&editor_url(product_id))
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&editor_url(product_id))
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Product not found.").send();
            redirect("/admin/")
        }
        Err(err) => {
            log::error!("Failed to add field to product {product_id}: {err}");
            FlashMessage::error("Failed to add the field.").send();
            redirect(&editor_url(product_id))
        }
    }
}

#[post("/products/{product_id}/images/add")]
pub async fn add_product_gallery_image(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddImageLinkForm>,
) -> impl Responder {
    let product_id = path.into_inner();

    match add_product_image(repo.get_ref(), &user, product_id, form) {
        Ok(_) => {
            FlashMessage::success("Image added.").send();
            redirect(&editor_url(product_id))
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&editor_url(product_id))
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Product not found.").send();
            redirect("/admin/")
        }
        Err(err) => {
            log::error!("Failed to add image to product {product_id}: {err}");
            FlashMessage::error("Failed to add the image.").send();
            redirect(&editor_url(product_id))
        }
    }
}
