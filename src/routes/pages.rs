use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{base_context, redirect, render_template};
use tera::Tera;

use crate::forms::pages::{AddPageForm, CatalogRootForm};
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::tree::{
    assign_catalog_root, create_page, load_page_editor, load_page_tree, remove_page,
    set_page_visibility,
};

const PAGES_URL: &str = "/admin/";

fn page_url(page_id: i32) -> String {
    format!("/admin/pages/{page_id}")
}

#[get("/")]
pub async fn show_pages(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match load_page_tree(repo.get_ref(), &user) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "pages",
                &server_config.auth_service_url,
            );
            context.insert("page_tree", &data.tree);
            context.insert("pages", &data.pages);
            render_template(&tera, "admin/pages.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to list pages: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/pages/{page_id}")]
pub async fn show_page_editor(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let page_id = path.into_inner();

    match load_page_editor(repo.get_ref(), &user, page_id) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "pages",
                &server_config.auth_service_url,
            );
            context.insert("page", &data.page);
            context.insert("pages", &data.pages);
            context.insert("product_editor", &data.product);
            context.insert("collection_editor", &data.collection);
            render_template(&tera, "admin/page.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Page not found.").send();
            redirect(PAGES_URL)
        }
        Err(err) => {
            log::error!("Failed to load page {page_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/pages/add")]
pub async fn add_page(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddPageForm>,
) -> impl Responder {
    match create_page(repo.get_ref(), &user, form) {
        Ok(page) => {
            FlashMessage::success(format!("Page «{}» created.", page.title)).send();
            redirect(&page_url(page.id))
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(PAGES_URL)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Parent or catalog root page not found.").send();
            redirect(PAGES_URL)
        }
        Err(ServiceError::Conflict) => {
            FlashMessage::error("A page with this address already exists.").send();
            redirect(PAGES_URL)
        }
        Err(err) => {
            log::error!("Failed to create page: {err}");
            FlashMessage::error("Failed to create the page.").send();
            redirect(PAGES_URL)
        }
    }
}

#[post("/pages/{page_id}/publish")]
pub async fn publish_page(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    change_visibility(path.into_inner(), &user, &repo, true)
}

#[post("/pages/{page_id}/unpublish")]
pub async fn unpublish_page(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    change_visibility(path.into_inner(), &user, &repo, false)
}

fn change_visibility(
    page_id: i32,
    user: &AuthenticatedUser,
    repo: &DieselRepository,
    live: bool,
) -> HttpResponse {
    match set_page_visibility(repo, user, page_id, live) {
        Ok(page) => {
            let message = if page.live {
                format!("Page «{}» published.", page.title)
            } else {
                format!("Page «{}» unpublished.", page.title)
            };
            FlashMessage::success(message).send();
            redirect(&page_url(page.id))
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Page not found.").send();
            redirect(PAGES_URL)
        }
        Err(err) => {
            log::error!("Failed to change visibility of page {page_id}: {err}");
            FlashMessage::error("Failed to change the page.").send();
            redirect(&page_url(page_id))
        }
    }
}

#[post("/pages/{page_id}/catalog-root")]
pub async fn set_catalog_root(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<CatalogRootForm>,
) -> impl Responder {
    let page_id = path.into_inner();

    match assign_catalog_root(repo.get_ref(), &user, page_id, form) {
        Ok(_) => {
            FlashMessage::success("Catalog root saved.").send();
            redirect(&page_url(page_id))
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&page_url(page_id))
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Page not found.").send();
            redirect(&page_url(page_id))
        }
        Err(err) => {
            log::error!("Failed to set catalog root of page {page_id}: {err}");
            FlashMessage::error("Failed to save the catalog root.").send();
            redirect(&page_url(page_id))
        }
    }
}

#[post("/pages/{page_id}/delete")]
pub async fn delete_page(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let page_id = path.into_inner();

    match remove_page(repo.get_ref(), &user, page_id) {
        Ok(()) => {
            FlashMessage::success("Page deleted.").send();
            redirect(PAGES_URL)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Page not found.").send();
            redirect(PAGES_URL)
        }
        Err(err) => {
            log::error!("Failed to delete page {page_id}: {err}");
            FlashMessage::error("Failed to delete the page.").send();
            redirect(PAGES_URL)
        }
    }
}
