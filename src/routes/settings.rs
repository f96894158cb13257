use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{base_context, redirect, render_template};
use tera::Tera;

use crate::forms::settings::SnipcartSettingsForm;
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::settings::{load_settings, save_settings};

const SETTINGS_URL: &str = "/admin/settings";

#[get("/settings")]
pub async fn show_settings(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<CommonServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match load_settings(repo.get_ref(), &user) {
        Ok(settings) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "settings",
                &server_config.auth_service_url,
            );
            context.insert("settings", &settings);
            render_template(&tera, "admin/settings.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(err) => {
            log::error!("Failed to load settings: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/settings")]
pub async fn update_settings(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<SnipcartSettingsForm>,
) -> impl Responder {
    match save_settings(repo.get_ref(), &user, form) {
        Ok(_) => {
            FlashMessage::success("Settings saved.").send();
            redirect(SETTINGS_URL)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/na")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(SETTINGS_URL)
        }
        Err(err) => {
            log::error!("Failed to save settings: {err}");
            FlashMessage::error("Failed to save the settings.").send();
            redirect(SETTINGS_URL)
        }
    }
}
