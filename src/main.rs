use std::env;

use actix_files::Files;
use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use dotenvy::dotenv;
use pushkind_common::db::establish_connection_pool;
use pushkind_common::middleware::RedirectUnauthorized;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{logout, not_assigned};
use tera::Tera;

use pushkind_storefront::models::config::StorefrontConfig;
use pushkind_storefront::repository::DieselRepository;
use pushkind_storefront::routes::api::api_v1_product;
use pushkind_storefront::routes::collections::{
    add_collection, add_collection_field, add_collection_gallery_image,
};
use pushkind_storefront::routes::images::{add_image, delete_image, show_images};
use pushkind_storefront::routes::pages::{
    add_page, delete_page, publish_page, set_catalog_root, show_page_editor, show_pages,
    unpublish_page,
};
use pushkind_storefront::routes::products::{
    add_product, add_product_field, add_product_gallery_image, edit_product,
};
use pushkind_storefront::routes::settings::{show_settings, update_settings};
use pushkind_storefront::routes::storefront::show_page;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let database_url = env::var("DATABASE_URL").unwrap_or("app.db".to_string());
    let port = env::var("PORT").unwrap_or("8080".to_string());
    let port = port.parse::<u16>().unwrap_or(8080);
    let address = env::var("ADDRESS").unwrap_or("127.0.0.1".to_string());

    let secret = env::var("SECRET_KEY");
    let secret_key = match &secret {
        Ok(key) => Key::from(key.as_bytes()),
        Err(_) => Key::generate(),
    };

    let auth_service_url = env::var("AUTH_SERVICE_URL");
    let auth_service_url = match auth_service_url {
        Ok(auth_service_url) => auth_service_url,
        Err(_) => {
            log::error!("AUTH_SERVICE_URL environment variable not set");
            std::process::exit(1);
        }
    };

    let common_config = CommonServerConfig {
        secret: secret.unwrap_or_default(),
        auth_service_url,
    };

    let site_id = match env::var("SITE_ID").map(|value| value.parse::<i32>()) {
        Ok(Ok(site_id)) => site_id,
        Ok(Err(e)) => {
            log::error!("SITE_ID must be a number: {e}");
            std::process::exit(1);
        }
        Err(_) => 1,
    };
    let storefront_config = StorefrontConfig { site_id };

    let domain = env::var("DOMAIN").unwrap_or("localhost".to_string());

    let pool = match establish_connection_pool(&database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = match Tera::new("templates/**/*") {
        Ok(t) => t,
        Err(e) => {
            log::error!("Parsing error(s): {e}");
            std::process::exit(1);
        }
    };

    log::info!("Serving site {site_id} on {address}:{port}");

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(format!(".{domain}")))
                    .build(),
            )
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(not_assigned)
            .service(logout)
            .service(web::scope("/api").service(api_v1_product))
            .service(
                web::scope("/admin")
                    .wrap(RedirectUnauthorized)
                    .service(show_pages)
                    .service(show_page_editor)
                    .service(add_page)
                    .service(publish_page)
                    .service(unpublish_page)
                    .service(set_catalog_root)
                    .service(delete_page)
                    .service(add_product)
                    .service(edit_product)
                    .service(add_product_field)
                    .service(add_product_gallery_image)
                    .service(add_collection)
                    .service(add_collection_field)
                    .service(add_collection_gallery_image)
                    .service(show_images)
                    .service(add_image)
                    .service(delete_image)
                    .service(show_settings)
                    .service(update_settings),
            )
            // Catch-all, must stay last.
            .service(show_page)
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(common_config.clone()))
            .app_data(web::Data::new(storefront_config.clone()))
    })
    .bind((address, port))?
    .run()
    .await
}
