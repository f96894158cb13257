use actix_web::{HttpResponse, Responder, get, web};
use pushkind_common::routes::render_template;
use tera::{Context, Tera};

use crate::models::config::StorefrontConfig;
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::catalog::CatalogError;
use crate::services::pages::{
    PageData, SiteContext, checkout_product_url, load_page, load_site_context,
};

/// Renders any live page of the configured site by its URL path.
#[get("/{url_path:.*}")]
pub async fn show_page(
    path: web::Path<String>,
    repo: web::Data<DieselRepository>,
    config: web::Data<StorefrontConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let url_path = path.into_inner();

    let site = match load_site_context(repo.get_ref(), config.site_id) {
        Ok(site) => site,
        Err(err) => {
            log::error!("Failed to load settings of site {}: {err}", config.site_id);
            return HttpResponse::InternalServerError().finish();
        }
    };

    match load_page(repo.get_ref(), &site, &url_path) {
        Ok(data) => {
            let context = page_context(&site, &data);
            render_template(&tera, data.template(), &context)
        }
        Err(CatalogError::Service(ServiceError::NotFound)) => HttpResponse::NotFound().finish(),
        Err(err @ CatalogError::MissingCatalogRoot { .. }) => {
            log::error!("Site {} is misconfigured at `{url_path}`: {err}", site.site_id);
            HttpResponse::InternalServerError().finish()
        }
        Err(err) => {
            log::error!("Failed to render `{url_path}`: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

fn page_context(site: &SiteContext, data: &PageData) -> Context {
    let mut context = Context::new();
    context.insert("page", data.page());
    context.insert("snipcart_api_key", &site.snipcart_api_key);

    match data {
        PageData::Home(catalog) | PageData::Shop(catalog) => {
            context.insert("products", &catalog.products);
            context.insert("collections", &catalog.collections);
        }
        PageData::Product(product) => {
            context.insert("product", &product.product);
            context.insert("price", &product.price);
            context.insert("custom_fields", &product.custom_fields);
            context.insert("product_images", &product.product_images);
            context.insert("collection", &product.collection);
            context.insert("checkout_url", &checkout_product_url(product.product.id));
        }
        PageData::Collection(collection) => {
            context.insert("collection", &collection.collection);
            context.insert("custom_fields", &collection.custom_fields);
            context.insert("collection_images", &collection.collection_images);
            context.insert("products", &collection.products);
        }
        PageData::Generic(_) => {}
    }

    context
}
