use actix_web::{HttpResponse, Responder, get, web};

use crate::models::config::StorefrontConfig;
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::catalog::CatalogError;
use crate::services::pages::{load_checkout_product, load_site_context};

#[get("/v1/products/{product_id}")]
/// Return the JSON record the checkout crawler validates cart items against.
///
/// Unpublished and unknown products answer `404 Not Found`.
pub async fn api_v1_product(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    config: web::Data<StorefrontConfig>,
) -> impl Responder {
    let product_id = path.into_inner();

    let result = load_site_context(repo.get_ref(), config.site_id)
        .and_then(|site| load_checkout_product(repo.get_ref(), &site, product_id));

    match result {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(CatalogError::Service(ServiceError::NotFound)) => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to load product {product_id} for checkout: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
