//! Storefront pages for a small shop: a per-site page tree holding products
//! and collections, rendered with a Snipcart checkout.

pub mod domain;
pub mod forms;
pub mod models;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;

/// Role required for the `/admin` editing routes.
pub const SERVICE_ACCESS_ROLE: &str = "storefront_editor";
