pub mod api;
pub mod collections;
pub mod images;
pub mod pages;
pub mod products;
pub mod settings;
pub mod storefront;
