pub use pushkind_common::services::errors::{ServiceError, ServiceResult};

pub mod catalog;
pub mod collections;
pub mod images;
pub mod pages;
pub mod products;
pub mod settings;
pub mod tree;
