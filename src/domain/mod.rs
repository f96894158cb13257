pub mod collection;
pub mod custom_field;
pub mod image;
pub mod page;
pub mod product;
pub mod settings;
