use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// External image asset that products and collections link to.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Image {
    /// Unique identifier of the image.
    pub id: i32,
    /// Owning site identifier.
    pub site_id: i32,
    /// Alternative text of the image.
    pub title: String,
    /// Location of the image file.
    pub url: String,
    /// Timestamp for when the image record was created.
    pub created_at: NaiveDateTime,
}

/// Payload required to register an image.
#[derive(Debug, Clone)]
pub struct NewImage {
    pub site_id: i32,
    pub title: String,
    pub url: String,
}

impl NewImage {
    pub fn new(site_id: i32, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            site_id,
            title: title.into(),
            url: url.into(),
        }
    }
}

/// Ordered link between a product and an image.
///
/// The image is `None` once the referenced asset has been deleted; the link
/// itself survives until its product goes away.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ProductImage {
    pub id: i32,
    pub product_id: i32,
    pub sort_order: i32,
    pub image: Option<Image>,
}

/// Ordered link between a product collection and an image.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CollectionImage {
    pub id: i32,
    pub collection_id: i32,
    pub sort_order: i32,
    pub image: Option<Image>,
}

/// Payload required to append an image link to a product or collection.
#[derive(Debug, Clone)]
pub struct NewImageLink {
    /// Identifier of the owning product or collection page.
    pub owner_id: i32,
    /// Linked image, if any.
    pub image_id: Option<i32>,
}

impl NewImageLink {
    pub fn new(owner_id: i32, image_id: i32) -> Self {
        Self {
            owner_id,
            image_id: Some(image_id),
        }
    }
}
