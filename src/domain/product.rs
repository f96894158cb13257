use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::image::Image;
use crate::domain::page::{NewPage, PageType};

/// Number of decimal places kept for product prices.
pub const PRICE_SCALE: u32 = 2;

/// Domain representation of a product page together with its catalog data.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Product {
    /// Identifier of the backing page.
    pub id: i32,
    /// Owning site identifier.
    pub site_id: i32,
    /// Parent page in the tree.
    pub parent_id: Option<i32>,
    /// Product title, taken from the page.
    pub title: String,
    /// URL segment of the product page.
    pub slug: String,
    /// Full URL path of the product page.
    pub url_path: String,
    /// Whether the product page is published.
    pub live: bool,
    /// Stock keeping unit identifier.
    pub sku: String,
    /// Optional short description shown in listings.
    pub short_description: Option<String>,
    /// Price represented in the smallest currency unit (for example cents).
    pub price_cents: i64,
    /// Optional cover image of the product.
    pub image_id: Option<i32>,
    /// Cover image record, empty when unset or deleted.
    pub image: Option<Image>,
    /// Optional collection the product belongs to.
    pub collection_id: Option<i32>,
}

impl Product {
    /// Price as a decimal with two fractional digits.
    pub fn price(&self) -> Decimal {
        Decimal::new(self.price_cents, PRICE_SCALE)
    }
}

/// Payload required to create a product page.
#[derive(Debug, Clone)]
pub struct NewProduct {
    /// Page created for the product.
    pub page: NewPage,
    /// Stock keeping unit identifier.
    pub sku: String,
    /// Optional short description shown in listings.
    pub short_description: Option<String>,
    /// Price represented in the smallest currency unit.
    pub price_cents: i64,
    /// Optional cover image of the product.
    pub image_id: Option<i32>,
    /// Optional collection the product belongs to.
    pub collection_id: Option<i32>,
}

impl NewProduct {
    /// Build a product payload placed beneath `parent_id`.
    pub fn new(
        site_id: i32,
        parent_id: i32,
        title: impl Into<String>,
        slug: impl Into<String>,
        sku: impl Into<String>,
        price_cents: i64,
    ) -> Self {
        Self {
            page: NewPage::new(site_id, title, slug, PageType::Product).with_parent_id(parent_id),
            sku: sku.into(),
            short_description: None,
            price_cents,
            image_id: None,
            collection_id: None,
        }
    }

    /// Attach a short description.
    pub fn with_short_description(mut self, short_description: impl Into<String>) -> Self {
        self.short_description = Some(short_description.into());
        self
    }

    /// Attach a cover image.
    pub fn with_image_id(mut self, image_id: i32) -> Self {
        self.image_id = Some(image_id);
        self
    }

    /// Assign the product to a collection.
    pub fn with_collection_id(mut self, collection_id: i32) -> Self {
        self.collection_id = Some(collection_id);
        self
    }

    /// Publish the product page on creation.
    pub fn live(mut self) -> Self {
        self.page = self.page.live();
        self
    }
}

/// Patch data applied when updating an existing product.
#[derive(Debug, Clone)]
pub struct UpdateProduct {
    /// Stock keeping unit identifier.
    pub sku: String,
    /// Short description; `None` clears it.
    pub short_description: Option<String>,
    /// Price represented in the smallest currency unit.
    pub price_cents: i64,
    /// Cover image; `None` clears it.
    pub image_id: Option<i32>,
    /// Collection assignment; `None` clears it.
    pub collection_id: Option<i32>,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

impl UpdateProduct {
    /// Build a product update payload with the supplied values.
    pub fn new(sku: impl Into<String>, price_cents: i64) -> Self {
        Self {
            sku: sku.into(),
            short_description: None,
            price_cents,
            image_id: None,
            collection_id: None,
            updated_at: chrono::Local::now().naive_utc(),
        }
    }

    /// Set the short description.
    pub fn short_description(mut self, short_description: Option<impl Into<String>>) -> Self {
        self.short_description = short_description.map(|value| value.into());
        self
    }

    /// Set the cover image.
    pub fn image_id(mut self, image_id: Option<i32>) -> Self {
        self.image_id = image_id;
        self
    }

    /// Set the collection assignment.
    pub fn collection_id(mut self, collection_id: Option<i32>) -> Self {
        self.collection_id = collection_id;
        self
    }
}

/// Query definition used to list product pages of a site in tree order.
#[derive(Debug, Clone)]
pub struct ProductListQuery {
    /// Owning site identifier.
    pub site_id: i32,
    /// Restrict the results to direct children of this page.
    pub parent_id: Option<i32>,
    /// Restrict the results to products assigned to this collection.
    pub collection_id: Option<i32>,
    /// Exclude unpublished product pages.
    pub live_only: bool,
}

impl ProductListQuery {
    /// Construct a query that targets all products of `site_id`.
    pub fn new(site_id: i32) -> Self {
        Self {
            site_id,
            parent_id: None,
            collection_id: None,
            live_only: false,
        }
    }

    /// Only return products placed directly beneath `parent_id`.
    pub fn child_of(mut self, parent_id: i32) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Only return products assigned to `collection_id`.
    pub fn in_collection(mut self, collection_id: i32) -> Self {
        self.collection_id = Some(collection_id);
        self
    }

    /// Only return published products.
    pub fn live(mut self) -> Self {
        self.live_only = true;
        self
    }
}
