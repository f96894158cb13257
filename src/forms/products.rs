use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::product::{NewProduct, PRICE_SCALE, UpdateProduct};
use crate::forms::pages::{PageFormError, PageHeading};
use crate::forms::{TEXT_MAX_LEN, parse_optional_id, sanitize_multiline_text};

/// Largest number of digits a price may carry, fractional ones included.
const PRICE_MAX_DIGITS: usize = 10;

/// Result type returned by the product form helpers.
pub type ProductFormResult<T> = Result<T, ProductFormError>;

/// Errors that can occur while processing product forms.
#[derive(Debug, Error)]
pub enum ProductFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// Title or slug problems.
    #[error(transparent)]
    Page(#[from] PageFormError),
    #[error("SKU cannot be empty")]
    EmptySku,
    /// The price is not a non-negative amount with at most two decimals.
    #[error("invalid price `{value}`")]
    InvalidPrice { value: String },
    #[error("invalid {field} `{value}`")]
    InvalidIdentifier { field: &'static str, value: String },
}

/// Form payload emitted when submitting the "Add product" form.
#[derive(Debug, Deserialize, Validate)]
pub struct AddProductForm {
    /// Page the product is placed beneath.
    #[validate(range(min = 1))]
    pub parent_id: i32,
    #[validate(length(min = 1, max = TEXT_MAX_LEN))]
    pub title: String,
    #[validate(length(max = TEXT_MAX_LEN))]
    #[serde(default)]
    pub slug: Option<String>,
    #[validate(length(min = 1, max = TEXT_MAX_LEN))]
    pub sku: String,
    /// Decimal price such as `12.50`.
    pub price: String,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub image_id: Option<String>,
    #[serde(default)]
    pub collection_id: Option<String>,
    #[serde(default)]
    pub live: bool,
}

impl AddProductForm {
    /// Validates and sanitizes the payload into a domain `NewProduct`.
    pub fn into_new_product(self, site_id: i32) -> ProductFormResult<NewProduct> {
        self.validate()?;

        let PageHeading { title, slug } = PageHeading::parse(&self.title, self.slug.as_deref())?;
        let sku = sanitize_sku(&self.sku)?;
        let price_cents = parse_price_cents(&self.price)?;
        let short_description = sanitize_description(self.short_description.as_deref());
        let image_id = parse_reference(self.image_id.as_deref(), "image")?;
        let collection_id = parse_reference(self.collection_id.as_deref(), "collection")?;

        let mut new_product =
            NewProduct::new(site_id, self.parent_id, title, slug, sku, price_cents);
        if let Some(short_description) = short_description {
            new_product = new_product.with_short_description(short_description);
        }
        if let Some(image_id) = image_id {
            new_product = new_product.with_image_id(image_id);
        }
        if let Some(collection_id) = collection_id {
            new_product = new_product.with_collection_id(collection_id);
        }
        if self.live {
            new_product = new_product.live();
        }

        Ok(new_product)
    }
}

/// Form payload emitted when editing a product's catalog data.
#[derive(Debug, Deserialize, Validate)]
pub struct EditProductForm {
    #[validate(length(min = 1, max = TEXT_MAX_LEN))]
    pub sku: String,
    pub price: String,
    /// Blank clears the description.
    #[serde(default)]
    pub short_description: Option<String>,
    /// Blank clears the cover image.
    #[serde(default)]
    pub image_id: Option<String>,
    /// Blank removes the product from its collection.
    #[serde(default)]
    pub collection_id: Option<String>,
}

impl EditProductForm {
    /// Validates and sanitizes the payload into a domain `UpdateProduct`.
    pub fn into_update_product(self) -> ProductFormResult<UpdateProduct> {
        self.validate()?;

        let sku = sanitize_sku(&self.sku)?;
        let price_cents = parse_price_cents(&self.price)?;

        Ok(UpdateProduct::new(sku, price_cents)
            .short_description(sanitize_description(self.short_description.as_deref()))
            .image_id(parse_reference(self.image_id.as_deref(), "image")?)
            .collection_id(parse_reference(
                self.collection_id.as_deref(),
                "collection",
            )?))
    }
}

/// Parses a submitted price into cents.
///
/// Accepts a non-negative decimal with at most two fractional digits and ten
/// digits overall; a comma is accepted as the decimal separator.
pub fn parse_price_cents(input: &str) -> ProductFormResult<i64> {
    let invalid = || ProductFormError::InvalidPrice {
        value: input.trim().to_string(),
    };

    let normalized = input.trim().replace(',', ".");
    if normalized.is_empty() {
        return Err(invalid());
    }

    let price = Decimal::from_str(&normalized).map_err(|_| invalid())?;
    if price.is_sign_negative() || price.scale() > PRICE_SCALE {
        return Err(invalid());
    }

    let mut scaled = price;
    scaled.rescale(PRICE_SCALE);
    let digits = scaled.mantissa().unsigned_abs().to_string().len();
    if digits > PRICE_MAX_DIGITS {
        return Err(invalid());
    }

    i64::try_from(scaled.mantissa()).map_err(|_| invalid())
}

fn sanitize_sku(input: &str) -> ProductFormResult<String> {
    let sku: String = input.trim().chars().filter(|ch| !ch.is_control()).collect();
    if sku.is_empty() {
        return Err(ProductFormError::EmptySku);
    }
    Ok(sku)
}

fn sanitize_description(input: Option<&str>) -> Option<String> {
    input
        .map(sanitize_multiline_text)
        .filter(|value| !value.is_empty())
}

fn parse_reference(value: Option<&str>, field: &'static str) -> ProductFormResult<Option<i32>> {
    parse_optional_id(value).map_err(|value| ProductFormError::InvalidIdentifier { field, value })
}
