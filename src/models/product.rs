use diesel::prelude::*;

use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, UpdateProduct as DomainUpdateProduct,
};
use crate::models::image::Image;
use crate::models::page::Page;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
#[diesel(primary_key(page_id))]
pub struct Product {
    pub page_id: i32,
    pub sku: String,
    pub short_description: Option<String>,
    pub price_cents: i64,
    pub image_id: Option<i32>,
    pub collection_id: Option<i32>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct<'a> {
    pub page_id: i32,
    pub sku: &'a str,
    pub short_description: Option<&'a str>,
    pub price_cents: i64,
    pub image_id: Option<i32>,
    pub collection_id: Option<i32>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::products)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateProduct<'a> {
    pub sku: &'a str,
    pub short_description: Option<&'a str>,
    pub price_cents: i64,
    pub image_id: Option<i32>,
    pub collection_id: Option<i32>,
}

impl<'a> NewProduct<'a> {
    pub fn from_domain(page_id: i32, value: &'a DomainNewProduct) -> Self {
        Self {
            page_id,
            sku: value.sku.as_str(),
            short_description: value.short_description.as_deref(),
            price_cents: value.price_cents,
            image_id: value.image_id,
            collection_id: value.collection_id,
        }
    }
}

impl<'a> From<&'a DomainUpdateProduct> for UpdateProduct<'a> {
    fn from(value: &'a DomainUpdateProduct) -> Self {
        Self {
            sku: value.sku.as_str(),
            short_description: value.short_description.as_deref(),
            price_cents: value.price_cents,
            image_id: value.image_id,
            collection_id: value.collection_id,
        }
    }
}

impl From<(Product, Page, Option<Image>)> for DomainProduct {
    fn from((product, page, image): (Product, Page, Option<Image>)) -> Self {
        Self {
            id: page.id,
            site_id: page.site_id,
            parent_id: page.parent_id,
            title: page.title,
            slug: page.slug,
            url_path: page.url_path,
            live: page.live,
            sku: product.sku,
            short_description: product.short_description,
            price_cents: product.price_cents,
            image_id: product.image_id,
            image: image.map(Into::into),
            collection_id: product.collection_id,
        }
    }
}
