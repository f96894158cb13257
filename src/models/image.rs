use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::image::{
    CollectionImage as DomainCollectionImage, Image as DomainImage, NewImage as DomainNewImage,
    ProductImage as DomainProductImage,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::images)]
pub struct Image {
    pub id: i32,
    pub site_id: i32,
    pub title: String,
    pub url: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::images)]
pub struct NewImage<'a> {
    pub site_id: i32,
    pub title: &'a str,
    pub url: &'a str,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::product_images)]
pub struct ProductImage {
    pub id: i32,
    pub product_id: i32,
    pub sort_order: i32,
    pub image_id: Option<i32>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::product_images)]
pub struct NewProductImage {
    pub product_id: i32,
    pub sort_order: i32,
    pub image_id: Option<i32>,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::collection_images)]
pub struct CollectionImage {
    pub id: i32,
    pub collection_id: i32,
    pub sort_order: i32,
    pub image_id: Option<i32>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::collection_images)]
pub struct NewCollectionImage {
    pub collection_id: i32,
    pub sort_order: i32,
    pub image_id: Option<i32>,
}

impl From<Image> for DomainImage {
    fn from(value: Image) -> Self {
        Self {
            id: value.id,
            site_id: value.site_id,
            title: value.title,
            url: value.url,
            created_at: value.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewImage> for NewImage<'a> {
    fn from(value: &'a DomainNewImage) -> Self {
        Self {
            site_id: value.site_id,
            title: value.title.as_str(),
            url: value.url.as_str(),
        }
    }
}

impl From<(ProductImage, Option<Image>)> for DomainProductImage {
    fn from((link, image): (ProductImage, Option<Image>)) -> Self {
        Self {
            id: link.id,
            product_id: link.product_id,
            sort_order: link.sort_order,
            image: image.map(DomainImage::from),
        }
    }
}

impl From<(CollectionImage, Option<Image>)> for DomainCollectionImage {
    fn from((link, image): (CollectionImage, Option<Image>)) -> Self {
        Self {
            id: link.id,
            collection_id: link.collection_id,
            sort_order: link.sort_order,
            image: image.map(DomainImage::from),
        }
    }
}
