use diesel::prelude::*;

use crate::domain::collection::{
    NewProductCollection as DomainNewProductCollection,
    ProductCollection as DomainProductCollection,
};
use crate::models::page::Page;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::product_collections)]
#[diesel(primary_key(page_id))]
pub struct ProductCollection {
    pub page_id: i32,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::product_collections)]
pub struct NewProductCollection<'a> {
    pub page_id: i32,
    pub name: &'a str,
    pub description: Option<&'a str>,
}

impl<'a> NewProductCollection<'a> {
    pub fn from_domain(page_id: i32, value: &'a DomainNewProductCollection) -> Self {
        Self {
            page_id,
            name: value.name.as_str(),
            description: value.description.as_deref(),
        }
    }
}

impl From<(ProductCollection, Page)> for DomainProductCollection {
    fn from((collection, page): (ProductCollection, Page)) -> Self {
        Self {
            id: page.id,
            site_id: page.site_id,
            parent_id: page.parent_id,
            title: page.title,
            slug: page.slug,
            url_path: page.url_path,
            live: page.live,
            name: collection.name,
            description: collection.description,
        }
    }
}
