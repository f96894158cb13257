use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::page::{NewPage as DomainNewPage, Page as DomainPage};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::pages)]
pub struct Page {
    pub id: i32,
    pub site_id: i32,
    pub parent_id: Option<i32>,
    pub path: String,
    pub depth: i32,
    pub title: String,
    pub slug: String,
    pub url_path: String,
    pub page_type: String,
    pub live: bool,
    pub catalog_root_id: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::pages)]
pub struct NewPage<'a> {
    pub site_id: i32,
    pub parent_id: Option<i32>,
    pub path: String,
    pub depth: i32,
    pub title: &'a str,
    pub slug: &'a str,
    pub url_path: String,
    pub page_type: &'a str,
    pub live: bool,
    pub catalog_root_id: Option<i32>,
    pub updated_at: NaiveDateTime,
}

impl<'a> NewPage<'a> {
    /// Builds the insertable row once the tree position has been allocated.
    pub fn from_domain(
        value: &'a DomainNewPage,
        path: String,
        depth: i32,
        url_path: String,
    ) -> Self {
        Self {
            site_id: value.site_id,
            parent_id: value.parent_id,
            path,
            depth,
            title: value.title.as_str(),
            slug: value.slug.as_str(),
            url_path,
            page_type: value.page_type.as_str(),
            live: value.live,
            catalog_root_id: value.catalog_root_id,
            updated_at: value.updated_at,
        }
    }
}

impl From<Page> for DomainPage {
    fn from(value: Page) -> Self {
        Self {
            id: value.id,
            site_id: value.site_id,
            parent_id: value.parent_id,
            path: value.path,
            depth: value.depth,
            title: value.title,
            slug: value.slug,
            url_path: value.url_path,
            page_type: value.page_type.as_str().into(),
            live: value.live,
            catalog_root_id: value.catalog_root_id,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}
