use serde::{Deserialize, Serialize};

use crate::domain::page::{NewPage, PageType};

/// Domain representation of a product collection page.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ProductCollection {
    /// Identifier of the backing page.
    pub id: i32,
    /// Owning site identifier.
    pub site_id: i32,
    /// Parent page in the tree.
    pub parent_id: Option<i32>,
    /// Page title.
    pub title: String,
    /// URL segment of the collection page.
    pub slug: String,
    /// Full URL path of the collection page.
    pub url_path: String,
    /// Whether the collection page is published.
    pub live: bool,
    /// Unique collection name.
    pub name: String,
    /// Optional longer description.
    pub description: Option<String>,
}

/// Payload required to create a collection page.
#[derive(Debug, Clone)]
pub struct NewProductCollection {
    /// Page created for the collection.
    pub page: NewPage,
    /// Unique collection name.
    pub name: String,
    /// Optional longer description.
    pub description: Option<String>,
}

impl NewProductCollection {
    /// Build a collection payload placed beneath `parent_id`.
    pub fn new(
        site_id: i32,
        parent_id: i32,
        title: impl Into<String>,
        slug: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            page: NewPage::new(site_id, title, slug, PageType::Collection)
                .with_parent_id(parent_id),
            name: name.into(),
            description: None,
        }
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Publish the collection page on creation.
    pub fn live(mut self) -> Self {
        self.page = self.page.live();
        self
    }
}

/// Query definition used to list collection pages of a site in tree order.
#[derive(Debug, Clone)]
pub struct CollectionListQuery {
    /// Owning site identifier.
    pub site_id: i32,
    /// Restrict the results to direct children of this page.
    pub parent_id: Option<i32>,
    /// Exclude unpublished collection pages.
    pub live_only: bool,
}

impl CollectionListQuery {
    /// Construct a query that targets all collections of `site_id`.
    pub fn new(site_id: i32) -> Self {
        Self {
            site_id,
            parent_id: None,
            live_only: false,
        }
    }

    /// Only return collections placed directly beneath `parent_id`.
    pub fn child_of(mut self, parent_id: i32) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Only return published collections.
    pub fn live(mut self) -> Self {
        self.live_only = true;
        self
    }
}
