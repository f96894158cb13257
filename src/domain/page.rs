use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// URL path of a site's root page.
pub const ROOT_URL_PATH: &str = "/";

/// Kind of content a page node carries.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PageType {
    /// Site landing page listing the catalog of its first descendant.
    Home,
    /// Shop landing page listing the catalog of its first sibling.
    Shop,
    /// Page backed by a product record.
    Product,
    /// Page backed by a product collection record.
    Collection,
    /// Plain content page without catalog behavior.
    Generic,
}

impl PageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageType::Home => "home",
            PageType::Shop => "shop",
            PageType::Product => "product",
            PageType::Collection => "collection",
            PageType::Generic => "generic",
        }
    }
}

impl From<&str> for PageType {
    fn from(value: &str) -> Self {
        match value {
            "home" => PageType::Home,
            "shop" => PageType::Shop,
            "product" => PageType::Product,
            "collection" => PageType::Collection,
            _ => PageType::Generic,
        }
    }
}

impl From<PageType> for &'static str {
    fn from(value: PageType) -> Self {
        value.as_str()
    }
}

/// Domain representation of a node in a site's page tree.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Page {
    /// Unique identifier of the page.
    pub id: i32,
    /// Owning site identifier.
    pub site_id: i32,
    /// Parent page, `None` for the site root.
    pub parent_id: Option<i32>,
    /// Materialized tree path; ordering by it yields tree order.
    pub path: String,
    /// Depth in the tree, the root sits at depth 1.
    pub depth: i32,
    /// Title shown in listings and headings.
    pub title: String,
    /// URL segment of the page.
    pub slug: String,
    /// Full URL path of the page within its site.
    pub url_path: String,
    /// Content type carried by the page.
    pub page_type: PageType,
    /// Whether the page is published.
    pub live: bool,
    /// Explicit catalog container used by shop and home pages.
    pub catalog_root_id: Option<i32>,
    /// Timestamp for when the page record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the page record.
    pub updated_at: NaiveDateTime,
}

impl Page {
    /// URL path a child with `slug` receives beneath this page.
    pub fn child_url_path(&self, slug: &str) -> String {
        format!("{}{slug}/", self.url_path)
    }
}

/// Payload required to insert a new page into a site's tree.
#[derive(Debug, Clone)]
pub struct NewPage {
    /// Owning site identifier.
    pub site_id: i32,
    /// Parent page, `None` to create the site root.
    pub parent_id: Option<i32>,
    /// Title shown in listings and headings.
    pub title: String,
    /// URL segment of the page.
    pub slug: String,
    /// Content type carried by the page.
    pub page_type: PageType,
    /// Whether the page is published right away.
    pub live: bool,
    /// Explicit catalog container.
    pub catalog_root_id: Option<i32>,
    /// Timestamp captured when the payload was created.
    pub updated_at: NaiveDateTime,
}

impl NewPage {
    /// Build an unpublished page payload with the current timestamp.
    pub fn new(
        site_id: i32,
        title: impl Into<String>,
        slug: impl Into<String>,
        page_type: PageType,
    ) -> Self {
        Self {
            site_id,
            parent_id: None,
            title: title.into(),
            slug: slug.into(),
            page_type,
            live: false,
            catalog_root_id: None,
            updated_at: Local::now().naive_utc(),
        }
    }

    /// Place the page beneath `parent_id`.
    pub fn with_parent_id(mut self, parent_id: i32) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Point the page at an explicit catalog container.
    pub fn with_catalog_root_id(mut self, catalog_root_id: i32) -> Self {
        self.catalog_root_id = Some(catalog_root_id);
        self
    }

    /// Publish the page on creation.
    pub fn live(mut self) -> Self {
        self.live = true;
        self
    }
}

/// Query definition used to list pages of a site in tree order.
#[derive(Debug, Clone)]
pub struct PageListQuery {
    /// Owning site identifier.
    pub site_id: i32,
    /// Restrict the results to direct children of this page.
    pub parent_id: Option<i32>,
    /// Exclude unpublished pages.
    pub live_only: bool,
}

impl PageListQuery {
    /// Construct a query that targets every page of `site_id`.
    pub fn new(site_id: i32) -> Self {
        Self {
            site_id,
            parent_id: None,
            live_only: false,
        }
    }

    /// Only return direct children of `parent_id`.
    pub fn child_of(mut self, parent_id: i32) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Only return published pages.
    pub fn live(mut self) -> Self {
        self.live_only = true;
        self
    }
}

/// Node representation of a page and its children for tree traversal.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PageTreeNode {
    /// Page represented by this node.
    pub page: Page,
    /// Children in tree order.
    pub children: Vec<PageTreeNode>,
}

impl PageTreeNode {
    /// Create a new node with no children.
    pub fn new(page: Page) -> Self {
        Self {
            page,
            children: Vec::new(),
        }
    }

    /// Attach a collection of children to the node.
    pub fn with_children(mut self, children: impl Into<Vec<PageTreeNode>>) -> Self {
        self.children = children.into();
        self
    }
}
