use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::page::{NewPage, PageType};
use crate::forms::{
    TEXT_MAX_LEN, is_valid_slug, parse_optional_id, resolve_slug, sanitize_inline_text,
};

/// Result type returned by the page form helpers.
pub type PageFormResult<T> = Result<T, PageFormError>;

/// Errors that can occur while processing page forms.
#[derive(Debug, Error)]
pub enum PageFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("page title cannot be empty")]
    EmptyTitle,
    #[error("invalid slug `{0}`")]
    InvalidSlug(String),
    /// Products and collections are created through their own forms.
    #[error("unsupported page type `{0}`")]
    UnsupportedPageType(String),
    #[error("invalid {field} `{value}`")]
    InvalidIdentifier { field: &'static str, value: String },
}

/// Title and slug shared by every form that creates a page.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct PageHeading {
    pub title: String,
    pub slug: String,
}

impl PageHeading {
    pub(crate) fn parse(title: &str, slug: Option<&str>) -> PageFormResult<Self> {
        let title = sanitize_inline_text(title);
        if title.is_empty() {
            return Err(PageFormError::EmptyTitle);
        }

        let slug = resolve_slug(slug, &title);
        if !is_valid_slug(&slug) || slug.chars().count() > TEXT_MAX_LEN as usize {
            return Err(PageFormError::InvalidSlug(slug));
        }

        Ok(Self { title, slug })
    }
}

/// Form payload emitted when adding a plain, home or shop page.
#[derive(Debug, Deserialize, Validate)]
pub struct AddPageForm {
    /// Parent page; blank creates a root page.
    #[serde(default)]
    pub parent_id: Option<String>,
    #[validate(length(min = 1, max = TEXT_MAX_LEN))]
    pub title: String,
    /// Optional URL segment; derived from the title when blank.
    #[validate(length(max = TEXT_MAX_LEN))]
    #[serde(default)]
    pub slug: Option<String>,
    /// One of `home`, `shop` or `generic`.
    pub page_type: String,
    /// Publish immediately.
    #[serde(default)]
    pub live: bool,
    /// Optional explicit catalog root; blank keeps the positional rule.
    #[serde(default)]
    pub catalog_root_id: Option<String>,
}

impl AddPageForm {
    /// Validates and sanitizes the payload into a domain `NewPage`.
    pub fn into_new_page(self, site_id: i32) -> PageFormResult<NewPage> {
        self.validate()?;

        let PageHeading { title, slug } = PageHeading::parse(&self.title, self.slug.as_deref())?;

        let page_type = match self.page_type.trim().to_lowercase().as_str() {
            "home" => PageType::Home,
            "shop" => PageType::Shop,
            "generic" | "" => PageType::Generic,
            other => return Err(PageFormError::UnsupportedPageType(other.to_string())),
        };

        let parent_id = parse_optional_id(self.parent_id.as_deref()).map_err(|value| {
            PageFormError::InvalidIdentifier {
                field: "parent page",
                value,
            }
        })?;

        let catalog_root_id =
            parse_optional_id(self.catalog_root_id.as_deref()).map_err(|value| {
                PageFormError::InvalidIdentifier {
                    field: "catalog root",
                    value,
                }
            })?;

        let mut new_page = NewPage::new(site_id, title, slug, page_type);
        if let Some(parent_id) = parent_id {
            new_page = new_page.with_parent_id(parent_id);
        }
        if let Some(catalog_root_id) = catalog_root_id {
            new_page = new_page.with_catalog_root_id(catalog_root_id);
        }
        if self.live {
            new_page = new_page.live();
        }

        Ok(new_page)
    }
}

/// Form payload used to point a container page at an explicit catalog root.
#[derive(Debug, Deserialize)]
pub struct CatalogRootForm {
    /// Blank clears the explicit root.
    #[serde(default)]
    pub catalog_root_id: Option<String>,
}

impl CatalogRootForm {
    pub fn into_catalog_root_id(self) -> PageFormResult<Option<i32>> {
        parse_optional_id(self.catalog_root_id.as_deref()).map_err(|value| {
            PageFormError::InvalidIdentifier {
                field: "catalog root",
                value,
            }
        })
    }
}
