use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::collection::NewProductCollection;
use crate::forms::pages::{PageFormError, PageHeading};
use crate::forms::{TEXT_MAX_LEN, sanitize_inline_text, sanitize_multiline_text};

/// Result type returned by the collection form helpers.
pub type CollectionFormResult<T> = Result<T, CollectionFormError>;

/// Errors that can occur while processing collection forms.
#[derive(Debug, Error)]
pub enum CollectionFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// Title or slug problems.
    #[error(transparent)]
    Page(#[from] PageFormError),
}

/// Form payload emitted when submitting the "Add collection" form.
#[derive(Debug, Deserialize, Validate)]
pub struct AddCollectionForm {
    #[validate(range(min = 1))]
    pub parent_id: i32,
    #[validate(length(min = 1, max = TEXT_MAX_LEN))]
    pub title: String,
    #[validate(length(max = TEXT_MAX_LEN))]
    #[serde(default)]
    pub slug: Option<String>,
    /// Name unique across all collections; defaults to the title.
    #[validate(length(max = TEXT_MAX_LEN))]
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub live: bool,
}

impl AddCollectionForm {
    /// Validates and sanitizes the payload into a domain `NewProductCollection`.
    pub fn into_new_collection(self, site_id: i32) -> CollectionFormResult<NewProductCollection> {
        self.validate()?;

        let PageHeading { title, slug } = PageHeading::parse(&self.title, self.slug.as_deref())?;

        let name = match self.name.as_deref().map(sanitize_inline_text) {
            Some(name) if !name.is_empty() => name,
            Some(_) | None => title.clone(),
        };

        let description = self
            .description
            .as_deref()
            .map(sanitize_multiline_text)
            .filter(|value| !value.is_empty());

        let mut new_collection =
            NewProductCollection::new(site_id, self.parent_id, title, slug, name);
        if let Some(description) = description {
            new_collection = new_collection.with_description(description);
        }
        if self.live {
            new_collection = new_collection.live();
        }

        Ok(new_collection)
    }
}
