use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::image::{NewImage, NewImageLink};
use crate::forms::{TEXT_MAX_LEN, sanitize_inline_text};

const URL_MAX_LEN: u64 = 2048;

pub type ImageFormResult<T> = Result<T, ImageFormError>;

#[derive(Debug, Error)]
pub enum ImageFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("image title cannot be empty")]
    EmptyTitle,
    #[error("image url must be absolute or start with `/`")]
    InvalidUrl,
}

/// Form payload registering an image asset.
#[derive(Debug, Deserialize, Validate)]
pub struct AddImageForm {
    #[validate(length(min = 1, max = TEXT_MAX_LEN))]
    pub title: String,
    #[validate(length(min = 1, max = URL_MAX_LEN))]
    pub url: String,
}

impl AddImageForm {
    pub fn into_new_image(self, site_id: i32) -> ImageFormResult<NewImage> {
        self.validate()?;

        let title = sanitize_inline_text(&self.title);
        if title.is_empty() {
            return Err(ImageFormError::EmptyTitle);
        }

        let url = self.url.trim();
        let acceptable = url.starts_with('/')
            || url.starts_with("https://")
            || url.starts_with("http://");
        if !acceptable || url.chars().any(char::is_whitespace) {
            return Err(ImageFormError::InvalidUrl);
        }

        Ok(NewImage::new(site_id, title, url))
    }
}

/// Form payload linking an existing image to a product or collection.
#[derive(Debug, Deserialize, Validate)]
pub struct AddImageLinkForm {
    #[validate(range(min = 1))]
    pub image_id: i32,
}

impl AddImageLinkForm {
    pub fn into_new_link(self, owner_id: i32) -> ImageFormResult<NewImageLink> {
        self.validate()?;
        Ok(NewImageLink::new(owner_id, self.image_id))
    }
}
