use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::settings::SaveSnipcartSettings;
use crate::forms::TEXT_MAX_LEN;

pub type SettingsFormResult<T> = Result<T, SettingsFormError>;

#[derive(Debug, Error)]
pub enum SettingsFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("API key cannot be empty")]
    EmptyApiKey,
}

/// Form payload emitted by the site settings page.
#[derive(Debug, Deserialize, Validate)]
pub struct SnipcartSettingsForm {
    #[validate(length(min = 1, max = TEXT_MAX_LEN))]
    pub api_key: String,
}

impl SnipcartSettingsForm {
    pub fn into_settings(self, site_id: i32) -> SettingsFormResult<SaveSnipcartSettings> {
        self.validate()?;

        let api_key = self.api_key.trim();
        if api_key.is_empty() {
            return Err(SettingsFormError::EmptyApiKey);
        }

        Ok(SaveSnipcartSettings::new(site_id, api_key))
    }
}
