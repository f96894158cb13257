use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::custom_field::NewCustomField;
use crate::forms::{TEXT_MAX_LEN, sanitize_inline_text};

/// Maximum length of the pipe-delimited options string.
const OPTIONS_MAX_LEN: u64 = 500;

pub type CustomFieldFormResult<T> = Result<T, CustomFieldFormError>;

#[derive(Debug, Error)]
pub enum CustomFieldFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("field name cannot be empty")]
    EmptyName,
}

/// Form payload used to append a custom field to a product or collection.
#[derive(Debug, Deserialize, Validate)]
pub struct AddCustomFieldForm {
    #[validate(length(min = 1, max = TEXT_MAX_LEN))]
    pub name: String,
    /// Options separated by `|`, stored as typed.
    #[validate(length(max = OPTIONS_MAX_LEN))]
    #[serde(default)]
    pub options: Option<String>,
}

impl AddCustomFieldForm {
    pub fn into_new_custom_field(self, owner_id: i32) -> CustomFieldFormResult<NewCustomField> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(CustomFieldFormError::EmptyName);
        }

        let mut field = NewCustomField::new(owner_id, name);
        // Options are split verbatim when rendered, so only a fully blank
        // string is dropped here.
        if let Some(options) = self.options.filter(|value| !value.trim().is_empty()) {
            field = field.with_options(options);
        }

        Ok(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_field_form_keeps_options_verbatim() {
        let form = AddCustomFieldForm {
            name: " Size ".to_string(),
            options: Some("S | M||L".to_string()),
        };

        let field = form.into_new_custom_field(9).expect("expected field");

        assert_eq!(field.owner_id, 9);
        assert_eq!(field.name, "Size");
        assert_eq!(field.options.as_deref(), Some("S | M||L"));
    }

    #[test]
    fn custom_field_form_drops_blank_options() {
        let form = AddCustomFieldForm {
            name: "Engraving".to_string(),
            options: Some("   ".to_string()),
        };

        let field = form.into_new_custom_field(9).expect("expected field");

        assert!(field.options.is_none());
    }

    #[test]
    fn custom_field_form_rejects_long_options() {
        let form = AddCustomFieldForm {
            name: "Colour".to_string(),
            options: Some("x".repeat(501)),
        };

        assert!(matches!(
            form.into_new_custom_field(9),
            Err(CustomFieldFormError::Validation(_))
        ));
    }
}
