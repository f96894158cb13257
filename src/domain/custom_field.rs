use serde::{Deserialize, Serialize};

/// Separator between the entries of a custom field's options string.
pub const OPTIONS_SEPARATOR: char = '|';

/// Ordered custom field attached to a product or a product collection.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CustomField {
    /// Unique identifier of the field.
    pub id: i32,
    /// Identifier of the owning product or collection page.
    pub owner_id: i32,
    /// Position of the field among its siblings.
    pub sort_order: i32,
    /// Field label.
    pub name: String,
    /// Pipe-delimited list of selectable options.
    pub options: Option<String>,
}

/// Payload required to append a custom field to its owner.
#[derive(Debug, Clone)]
pub struct NewCustomField {
    /// Identifier of the owning product or collection page.
    pub owner_id: i32,
    /// Field label.
    pub name: String,
    /// Pipe-delimited list of selectable options.
    pub options: Option<String>,
}

impl NewCustomField {
    pub fn new(owner_id: i32, name: impl Into<String>) -> Self {
        Self {
            owner_id,
            name: name.into(),
            options: None,
        }
    }

    pub fn with_options(mut self, options: impl Into<String>) -> Self {
        self.options = Some(options.into());
        self
    }
}

/// Display-ready custom field handed to templates.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct CustomFieldView {
    pub id: i32,
    pub name: String,
    pub options: Option<String>,
    /// Parsed options; absent when the field has no options string.
    pub option_list: Option<Vec<String>>,
}

impl From<CustomField> for CustomFieldView {
    fn from(value: CustomField) -> Self {
        let option_list = parse_options(value.options.as_deref());
        Self {
            id: value.id,
            name: value.name,
            options: value.options,
            option_list,
        }
    }
}

/// Splits an options string on `|`.
///
/// Segments are kept verbatim: nothing is trimmed and empty segments stay in
/// place, so a string with `n` separators always yields `n + 1` entries. An
/// absent or empty string yields no list.
pub fn parse_options(options: Option<&str>) -> Option<Vec<String>> {
    match options {
        Some(raw) if !raw.is_empty() => Some(
            raw.split(OPTIONS_SEPARATOR)
                .map(str::to_string)
                .collect(),
        ),
        _ => None,
    }
}

/// Converts stored fields into their display form, keeping their order.
pub fn into_views(fields: Vec<CustomField>) -> Vec<CustomFieldView> {
    fields.into_iter().map(CustomFieldView::from).collect()
}
