use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Checkout widget settings, one record per site.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SnipcartSettings {
    pub id: i32,
    /// Site the settings belong to.
    pub site_id: i32,
    /// Public API key of the checkout widget.
    pub api_key: String,
    pub updated_at: NaiveDateTime,
}

/// Payload that creates or replaces the settings of a site.
#[derive(Debug, Clone)]
pub struct SaveSnipcartSettings {
    pub site_id: i32,
    pub api_key: String,
    pub updated_at: NaiveDateTime,
}

impl SaveSnipcartSettings {
    pub fn new(site_id: i32, api_key: impl Into<String>) -> Self {
        Self {
            site_id,
            api_key: api_key.into(),
            updated_at: Local::now().naive_utc(),
        }
    }
}
