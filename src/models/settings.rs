use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::settings::{
    SaveSnipcartSettings as DomainSaveSnipcartSettings, SnipcartSettings as DomainSnipcartSettings,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::snipcart_settings)]
pub struct SnipcartSettings {
    pub id: i32,
    pub site_id: i32,
    pub api_key: String,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::snipcart_settings)]
pub struct SaveSnipcartSettings<'a> {
    pub site_id: i32,
    pub api_key: &'a str,
    pub updated_at: NaiveDateTime,
}

impl From<SnipcartSettings> for DomainSnipcartSettings {
    fn from(value: SnipcartSettings) -> Self {
        Self {
            id: value.id,
            site_id: value.site_id,
            api_key: value.api_key,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainSaveSnipcartSettings> for SaveSnipcartSettings<'a> {
    fn from(value: &'a DomainSaveSnipcartSettings) -> Self {
        Self {
            site_id: value.site_id,
            api_key: value.api_key.as_str(),
            updated_at: value.updated_at,
        }
    }
}
