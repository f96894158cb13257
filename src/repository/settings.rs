use diesel::prelude::*;
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::settings::{
    SaveSnipcartSettings as DomainSaveSnipcartSettings, SnipcartSettings as DomainSnipcartSettings,
};
use crate::models::settings::{
    SaveSnipcartSettings as DbSaveSnipcartSettings, SnipcartSettings as DbSnipcartSettings,
};
use crate::repository::{DieselRepository, SettingsReader, SettingsWriter};

impl SettingsReader for DieselRepository {
    fn get_snipcart_settings(
        &self,
        site_id: i32,
    ) -> RepositoryResult<Option<DomainSnipcartSettings>> {
        use crate::schema::snipcart_settings;

        let mut conn = self.conn()?;

        let settings = snipcart_settings::table
            .filter(snipcart_settings::site_id.eq(site_id))
            .first::<DbSnipcartSettings>(&mut conn)
            .optional()?;

        Ok(settings.map(DomainSnipcartSettings::from))
    }
}

impl SettingsWriter for DieselRepository {
    fn save_snipcart_settings(
        &self,
        settings: &DomainSaveSnipcartSettings,
    ) -> RepositoryResult<DomainSnipcartSettings> {
        use crate::schema::snipcart_settings;

        let mut conn = self.conn()?;
        let row = DbSaveSnipcartSettings::from(settings);

        let saved = diesel::insert_into(snipcart_settings::table)
            .values(&row)
            .on_conflict(snipcart_settings::site_id)
            .do_update()
            .set(&row)
            .get_result::<DbSnipcartSettings>(&mut conn)?;

        Ok(saved.into())
    }
}
