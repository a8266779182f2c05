use diesel::prelude::*;
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::settings::{
    CompanySettings as DomainCompanySettings, MapSettings as DomainMapSettings,
    SaveCompanySettings as DomainSaveCompanySettings, SaveMapSettings as DomainSaveMapSettings,
};
use crate::models::settings::{
    CompanySettings as DbCompanySettings, MapSettings as DbMapSettings,
    SaveCompanySettings as DbSaveCompanySettings, SaveMapSettings as DbSaveMapSettings,
};
use crate::repository::{DieselRepository, SettingsReader, SettingsWriter};
use crate::schema::{company_settings, map_settings};

impl SettingsReader for DieselRepository {
    fn get_company_settings(&self, hub_id: i32) -> RepositoryResult<Option<DomainCompanySettings>> {
        let mut conn = self.conn()?;

        let settings = company_settings::table
            .filter(company_settings::hub_id.eq(hub_id))
            .first::<DbCompanySettings>(&mut conn)
            .optional()?;

        Ok(settings.map(Into::into))
    }

    fn get_map_settings(&self, hub_id: i32) -> RepositoryResult<Option<DomainMapSettings>> {
        let mut conn = self.conn()?;

        let settings = map_settings::table
            .filter(map_settings::hub_id.eq(hub_id))
            .first::<DbMapSettings>(&mut conn)
            .optional()?;

        Ok(settings.map(Into::into))
    }
}

impl SettingsWriter for DieselRepository {
    fn save_company_settings(
        &self,
        settings: &DomainSaveCompanySettings,
    ) -> RepositoryResult<DomainCompanySettings> {
        let mut conn = self.conn()?;
        let row = DbSaveCompanySettings::from(settings);

        let saved = diesel::insert_into(company_settings::table)
            .values(&row)
            .on_conflict(company_settings::hub_id)
            .do_update()
            .set(&row)
            .get_result::<DbCompanySettings>(&mut conn)?;

        Ok(saved.into())
    }

    fn save_map_settings(
        &self,
        settings: &DomainSaveMapSettings,
    ) -> RepositoryResult<DomainMapSettings> {
        let mut conn = self.conn()?;
        let row = DbSaveMapSettings::from(settings);

        let saved = diesel::insert_into(map_settings::table)
            .values(&row)
            .on_conflict(map_settings::hub_id)
            .do_update()
            .set(&row)
            .get_result::<DbMapSettings>(&mut conn)?;

        Ok(saved.into())
    }
}
