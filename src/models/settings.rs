use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::settings::{
    CompanySettings as DomainCompanySettings, MapSettings as DomainMapSettings,
    SaveCompanySettings as DomainSaveCompanySettings, SaveMapSettings as DomainSaveMapSettings,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::company_settings)]
pub struct CompanySettings {
    pub id: i32,
    pub hub_id: i32,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub tax_id: Option<String>,
    pub currency: String,
    pub tax_rate_bp: i32,
    pub locale: String,
    pub logo_url: Option<String>,
    pub updated_at: NaiveDateTime,
}

/// Row used for both the insert and the conflict update of the upsert.
#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::company_settings, treat_none_as_null = true)]
pub struct SaveCompanySettings<'a> {
    pub hub_id: i32,
    pub name: &'a str,
    pub address: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub email: Option<&'a str>,
    pub tax_id: Option<&'a str>,
    pub currency: &'a str,
    pub tax_rate_bp: i32,
    pub locale: &'a str,
    pub logo_url: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::map_settings)]
pub struct MapSettings {
    pub id: i32,
    pub hub_id: i32,
    pub width: i32,
    pub height: i32,
    pub grid_size: i32,
    pub snap_to_grid: bool,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::map_settings)]
pub struct SaveMapSettings {
    pub hub_id: i32,
    pub width: i32,
    pub height: i32,
    pub grid_size: i32,
    pub snap_to_grid: bool,
    pub updated_at: NaiveDateTime,
}

impl From<CompanySettings> for DomainCompanySettings {
    fn from(value: CompanySettings) -> Self {
        Self {
            hub_id: value.hub_id,
            name: value.name,
            address: value.address,
            phone: value.phone,
            email: value.email,
            tax_id: value.tax_id,
            currency: value.currency,
            tax_rate_bp: value.tax_rate_bp,
            locale: value.locale,
            logo_url: value.logo_url,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainSaveCompanySettings> for SaveCompanySettings<'a> {
    fn from(value: &'a DomainSaveCompanySettings) -> Self {
        Self {
            hub_id: value.hub_id,
            name: value.name.as_str(),
            address: value.address.as_deref(),
            phone: value.phone.as_deref(),
            email: value.email.as_deref(),
            tax_id: value.tax_id.as_deref(),
            currency: value.currency.as_str(),
            tax_rate_bp: value.tax_rate_bp,
            locale: value.locale.as_str(),
            logo_url: value.logo_url.as_deref(),
            updated_at: value.updated_at,
        }
    }
}

impl From<MapSettings> for DomainMapSettings {
    fn from(value: MapSettings) -> Self {
        Self {
            hub_id: value.hub_id,
            width: value.width,
            height: value.height,
            grid_size: value.grid_size,
            snap_to_grid: value.snap_to_grid,
            updated_at: value.updated_at,
        }
    }
}

impl From<&DomainSaveMapSettings> for SaveMapSettings {
    fn from(value: &DomainSaveMapSettings) -> Self {
        Self {
            hub_id: value.hub_id,
            width: value.width,
            height: value.height,
            grid_size: value.grid_size,
            snap_to_grid: value.snap_to_grid,
            updated_at: value.updated_at,
        }
    }
}
