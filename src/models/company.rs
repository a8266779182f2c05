use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::company::{
    Company as DomainCompany, NewCompany as DomainNewCompany, UpdateCompany as DomainUpdateCompany,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::companies)]
pub struct Company {
    pub id: i32,
    pub hub_id: i32,
    pub name: String,
    pub tax_id: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::companies)]
pub struct NewCompany<'a> {
    pub hub_id: i32,
    pub name: &'a str,
    pub tax_id: Option<&'a str>,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub address: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::companies, treat_none_as_null = true)]
pub struct UpdateCompany<'a> {
    pub name: &'a str,
    pub tax_id: Option<&'a str>,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub address: Option<&'a str>,
    pub is_active: bool,
    pub updated_at: NaiveDateTime,
}

impl From<Company> for DomainCompany {
    fn from(value: Company) -> Self {
        Self {
            id: value.id,
            hub_id: value.hub_id,
            name: value.name,
            tax_id: value.tax_id,
            email: value.email,
            phone: value.phone,
            address: value.address,
            is_active: value.is_active,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewCompany> for NewCompany<'a> {
    fn from(value: &'a DomainNewCompany) -> Self {
        Self {
            hub_id: value.hub_id,
            name: value.name.as_str(),
            tax_id: value.tax_id.as_deref(),
            email: value.email.as_deref(),
            phone: value.phone.as_deref(),
            address: value.address.as_deref(),
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainUpdateCompany> for UpdateCompany<'a> {
    fn from(value: &'a DomainUpdateCompany) -> Self {
        Self {
            name: value.name.as_str(),
            tax_id: value.tax_id.as_deref(),
            email: value.email.as_deref(),
            phone: value.phone.as_deref(),
            address: value.address.as_deref(),
            is_active: value.is_active,
            updated_at: value.updated_at,
        }
    }
}
