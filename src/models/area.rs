use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::area::{
    Area as DomainArea, NewArea as DomainNewArea, UpdateArea as DomainUpdateArea,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::areas)]
pub struct Area {
    pub id: i32,
    pub hub_id: i32,
    pub name: String,
    pub width: i32,
    pub height: i32,
    pub background_color: String,
    pub sort_order: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::areas)]
pub struct NewArea<'a> {
    pub hub_id: i32,
    pub name: &'a str,
    pub width: i32,
    pub height: i32,
    pub background_color: &'a str,
    pub sort_order: i32,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::areas)]
pub struct UpdateArea<'a> {
    pub name: &'a str,
    pub width: i32,
    pub height: i32,
    pub background_color: &'a str,
    pub sort_order: i32,
    pub updated_at: NaiveDateTime,
}

impl From<Area> for DomainArea {
    fn from(value: Area) -> Self {
        Self {
            id: value.id,
            hub_id: value.hub_id,
            name: value.name,
            width: value.width,
            height: value.height,
            background_color: value.background_color,
            sort_order: value.sort_order,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewArea> for NewArea<'a> {
    fn from(value: &'a DomainNewArea) -> Self {
        Self {
            hub_id: value.hub_id,
            name: value.name.as_str(),
            width: value.width,
            height: value.height,
            background_color: value.background_color.as_str(),
            sort_order: value.sort_order,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainUpdateArea> for UpdateArea<'a> {
    fn from(value: &'a DomainUpdateArea) -> Self {
        Self {
            name: value.name.as_str(),
            width: value.width,
            height: value.height,
            background_color: value.background_color.as_str(),
            sort_order: value.sort_order,
            updated_at: value.updated_at,
        }
    }
}
