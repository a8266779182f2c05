use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::table::{
    NewTable as DomainNewTable, Table as DomainTable, UpdateTable as DomainUpdateTable,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::tables)]
pub struct Table {
    pub id: i32,
    pub hub_id: i32,
    pub area_id: Option<i32>,
    pub label: String,
    pub seats: i32,
    pub shape: String,
    pub pos_x: i32,
    pub pos_y: i32,
    pub width: i32,
    pub height: i32,
    pub rotation: i32,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::tables)]
pub struct NewTable<'a> {
    pub hub_id: i32,
    pub area_id: Option<i32>,
    pub label: &'a str,
    pub seats: i32,
    pub shape: &'a str,
    pub pos_x: i32,
    pub pos_y: i32,
    pub width: i32,
    pub height: i32,
    pub rotation: i32,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::tables, treat_none_as_null = true)]
pub struct UpdateTable<'a> {
    pub area_id: Option<i32>,
    pub label: &'a str,
    pub seats: i32,
    pub shape: &'a str,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::tables, treat_none_as_null = true)]
pub struct TablePlacement {
    pub area_id: Option<i32>,
    pub pos_x: i32,
    pub pos_y: i32,
    pub width: i32,
    pub height: i32,
    pub rotation: i32,
    pub updated_at: NaiveDateTime,
}

impl From<Table> for DomainTable {
    fn from(value: Table) -> Self {
        Self {
            id: value.id,
            hub_id: value.hub_id,
            area_id: value.area_id,
            label: value.label,
            seats: value.seats,
            shape: value.shape.as_str().into(),
            pos_x: value.pos_x,
            pos_y: value.pos_y,
            width: value.width,
            height: value.height,
            rotation: value.rotation,
            status: value.status.as_str().into(),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewTable> for NewTable<'a> {
    fn from(value: &'a DomainNewTable) -> Self {
        Self {
            hub_id: value.hub_id,
            area_id: value.area_id,
            label: value.label.as_str(),
            seats: value.seats,
            shape: value.shape.into(),
            pos_x: value.pos_x,
            pos_y: value.pos_y,
            width: value.width,
            height: value.height,
            rotation: value.rotation,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainUpdateTable> for UpdateTable<'a> {
    fn from(value: &'a DomainUpdateTable) -> Self {
        Self {
            area_id: value.area_id,
            label: value.label.as_str(),
            seats: value.seats,
            shape: value.shape.into(),
            updated_at: value.updated_at,
        }
    }
}

impl TablePlacement {
    pub fn from_domain(
        value: &crate::domain::table::TablePlacement,
        updated_at: NaiveDateTime,
    ) -> Self {
        Self {
            area_id: value.area_id,
            pos_x: value.pos_x,
            pos_y: value.pos_y,
            width: value.width,
            height: value.height,
            rotation: value.rotation,
            updated_at,
        }
    }
}
