use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::subcategory::{
    NewSubcategory as DomainNewSubcategory, Subcategory as DomainSubcategory,
    UpdateSubcategory as DomainUpdateSubcategory,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::subcategories)]
#[diesel(belongs_to(super::category::Category, foreign_key = category_id))]
pub struct Subcategory {
    pub id: i32,
    pub hub_id: i32,
    pub category_id: i32,
    pub name: String,
    pub icon: Option<String>,
    pub sort_order: i32,
    pub is_archived: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::subcategories)]
pub struct NewSubcategory<'a> {
    pub hub_id: i32,
    pub category_id: i32,
    pub name: &'a str,
    pub icon: Option<&'a str>,
    pub sort_order: i32,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::subcategories, treat_none_as_null = true)]
pub struct UpdateSubcategory<'a> {
    pub name: &'a str,
    pub icon: Option<&'a str>,
    pub sort_order: i32,
    pub is_archived: bool,
    pub updated_at: NaiveDateTime,
}

impl From<Subcategory> for DomainSubcategory {
    fn from(value: Subcategory) -> Self {
        Self {
            id: value.id,
            hub_id: value.hub_id,
            category_id: value.category_id,
            name: value.name,
            icon: value.icon,
            sort_order: value.sort_order,
            is_archived: value.is_archived,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewSubcategory> for NewSubcategory<'a> {
    fn from(value: &'a DomainNewSubcategory) -> Self {
        Self {
            hub_id: value.hub_id,
            category_id: value.category_id,
            name: value.name.as_str(),
            icon: value.icon.as_deref(),
            sort_order: value.sort_order,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainUpdateSubcategory> for UpdateSubcategory<'a> {
    fn from(value: &'a DomainUpdateSubcategory) -> Self {
        Self {
            name: value.name.as_str(),
            icon: value.icon.as_deref(),
            sort_order: value.sort_order,
            is_archived: value.is_archived,
            updated_at: value.updated_at,
        }
    }
}
