use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, UpdateProduct as DomainUpdateProduct,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
pub struct Product {
    pub id: i32,
    pub hub_id: i32,
    pub category_id: Option<i32>,
    pub subcategory_id: Option<i32>,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub sku: Option<String>,
    pub price_cents: i64,
    pub currency: String,
    pub is_available: bool,
    pub is_archived: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct<'a> {
    pub hub_id: i32,
    pub category_id: Option<i32>,
    pub subcategory_id: Option<i32>,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub icon: Option<&'a str>,
    pub sku: Option<&'a str>,
    pub price_cents: i64,
    pub currency: &'a str,
    pub is_available: bool,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::products)]
pub struct UpdateProduct<'a> {
    pub name: Option<&'a str>,
    pub category_id: Option<Option<i32>>,
    pub subcategory_id: Option<Option<i32>>,
    pub description: Option<Option<&'a str>>,
    pub icon: Option<Option<&'a str>>,
    pub sku: Option<Option<&'a str>>,
    pub price_cents: Option<i64>,
    pub currency: Option<&'a str>,
    pub is_available: Option<bool>,
    pub is_archived: Option<bool>,
    pub updated_at: NaiveDateTime,
}

impl From<Product> for DomainProduct {
    fn from(value: Product) -> Self {
        Self {
            id: value.id,
            hub_id: value.hub_id,
            category_id: value.category_id,
            subcategory_id: value.subcategory_id,
            name: value.name,
            description: value.description,
            icon: value.icon,
            sku: value.sku,
            price_cents: value.price_cents,
            currency: value.currency,
            is_available: value.is_available,
            is_archived: value.is_archived,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewProduct> for NewProduct<'a> {
    fn from(value: &'a DomainNewProduct) -> Self {
        Self {
            hub_id: value.hub_id,
            category_id: value.category_id,
            subcategory_id: value.subcategory_id,
            name: value.name.as_str(),
            description: value.description.as_deref(),
            icon: value.icon.as_deref(),
            sku: value.sku.as_deref(),
            price_cents: value.price_cents,
            currency: value.currency.as_str(),
            is_available: value.is_available,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainUpdateProduct> for UpdateProduct<'a> {
    fn from(value: &'a DomainUpdateProduct) -> Self {
        Self {
            name: value.name.as_deref(),
            category_id: value.category_id,
            subcategory_id: value.subcategory_id,
            description: value.description.as_ref().map(|inner| inner.as_deref()),
            icon: value.icon.as_ref().map(|inner| inner.as_deref()),
            sku: value.sku.as_ref().map(|inner| inner.as_deref()),
            price_cents: value.price_cents,
            currency: value.currency.as_deref(),
            is_available: value.is_available,
            is_archived: value.is_archived,
            updated_at: value.updated_at,
        }
    }
}
