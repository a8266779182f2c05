use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Second level of the menu taxonomy, always nested under a category.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Subcategory {
    /// Unique identifier of the subcategory.
    pub id: i32,
    /// Owning hub identifier.
    pub hub_id: i32,
    /// Parent category identifier.
    pub category_id: i32,
    /// Name of the subcategory, unique within its category.
    pub name: String,
    /// Optional icon identifier or emoji.
    pub icon: Option<String>,
    /// Display order inside the parent category.
    pub sort_order: i32,
    /// Flag indicating whether the subcategory has been archived.
    pub is_archived: bool,
    /// Timestamp for when the record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the record.
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new subcategory.
#[derive(Debug, Clone)]
pub struct NewSubcategory {
    pub hub_id: i32,
    pub category_id: i32,
    pub name: String,
    pub icon: Option<String>,
    pub sort_order: i32,
    pub updated_at: NaiveDateTime,
}

impl NewSubcategory {
    /// Build a new subcategory payload under `category_id`.
    pub fn new(hub_id: i32, category_id: i32, name: impl Into<String>) -> Self {
        Self {
            hub_id,
            category_id,
            name: name.into(),
            icon: None,
            sort_order: 0,
            updated_at: Local::now().naive_utc(),
        }
    }

    /// Attach an icon to the subcategory payload.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Override the display order.
    pub fn with_sort_order(mut self, sort_order: i32) -> Self {
        self.sort_order = sort_order;
        self
    }
}

/// Full replacement of the editable subcategory fields.
#[derive(Debug, Clone)]
pub struct UpdateSubcategory {
    pub name: String,
    pub icon: Option<String>,
    pub sort_order: i32,
    pub is_archived: bool,
    pub updated_at: NaiveDateTime,
}

impl UpdateSubcategory {
    pub fn new(name: String, icon: Option<String>, sort_order: i32, is_archived: bool) -> Self {
        Self {
            name,
            icon,
            sort_order,
            is_archived,
            updated_at: Local::now().naive_utc(),
        }
    }
}
