use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::subcategory::Subcategory;

/// Top level menu section (for example "Drinks" or "Mains") belonging to a hub.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Category {
    /// Unique identifier of the category.
    pub id: i32,
    /// Owning hub identifier.
    pub hub_id: i32,
    /// Human-readable name of the category, unique within the hub.
    pub name: String,
    /// Optional description that expands upon the category name.
    pub description: Option<String>,
    /// Optional icon identifier or emoji shown by the menu screens.
    pub icon: Option<String>,
    /// Display order, lower values first.
    pub sort_order: i32,
    /// Flag indicating whether the category has been archived.
    pub is_archived: bool,
    /// Timestamp for when the category record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the category record.
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new category for a hub.
#[derive(Debug, Clone)]
pub struct NewCategory {
    /// Owning hub identifier.
    pub hub_id: i32,
    /// Human-readable name of the category.
    pub name: String,
    /// Optional description that expands upon the category name.
    pub description: Option<String>,
    /// Optional icon identifier or emoji.
    pub icon: Option<String>,
    /// Display order, lower values first.
    pub sort_order: i32,
    /// Timestamp captured when the category payload was created.
    pub updated_at: NaiveDateTime,
}

impl NewCategory {
    /// Build a new category payload with the supplied details and current timestamp.
    pub fn new(hub_id: i32, name: impl Into<String>) -> Self {
        Self {
            hub_id,
            name: name.into(),
            description: None,
            icon: None,
            sort_order: 0,
            updated_at: Local::now().naive_utc(),
        }
    }

    /// Attach a descriptive text to the category payload.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach an icon to the category payload.
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

/// Full replacement of the editable category fields.
#[derive(Debug, Clone)]
pub struct UpdateCategory {
    /// Updated name for the category.
    pub name: String,
    /// New description value; `None` clears the description.
    pub description: Option<String>,
    /// New icon value; `None` clears the icon.
    pub icon: Option<String>,
    /// New display order.
    pub sort_order: i32,
    /// Archive flag.
    pub is_archived: bool,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

impl UpdateCategory {
    /// Build a category update payload with the supplied values.
    pub fn new(
        name: String,
        description: Option<String>,
        icon: Option<String>,
        sort_order: i32,
        is_archived: bool,
    ) -> Self {
        Self {
            name,
            description,
            icon,
            sort_order,
            is_archived,
            updated_at: Local::now().naive_utc(),
        }
    }
}

/// Query definition used to list the categories of a hub.
#[derive(Debug, Clone)]
pub struct CategoryListQuery {
    /// Owning hub identifier.
    pub hub_id: i32,
    /// Whether archived categories should be included in the results.
    pub include_archived: bool,
    /// Optional substring search applied to category names.
    pub search: Option<String>,
}

impl CategoryListQuery {
    /// Construct a query that targets the categories belonging to `hub_id`.
    pub fn new(hub_id: i32) -> Self {
        Self {
            hub_id,
            include_archived: false,
            search: None,
        }
    }

    /// Include archived categories in the results.
    pub fn include_archived(mut self) -> Self {
        self.include_archived = true;
        self
    }

    /// Filter results by a search term applied to the name.
    pub fn search(mut self, value: impl Into<String>) -> Self {
        self.search = Some(value.into());
        self
    }
}

/// A category together with its subcategories, as rendered by the catalog screens.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CategoryTreeNode {
    /// Category data represented by this node.
    pub category: Category,
    /// Subcategories that belong to this category.
    pub subcategories: Vec<Subcategory>,
}

impl CategoryTreeNode {
    /// Create a new node with no subcategories.
    pub fn new(category: Category) -> Self {
        Self {
            category,
            subcategories: Vec::new(),
        }
    }

    /// Attach a collection of subcategories to the node.
    pub fn with_subcategories(mut self, subcategories: impl Into<Vec<Subcategory>>) -> Self {
        self.subcategories = subcategories.into();
        self
    }
}
