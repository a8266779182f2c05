use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Named dining area (hall, terrace, bar) that groups tables on the floor map.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Area {
    pub id: i32,
    pub hub_id: i32,
    pub name: String,
    /// Width of the area canvas in pixels.
    pub width: i32,
    /// Height of the area canvas in pixels.
    pub height: i32,
    /// CSS colour used as the area background, for example `#f5f5f5`.
    pub background_color: String,
    pub sort_order: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new area.
#[derive(Debug, Clone)]
pub struct NewArea {
    pub hub_id: i32,
    pub name: String,
    pub width: i32,
    pub height: i32,
    pub background_color: String,
    pub sort_order: i32,
    pub updated_at: NaiveDateTime,
}

impl NewArea {
    pub fn new(
        hub_id: i32,
        name: impl Into<String>,
        width: i32,
        height: i32,
        background_color: impl Into<String>,
    ) -> Self {
        Self {
            hub_id,
            name: name.into(),
            width,
            height,
            background_color: background_color.into(),
            sort_order: 0,
            updated_at: Local::now().naive_utc(),
        }
    }

    pub fn with_sort_order(mut self, sort_order: i32) -> Self {
        self.sort_order = sort_order;
        self
    }
}

/// Full replacement of the editable area fields.
#[derive(Debug, Clone)]
pub struct UpdateArea {
    pub name: String,
    pub width: i32,
    pub height: i32,
    pub background_color: String,
    pub sort_order: i32,
    pub updated_at: NaiveDateTime,
}

impl UpdateArea {
    pub fn new(
        name: String,
        width: i32,
        height: i32,
        background_color: String,
        sort_order: i32,
    ) -> Self {
        Self {
            name,
            width,
            height,
            background_color,
            sort_order,
            updated_at: Local::now().naive_utc(),
        }
    }
}
