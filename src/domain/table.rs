use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Outline drawn for a table on the floor map.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TableShape {
    Round,
    #[default]
    Square,
    Rectangle,
}

impl TableShape {
    pub fn as_str(self) -> &'static str {
        match self {
            TableShape::Round => "round",
            TableShape::Square => "square",
            TableShape::Rectangle => "rectangle",
        }
    }

    /// Parse a stored or submitted shape name.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "round" | "circle" => Some(TableShape::Round),
            "square" => Some(TableShape::Square),
            "rectangle" | "rect" => Some(TableShape::Rectangle),
            _ => None,
        }
    }
}

impl From<&str> for TableShape {
    fn from(value: &str) -> Self {
        Self::parse(value).unwrap_or_default()
    }
}

impl From<TableShape> for &'static str {
    fn from(value: TableShape) -> Self {
        value.as_str()
    }
}

/// Service state of a table.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum TableStatus {
    #[default]
    Free,
    Occupied,
    Reserved,
}

impl TableStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TableStatus::Free => "free",
            TableStatus::Occupied => "occupied",
            TableStatus::Reserved => "reserved",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "free" => Some(TableStatus::Free),
            "occupied" => Some(TableStatus::Occupied),
            "reserved" => Some(TableStatus::Reserved),
            _ => None,
        }
    }
}

impl From<&str> for TableStatus {
    fn from(value: &str) -> Self {
        Self::parse(value).unwrap_or_default()
    }
}

impl From<TableStatus> for &'static str {
    fn from(value: TableStatus) -> Self {
        value.as_str()
    }
}

/// Dining table placed on the floor map.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Table {
    pub id: i32,
    pub hub_id: i32,
    /// Area the table is drawn in; `None` puts it on the main map.
    pub area_id: Option<i32>,
    /// Label painted on the table, unique within the hub.
    pub label: String,
    pub seats: i32,
    pub shape: TableShape,
    /// Left edge in map pixels.
    pub pos_x: i32,
    /// Top edge in map pixels.
    pub pos_y: i32,
    pub width: i32,
    pub height: i32,
    /// Clockwise rotation in degrees, always within `0..360`.
    pub rotation: i32,
    pub status: TableStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new table.
#[derive(Debug, Clone)]
pub struct NewTable {
    pub hub_id: i32,
    pub area_id: Option<i32>,
    pub label: String,
    pub seats: i32,
    pub shape: TableShape,
    pub pos_x: i32,
    pub pos_y: i32,
    pub width: i32,
    pub height: i32,
    pub rotation: i32,
    pub updated_at: NaiveDateTime,
}

impl NewTable {
    pub fn new(hub_id: i32, label: impl Into<String>, seats: i32) -> Self {
        Self {
            hub_id,
            area_id: None,
            label: label.into(),
            seats,
            shape: TableShape::default(),
            pos_x: 0,
            pos_y: 0,
            width: 80,
            height: 80,
            rotation: 0,
            updated_at: Local::now().naive_utc(),
        }
    }

    pub fn with_area_id(mut self, area_id: i32) -> Self {
        self.area_id = Some(area_id);
        self
    }

    pub fn with_shape(mut self, shape: TableShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_position(mut self, pos_x: i32, pos_y: i32) -> Self {
        self.pos_x = pos_x;
        self.pos_y = pos_y;
        self
    }

    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_rotation(mut self, rotation: i32) -> Self {
        self.rotation = normalize_rotation(rotation);
        self
    }
}

/// Full replacement of the descriptive table fields; geometry is saved via layouts.
#[derive(Debug, Clone)]
pub struct UpdateTable {
    pub area_id: Option<i32>,
    pub label: String,
    pub seats: i32,
    pub shape: TableShape,
    pub updated_at: NaiveDateTime,
}

impl UpdateTable {
    pub fn new(area_id: Option<i32>, label: String, seats: i32, shape: TableShape) -> Self {
        Self {
            area_id,
            label,
            seats,
            shape,
            updated_at: Local::now().naive_utc(),
        }
    }
}

/// Geometry of one table as saved by the layout designer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TablePlacement {
    pub table_id: i32,
    pub area_id: Option<i32>,
    pub pos_x: i32,
    pub pos_y: i32,
    pub width: i32,
    pub height: i32,
    pub rotation: i32,
}

/// Query definition used to list tables for a hub.
#[derive(Debug, Clone)]
pub struct TableListQuery {
    pub hub_id: i32,
    pub area_id: Option<i32>,
    pub status: Option<TableStatus>,
}

impl TableListQuery {
    pub fn new(hub_id: i32) -> Self {
        Self {
            hub_id,
            area_id: None,
            status: None,
        }
    }

    pub fn area_id(mut self, area_id: i32) -> Self {
        self.area_id = Some(area_id);
        self
    }

    pub fn status(mut self, status: TableStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// Bring any angle into `0..360`.
pub fn normalize_rotation(degrees: i32) -> i32 {
    degrees.rem_euclid(360)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_is_normalized() {
        assert_eq!(normalize_rotation(0), 0);
        assert_eq!(normalize_rotation(360), 0);
        assert_eq!(normalize_rotation(450), 90);
        assert_eq!(normalize_rotation(-90), 270);
    }

    #[test]
    fn shape_parsing_accepts_aliases() {
        assert_eq!(TableShape::parse("Circle"), Some(TableShape::Round));
        assert_eq!(TableShape::parse(" rect "), Some(TableShape::Rectangle));
        assert_eq!(TableShape::parse("hexagon"), None);
        assert_eq!(TableShape::from("hexagon"), TableShape::Square);
    }

    #[test]
    fn status_round_trips_through_storage_names() {
        for status in [TableStatus::Free, TableStatus::Occupied, TableStatus::Reserved] {
            let stored: &str = status.into();
            assert_eq!(TableStatus::from(stored), status);
        }
    }
}
