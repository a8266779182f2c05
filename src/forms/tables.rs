use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::table::{
    NewTable, TablePlacement, TableShape, TableStatus, UpdateTable, normalize_rotation,
};
use crate::forms::sanitize_inline_text;

const LABEL_MAX_LEN_VALIDATOR: u64 = 32;
const MAX_SEATS: i32 = 100;
const MAX_TABLE_SIZE: i32 = 2_000;
/// Largest canvas edge a map or area may have.
const MAX_POSITION: i32 = 10_000;

pub type TableFormResult<T> = Result<T, TableFormError>;

#[derive(Debug, Error)]
pub enum TableFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("table label cannot be empty")]
    EmptyLabel,
    #[error("unknown table shape `{value}`")]
    InvalidShape { value: String },
    #[error("unknown table status `{value}`")]
    InvalidStatus { value: String },
    #[error("table {table_id} appears more than once in the layout")]
    DuplicatePlacement { table_id: i32 },
    #[error("layout contains no tables")]
    EmptyLayout,
}

/// Payload for creating a table on the floor map.
#[derive(Debug, Deserialize, Validate)]
pub struct AddTableForm {
    #[validate(length(min = 1, max = LABEL_MAX_LEN_VALIDATOR))]
    pub label: String,
    #[validate(range(min = 1, max = MAX_SEATS))]
    pub seats: i32,
    #[serde(default)]
    pub shape: Option<String>,
    #[serde(default)]
    pub area_id: Option<i32>,
    #[validate(range(min = 0, max = MAX_POSITION))]
    #[serde(default, alias = "x")]
    pub pos_x: i32,
    #[validate(range(min = 0, max = MAX_POSITION))]
    #[serde(default, alias = "y")]
    pub pos_y: i32,
    #[validate(range(min = 1, max = MAX_TABLE_SIZE))]
    #[serde(default = "default_size")]
    pub width: i32,
    #[validate(range(min = 1, max = MAX_TABLE_SIZE))]
    #[serde(default = "default_size")]
    pub height: i32,
    #[serde(default)]
    pub rotation: i32,
}

fn default_size() -> i32 {
    80
}

impl AddTableForm {
    pub fn into_new_table(self, hub_id: i32) -> TableFormResult<NewTable> {
        self.validate()?;

        let label = sanitize_label(&self.label)?;
        let shape = parse_shape(self.shape.as_deref())?;

        let mut table = NewTable::new(hub_id, label, self.seats)
            .with_shape(shape)
            .with_position(self.pos_x, self.pos_y)
            .with_size(self.width, self.height)
            .with_rotation(self.rotation);
        if let Some(area_id) = self.area_id {
            table = table.with_area_id(area_id);
        }

        Ok(table)
    }
}

/// Payload for editing the descriptive fields of a table.
#[derive(Debug, Deserialize, Validate)]
pub struct EditTableForm {
    #[validate(length(min = 1, max = LABEL_MAX_LEN_VALIDATOR))]
    pub label: String,
    #[validate(range(min = 1, max = MAX_SEATS))]
    pub seats: i32,
    #[serde(default)]
    pub shape: Option<String>,
    #[serde(default)]
    pub area_id: Option<i32>,
}

impl EditTableForm {
    pub fn into_update_table(self) -> TableFormResult<UpdateTable> {
        self.validate()?;

        let label = sanitize_label(&self.label)?;
        let shape = parse_shape(self.shape.as_deref())?;

        Ok(UpdateTable::new(self.area_id, label, self.seats, shape))
    }
}

#[derive(Debug, Deserialize)]
pub struct TableStatusForm {
    pub status: String,
}

impl TableStatusForm {
    pub fn into_status(self) -> TableFormResult<TableStatus> {
        TableStatus::parse(&self.status).ok_or(TableFormError::InvalidStatus {
            value: self.status,
        })
    }
}

/// One moved table as sent by the layout designer.
#[derive(Debug, Deserialize, Validate)]
pub struct TablePlacementForm {
    #[serde(alias = "table_id")]
    pub id: i32,
    #[serde(default)]
    pub area_id: Option<i32>,
    #[validate(range(min = 0, max = MAX_POSITION))]
    #[serde(alias = "x")]
    pub pos_x: i32,
    #[validate(range(min = 0, max = MAX_POSITION))]
    #[serde(alias = "y")]
    pub pos_y: i32,
    #[validate(range(min = 1, max = MAX_TABLE_SIZE))]
    pub width: i32,
    #[validate(range(min = 1, max = MAX_TABLE_SIZE))]
    pub height: i32,
    #[serde(default)]
    pub rotation: i32,
}

/// Whole-layout save request.
#[derive(Debug, Deserialize, Validate)]
pub struct SaveLayoutForm {
    #[validate(nested)]
    #[serde(alias = "positions")]
    pub tables: Vec<TablePlacementForm>,
}

impl SaveLayoutForm {
    /// Validate every placement and normalise rotations. Grid snapping and
    /// bounds depend on map settings and happen in the service.
    pub fn into_placements(self) -> TableFormResult<Vec<TablePlacement>> {
        self.validate()?;

        if self.tables.is_empty() {
            return Err(TableFormError::EmptyLayout);
        }

        let mut seen = HashSet::new();
        let mut placements = Vec::with_capacity(self.tables.len());
        for table in self.tables {
            if !seen.insert(table.id) {
                return Err(TableFormError::DuplicatePlacement { table_id: table.id });
            }
            placements.push(TablePlacement {
                table_id: table.id,
                area_id: table.area_id,
                pos_x: table.pos_x,
                pos_y: table.pos_y,
                width: table.width,
                height: table.height,
                rotation: normalize_rotation(table.rotation),
            });
        }

        Ok(placements)
    }
}

fn sanitize_label(raw: &str) -> TableFormResult<String> {
    let label = sanitize_inline_text(raw);
    if label.is_empty() {
        return Err(TableFormError::EmptyLabel);
    }
    Ok(label)
}

fn parse_shape(raw: Option<&str>) -> TableFormResult<TableShape> {
    match raw.map(str::trim) {
        None | Some("") => Ok(TableShape::default()),
        Some(value) => TableShape::parse(value).ok_or(TableFormError::InvalidShape {
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_table_form_builds_table() {
        let form: AddTableForm = serde_json::from_str(
            r#"{"label":" T 1 ","seats":4,"shape":"circle","x":40,"y":60,"rotation":-90,"area_id":2}"#,
        )
        .expect("valid json");

        let table = form.into_new_table(5).expect("expected success");

        assert_eq!(table.hub_id, 5);
        assert_eq!(table.label, "T 1");
        assert_eq!(table.shape, TableShape::Round);
        assert_eq!((table.pos_x, table.pos_y), (40, 60));
        assert_eq!((table.width, table.height), (80, 80));
        assert_eq!(table.rotation, 270);
        assert_eq!(table.area_id, Some(2));
    }

    #[test]
    fn add_table_form_requires_a_seat() {
        let form: AddTableForm =
            serde_json::from_str(r#"{"label":"T1","seats":0}"#).expect("valid json");

        assert!(matches!(
            form.into_new_table(1),
            Err(TableFormError::Validation(_))
        ));
    }

    #[test]
    fn edit_table_form_rejects_unknown_shape() {
        let form = EditTableForm {
            label: "Bar".to_string(),
            seats: 2,
            shape: Some("hexagon".to_string()),
            area_id: None,
        };

        assert!(matches!(
            form.into_update_table(),
            Err(TableFormError::InvalidShape { value }) if value == "hexagon"
        ));
    }

    #[test]
    fn status_form_parses_known_values() {
        let form = TableStatusForm {
            status: "Reserved".to_string(),
        };
        assert_eq!(form.into_status().ok(), Some(TableStatus::Reserved));

        let form = TableStatusForm {
            status: "dirty".to_string(),
        };
        assert!(form.into_status().is_err());
    }

    #[test]
    fn layout_form_normalizes_and_rejects_duplicates() {
        let form: SaveLayoutForm = serde_json::from_str(
            r#"{"positions":[{"id":1,"x":10,"y":20,"width":80,"height":80,"rotation":450}]}"#,
        )
        .expect("valid json");
        let placements = form.into_placements().expect("expected success");
        assert_eq!(placements.len(), 1);
        assert_eq!(placements[0].table_id, 1);
        assert_eq!(placements[0].rotation, 90);

        let duplicate: SaveLayoutForm = serde_json::from_str(
            r#"{"tables":[
                {"id":3,"x":0,"y":0,"width":80,"height":80},
                {"id":3,"x":100,"y":0,"width":80,"height":80}
            ]}"#,
        )
        .expect("valid json");
        assert!(matches!(
            duplicate.into_placements(),
            Err(TableFormError::DuplicatePlacement { table_id: 3 })
        ));
    }

    #[test]
    fn layout_form_rejects_empty_batch() {
        let form = SaveLayoutForm { tables: Vec::new() };

        assert!(matches!(
            form.into_placements(),
            Err(TableFormError::EmptyLayout)
        ));
    }

    #[test]
    fn layout_form_rejects_far_coordinates() {
        let far = i32::MAX - 5;
        let form: SaveLayoutForm = serde_json::from_str(&format!(
            r#"{{"tables":[{{"id":1,"x":{far},"y":0,"width":80,"height":80}}]}}"#
        ))
        .expect("valid json");
        assert!(matches!(
            form.into_placements(),
            Err(TableFormError::Validation(_))
        ));

        let form: AddTableForm = serde_json::from_str(&format!(
            r#"{{"label":"T9","seats":2,"x":0,"y":{far}}}"#
        ))
        .expect("valid json");
        assert!(matches!(
            form.into_new_table(1),
            Err(TableFormError::Validation(_))
        ));
    }
}
