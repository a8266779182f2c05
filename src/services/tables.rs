use std::collections::HashMap;

use pushkind_common::domain::auth::AuthenticatedUser;
use serde::Deserialize;

use crate::domain::settings::MapSettings;
use crate::domain::table::{Table, TableListQuery, TablePlacement, TableStatus};
use crate::forms::tables::{AddTableForm, EditTableForm, SaveLayoutForm, TableStatusForm};
use crate::repository::{AreaReader, SettingsReader, TableReader, TableWriter};
use crate::services::settings::map_settings_for;
use crate::services::{ServiceError, ServiceResult, ensure_role};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

/// Filters accepted by the tables listing.
#[derive(Debug, Default, Deserialize)]
pub struct TablesQuery {
    pub area_id: Option<i32>,
    pub status: Option<String>,
}

pub fn load_tables<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: TablesQuery,
) -> ServiceResult<Vec<Table>>
where
    R: TableReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let mut list_query = TableListQuery::new(user.hub_id);
    if let Some(area_id) = query.area_id {
        list_query = list_query.area_id(area_id);
    }
    if let Some(raw) = query.status.as_deref().filter(|raw| !raw.trim().is_empty()) {
        let status = TableStatus::parse(raw)
            .ok_or_else(|| ServiceError::Form(format!("unknown table status `{raw}`")))?;
        list_query = list_query.status(status);
    }

    repo.list_tables(list_query).map_err(ServiceError::from)
}

pub fn get_table<R>(repo: &R, user: &AuthenticatedUser, table_id: i32) -> ServiceResult<Table>
where
    R: TableReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    repo.get_table_by_id(table_id, user.hub_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

/// Creates a table; labels are unique per hub.
pub fn create_table<R>(repo: &R, user: &AuthenticatedUser, form: AddTableForm) -> ServiceResult<Table>
where
    R: TableReader + TableWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let new_table = form
        .into_new_table(user.hub_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    if repo
        .get_table_by_label(&new_table.label, user.hub_id)
        .map_err(ServiceError::from)?
        .is_some()
    {
        return Err(ServiceError::Conflict);
    }

    repo.create_table(&new_table).map_err(ServiceError::from)
}

pub fn modify_table<R>(
    repo: &R,
    user: &AuthenticatedUser,
    table_id: i32,
    form: EditTableForm,
) -> ServiceResult<Table>
where
    R: TableReader + TableWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let update = form
        .into_update_table()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let existing = repo
        .get_table_by_label(&update.label, user.hub_id)
        .map_err(ServiceError::from)?;
    if existing.is_some_and(|table| table.id != table_id) {
        return Err(ServiceError::Conflict);
    }

    repo.update_table(table_id, user.hub_id, &update)
        .map_err(ServiceError::from)
}

/// Marks a table free, occupied or reserved. Floor staff do this from the map.
pub fn change_table_status<R>(
    repo: &R,
    user: &AuthenticatedUser,
    table_id: i32,
    form: TableStatusForm,
) -> ServiceResult<Table>
where
    R: TableWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let status = form
        .into_status()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.set_table_status(table_id, user.hub_id, status)
        .map_err(ServiceError::from)
}

pub fn remove_table<R>(repo: &R, user: &AuthenticatedUser, table_id: i32) -> ServiceResult<()>
where
    R: TableWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    repo.delete_table(table_id, user.hub_id)
        .map_err(ServiceError::from)
}

/// Saves the positions of every table moved in the designer.
///
/// Coordinates are snapped to the grid when the hub enables snapping, and
/// each table must fit inside its canvas: the area it is placed in, or the
/// main map. Overlapping tables are accepted.
pub fn save_layout<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: SaveLayoutForm,
) -> ServiceResult<Vec<Table>>
where
    R: SettingsReader + AreaReader + TableWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let placements = form
        .into_placements()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let map = map_settings_for(repo, user.hub_id)?;
    let mut canvases: HashMap<i32, MapSettings> = HashMap::new();

    let mut snapped = Vec::with_capacity(placements.len());
    for placement in placements {
        let canvas = match placement.area_id {
            None => map,
            Some(area_id) => match canvases.get(&area_id) {
                Some(canvas) => *canvas,
                None => {
                    let area = repo
                        .get_area_by_id(area_id, user.hub_id)
                        .map_err(ServiceError::from)?
                        .ok_or(ServiceError::NotFound)?;
                    let canvas = MapSettings {
                        width: area.width,
                        height: area.height,
                        ..map
                    };
                    canvases.insert(area_id, canvas);
                    canvas
                }
            },
        };

        let placement = TablePlacement {
            pos_x: canvas.snap(placement.pos_x),
            pos_y: canvas.snap(placement.pos_y),
            ..placement
        };

        if !canvas.contains(
            placement.pos_x,
            placement.pos_y,
            placement.width,
            placement.height,
        ) {
            return Err(ServiceError::Form(format!(
                "table {} does not fit on the {}x{} canvas",
                placement.table_id, canvas.width, canvas.height
            )));
        }

        snapped.push(placement);
    }

    repo.save_table_layout(user.hub_id, &snapped)
        .map_err(ServiceError::from)
}
