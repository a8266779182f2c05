use chrono::Local;
use diesel::dsl::{exists, select};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::domain::table::{
    NewTable as DomainNewTable, Table as DomainTable, TableListQuery, TablePlacement,
    TableStatus, UpdateTable as DomainUpdateTable,
};
use crate::models::table::{
    NewTable as DbNewTable, Table as DbTable, TablePlacement as DbTablePlacement,
    UpdateTable as DbUpdateTable,
};
use crate::repository::{DieselRepository, TableReader, TableWriter};
use crate::schema::tables;

impl TableReader for DieselRepository {
    fn list_tables(&self, query: TableListQuery) -> RepositoryResult<Vec<DomainTable>> {
        let mut conn = self.conn()?;

        let mut items = tables::table
            .filter(tables::hub_id.eq(query.hub_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(area_id) = query.area_id {
            items = items.filter(tables::area_id.eq(area_id));
        }

        if let Some(status) = query.status {
            items = items.filter(tables::status.eq(status.as_str()));
        }

        let rows = items
            .order((tables::label.asc(), tables::id.asc()))
            .load::<DbTable>(&mut conn)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn get_table_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<DomainTable>> {
        let mut conn = self.conn()?;

        let table = tables::table
            .filter(tables::id.eq(id))
            .filter(tables::hub_id.eq(hub_id))
            .first::<DbTable>(&mut conn)
            .optional()?;

        Ok(table.map(Into::into))
    }

    fn get_table_by_label(&self, label: &str, hub_id: i32) -> RepositoryResult<Option<DomainTable>> {
        let mut conn = self.conn()?;

        let table = tables::table
            .filter(tables::label.eq(label))
            .filter(tables::hub_id.eq(hub_id))
            .first::<DbTable>(&mut conn)
            .optional()?;

        Ok(table.map(Into::into))
    }
}

impl TableWriter for DieselRepository {
    fn create_table(&self, new_table: &DomainNewTable) -> RepositoryResult<DomainTable> {
        let mut conn = self.conn()?;

        if let Some(area_id) = new_table.area_id {
            ensure_area_with_hub(&mut conn, new_table.hub_id, area_id)?;
        }

        let created = diesel::insert_into(tables::table)
            .values(&DbNewTable::from(new_table))
            .get_result::<DbTable>(&mut conn)?;

        Ok(created.into())
    }

    fn update_table(
        &self,
        table_id: i32,
        hub_id: i32,
        updates: &DomainUpdateTable,
    ) -> RepositoryResult<DomainTable> {
        let mut conn = self.conn()?;

        if let Some(area_id) = updates.area_id {
            ensure_area_with_hub(&mut conn, hub_id, area_id)?;
        }

        let target = tables::table
            .filter(tables::id.eq(table_id))
            .filter(tables::hub_id.eq(hub_id));

        let updated = diesel::update(target)
            .set(&DbUpdateTable::from(updates))
            .get_result::<DbTable>(&mut conn)
            .optional()?;

        updated.map(Into::into).ok_or(RepositoryError::NotFound)
    }

    fn set_table_status(
        &self,
        table_id: i32,
        hub_id: i32,
        status: TableStatus,
    ) -> RepositoryResult<DomainTable> {
        let mut conn = self.conn()?;

        let target = tables::table
            .filter(tables::id.eq(table_id))
            .filter(tables::hub_id.eq(hub_id));

        let updated = diesel::update(target)
            .set((
                tables::status.eq(status.as_str()),
                tables::updated_at.eq(Local::now().naive_utc()),
            ))
            .get_result::<DbTable>(&mut conn)
            .optional()?;

        updated.map(Into::into).ok_or(RepositoryError::NotFound)
    }

    fn save_table_layout(
        &self,
        hub_id: i32,
        placements: &[TablePlacement],
    ) -> RepositoryResult<Vec<DomainTable>> {
        let mut conn = self.conn()?;
        let now = Local::now().naive_utc();

        conn.transaction::<Vec<DomainTable>, RepositoryError, _>(|conn| {
            let mut saved = Vec::with_capacity(placements.len());

            for placement in placements {
                if let Some(area_id) = placement.area_id {
                    ensure_area_with_hub(conn, hub_id, area_id)?;
                }

                let target = tables::table
                    .filter(tables::id.eq(placement.table_id))
                    .filter(tables::hub_id.eq(hub_id));

                let updated = diesel::update(target)
                    .set(&DbTablePlacement::from_domain(placement, now))
                    .get_result::<DbTable>(conn)
                    .optional()?
                    .ok_or(RepositoryError::NotFound)?;

                saved.push(updated.into());
            }

            Ok(saved)
        })
    }

    fn delete_table(&self, table_id: i32, hub_id: i32) -> RepositoryResult<()> {
        use crate::schema::orders;

        let mut conn = self.conn()?;

        conn.transaction::<(), RepositoryError, _>(|conn| {
            diesel::update(
                orders::table
                    .filter(orders::hub_id.eq(hub_id))
                    .filter(orders::table_id.eq(table_id)),
            )
            .set(orders::table_id.eq::<Option<i32>>(None))
            .execute(conn)?;

            let deleted = diesel::delete(
                tables::table
                    .filter(tables::id.eq(table_id))
                    .filter(tables::hub_id.eq(hub_id)),
            )
            .execute(conn)?;

            if deleted == 0 {
                return Err(RepositoryError::NotFound);
            }

            Ok(())
        })
    }
}

fn ensure_area_with_hub(
    conn: &mut SqliteConnection,
    hub_id: i32,
    area_id: i32,
) -> RepositoryResult<()> {
    use crate::schema::areas;

    let exists: bool = select(exists(
        areas::table
            .filter(areas::id.eq(area_id))
            .filter(areas::hub_id.eq(hub_id)),
    ))
    .get_result(conn)?;

    if exists {
        Ok(())
    } else {
        Err(RepositoryError::NotFound)
    }
}
