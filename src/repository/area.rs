use diesel::prelude::*;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::domain::area::{
    Area as DomainArea, NewArea as DomainNewArea, UpdateArea as DomainUpdateArea,
};
use crate::models::area::{Area as DbArea, NewArea as DbNewArea, UpdateArea as DbUpdateArea};
use crate::repository::{AreaReader, AreaWriter, DieselRepository};
use crate::schema::areas;

impl AreaReader for DieselRepository {
    fn list_areas(&self, hub_id: i32) -> RepositoryResult<Vec<DomainArea>> {
        let mut conn = self.conn()?;

        let rows = areas::table
            .filter(areas::hub_id.eq(hub_id))
            .order((areas::sort_order.asc(), areas::name.asc()))
            .load::<DbArea>(&mut conn)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn get_area_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<DomainArea>> {
        let mut conn = self.conn()?;

        let area = areas::table
            .filter(areas::id.eq(id))
            .filter(areas::hub_id.eq(hub_id))
            .first::<DbArea>(&mut conn)
            .optional()?;

        Ok(area.map(Into::into))
    }
}

impl AreaWriter for DieselRepository {
    fn create_area(&self, new_area: &DomainNewArea) -> RepositoryResult<DomainArea> {
        let mut conn = self.conn()?;

        let created = diesel::insert_into(areas::table)
            .values(&DbNewArea::from(new_area))
            .get_result::<DbArea>(&mut conn)?;

        Ok(created.into())
    }

    fn update_area(
        &self,
        area_id: i32,
        hub_id: i32,
        updates: &DomainUpdateArea,
    ) -> RepositoryResult<DomainArea> {
        let mut conn = self.conn()?;

        let target = areas::table
            .filter(areas::id.eq(area_id))
            .filter(areas::hub_id.eq(hub_id));

        let updated = diesel::update(target)
            .set(&DbUpdateArea::from(updates))
            .get_result::<DbArea>(&mut conn)
            .optional()?;

        updated.map(Into::into).ok_or(RepositoryError::NotFound)
    }

    fn delete_area(&self, area_id: i32, hub_id: i32) -> RepositoryResult<()> {
        use crate::schema::tables;

        let mut conn = self.conn()?;

        conn.transaction::<(), RepositoryError, _>(|conn| {
            diesel::update(
                tables::table
                    .filter(tables::hub_id.eq(hub_id))
                    .filter(tables::area_id.eq(area_id)),
            )
            .set(tables::area_id.eq::<Option<i32>>(None))
            .execute(conn)?;

            let deleted = diesel::delete(
                areas::table
                    .filter(areas::id.eq(area_id))
                    .filter(areas::hub_id.eq(hub_id)),
            )
            .execute(conn)?;

            if deleted == 0 {
                return Err(RepositoryError::NotFound);
            }

            Ok(())
        })
    }
}
