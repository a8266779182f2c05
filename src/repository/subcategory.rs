use diesel::prelude::*;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::domain::subcategory::{
    NewSubcategory as DomainNewSubcategory, Subcategory as DomainSubcategory,
    UpdateSubcategory as DomainUpdateSubcategory,
};
use crate::models::subcategory::{
    NewSubcategory as DbNewSubcategory, Subcategory as DbSubcategory,
    UpdateSubcategory as DbUpdateSubcategory,
};
use crate::repository::category::ensure_category_with_hub;
use crate::repository::{DieselRepository, SubcategoryReader, SubcategoryWriter};

impl SubcategoryReader for DieselRepository {
    fn list_subcategories(
        &self,
        hub_id: i32,
        category_id: Option<i32>,
    ) -> RepositoryResult<Vec<DomainSubcategory>> {
        use crate::schema::subcategories;

        let mut conn = self.conn()?;

        let mut items = subcategories::table
            .filter(subcategories::hub_id.eq(hub_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(category_id) = category_id {
            items = items.filter(subcategories::category_id.eq(category_id));
        }

        let rows = items
            .order((
                subcategories::category_id.asc(),
                subcategories::sort_order.asc(),
                subcategories::name.asc(),
            ))
            .load::<DbSubcategory>(&mut conn)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn get_subcategory_by_id(
        &self,
        id: i32,
        hub_id: i32,
    ) -> RepositoryResult<Option<DomainSubcategory>> {
        use crate::schema::subcategories;

        let mut conn = self.conn()?;

        let subcategory = subcategories::table
            .filter(subcategories::id.eq(id))
            .filter(subcategories::hub_id.eq(hub_id))
            .first::<DbSubcategory>(&mut conn)
            .optional()?;

        Ok(subcategory.map(Into::into))
    }
}

impl SubcategoryWriter for DieselRepository {
    fn create_subcategory(
        &self,
        new_subcategory: &DomainNewSubcategory,
    ) -> RepositoryResult<DomainSubcategory> {
        use crate::schema::subcategories;

        let mut conn = self.conn()?;

        ensure_category_with_hub(
            &mut conn,
            new_subcategory.hub_id,
            new_subcategory.category_id,
        )?;

        let created = diesel::insert_into(subcategories::table)
            .values(&DbNewSubcategory::from(new_subcategory))
            .get_result::<DbSubcategory>(&mut conn)?;

        Ok(created.into())
    }

    fn update_subcategory(
        &self,
        subcategory_id: i32,
        hub_id: i32,
        updates: &DomainUpdateSubcategory,
    ) -> RepositoryResult<DomainSubcategory> {
        use crate::schema::subcategories;

        let mut conn = self.conn()?;

        let target = subcategories::table
            .filter(subcategories::id.eq(subcategory_id))
            .filter(subcategories::hub_id.eq(hub_id));

        let updated = diesel::update(target)
            .set(&DbUpdateSubcategory::from(updates))
            .get_result::<DbSubcategory>(&mut conn)
            .optional()?;

        updated.map(Into::into).ok_or(RepositoryError::NotFound)
    }

    fn delete_subcategory(&self, subcategory_id: i32, hub_id: i32) -> RepositoryResult<()> {
        use crate::schema::subcategories;

        let mut conn = self.conn()?;

        let deleted = diesel::delete(
            subcategories::table
                .filter(subcategories::id.eq(subcategory_id))
                .filter(subcategories::hub_id.eq(hub_id)),
        )
        .execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
