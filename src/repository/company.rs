use diesel::prelude::*;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::domain::company::{
    Company as DomainCompany, CompanyListQuery, NewCompany as DomainNewCompany,
    UpdateCompany as DomainUpdateCompany,
};
use crate::models::company::{
    Company as DbCompany, NewCompany as DbNewCompany, UpdateCompany as DbUpdateCompany,
};
use crate::repository::{CompanyReader, CompanyWriter, DieselRepository, page_bounds};
use crate::schema::companies;

fn filtered_companies(
    query: &CompanyListQuery,
) -> companies::BoxedQuery<'_, diesel::sqlite::Sqlite> {
    let mut items = companies::table
        .filter(companies::hub_id.eq(query.hub_id))
        .into_boxed::<diesel::sqlite::Sqlite>();

    if !query.include_inactive {
        items = items.filter(companies::is_active.eq(true));
    }

    if let Some(term) = query.search.as_ref() {
        let pattern = format!("%{}%", term);
        items = items.filter(
            companies::name
                .like(pattern.clone())
                .or(companies::tax_id.like(pattern)),
        );
    }

    items
}

impl CompanyReader for DieselRepository {
    fn get_company_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<DomainCompany>> {
        let mut conn = self.conn()?;

        let company = companies::table
            .filter(companies::id.eq(id))
            .filter(companies::hub_id.eq(hub_id))
            .first::<DbCompany>(&mut conn)
            .optional()?;

        Ok(company.map(Into::into))
    }

    fn list_companies(
        &self,
        query: CompanyListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainCompany>)> {
        let mut conn = self.conn()?;

        let total = filtered_companies(&query)
            .count()
            .get_result::<i64>(&mut conn)? as usize;

        let mut items = filtered_companies(&query).order(companies::name.asc());

        if let Some(pagination) = &query.pagination {
            let (offset, limit) = page_bounds(pagination);
            items = items.offset(offset).limit(limit);
        }

        let rows = items.load::<DbCompany>(&mut conn)?;

        Ok((total, rows.into_iter().map(Into::into).collect()))
    }
}

impl CompanyWriter for DieselRepository {
    fn create_company(&self, new_company: &DomainNewCompany) -> RepositoryResult<DomainCompany> {
        let mut conn = self.conn()?;

        let created = diesel::insert_into(companies::table)
            .values(&DbNewCompany::from(new_company))
            .get_result::<DbCompany>(&mut conn)?;

        Ok(created.into())
    }

    fn update_company(
        &self,
        company_id: i32,
        hub_id: i32,
        updates: &DomainUpdateCompany,
    ) -> RepositoryResult<DomainCompany> {
        let mut conn = self.conn()?;

        let target = companies::table
            .filter(companies::id.eq(company_id))
            .filter(companies::hub_id.eq(hub_id));

        let updated = diesel::update(target)
            .set(&DbUpdateCompany::from(updates))
            .get_result::<DbCompany>(&mut conn)
            .optional()?;

        updated.map(Into::into).ok_or(RepositoryError::NotFound)
    }

    fn delete_company(&self, company_id: i32, hub_id: i32) -> RepositoryResult<()> {
        use crate::schema::customers;

        let mut conn = self.conn()?;

        conn.transaction::<(), RepositoryError, _>(|conn| {
            diesel::update(
                customers::table
                    .filter(customers::hub_id.eq(hub_id))
                    .filter(customers::company_id.eq(company_id)),
            )
            .set(customers::company_id.eq::<Option<i32>>(None))
            .execute(conn)?;

            let deleted = diesel::delete(
                companies::table
                    .filter(companies::id.eq(company_id))
                    .filter(companies::hub_id.eq(hub_id)),
            )
            .execute(conn)?;

            if deleted == 0 {
                return Err(RepositoryError::NotFound);
            }

            Ok(())
        })
    }
}
