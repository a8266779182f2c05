use diesel::dsl::{exists, select};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::domain::customer::{
    Customer as DomainCustomer, CustomerListQuery, NewCustomer as DomainNewCustomer,
    UpdateCustomer as DomainUpdateCustomer,
};
use crate::models::customer::{
    Customer as DbCustomer, NewCustomer as DbNewCustomer, UpdateCustomer as DbUpdateCustomer,
};
use crate::repository::{CustomerReader, CustomerWriter, DieselRepository, page_bounds};
use crate::schema::customers;

fn filtered_customers(
    query: &CustomerListQuery,
) -> customers::BoxedQuery<'_, diesel::sqlite::Sqlite> {
    let mut items = customers::table
        .filter(customers::hub_id.eq(query.hub_id))
        .into_boxed::<diesel::sqlite::Sqlite>();

    if let Some(term) = query.search.as_ref() {
        let pattern = format!("%{}%", term);
        items = items.filter(
            customers::name
                .like(pattern.clone())
                .or(customers::email.like(pattern.clone()))
                .or(customers::phone.like(pattern)),
        );
    }

    if let Some(company_id) = query.company_id {
        items = items.filter(customers::company_id.eq(company_id));
    }

    items
}

impl CustomerReader for DieselRepository {
    fn get_customer_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<DomainCustomer>> {
        let mut conn = self.conn()?;
        let customer = customers::table
            .filter(customers::id.eq(id))
            .filter(customers::hub_id.eq(hub_id))
            .first::<DbCustomer>(&mut conn)
            .optional()?;

        Ok(customer.map(Into::into))
    }

    fn list_customers(
        &self,
        query: CustomerListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainCustomer>)> {
        let mut conn = self.conn()?;

        let total = filtered_customers(&query)
            .count()
            .get_result::<i64>(&mut conn)? as usize;

        let mut items = filtered_customers(&query).order(customers::name.asc());

        if let Some(pagination) = &query.pagination {
            let (offset, limit) = page_bounds(pagination);
            items = items.offset(offset).limit(limit);
        }

        let db_customers = items.load::<DbCustomer>(&mut conn)?;

        Ok((total, db_customers.into_iter().map(Into::into).collect()))
    }
}

impl CustomerWriter for DieselRepository {
    fn create_customer(
        &self,
        new_customer: &DomainNewCustomer,
    ) -> RepositoryResult<DomainCustomer> {
        let mut conn = self.conn()?;

        if let Some(company_id) = new_customer.company_id {
            ensure_company_with_hub(&mut conn, new_customer.hub_id, company_id)?;
        }

        let created = diesel::insert_into(customers::table)
            .values(&DbNewCustomer::from(new_customer))
            .get_result::<DbCustomer>(&mut conn)?;

        Ok(created.into())
    }

    fn update_customer(
        &self,
        customer_id: i32,
        hub_id: i32,
        updates: &DomainUpdateCustomer,
    ) -> RepositoryResult<DomainCustomer> {
        let mut conn = self.conn()?;

        if let Some(company_id) = updates.company_id {
            ensure_company_with_hub(&mut conn, hub_id, company_id)?;
        }

        let target = customers::table
            .filter(customers::id.eq(customer_id))
            .filter(customers::hub_id.eq(hub_id));

        let updated = diesel::update(target)
            .set(&DbUpdateCustomer::from(updates))
            .get_result::<DbCustomer>(&mut conn)
            .optional()?;

        updated.map(Into::into).ok_or(RepositoryError::NotFound)
    }

    fn delete_customer(&self, customer_id: i32, hub_id: i32) -> RepositoryResult<()> {
        use crate::schema::orders;

        let mut conn = self.conn()?;

        conn.transaction::<(), RepositoryError, _>(|conn| {
            diesel::update(
                orders::table
                    .filter(orders::hub_id.eq(hub_id))
                    .filter(orders::customer_id.eq(customer_id)),
            )
            .set(orders::customer_id.eq::<Option<i32>>(None))
            .execute(conn)?;

            let deleted = diesel::delete(
                customers::table
                    .filter(customers::id.eq(customer_id))
                    .filter(customers::hub_id.eq(hub_id)),
            )
            .execute(conn)?;

            if deleted == 0 {
                return Err(RepositoryError::NotFound);
            }

            Ok(())
        })
    }
}

pub(crate) fn ensure_company_with_hub(
    conn: &mut SqliteConnection,
    hub_id: i32,
    company_id: i32,
) -> RepositoryResult<()> {
    use crate::schema::companies;

    let exists: bool = select(exists(
        companies::table
            .filter(companies::id.eq(company_id))
            .filter(companies::hub_id.eq(hub_id)),
    ))
    .get_result(conn)?;

    if exists {
        Ok(())
    } else {
        Err(RepositoryError::NotFound)
    }
}
