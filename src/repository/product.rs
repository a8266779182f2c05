use diesel::prelude::*;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, ProductListQuery,
    UpdateProduct as DomainUpdateProduct,
};
use crate::models::product::{
    NewProduct as DbNewProduct, Product as DbProduct, UpdateProduct as DbUpdateProduct,
};
use crate::repository::category::ensure_category_with_hub;
use crate::repository::{DieselRepository, ProductReader, ProductWriter, page_bounds};
use crate::schema::products;

type BoxedProductQuery<'a> = products::BoxedQuery<'a, diesel::sqlite::Sqlite>;

fn filtered_products(query: &ProductListQuery) -> BoxedProductQuery<'_> {
    let mut items = products::table
        .filter(products::hub_id.eq(query.hub_id))
        .into_boxed::<diesel::sqlite::Sqlite>();

    if !query.include_archived {
        items = items.filter(products::is_archived.eq(false));
    }

    if query.only_available {
        items = items.filter(products::is_available.eq(true));
    }

    if let Some(term) = query.search.as_ref() {
        let pattern = format!("%{}%", term);
        items = items.filter(
            products::name
                .like(pattern.clone())
                .or(products::description.like(pattern)),
        );
    }

    if let Some(category_id) = query.category_id {
        items = items.filter(products::category_id.eq(category_id));
    }

    if let Some(subcategory_id) = query.subcategory_id {
        items = items.filter(products::subcategory_id.eq(subcategory_id));
    }

    if let Some(ids) = query.ids.as_ref() {
        items = items.filter(products::id.eq_any(ids));
    }

    items
}

impl ProductReader for DieselRepository {
    fn get_product_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<DomainProduct>> {
        let mut conn = self.conn()?;
        let product = products::table
            .filter(products::id.eq(id))
            .filter(products::hub_id.eq(hub_id))
            .first::<DbProduct>(&mut conn)
            .optional()?;

        Ok(product.map(Into::into))
    }

    fn list_products(
        &self,
        query: ProductListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainProduct>)> {
        let mut conn = self.conn()?;

        let total = filtered_products(&query)
            .count()
            .get_result::<i64>(&mut conn)? as usize;

        let mut items = filtered_products(&query)
            .order((products::is_archived.asc(), products::name.asc(), products::id.asc()));

        if let Some(pagination) = &query.pagination {
            let (offset, limit) = page_bounds(pagination);
            items = items.offset(offset).limit(limit);
        }

        let db_products = items.load::<DbProduct>(&mut conn)?;

        Ok((total, db_products.into_iter().map(Into::into).collect()))
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &DomainNewProduct) -> RepositoryResult<DomainProduct> {
        let mut conn = self.conn()?;

        if let Some(category_id) = new_product.category_id {
            ensure_category_with_hub(&mut conn, new_product.hub_id, category_id)?;
        }

        let created = diesel::insert_into(products::table)
            .values(&DbNewProduct::from(new_product))
            .get_result::<DbProduct>(&mut conn)?;

        Ok(created.into())
    }

    fn update_product(
        &self,
        product_id: i32,
        hub_id: i32,
        updates: &DomainUpdateProduct,
    ) -> RepositoryResult<DomainProduct> {
        let mut conn = self.conn()?;

        if let Some(Some(category_id)) = updates.category_id {
            ensure_category_with_hub(&mut conn, hub_id, category_id)?;
        }

        let target = products::table
            .filter(products::id.eq(product_id))
            .filter(products::hub_id.eq(hub_id));

        let updated = diesel::update(target)
            .set(&DbUpdateProduct::from(updates))
            .get_result::<DbProduct>(&mut conn)
            .optional()?;

        updated.map(Into::into).ok_or(RepositoryError::NotFound)
    }

    fn delete_product(&self, product_id: i32, hub_id: i32) -> RepositoryResult<()> {
        use crate::schema::order_items;

        let mut conn = self.conn()?;

        conn.transaction::<(), RepositoryError, _>(|conn| {
            let target = products::table
                .filter(products::id.eq(product_id))
                .filter(products::hub_id.eq(hub_id));

            let owned = products::table
                .filter(products::id.eq(product_id))
                .filter(products::hub_id.eq(hub_id))
                .count()
                .get_result::<i64>(conn)?;
            if owned == 0 {
                return Err(RepositoryError::NotFound);
            }

            diesel::update(order_items::table.filter(order_items::product_id.eq(product_id)))
                .set(order_items::product_id.eq::<Option<i32>>(None))
                .execute(conn)?;

            diesel::delete(target).execute(conn)?;

            Ok(())
        })
    }
}
