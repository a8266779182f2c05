use chrono::Local;
use diesel::dsl::{exists, select};
use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::domain::order::{
    NewOrder as DomainNewOrder, Order as DomainOrder, OrderListQuery, OrderStatus,
    reorder_column,
};
use crate::domain::table::TableStatus;
use crate::models::order::{
    NewOrder as DbNewOrder, NewOrderItem as DbNewOrderItem, Order as DbOrder,
    OrderItem as DbOrderItem,
};
use crate::repository::{DieselRepository, OrderReader, OrderWriter, page_bounds};
use crate::schema::{order_items, orders};

fn filtered_orders(query: &OrderListQuery) -> orders::BoxedQuery<'_, Sqlite> {
    let mut items = orders::table
        .filter(orders::hub_id.eq(query.hub_id))
        .into_boxed::<Sqlite>();

    if let Some(statuses) = query.statuses.as_ref() {
        let values: Vec<&'static str> = statuses.iter().map(|status| status.as_str()).collect();
        items = items.filter(orders::status.eq_any(values));
    }

    if let Some(table_id) = query.table_id {
        items = items.filter(orders::table_id.eq(table_id));
    }

    if let Some(customer_id) = query.customer_id {
        items = items.filter(orders::customer_id.eq(customer_id));
    }

    if let Some(created_after) = query.created_after {
        items = items.filter(orders::created_at.ge(created_after));
    }

    items
}

/// Load the items of every order and assemble domain orders in input order.
fn with_items(
    conn: &mut SqliteConnection,
    rows: Vec<DbOrder>,
) -> RepositoryResult<Vec<DomainOrder>> {
    let items = DbOrderItem::belonging_to(&rows)
        .order(order_items::id.asc())
        .load::<DbOrderItem>(conn)?
        .grouped_by(&rows);

    Ok(rows
        .into_iter()
        .zip(items)
        .map(DomainOrder::from)
        .collect())
}

fn find_order(
    conn: &mut SqliteConnection,
    order_id: i32,
    hub_id: i32,
) -> RepositoryResult<Option<DbOrder>> {
    Ok(orders::table
        .filter(orders::id.eq(order_id))
        .filter(orders::hub_id.eq(hub_id))
        .first::<DbOrder>(conn)
        .optional()?)
}

fn load_order(
    conn: &mut SqliteConnection,
    order_id: i32,
    hub_id: i32,
) -> RepositoryResult<DomainOrder> {
    let row = find_order(conn, order_id, hub_id)?.ok_or(RepositoryError::NotFound)?;
    with_items(conn, vec![row])?
        .pop()
        .ok_or(RepositoryError::NotFound)
}

/// Ids of a kitchen column in board order.
fn column_ids(
    conn: &mut SqliteConnection,
    hub_id: i32,
    status: OrderStatus,
) -> RepositoryResult<Vec<i32>> {
    Ok(orders::table
        .filter(orders::hub_id.eq(hub_id))
        .filter(orders::status.eq(status.as_str()))
        .order((
            orders::kitchen_position.asc(),
            orders::created_at.asc(),
            orders::id.asc(),
        ))
        .select(orders::id)
        .load::<i32>(conn)?)
}

fn renumber(conn: &mut SqliteConnection, ids: &[i32]) -> RepositoryResult<()> {
    for (position, id) in ids.iter().enumerate() {
        diesel::update(orders::table.filter(orders::id.eq(id)))
            .set(orders::kitchen_position.eq(position as i32))
            .execute(conn)?;
    }
    Ok(())
}

/// Put an order into `status`, at `position` when given or at the end of
/// the column otherwise, and keep both affected columns contiguous.
fn place_order(
    conn: &mut SqliteConnection,
    order_id: i32,
    hub_id: i32,
    status: OrderStatus,
    position: Option<usize>,
) -> RepositoryResult<DomainOrder> {
    let current = find_order(conn, order_id, hub_id)?.ok_or(RepositoryError::NotFound)?;
    let source = OrderStatus::from(current.status.as_str());

    if source == status && position.is_none() {
        return load_order(conn, order_id, hub_id);
    }

    diesel::update(orders::table.filter(orders::id.eq(order_id)))
        .set((
            orders::status.eq(status.as_str()),
            orders::kitchen_position.eq(0),
            orders::updated_at.eq(Local::now().naive_utc()),
        ))
        .execute(conn)?;

    if status.is_kanban() {
        let column = column_ids(conn, hub_id, status)?;
        let ordered = reorder_column(&column, order_id, position.unwrap_or(usize::MAX));
        renumber(conn, &ordered)?;
    }

    if source != status && source.is_kanban() {
        let column = column_ids(conn, hub_id, source)?;
        renumber(conn, &column)?;
    }

    load_order(conn, order_id, hub_id)
}

impl OrderReader for DieselRepository {
    fn get_order_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<DomainOrder>> {
        let mut conn = self.conn()?;

        match find_order(&mut conn, id, hub_id)? {
            Some(row) => Ok(with_items(&mut conn, vec![row])?.pop()),
            None => Ok(None),
        }
    }

    fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<(usize, Vec<DomainOrder>)> {
        let mut conn = self.conn()?;

        let total = filtered_orders(&query)
            .count()
            .get_result::<i64>(&mut conn)? as usize;

        let mut items =
            filtered_orders(&query).order((orders::created_at.desc(), orders::id.desc()));

        if let Some(pagination) = &query.pagination {
            let (offset, limit) = page_bounds(pagination);
            items = items.offset(offset).limit(limit);
        }

        let rows = items.load::<DbOrder>(&mut conn)?;

        Ok((total, with_items(&mut conn, rows)?))
    }
}

impl OrderWriter for DieselRepository {
    fn create_order(&self, new_order: &DomainNewOrder) -> RepositoryResult<DomainOrder> {
        use crate::schema::{customers, tables};

        let mut conn = self.conn()?;

        conn.transaction::<DomainOrder, RepositoryError, _>(|conn| {
            if let Some(customer_id) = new_order.customer_id {
                let known: bool = select(exists(
                    customers::table
                        .filter(customers::id.eq(customer_id))
                        .filter(customers::hub_id.eq(new_order.hub_id)),
                ))
                .get_result(conn)?;
                if !known {
                    return Err(RepositoryError::NotFound);
                }
            }

            if let Some(table_id) = new_order.table_id {
                let updated = diesel::update(
                    tables::table
                        .filter(tables::id.eq(table_id))
                        .filter(tables::hub_id.eq(new_order.hub_id)),
                )
                .set((
                    tables::status.eq(TableStatus::Occupied.as_str()),
                    tables::updated_at.eq(new_order.updated_at),
                ))
                .execute(conn)?;
                if updated == 0 {
                    return Err(RepositoryError::NotFound);
                }
            }

            let position = orders::table
                .filter(orders::hub_id.eq(new_order.hub_id))
                .filter(orders::status.eq(OrderStatus::Pending.as_str()))
                .count()
                .get_result::<i64>(conn)?;

            let created = diesel::insert_into(orders::table)
                .values(&DbNewOrder::from_domain(
                    new_order,
                    OrderStatus::Pending.as_str(),
                    position as i32,
                ))
                .get_result::<DbOrder>(conn)?;

            let rows: Vec<DbNewOrderItem> = new_order
                .items
                .iter()
                .map(|item| DbNewOrderItem::from_domain(created.id, item))
                .collect();

            if !rows.is_empty() {
                diesel::insert_into(order_items::table)
                    .values(&rows)
                    .execute(conn)?;
            }

            load_order(conn, created.id, new_order.hub_id)
        })
    }

    fn update_order_status(
        &self,
        order_id: i32,
        hub_id: i32,
        status: OrderStatus,
    ) -> RepositoryResult<DomainOrder> {
        let mut conn = self.conn()?;

        conn.transaction::<DomainOrder, RepositoryError, _>(|conn| {
            place_order(conn, order_id, hub_id, status, None)
        })
    }

    fn move_kitchen_order(
        &self,
        order_id: i32,
        hub_id: i32,
        status: OrderStatus,
        position: usize,
    ) -> RepositoryResult<DomainOrder> {
        let mut conn = self.conn()?;

        conn.transaction::<DomainOrder, RepositoryError, _>(|conn| {
            place_order(conn, order_id, hub_id, status, Some(position))
        })
    }

    fn delete_order(&self, order_id: i32, hub_id: i32) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        conn.transaction::<(), RepositoryError, _>(|conn| {
            let current = find_order(conn, order_id, hub_id)?.ok_or(RepositoryError::NotFound)?;
            let status = OrderStatus::from(current.status.as_str());

            diesel::delete(order_items::table.filter(order_items::order_id.eq(order_id)))
                .execute(conn)?;
            diesel::delete(orders::table.filter(orders::id.eq(order_id))).execute(conn)?;

            if status.is_kanban() {
                let column = column_ids(conn, hub_id, status)?;
                renumber(conn, &column)?;
            }

            Ok(())
        })
    }
}
