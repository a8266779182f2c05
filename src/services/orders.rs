use std::collections::HashMap;

use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use serde::Deserialize;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::order::{KitchenBoard, NewOrder, Order, OrderItem, OrderListQuery, OrderStatus};
use crate::domain::product::{Product, ProductListQuery};
use crate::forms::orders::{CreateOrderForm, MoveOrderForm, OrderStatusForm};
use crate::repository::{CustomerReader, OrderReader, OrderWriter, ProductReader, TableReader};
use crate::services::{ServiceError, ServiceResult, ensure_role, page_number};

/// Query parameters accepted by the orders listing.
#[derive(Debug, Default, Deserialize)]
pub struct OrdersQuery {
    /// Comma separated list of statuses, e.g. `pending,ready`.
    pub status: Option<String>,
    pub table_id: Option<i32>,
    pub customer_id: Option<i32>,
    pub page: Option<usize>,
}

fn parse_statuses(raw: &str) -> ServiceResult<Vec<OrderStatus>> {
    raw.split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| {
            OrderStatus::parse(value)
                .ok_or_else(|| ServiceError::Form(format!("unknown order status `{value}`")))
        })
        .collect()
}

/// Loads a page of orders, newest first.
pub fn load_orders_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: OrdersQuery,
) -> ServiceResult<Paginated<Order>>
where
    R: OrderReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let page = page_number(query.page);
    let mut list_query = OrderListQuery::new(user.hub_id).paginate(page, DEFAULT_ITEMS_PER_PAGE);

    if let Some(raw) = query.status.as_deref() {
        let statuses = parse_statuses(raw)?;
        if !statuses.is_empty() {
            list_query = list_query.statuses(statuses);
        }
    }
    if let Some(table_id) = query.table_id {
        list_query = list_query.table_id(table_id);
    }
    if let Some(customer_id) = query.customer_id {
        list_query = list_query.customer_id(customer_id);
    }

    let (total, orders) = repo.list_orders(list_query).map_err(ServiceError::from)?;

    Ok(Paginated::new(
        orders,
        page,
        total.div_ceil(DEFAULT_ITEMS_PER_PAGE),
    ))
}

pub fn get_order<R>(repo: &R, user: &AuthenticatedUser, order_id: i32) -> ServiceResult<Order>
where
    R: OrderReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    repo.get_order_by_id(order_id, user.hub_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

/// Places a new order from the POS screen.
///
/// Product names and prices are copied onto the order so later catalog
/// edits do not change it.
pub fn create_order<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: CreateOrderForm,
) -> ServiceResult<Order>
where
    R: OrderWriter + ProductReader + TableReader + CustomerReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let request = form
        .into_order_request()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    if let Some(table_id) = request.table_id {
        repo.get_table_by_id(table_id, user.hub_id)
            .map_err(ServiceError::from)?
            .ok_or_else(|| ServiceError::Form(format!("table {table_id} does not exist")))?;
    }

    if let Some(customer_id) = request.customer_id {
        repo.get_customer_by_id(customer_id, user.hub_id)
            .map_err(ServiceError::from)?
            .ok_or_else(|| ServiceError::Form(format!("customer {customer_id} does not exist")))?;
    }

    let ids: Vec<i32> = request.items.iter().map(|item| item.product_id).collect();
    let (_, products) = repo
        .list_products(ProductListQuery::new(user.hub_id).include_archived().ids(ids))
        .map_err(ServiceError::from)?;
    let products: HashMap<i32, Product> = products
        .into_iter()
        .map(|product| (product.id, product))
        .collect();

    let mut currency: Option<&str> = None;
    let mut items = Vec::with_capacity(request.items.len());
    for requested in request.items {
        let product = products.get(&requested.product_id).ok_or_else(|| {
            ServiceError::Form(format!("product {} does not exist", requested.product_id))
        })?;
        if !product.is_orderable() {
            return Err(ServiceError::Form(format!(
                "{} is not available",
                product.name
            )));
        }
        match currency {
            None => currency = Some(product.currency.as_str()),
            Some(expected) if expected != product.currency => {
                return Err(ServiceError::Form(
                    "all items of an order must share one currency".to_string(),
                ));
            }
            Some(_) => {}
        }
        items.push(OrderItem {
            product_id: Some(product.id),
            name: product.name.clone(),
            price_cents: product.price_cents,
            quantity: requested.quantity,
            notes: requested.notes,
        });
    }

    let currency = currency
        .ok_or_else(|| ServiceError::Form("order has no items".to_string()))?
        .to_string();

    let mut new_order = NewOrder::new(user.hub_id, currency, items)
        .ok_or_else(|| ServiceError::Form("order total is too large".to_string()))?;
    if let Some(table_id) = request.table_id {
        new_order = new_order.with_table_id(table_id);
    }
    if let Some(customer_id) = request.customer_id {
        new_order = new_order.with_customer_id(customer_id);
    }
    if let Some(notes) = request.notes {
        new_order = new_order.with_notes(notes);
    }

    repo.create_order(&new_order).map_err(ServiceError::from)
}

fn load_for_transition<R>(
    repo: &R,
    hub_id: i32,
    order_id: i32,
    next: OrderStatus,
) -> ServiceResult<Order>
where
    R: OrderReader + ?Sized,
{
    let order = repo
        .get_order_by_id(order_id, hub_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    if !order.status.can_transition_to(next) {
        return Err(ServiceError::Form(format!(
            "order cannot move from {} to {}",
            order.status.as_str(),
            next.as_str()
        )));
    }

    Ok(order)
}

/// Changes the status of an order, appending it to the target column.
pub fn change_order_status<R>(
    repo: &R,
    user: &AuthenticatedUser,
    order_id: i32,
    form: OrderStatusForm,
) -> ServiceResult<Order>
where
    R: OrderReader + OrderWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let status = form
        .into_status()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let order = load_for_transition(repo, user.hub_id, order_id, status)?;
    if order.status == status {
        return Ok(order);
    }

    repo.update_order_status(order_id, user.hub_id, status)
        .map_err(ServiceError::from)
}

pub fn remove_order<R>(repo: &R, user: &AuthenticatedUser, order_id: i32) -> ServiceResult<()>
where
    R: OrderWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    repo.delete_order(order_id, user.hub_id)
        .map_err(ServiceError::from)
}

/// Loads the open orders grouped into kitchen columns.
pub fn load_kitchen_board<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<KitchenBoard>
where
    R: OrderReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let (_, orders) = repo
        .list_orders(OrderListQuery::new(user.hub_id).statuses(OrderStatus::KANBAN))
        .map_err(ServiceError::from)?;

    Ok(KitchenBoard::from_orders(orders))
}

/// Drops an order card at `position` of the `status` column.
pub fn move_kitchen_order<R>(
    repo: &R,
    user: &AuthenticatedUser,
    order_id: i32,
    form: MoveOrderForm,
) -> ServiceResult<Order>
where
    R: OrderReader + OrderWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let (status, position) = form
        .into_move()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    load_for_transition(repo, user.hub_id, order_id, status)?;

    repo.move_kitchen_order(order_id, user.hub_id, status, position)
        .map_err(ServiceError::from)
}
