use actix_web::{Responder, delete, get, post, put, web};
use pushkind_common::domain::auth::AuthenticatedUser;

use crate::forms::orders::{CreateOrderForm, MoveOrderForm, OrderStatusForm};
use crate::repository::DieselRepository;
use crate::routes::{created_response, json_response, no_content_response};
use crate::services::orders::{self, OrdersQuery};

#[get("/orders")]
pub async fn list_orders(
    params: web::Query<OrdersQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    json_response(
        orders::load_orders_page(repo.get_ref(), &user, params.into_inner()),
        "list orders",
    )
}

#[post("/orders")]
pub async fn add_order(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<CreateOrderForm>,
) -> impl Responder {
    created_response(
        orders::create_order(repo.get_ref(), &user, form.into_inner()),
        "create order",
    )
}

#[get("/orders/kitchen")]
pub async fn show_kitchen_board(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    json_response(
        orders::load_kitchen_board(repo.get_ref(), &user),
        "load kitchen board",
    )
}

/// Drag-and-drop of an order card on the kitchen board.
#[put("/orders/kitchen/{order_id}/move")]
pub async fn move_kitchen_order(
    order_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<MoveOrderForm>,
) -> impl Responder {
    let order_id = order_id.into_inner();
    json_response(
        orders::move_kitchen_order(repo.get_ref(), &user, order_id, form.into_inner()),
        &format!("move order {order_id}"),
    )
}

#[get("/orders/{order_id:\\d+}")]
pub async fn show_order(
    order_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let order_id = order_id.into_inner();
    json_response(
        orders::get_order(repo.get_ref(), &user, order_id),
        &format!("load order {order_id}"),
    )
}

#[put("/orders/{order_id:\\d+}/status")]
pub async fn update_order_status(
    order_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<OrderStatusForm>,
) -> impl Responder {
    let order_id = order_id.into_inner();
    json_response(
        orders::change_order_status(repo.get_ref(), &user, order_id, form.into_inner()),
        &format!("update status of order {order_id}"),
    )
}

#[delete("/orders/{order_id:\\d+}")]
pub async fn delete_order(
    order_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let order_id = order_id.into_inner();
    no_content_response(
        orders::remove_order(repo.get_ref(), &user, order_id),
        &format!("delete order {order_id}"),
    )
}
