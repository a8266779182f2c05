use actix_web::{Responder, delete, get, post, put, web};
use pushkind_common::domain::auth::AuthenticatedUser;

use crate::forms::customers::CustomerForm;
use crate::repository::DieselRepository;
use crate::routes::{created_response, json_response, no_content_response};
use crate::services::customers::{
    CustomersQuery, create_customer, get_customer, load_customers_page, modify_customer,
    remove_customer,
};

#[get("/customers")]
pub async fn list_customers(
    params: web::Query<CustomersQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    json_response(
        load_customers_page(repo.get_ref(), &user, params.into_inner()),
        "list customers",
    )
}

#[get("/customers/{customer_id}")]
pub async fn show_customer(
    customer_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let customer_id = customer_id.into_inner();
    json_response(
        get_customer(repo.get_ref(), &user, customer_id),
        &format!("load customer {customer_id}"),
    )
}

#[post("/customers")]
pub async fn add_customer(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<CustomerForm>,
) -> impl Responder {
    created_response(
        create_customer(repo.get_ref(), &user, form.into_inner()),
        "create customer",
    )
}

#[put("/customers/{customer_id}")]
pub async fn edit_customer(
    customer_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<CustomerForm>,
) -> impl Responder {
    let customer_id = customer_id.into_inner();
    json_response(
        modify_customer(repo.get_ref(), &user, customer_id, form.into_inner()),
        &format!("update customer {customer_id}"),
    )
}

#[delete("/customers/{customer_id}")]
pub async fn delete_customer(
    customer_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let customer_id = customer_id.into_inner();
    no_content_response(
        remove_customer(repo.get_ref(), &user, customer_id),
        &format!("delete customer {customer_id}"),
    )
}
