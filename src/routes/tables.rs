use actix_web::{Responder, delete, get, post, put, web};
use pushkind_common::domain::auth::AuthenticatedUser;

use crate::forms::tables::{AddTableForm, EditTableForm, SaveLayoutForm, TableStatusForm};
use crate::repository::DieselRepository;
use crate::routes::{created_response, json_response, no_content_response};
use crate::services::tables::{self, TablesQuery};

#[get("/tables")]
pub async fn list_tables(
    params: web::Query<TablesQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    json_response(
        tables::load_tables(repo.get_ref(), &user, params.into_inner()),
        "list tables",
    )
}

#[post("/tables")]
pub async fn add_table(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<AddTableForm>,
) -> impl Responder {
    created_response(
        tables::create_table(repo.get_ref(), &user, form.into_inner()),
        "create table",
    )
}

/// Saves every table moved in the layout designer in one go.
#[put("/tables/layout")]
pub async fn save_layout(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<SaveLayoutForm>,
) -> impl Responder {
    json_response(
        tables::save_layout(repo.get_ref(), &user, form.into_inner()),
        "save table layout",
    )
}

#[get("/tables/{table_id:\\d+}")]
pub async fn show_table(
    table_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let table_id = table_id.into_inner();
    json_response(
        tables::get_table(repo.get_ref(), &user, table_id),
        &format!("load table {table_id}"),
    )
}

#[put("/tables/{table_id:\\d+}")]
pub async fn edit_table(
    table_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<EditTableForm>,
) -> impl Responder {
    let table_id = table_id.into_inner();
    json_response(
        tables::modify_table(repo.get_ref(), &user, table_id, form.into_inner()),
        &format!("update table {table_id}"),
    )
}

#[put("/tables/{table_id:\\d+}/status")]
pub async fn update_table_status(
    table_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<TableStatusForm>,
) -> impl Responder {
    let table_id = table_id.into_inner();
    json_response(
        tables::change_table_status(repo.get_ref(), &user, table_id, form.into_inner()),
        &format!("update status of table {table_id}"),
    )
}

#[delete("/tables/{table_id:\\d+}")]
pub async fn delete_table(
    table_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let table_id = table_id.into_inner();
    no_content_response(
        tables::remove_table(repo.get_ref(), &user, table_id),
        &format!("delete table {table_id}"),
    )
}
