use actix_web::{Responder, get, web};
use pushkind_common::domain::auth::AuthenticatedUser;

use crate::repository::DieselRepository;
use crate::routes::json_response;
use crate::services::dashboard::{DashboardQuery, load_dashboard};

#[get("/dashboard")]
pub async fn show_dashboard(
    params: web::Query<DashboardQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    json_response(
        load_dashboard(repo.get_ref(), &user, params.into_inner()),
        "load dashboard",
    )
}
