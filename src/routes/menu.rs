use actix_web::{Responder, get, post, web};
use pushkind_common::domain::auth::AuthenticatedUser;

use crate::repository::DieselRepository;
use crate::routes::json_response;
use crate::services::menu::{init_menu, load_menu};

#[get("/menu")]
pub async fn show_menu(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    json_response(load_menu(repo.get_ref(), &user), "load menu")
}

/// Seeds the starter menu. Safe to call repeatedly.
#[post("/menu/init")]
pub async fn initialize_menu(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    json_response(init_menu(repo.get_ref(), &user), "initialize menu")
}
