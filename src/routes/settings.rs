use actix_web::{Responder, delete, get, post, put, web};
use pushkind_common::domain::auth::AuthenticatedUser;

use crate::forms::settings::{AreaForm, CompanySettingsForm, MapSettingsForm};
use crate::repository::DieselRepository;
use crate::routes::{created_response, json_response, no_content_response};
use crate::services::settings;

#[get("/company/settings")]
pub async fn show_company_settings(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    json_response(
        settings::load_company_settings(repo.get_ref(), &user),
        "load company settings",
    )
}

#[put("/company/settings")]
pub async fn update_company_settings(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<CompanySettingsForm>,
) -> impl Responder {
    json_response(
        settings::save_company_settings(repo.get_ref(), &user, form.into_inner()),
        "save company settings",
    )
}

#[get("/map-settings")]
pub async fn show_map_settings(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    json_response(
        settings::load_map_settings(repo.get_ref(), &user),
        "load map settings",
    )
}

#[put("/map-settings")]
pub async fn update_map_settings(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<MapSettingsForm>,
) -> impl Responder {
    json_response(
        settings::save_map_settings(repo.get_ref(), &user, form.into_inner()),
        "save map settings",
    )
}

#[get("/areas")]
pub async fn list_areas(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    json_response(settings::load_areas(repo.get_ref(), &user), "list areas")
}

#[post("/areas")]
pub async fn add_area(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<AreaForm>,
) -> impl Responder {
    created_response(
        settings::create_area(repo.get_ref(), &user, form.into_inner()),
        "create area",
    )
}

#[get("/area-settings/{area_id}")]
pub async fn show_area_settings(
    area_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let area_id = area_id.into_inner();
    json_response(
        settings::get_area(repo.get_ref(), &user, area_id),
        &format!("load area {area_id}"),
    )
}

#[put("/area-settings/{area_id}")]
pub async fn update_area_settings(
    area_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<AreaForm>,
) -> impl Responder {
    let area_id = area_id.into_inner();
    json_response(
        settings::modify_area(repo.get_ref(), &user, area_id, form.into_inner()),
        &format!("update area {area_id}"),
    )
}

#[delete("/areas/{area_id}")]
pub async fn delete_area(
    area_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let area_id = area_id.into_inner();
    no_content_response(
        settings::remove_area(repo.get_ref(), &user, area_id),
        &format!("delete area {area_id}"),
    )
}
