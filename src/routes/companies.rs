use actix_web::{Responder, delete, get, post, put, web};
use pushkind_common::domain::auth::AuthenticatedUser;

use crate::forms::companies::CompanyForm;
use crate::repository::DieselRepository;
use crate::routes::{created_response, json_response, no_content_response};
use crate::services::companies::{
    CompaniesQuery, create_company, get_company, load_companies_page, modify_company,
    remove_company,
};

#[get("/companies")]
pub async fn list_companies(
    params: web::Query<CompaniesQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    json_response(
        load_companies_page(repo.get_ref(), &user, params.into_inner()),
        "list companies",
    )
}

#[get("/companies/{company_id}")]
pub async fn show_company(
    company_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let company_id = company_id.into_inner();
    json_response(
        get_company(repo.get_ref(), &user, company_id),
        &format!("load company {company_id}"),
    )
}

#[post("/companies")]
pub async fn add_company(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<CompanyForm>,
) -> impl Responder {
    created_response(
        create_company(repo.get_ref(), &user, form.into_inner()),
        "create company",
    )
}

#[put("/companies/{company_id}")]
pub async fn edit_company(
    company_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<CompanyForm>,
) -> impl Responder {
    let company_id = company_id.into_inner();
    json_response(
        modify_company(repo.get_ref(), &user, company_id, form.into_inner()),
        &format!("update company {company_id}"),
    )
}

#[delete("/companies/{company_id}")]
pub async fn delete_company(
    company_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let company_id = company_id.into_inner();
    no_content_response(
        remove_company(repo.get_ref(), &user, company_id),
        &format!("delete company {company_id}"),
    )
}
