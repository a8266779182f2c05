use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, delete, get, post, put, web};
use pushkind_common::domain::auth::AuthenticatedUser;
use serde_json::json;

use crate::forms::products::{AddProductForm, EditProductForm, UploadProductsForm};
use crate::repository::DieselRepository;
use crate::routes::{created_response, json_response, no_content_response, service_error_response};
use crate::services::products::{self, ProductsQuery};

#[get("/products")]
pub async fn list_products(
    params: web::Query<ProductsQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    json_response(
        products::load_products_page(repo.get_ref(), &user, params.into_inner()),
        "list products",
    )
}

#[get("/products/{product_id}")]
pub async fn show_product(
    product_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let product_id = product_id.into_inner();
    json_response(
        products::get_product(repo.get_ref(), &user, product_id),
        &format!("load product {product_id}"),
    )
}

#[post("/products")]
pub async fn add_product(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<AddProductForm>,
) -> impl Responder {
    created_response(
        products::create_product(repo.get_ref(), &user, form.into_inner()),
        "create product",
    )
}

#[put("/products/{product_id}")]
pub async fn edit_product(
    product_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<EditProductForm>,
) -> impl Responder {
    let product_id = product_id.into_inner();
    json_response(
        products::modify_product(repo.get_ref(), &user, product_id, form.into_inner()),
        &format!("update product {product_id}"),
    )
}

#[delete("/products/{product_id}")]
pub async fn delete_product(
    product_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let product_id = product_id.into_inner();
    no_content_response(
        products::remove_product(repo.get_ref(), &user, product_id),
        &format!("delete product {product_id}"),
    )
}

#[post("/products/upload")]
pub async fn upload_products(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    MultipartForm(form): MultipartForm<UploadProductsForm>,
) -> impl Responder {
    match products::import_products(repo.get_ref(), &user, form) {
        Ok(imported) => HttpResponse::Ok().json(json!({ "imported": imported })),
        Err(err) => service_error_response(err, "import products"),
    }
}
