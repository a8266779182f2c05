use actix_web::{Responder, delete, get, post, put, web};
use pushkind_common::domain::auth::AuthenticatedUser;

use crate::forms::categories::{
    AddCategoryForm, AddSubcategoryForm, EditCategoryForm, EditSubcategoryForm,
};
use crate::repository::DieselRepository;
use crate::routes::{created_response, json_response, no_content_response};
use crate::services::categories::{
    create_category, create_subcategory, load_categories, modify_category, modify_subcategory,
    remove_category, remove_subcategory,
};

#[get("/categories")]
pub async fn list_categories(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    json_response(load_categories(repo.get_ref(), &user), "list categories")
}

#[post("/categories")]
pub async fn add_category(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<AddCategoryForm>,
) -> impl Responder {
    created_response(
        create_category(repo.get_ref(), &user, form.into_inner()),
        "create category",
    )
}

#[put("/categories/{category_id}")]
pub async fn edit_category(
    category_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<EditCategoryForm>,
) -> impl Responder {
    let category_id = category_id.into_inner();
    json_response(
        modify_category(repo.get_ref(), &user, category_id, form.into_inner()),
        &format!("update category {category_id}"),
    )
}

#[delete("/categories/{category_id}")]
pub async fn delete_category(
    category_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let category_id = category_id.into_inner();
    no_content_response(
        remove_category(repo.get_ref(), &user, category_id),
        &format!("delete category {category_id}"),
    )
}

#[post("/categories/{category_id}/subcategories")]
pub async fn add_subcategory(
    category_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<AddSubcategoryForm>,
) -> impl Responder {
    let category_id = category_id.into_inner();
    created_response(
        create_subcategory(repo.get_ref(), &user, category_id, form.into_inner()),
        &format!("create subcategory in category {category_id}"),
    )
}

#[put("/subcategories/{subcategory_id}")]
pub async fn edit_subcategory(
    subcategory_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<EditSubcategoryForm>,
) -> impl Responder {
    let subcategory_id = subcategory_id.into_inner();
    json_response(
        modify_subcategory(repo.get_ref(), &user, subcategory_id, form.into_inner()),
        &format!("update subcategory {subcategory_id}"),
    )
}

#[delete("/subcategories/{subcategory_id}")]
pub async fn delete_subcategory(
    subcategory_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let subcategory_id = subcategory_id.into_inner();
    no_content_response(
        remove_subcategory(repo.get_ref(), &user, subcategory_id),
        &format!("delete subcategory {subcategory_id}"),
    )
}
