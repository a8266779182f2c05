use std::collections::HashMap;

use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use serde::Deserialize;

use crate::domain::category::NewCategory;
use crate::domain::product::{Product, ProductListQuery};
use crate::forms::products::{AddProductForm, EditProductForm, ProductUpload, UploadProductsForm};
use crate::repository::{
    CategoryReader, CategoryWriter, ProductReader, ProductWriter, SubcategoryReader,
};
use crate::services::{ServiceError, ServiceResult, ensure_role, page_number};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

/// Query parameters accepted by the products listing.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsQuery {
    /// Optional search string entered by the user.
    pub search: Option<String>,
    /// Page requested by the UI (1-based).
    pub page: Option<usize>,
    pub category_id: Option<i32>,
    pub subcategory_id: Option<i32>,
    /// Whether archived items should be included in the response.
    #[serde(default)]
    pub show_archived: bool,
}

/// Loads one page of products.
pub fn load_products_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: ProductsQuery,
) -> ServiceResult<Paginated<Product>>
where
    R: ProductReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let ProductsQuery {
        search,
        page,
        category_id,
        subcategory_id,
        show_archived,
    } = query;

    let page = page_number(page);
    let mut list_query = ProductListQuery::new(user.hub_id).paginate(page, DEFAULT_ITEMS_PER_PAGE);

    if let Some(search_term) = search.as_deref().map(str::trim).filter(|term| !term.is_empty()) {
        list_query = list_query.search(search_term);
    }
    if let Some(category_id) = category_id {
        list_query = list_query.category_id(category_id);
    }
    if let Some(subcategory_id) = subcategory_id {
        list_query = list_query.subcategory_id(subcategory_id);
    }
    if show_archived {
        list_query = list_query.include_archived();
    }

    let (total, items) = repo.list_products(list_query).map_err(ServiceError::from)?;

    let total_pages = total.div_ceil(DEFAULT_ITEMS_PER_PAGE);
    Ok(Paginated::new(items, page, total_pages))
}

pub fn get_product<R>(repo: &R, user: &AuthenticatedUser, product_id: i32) -> ServiceResult<Product>
where
    R: ProductReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    repo.get_product_by_id(product_id, user.hub_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

/// Checks that the category exists in the hub and that the subcategory, when
/// set, belongs to it.
fn ensure_placement<R>(
    repo: &R,
    hub_id: i32,
    category_id: Option<i32>,
    subcategory_id: Option<i32>,
) -> ServiceResult<()>
where
    R: CategoryReader + SubcategoryReader + ?Sized,
{
    if let Some(category_id) = category_id {
        repo.get_category_by_id(category_id, hub_id)
            .map_err(ServiceError::from)?
            .ok_or_else(|| ServiceError::Form(format!("category {category_id} does not exist")))?;
    }

    if let Some(subcategory_id) = subcategory_id {
        let subcategory = repo
            .get_subcategory_by_id(subcategory_id, hub_id)
            .map_err(ServiceError::from)?
            .ok_or_else(|| {
                ServiceError::Form(format!("subcategory {subcategory_id} does not exist"))
            })?;
        if Some(subcategory.category_id) != category_id {
            return Err(ServiceError::Form(
                "subcategory does not belong to the selected category".to_string(),
            ));
        }
    }

    Ok(())
}

/// Creates a new product for the authenticated user's hub.
pub fn create_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddProductForm,
) -> ServiceResult<Product>
where
    R: CategoryReader + SubcategoryReader + ProductWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let new_product = form
        .into_new_product(user.hub_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    ensure_placement(
        repo,
        user.hub_id,
        new_product.category_id,
        new_product.subcategory_id,
    )?;

    repo.create_product(&new_product)
        .map_err(ServiceError::from)
}

/// Applies a partial update to a product.
pub fn modify_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
    form: EditProductForm,
) -> ServiceResult<Product>
where
    R: CategoryReader + SubcategoryReader + ProductReader + ProductWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let mut update = form
        .into_update_product()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let current = repo
        .get_product_by_id(product_id, user.hub_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let category_id = update.category_id.unwrap_or(current.category_id);
    let mut subcategory_id = update.subcategory_id.unwrap_or(current.subcategory_id);

    // Moving to another category drops a subcategory inherited from the old one.
    if update.category_id.is_some()
        && update.subcategory_id.is_none()
        && category_id != current.category_id
        && subcategory_id.is_some()
    {
        update.subcategory_id = Some(None);
        subcategory_id = None;
    }

    ensure_placement(repo, user.hub_id, category_id, subcategory_id)?;

    repo.update_product(product_id, user.hub_id, &update)
        .map_err(ServiceError::from)
}

pub fn remove_product<R>(repo: &R, user: &AuthenticatedUser, product_id: i32) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    repo.delete_product(product_id, user.hub_id)
        .map_err(ServiceError::from)
}

/// Imports products from an uploaded CSV file.
pub fn import_products<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: UploadProductsForm,
) -> ServiceResult<usize>
where
    R: CategoryReader + CategoryWriter + ProductWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let uploads = form
        .into_product_uploads(user.hub_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    import_product_rows(repo, user, uploads)
}

/// Persists parsed CSV rows, creating categories referenced by name on the fly.
pub fn import_product_rows<R>(
    repo: &R,
    user: &AuthenticatedUser,
    uploads: Vec<ProductUpload>,
) -> ServiceResult<usize>
where
    R: CategoryReader + CategoryWriter + ProductWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let mut category_ids: HashMap<String, i32> = HashMap::new();
    let mut created = 0usize;

    for upload in uploads {
        let ProductUpload {
            mut product,
            category,
        } = upload;

        if let Some(name) = category {
            let category_id = match category_ids.get(&name) {
                Some(id) => *id,
                None => {
                    let id = resolve_category(repo, user.hub_id, &name)?;
                    category_ids.insert(name, id);
                    id
                }
            };
            product.category_id = Some(category_id);
        }

        repo.create_product(&product).map_err(ServiceError::from)?;
        created += 1;
    }

    log::info!("Imported {created} products into hub {}", user.hub_id);

    Ok(created)
}

fn resolve_category<R>(repo: &R, hub_id: i32, name: &str) -> ServiceResult<i32>
where
    R: CategoryReader + CategoryWriter + ?Sized,
{
    if let Some(existing) = repo
        .get_category_by_name(name, hub_id)
        .map_err(ServiceError::from)?
    {
        return Ok(existing.id);
    }

    repo.create_category(&NewCategory::new(hub_id, name))
        .map(|category| category.id)
        .map_err(ServiceError::from)
}
