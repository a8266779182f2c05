use std::collections::HashMap;

use pushkind_common::domain::auth::AuthenticatedUser;

use crate::domain::category::{Category, CategoryListQuery, CategoryTreeNode};
use crate::domain::product::ProductListQuery;
use crate::domain::subcategory::Subcategory;
use crate::forms::categories::{
    AddCategoryForm, AddSubcategoryForm, EditCategoryForm, EditSubcategoryForm,
};
use crate::repository::{
    CategoryReader, CategoryWriter, ProductReader, SubcategoryReader, SubcategoryWriter,
};
use crate::services::{ServiceError, ServiceResult, ensure_role};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

/// Loads every category of the hub with its subcategories, archived ones included.
pub fn load_categories<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<CategoryTreeNode>>
where
    R: CategoryReader + SubcategoryReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let categories = repo
        .list_categories(CategoryListQuery::new(user.hub_id).include_archived())
        .map_err(ServiceError::from)?;
    let subcategories = repo
        .list_subcategories(user.hub_id, None)
        .map_err(ServiceError::from)?;

    Ok(build_tree(categories, subcategories))
}

fn build_tree(mut categories: Vec<Category>, subcategories: Vec<Subcategory>) -> Vec<CategoryTreeNode> {
    let mut grouped: HashMap<i32, Vec<Subcategory>> = HashMap::new();
    for subcategory in subcategories {
        grouped
            .entry(subcategory.category_id)
            .or_default()
            .push(subcategory);
    }

    categories.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then(a.name.cmp(&b.name)));

    categories
        .into_iter()
        .map(|category| {
            let mut children = grouped.remove(&category.id).unwrap_or_default();
            children.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then(a.name.cmp(&b.name)));
            CategoryTreeNode::new(category).with_subcategories(children)
        })
        .collect()
}

/// Creates a category; names are unique per hub.
pub fn create_category<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddCategoryForm,
) -> ServiceResult<Category>
where
    R: CategoryReader + CategoryWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let new_category = form
        .into_new_category(user.hub_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    if repo
        .get_category_by_name(&new_category.name, user.hub_id)
        .map_err(ServiceError::from)?
        .is_some()
    {
        return Err(ServiceError::Conflict);
    }

    repo.create_category(&new_category)
        .map_err(ServiceError::from)
}

/// Replaces the editable fields of a category.
pub fn modify_category<R>(
    repo: &R,
    user: &AuthenticatedUser,
    category_id: i32,
    form: EditCategoryForm,
) -> ServiceResult<Category>
where
    R: CategoryReader + CategoryWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let update = form
        .into_update_category()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.get_category_by_id(category_id, user.hub_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let existing = repo
        .get_category_by_name(&update.name, user.hub_id)
        .map_err(ServiceError::from)?;
    if existing.is_some_and(|category| category.id != category_id) {
        return Err(ServiceError::Conflict);
    }

    repo.update_category(category_id, user.hub_id, &update)
        .map_err(ServiceError::from)
}

/// Deletes an empty category. Categories that still own subcategories or
/// products must be emptied (or archived) instead.
pub fn remove_category<R>(repo: &R, user: &AuthenticatedUser, category_id: i32) -> ServiceResult<()>
where
    R: CategoryReader + CategoryWriter + SubcategoryReader + ProductReader + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    repo.get_category_by_id(category_id, user.hub_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let subcategories = repo
        .list_subcategories(user.hub_id, Some(category_id))
        .map_err(ServiceError::from)?;
    if !subcategories.is_empty() {
        return Err(ServiceError::Conflict);
    }

    let (products, _) = repo
        .list_products(
            ProductListQuery::new(user.hub_id)
                .category_id(category_id)
                .include_archived()
                .paginate(1, 1),
        )
        .map_err(ServiceError::from)?;
    if products > 0 {
        return Err(ServiceError::Conflict);
    }

    repo.delete_category(category_id, user.hub_id)
        .map_err(ServiceError::from)
}

/// Creates a subcategory; names are unique within the parent category.
pub fn create_subcategory<R>(
    repo: &R,
    user: &AuthenticatedUser,
    category_id: i32,
    form: AddSubcategoryForm,
) -> ServiceResult<Subcategory>
where
    R: CategoryReader + SubcategoryReader + SubcategoryWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let new_subcategory = form
        .into_new_subcategory(user.hub_id, category_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.get_category_by_id(category_id, user.hub_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let siblings = repo
        .list_subcategories(user.hub_id, Some(category_id))
        .map_err(ServiceError::from)?;
    if siblings.iter().any(|sub| sub.name == new_subcategory.name) {
        return Err(ServiceError::Conflict);
    }

    repo.create_subcategory(&new_subcategory)
        .map_err(ServiceError::from)
}

pub fn modify_subcategory<R>(
    repo: &R,
    user: &AuthenticatedUser,
    subcategory_id: i32,
    form: EditSubcategoryForm,
) -> ServiceResult<Subcategory>
where
    R: SubcategoryReader + SubcategoryWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let update = form
        .into_update_subcategory()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let current = repo
        .get_subcategory_by_id(subcategory_id, user.hub_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let siblings = repo
        .list_subcategories(user.hub_id, Some(current.category_id))
        .map_err(ServiceError::from)?;
    if siblings
        .iter()
        .any(|sub| sub.id != subcategory_id && sub.name == update.name)
    {
        return Err(ServiceError::Conflict);
    }

    repo.update_subcategory(subcategory_id, user.hub_id, &update)
        .map_err(ServiceError::from)
}

pub fn remove_subcategory<R>(
    repo: &R,
    user: &AuthenticatedUser,
    subcategory_id: i32,
) -> ServiceResult<()>
where
    R: SubcategoryReader + SubcategoryWriter + ProductReader + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    repo.get_subcategory_by_id(subcategory_id, user.hub_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let (products, _) = repo
        .list_products(
            ProductListQuery::new(user.hub_id)
                .subcategory_id(subcategory_id)
                .include_archived()
                .paginate(1, 1),
        )
        .map_err(ServiceError::from)?;
    if products > 0 {
        return Err(ServiceError::Conflict);
    }

    repo.delete_subcategory(subcategory_id, user.hub_id)
        .map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock::MockCatalogRepository;
    use crate::services::test_support::{
        HUB_ID, category, product, subcategory, user_with_roles,
    };

    fn add_form(name: &str) -> AddCategoryForm {
        AddCategoryForm {
            name: name.to_string(),
            description: None,
            icon: None,
            sort_order: 0,
        }
    }

    #[test]
    fn load_categories_requires_role() {
        let repo = MockCatalogRepository::new();
        let user = user_with_roles(&[]);

        let result = load_categories(&repo, &user);

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn load_categories_nests_sorted_subcategories() {
        let mut repo = MockCatalogRepository::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        repo.expect_list_categories()
            .withf(|query| query.hub_id == HUB_ID && query.include_archived)
            .returning(|_| {
                let mut drinks = category(2, "Drinks");
                drinks.sort_order = 5;
                Ok(vec![drinks, category(1, "Mains")])
            });
        repo.expect_list_subcategories()
            .withf(|hub_id, category_id| *hub_id == HUB_ID && category_id.is_none())
            .returning(|_, _| {
                Ok(vec![
                    subcategory(10, 2, "Soft"),
                    subcategory(11, 2, "Hot"),
                    subcategory(12, 1, "Grill"),
                ])
            });

        let tree = load_categories(&repo, &user).expect("expected success");

        let names: Vec<&str> = tree.iter().map(|node| node.category.name.as_str()).collect();
        assert_eq!(names, vec!["Mains", "Drinks"]);
        let drinks: Vec<&str> = tree[1]
            .subcategories
            .iter()
            .map(|sub| sub.name.as_str())
            .collect();
        assert_eq!(drinks, vec!["Hot", "Soft"]);
    }

    #[test]
    fn create_category_needs_admin_role() {
        let repo = MockCatalogRepository::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        let result = create_category(&repo, &user, add_form("Mains"));

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn create_category_rejects_duplicate_name() {
        let mut repo = MockCatalogRepository::new();
        let user = user_with_roles(&[SERVICE_ADMIN_ROLE]);

        repo.expect_get_category_by_name()
            .withf(|name, hub_id| name == "Mains" && *hub_id == HUB_ID)
            .returning(|_, _| Ok(Some(category(1, "Mains"))));
        repo.expect_create_category().never();

        let result = create_category(&repo, &user, add_form(" Mains "));

        assert!(matches!(result, Err(ServiceError::Conflict)));
    }

    #[test]
    fn create_category_reports_form_errors() {
        let repo = MockCatalogRepository::new();
        let user = user_with_roles(&[SERVICE_ADMIN_ROLE]);

        let result = create_category(&repo, &user, add_form("   "));

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn create_category_persists_sanitized_payload() {
        let mut repo = MockCatalogRepository::new();
        let user = user_with_roles(&[SERVICE_ADMIN_ROLE]);

        repo.expect_get_category_by_name()
            .returning(|_, _| Ok(None));
        repo.expect_create_category()
            .withf(|new_category| new_category.name == "Desserts" && new_category.hub_id == HUB_ID)
            .times(1)
            .returning(|_| Ok(category(3, "Desserts")));

        let created = create_category(&repo, &user, add_form("  Desserts ")).expect("created");

        assert_eq!(created.id, 3);
    }

    #[test]
    fn modify_category_allows_keeping_own_name() {
        let mut repo = MockCatalogRepository::new();
        let user = user_with_roles(&[SERVICE_ADMIN_ROLE]);

        repo.expect_get_category_by_id()
            .returning(|id, _| Ok(Some(category(id, "Mains"))));
        repo.expect_get_category_by_name()
            .returning(|_, _| Ok(Some(category(4, "Mains"))));
        repo.expect_update_category()
            .times(1)
            .returning(|id, _, _| Ok(category(id, "Mains")));

        let form = EditCategoryForm {
            name: "Mains".to_string(),
            description: None,
            icon: None,
            sort_order: 0,
            is_archived: true,
        };

        assert!(modify_category(&repo, &user, 4, form).is_ok());
    }

    #[test]
    fn remove_category_with_products_conflicts() {
        let mut repo = MockCatalogRepository::new();
        let user = user_with_roles(&[SERVICE_ADMIN_ROLE]);

        repo.expect_get_category_by_id()
            .returning(|id, _| Ok(Some(category(id, "Mains"))));
        repo.expect_list_subcategories()
            .returning(|_, _| Ok(Vec::new()));
        repo.expect_list_products()
            .withf(|query| query.category_id == Some(5) && query.include_archived)
            .returning(|_| Ok((1, vec![product(1, "Steak", 2000)])));
        repo.expect_delete_category().never();

        let result = remove_category(&repo, &user, 5);

        assert!(matches!(result, Err(ServiceError::Conflict)));
    }

    #[test]
    fn remove_category_with_subcategories_conflicts() {
        let mut repo = MockCatalogRepository::new();
        let user = user_with_roles(&[SERVICE_ADMIN_ROLE]);

        repo.expect_get_category_by_id()
            .returning(|id, _| Ok(Some(category(id, "Drinks"))));
        repo.expect_list_subcategories()
            .returning(|_, _| Ok(vec![subcategory(1, 5, "Hot")]));
        repo.expect_delete_category().never();

        assert!(matches!(
            remove_category(&repo, &user, 5),
            Err(ServiceError::Conflict)
        ));
    }

    #[test]
    fn remove_unknown_category_is_not_found() {
        let mut repo = MockCatalogRepository::new();
        let user = user_with_roles(&[SERVICE_ADMIN_ROLE]);

        repo.expect_get_category_by_id().returning(|_, _| Ok(None));

        assert!(matches!(
            remove_category(&repo, &user, 99),
            Err(ServiceError::NotFound)
        ));
    }

    #[test]
    fn create_subcategory_rejects_sibling_name() {
        let mut repo = MockCatalogRepository::new();
        let user = user_with_roles(&[SERVICE_ADMIN_ROLE]);

        repo.expect_get_category_by_id()
            .returning(|id, _| Ok(Some(category(id, "Drinks"))));
        repo.expect_list_subcategories()
            .withf(|_, category_id| *category_id == Some(2))
            .returning(|_, _| Ok(vec![subcategory(1, 2, "Hot")]));
        repo.expect_create_subcategory().never();

        let form = AddSubcategoryForm {
            name: "Hot".to_string(),
            icon: None,
            sort_order: 0,
        };

        assert!(matches!(
            create_subcategory(&repo, &user, 2, form),
            Err(ServiceError::Conflict)
        ));
    }

    #[test]
    fn remove_subcategory_deletes_when_empty() {
        let mut repo = MockCatalogRepository::new();
        let user = user_with_roles(&[SERVICE_ADMIN_ROLE]);

        repo.expect_get_subcategory_by_id()
            .returning(|id, _| Ok(Some(subcategory(id, 2, "Hot"))));
        repo.expect_list_products()
            .withf(|query| query.subcategory_id == Some(7))
            .returning(|_| Ok((0, Vec::new())));
        repo.expect_delete_subcategory()
            .withf(|id, hub_id| *id == 7 && *hub_id == HUB_ID)
            .times(1)
            .returning(|_, _| Ok(()));

        assert!(remove_subcategory(&repo, &user, 7).is_ok());
    }
}
