use pushkind_common::domain::auth::AuthenticatedUser;

use crate::domain::category::CategoryListQuery;
use crate::domain::menu::{Menu, MenuInitOutcome, STARTER_MENU};
use crate::domain::product::ProductListQuery;
use crate::domain::settings::DEFAULT_CURRENCY;
use crate::repository::{
    CategoryReader, MenuWriter, ProductReader, SettingsReader, SubcategoryReader,
};
use crate::services::{ServiceError, ServiceResult, ensure_role};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

/// Loads the orderable menu of the user's hub.
pub fn load_menu<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Menu>
where
    R: CategoryReader + SubcategoryReader + ProductReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;
    fetch_menu(repo, user.hub_id)
}

/// Menu rows for a hub without a role check; callers have already authorized.
pub(crate) fn fetch_menu<R>(repo: &R, hub_id: i32) -> ServiceResult<Menu>
where
    R: CategoryReader + SubcategoryReader + ProductReader + ?Sized,
{
    let categories = repo
        .list_categories(CategoryListQuery::new(hub_id))
        .map_err(ServiceError::from)?;
    let subcategories = repo
        .list_subcategories(hub_id, None)
        .map_err(ServiceError::from)?;
    let (_, products) = repo
        .list_products(ProductListQuery::new(hub_id).only_available())
        .map_err(ServiceError::from)?;

    Ok(Menu::build(categories, subcategories, products))
}

/// Seeds the starter menu when the hub's catalog is empty.
pub fn init_menu<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<MenuInitOutcome>
where
    R: MenuWriter + SettingsReader + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let currency = repo
        .get_company_settings(user.hub_id)
        .map_err(ServiceError::from)?
        .map(|settings| settings.currency)
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());

    let outcome = repo
        .seed_menu(user.hub_id, &currency, STARTER_MENU)
        .map_err(ServiceError::from)?;

    if outcome.already_initialized {
        log::warn!("Menu of hub {} already initialized, nothing seeded", user.hub_id);
    } else {
        log::info!(
            "Seeded menu of hub {}: {} categories, {} products",
            user.hub_id,
            outcome.categories_created,
            outcome.products_created
        );
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::settings::CompanySettings;
    use crate::repository::mock::MockCatalogRepository;
    use crate::services::test_support::{HUB_ID, category, product, user_with_roles};

    #[test]
    fn load_menu_requests_only_available_products() {
        let mut repo = MockCatalogRepository::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        repo.expect_list_categories()
            .withf(|query| !query.include_archived)
            .returning(|_| Ok(vec![category(1, "Mains")]));
        repo.expect_list_subcategories()
            .returning(|_, _| Ok(Vec::new()));
        repo.expect_list_products()
            .withf(|query| query.only_available && query.pagination.is_none())
            .returning(|_| {
                let mut steak = product(1, "Steak", 2000);
                steak.category_id = Some(1);
                Ok((2, vec![steak, product(2, "Bread", 300)]))
            });

        let menu = load_menu(&repo, &user).expect("menu");

        assert_eq!(menu.categories.len(), 1);
        assert_eq!(menu.uncategorized.len(), 1);
        assert_eq!(menu.product_count(), 2);
    }

    #[test]
    fn init_menu_uses_configured_currency() {
        let mut repo = MockCatalogRepository::new();
        let user = user_with_roles(&[SERVICE_ADMIN_ROLE]);

        repo.expect_get_company_settings().returning(|hub_id| {
            let mut settings = CompanySettings::defaults(hub_id);
            settings.currency = "EUR".to_string();
            Ok(Some(settings))
        });
        repo.expect_seed_menu()
            .withf(|hub_id, currency, seed| {
                *hub_id == HUB_ID && currency == "EUR" && seed.len() == STARTER_MENU.len()
            })
            .times(1)
            .returning(|_, _, _| {
                Ok(MenuInitOutcome {
                    categories_created: 4,
                    ..MenuInitOutcome::default()
                })
            });

        let outcome = init_menu(&repo, &user).expect("seeded");

        assert!(!outcome.already_initialized);
        assert_eq!(outcome.categories_created, 4);
    }

    #[test]
    fn init_menu_falls_back_to_default_currency() {
        let mut repo = MockCatalogRepository::new();
        let user = user_with_roles(&[SERVICE_ADMIN_ROLE]);

        repo.expect_get_company_settings().returning(|_| Ok(None));
        repo.expect_seed_menu()
            .withf(|_, currency, _| currency == DEFAULT_CURRENCY)
            .returning(|_, _, _| {
                Ok(MenuInitOutcome {
                    already_initialized: true,
                    ..MenuInitOutcome::default()
                })
            });

        assert!(init_menu(&repo, &user).is_ok_and(|outcome| outcome.already_initialized));
    }

    #[test]
    fn init_menu_needs_admin() {
        let repo = MockCatalogRepository::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        assert!(matches!(
            init_menu(&repo, &user),
            Err(ServiceError::Unauthorized)
        ));
    }
}
