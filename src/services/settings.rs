use pushkind_common::domain::auth::AuthenticatedUser;

use crate::domain::area::Area;
use crate::domain::settings::{CompanySettings, MapSettings};
use crate::forms::settings::{AreaForm, CompanySettingsForm, MapSettingsForm};
use crate::repository::{AreaReader, AreaWriter, SettingsReader, SettingsWriter};
use crate::services::{ServiceError, ServiceResult, ensure_role};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

/// Returns the stored company settings or the defaults for a fresh hub.
pub fn load_company_settings<R>(
    repo: &R,
    user: &AuthenticatedUser,
) -> ServiceResult<CompanySettings>
where
    R: SettingsReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    Ok(repo
        .get_company_settings(user.hub_id)
        .map_err(ServiceError::from)?
        .unwrap_or_else(|| CompanySettings::defaults(user.hub_id)))
}

pub fn save_company_settings<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: CompanySettingsForm,
) -> ServiceResult<CompanySettings>
where
    R: SettingsWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let settings = form
        .into_save_settings(user.hub_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.save_company_settings(&settings)
        .map_err(ServiceError::from)
}

/// Returns the stored canvas settings or the defaults for a fresh hub.
pub fn load_map_settings<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<MapSettings>
where
    R: SettingsReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;
    map_settings_for(repo, user.hub_id)
}

pub(crate) fn map_settings_for<R>(repo: &R, hub_id: i32) -> ServiceResult<MapSettings>
where
    R: SettingsReader + ?Sized,
{
    Ok(repo
        .get_map_settings(hub_id)
        .map_err(ServiceError::from)?
        .unwrap_or_else(|| MapSettings::defaults(hub_id)))
}

pub fn save_map_settings<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: MapSettingsForm,
) -> ServiceResult<MapSettings>
where
    R: SettingsWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let settings = form
        .into_save_settings(user.hub_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.save_map_settings(&settings)
        .map_err(ServiceError::from)
}

pub fn load_areas<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<Area>>
where
    R: AreaReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    repo.list_areas(user.hub_id).map_err(ServiceError::from)
}

pub fn get_area<R>(repo: &R, user: &AuthenticatedUser, area_id: i32) -> ServiceResult<Area>
where
    R: AreaReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    repo.get_area_by_id(area_id, user.hub_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

pub fn create_area<R>(repo: &R, user: &AuthenticatedUser, form: AreaForm) -> ServiceResult<Area>
where
    R: AreaWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let new_area = form
        .into_new_area(user.hub_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_area(&new_area).map_err(ServiceError::from)
}

pub fn modify_area<R>(
    repo: &R,
    user: &AuthenticatedUser,
    area_id: i32,
    form: AreaForm,
) -> ServiceResult<Area>
where
    R: AreaWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let update = form
        .into_update_area()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.update_area(area_id, user.hub_id, &update)
        .map_err(ServiceError::from)
}

/// Deletes an area; its tables move back to the main map.
pub fn remove_area<R>(repo: &R, user: &AuthenticatedUser, area_id: i32) -> ServiceResult<()>
where
    R: AreaWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    repo.delete_area(area_id, user.hub_id)
        .map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::settings::{DEFAULT_CURRENCY, DEFAULT_MAP_WIDTH};
    use crate::repository::mock::MockFloorRepository;
    use crate::services::test_support::{HUB_ID, fixed_datetime, user_with_roles};

    fn settings_form(currency: Option<&str>) -> CompanySettingsForm {
        CompanySettingsForm {
            name: " Blue  Fox ".to_string(),
            address: None,
            phone: None,
            email: None,
            tax_id: None,
            currency: currency.map(str::to_string),
            tax_rate_bp: 1_000,
            locale: None,
            logo_url: None,
        }
    }

    #[test]
    fn company_settings_default_when_missing() {
        let mut repo = MockFloorRepository::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        repo.expect_get_company_settings()
            .withf(|hub_id| *hub_id == HUB_ID)
            .returning(|_| Ok(None));

        let settings = load_company_settings(&repo, &user).expect("settings");

        assert_eq!(settings.name, "Restaurant");
        assert_eq!(settings.currency, DEFAULT_CURRENCY);
        assert_eq!(settings.tax_rate_bp, 0);
        assert_eq!(settings.locale, "en");
    }

    #[test]
    fn save_company_settings_normalizes_payload() {
        let mut repo = MockFloorRepository::new();
        let user = user_with_roles(&[SERVICE_ADMIN_ROLE]);

        repo.expect_save_company_settings()
            .withf(|settings| {
                settings.name == "Blue Fox" && settings.currency == "EUR" && settings.hub_id == HUB_ID
            })
            .times(1)
            .returning(|settings| {
                let mut saved = CompanySettings::defaults(settings.hub_id);
                saved.name = settings.name.clone();
                saved.currency = settings.currency.clone();
                Ok(saved)
            });

        let saved = save_company_settings(&repo, &user, settings_form(Some("eur"))).expect("saved");

        assert_eq!(saved.currency, "EUR");
    }

    #[test]
    fn save_company_settings_rejects_bad_currency() {
        let repo = MockFloorRepository::new();
        let user = user_with_roles(&[SERVICE_ADMIN_ROLE]);

        assert!(matches!(
            save_company_settings(&repo, &user, settings_form(Some("euro"))),
            Err(ServiceError::Form(_))
        ));
    }

    #[test]
    fn map_settings_default_when_missing() {
        let mut repo = MockFloorRepository::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        repo.expect_get_map_settings().returning(|_| Ok(None));

        let settings = load_map_settings(&repo, &user).expect("settings");

        assert_eq!(settings.width, DEFAULT_MAP_WIDTH);
        assert!(settings.snap_to_grid);
    }

    #[test]
    fn save_map_settings_validates_bounds() {
        let repo = MockFloorRepository::new();
        let user = user_with_roles(&[SERVICE_ADMIN_ROLE]);

        let form = MapSettingsForm {
            width: 50,
            height: 800,
            grid_size: 20,
            snap_to_grid: true,
        };

        assert!(matches!(
            save_map_settings(&repo, &user, form),
            Err(ServiceError::Form(_))
        ));
    }

    #[test]
    fn create_area_uses_default_background() {
        let mut repo = MockFloorRepository::new();
        let user = user_with_roles(&[SERVICE_ADMIN_ROLE]);

        repo.expect_create_area()
            .withf(|area| area.background_color == "#ffffff" && area.name == "Terrace")
            .times(1)
            .returning(|area| {
                Ok(Area {
                    id: 1,
                    hub_id: area.hub_id,
                    name: area.name.clone(),
                    width: area.width,
                    height: area.height,
                    background_color: area.background_color.clone(),
                    sort_order: area.sort_order,
                    created_at: fixed_datetime(),
                    updated_at: fixed_datetime(),
                })
            });

        let form = AreaForm {
            name: "Terrace".to_string(),
            width: 600,
            height: 400,
            background_color: None,
            sort_order: 1,
        };

        assert!(create_area(&repo, &user, form).is_ok());
    }

    #[test]
    fn get_area_from_other_hub_is_not_found() {
        let mut repo = MockFloorRepository::new();
        let user = user_with_roles(&[SERVICE_ACCESS_ROLE]);

        repo.expect_get_area_by_id().returning(|_, _| Ok(None));

        assert!(matches!(
            get_area(&repo, &user, 3),
            Err(ServiceError::NotFound)
        ));
    }
}
