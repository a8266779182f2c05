use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use serde::Deserialize;

use crate::domain::company::{Company, CompanyListQuery};
use crate::forms::companies::CompanyForm;
use crate::repository::{CompanyReader, CompanyWriter};
use crate::services::{ServiceError, ServiceResult, ensure_role, page_number};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

/// Query parameters accepted by the companies listing.
#[derive(Debug, Default, Deserialize)]
pub struct CompaniesQuery {
    pub search: Option<String>,
    pub page: Option<usize>,
    /// Hide deactivated companies, e.g. for pickers.
    #[serde(default)]
    pub active_only: bool,
}

pub fn load_companies_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: CompaniesQuery,
) -> ServiceResult<Paginated<Company>>
where
    R: CompanyReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let page = page_number(query.page);
    let mut list_query =
        CompanyListQuery::new(user.hub_id).paginate(page, DEFAULT_ITEMS_PER_PAGE);
    if let Some(term) = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|term| !term.is_empty())
    {
        list_query = list_query.search(term);
    }
    if query.active_only {
        list_query = list_query.only_active();
    }

    let (total, companies) = repo
        .list_companies(list_query)
        .map_err(ServiceError::from)?;

    Ok(Paginated::new(
        companies,
        page,
        total.div_ceil(DEFAULT_ITEMS_PER_PAGE),
    ))
}

pub fn get_company<R>(repo: &R, user: &AuthenticatedUser, company_id: i32) -> ServiceResult<Company>
where
    R: CompanyReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    repo.get_company_by_id(company_id, user.hub_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

pub fn create_company<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: CompanyForm,
) -> ServiceResult<Company>
where
    R: CompanyWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let new_company = form
        .into_new_company(user.hub_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_company(&new_company)
        .map_err(ServiceError::from)
}

pub fn modify_company<R>(
    repo: &R,
    user: &AuthenticatedUser,
    company_id: i32,
    form: CompanyForm,
) -> ServiceResult<Company>
where
    R: CompanyWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let update = form
        .into_update_company()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.update_company(company_id, user.hub_id, &update)
        .map_err(ServiceError::from)
}

/// Deletes a company. Its customers stay, detached from it.
pub fn remove_company<R>(repo: &R, user: &AuthenticatedUser, company_id: i32) -> ServiceResult<()>
where
    R: CompanyWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    repo.delete_company(company_id, user.hub_id)
        .map_err(ServiceError::from)
}
