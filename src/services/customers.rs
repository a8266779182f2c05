use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use serde::Deserialize;

use crate::domain::customer::{Customer, CustomerListQuery};
use crate::forms::customers::CustomerForm;
use crate::repository::{CompanyReader, CustomerReader, CustomerWriter};
use crate::services::{ServiceError, ServiceResult, ensure_role, page_number};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

/// Query parameters accepted by the customers listing.
#[derive(Debug, Default, Deserialize)]
pub struct CustomersQuery {
    pub search: Option<String>,
    pub page: Option<usize>,
    pub company_id: Option<i32>,
}

pub fn load_customers_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: CustomersQuery,
) -> ServiceResult<Paginated<Customer>>
where
    R: CustomerReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let page = page_number(query.page);
    let mut list_query =
        CustomerListQuery::new(user.hub_id).paginate(page, DEFAULT_ITEMS_PER_PAGE);
    if let Some(term) = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|term| !term.is_empty())
    {
        list_query = list_query.search(term);
    }
    if let Some(company_id) = query.company_id {
        list_query = list_query.company_id(company_id);
    }

    let (total, customers) = repo
        .list_customers(list_query)
        .map_err(ServiceError::from)?;

    Ok(Paginated::new(
        customers,
        page,
        total.div_ceil(DEFAULT_ITEMS_PER_PAGE),
    ))
}

pub fn get_customer<R>(
    repo: &R,
    user: &AuthenticatedUser,
    customer_id: i32,
) -> ServiceResult<Customer>
where
    R: CustomerReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    repo.get_customer_by_id(customer_id, user.hub_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

fn ensure_company<R>(repo: &R, hub_id: i32, company_id: Option<i32>) -> ServiceResult<()>
where
    R: CompanyReader + ?Sized,
{
    let Some(company_id) = company_id else {
        return Ok(());
    };

    match repo
        .get_company_by_id(company_id, hub_id)
        .map_err(ServiceError::from)?
    {
        Some(_) => Ok(()),
        None => Err(ServiceError::Form(format!(
            "company {company_id} does not exist"
        ))),
    }
}

pub fn create_customer<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: CustomerForm,
) -> ServiceResult<Customer>
where
    R: CustomerWriter + CompanyReader + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let new_customer = form
        .into_new_customer(user.hub_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;
    ensure_company(repo, user.hub_id, new_customer.company_id)?;

    repo.create_customer(&new_customer)
        .map_err(ServiceError::from)
}

pub fn modify_customer<R>(
    repo: &R,
    user: &AuthenticatedUser,
    customer_id: i32,
    form: CustomerForm,
) -> ServiceResult<Customer>
where
    R: CustomerWriter + CompanyReader + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let update = form
        .into_update_customer()
        .map_err(|err| ServiceError::Form(err.to_string()))?;
    ensure_company(repo, user.hub_id, update.company_id)?;

    repo.update_customer(customer_id, user.hub_id, &update)
        .map_err(ServiceError::from)
}

/// Deletes a customer; past orders keep their data but lose the link.
pub fn remove_customer<R>(
    repo: &R,
    user: &AuthenticatedUser,
    customer_id: i32,
) -> ServiceResult<()>
where
    R: CustomerWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    repo.delete_customer(customer_id, user.hub_id)
        .map_err(ServiceError::from)
}
