use chrono::{Duration, Local};
use pushkind_common::domain::auth::AuthenticatedUser;
use serde::Deserialize;

use crate::SERVICE_ADMIN_ROLE;
use crate::domain::dashboard::DashboardSummary;
use crate::domain::order::OrderListQuery;
use crate::domain::table::TableListQuery;
use crate::repository::{OrderReader, TableReader};
use crate::services::{ServiceError, ServiceResult, ensure_role};

pub const DEFAULT_DASHBOARD_DAYS: u32 = 7;
pub const MAX_DASHBOARD_DAYS: u32 = 365;

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// Length of the reporting window; defaults to a week.
    pub days: Option<u32>,
}

/// Aggregates orders created during the last `days` days.
pub fn load_dashboard<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: DashboardQuery,
) -> ServiceResult<DashboardSummary>
where
    R: OrderReader + TableReader + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let days = query
        .days
        .unwrap_or(DEFAULT_DASHBOARD_DAYS)
        .clamp(1, MAX_DASHBOARD_DAYS);
    let since = Local::now().naive_utc() - Duration::days(i64::from(days));

    let (_, orders) = repo
        .list_orders(OrderListQuery::new(user.hub_id).created_after(since))
        .map_err(ServiceError::from)?;
    let tables = repo
        .list_tables(TableListQuery::new(user.hub_id))
        .map_err(ServiceError::from)?;

    Ok(DashboardSummary::compute(days, &orders, &tables))
}
