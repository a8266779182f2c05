pub use pushkind_common::services::errors::{ServiceError, ServiceResult};

use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::check_role;

pub mod categories;
pub mod chat;
pub mod companies;
pub mod customers;
pub mod dashboard;
pub mod menu;
pub mod orders;
pub mod products;
pub mod settings;
pub mod tables;

/// Fail with `Unauthorized` unless the user carries `role`.
pub(crate) fn ensure_role(user: &AuthenticatedUser, role: &str) -> ServiceResult<()> {
    if check_role(role, &user.roles) {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}

/// Highest page number a listing accepts; larger requests are clamped.
pub const MAX_PAGE: usize = 1_000_000;

/// Requested page number, defaulting to the first and clamped to `1..=MAX_PAGE`.
pub(crate) fn page_number(page: Option<usize>) -> usize {
    page.unwrap_or(1).clamp(1, MAX_PAGE)
}
