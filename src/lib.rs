pub mod assistant;
pub mod config;
pub mod domain;
pub mod forms;
pub mod models;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;

/// Role required to use the POS, kitchen and floor screens.
pub const SERVICE_ACCESS_ROLE: &str = "restaurant";

/// Role required to change the catalog, settings and customer records.
pub const SERVICE_ADMIN_ROLE: &str = "restaurant_admin";
