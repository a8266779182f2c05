use pushkind_common::db::{DbConnection, DbPool};
use pushkind_common::pagination::Pagination;
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::area::{Area, NewArea, UpdateArea};
use crate::domain::category::{Category, CategoryListQuery, NewCategory, UpdateCategory};
use crate::domain::company::{Company, CompanyListQuery, NewCompany, UpdateCompany};
use crate::domain::customer::{Customer, CustomerListQuery, NewCustomer, UpdateCustomer};
use crate::domain::menu::{MenuInitOutcome, SeedCategory};
use crate::domain::order::{NewOrder, Order, OrderListQuery, OrderStatus};
use crate::domain::product::{NewProduct, Product, ProductListQuery, UpdateProduct};
use crate::domain::settings::{CompanySettings, MapSettings, SaveCompanySettings, SaveMapSettings};
use crate::domain::subcategory::{NewSubcategory, Subcategory, UpdateSubcategory};
use crate::domain::table::{
    NewTable, Table, TableListQuery, TablePlacement, TableStatus, UpdateTable,
};

pub mod area;
pub mod category;
pub mod company;
pub mod customer;
pub mod menu;
pub mod order;
pub mod product;
pub mod settings;
pub mod subcategory;
pub mod table;

#[cfg(test)]
pub mod mock;

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// `OFFSET`/`LIMIT` pair for a page. Pages past `i64` range saturate and
/// select nothing.
pub(crate) fn page_bounds(pagination: &Pagination) -> (i64, i64) {
    let offset = (pagination.page.max(1) - 1).saturating_mul(pagination.per_page);
    (
        i64::try_from(offset).unwrap_or(i64::MAX),
        i64::try_from(pagination.per_page).unwrap_or(i64::MAX),
    )
}

/// Read-only operations over menu categories.
pub trait CategoryReader {
    fn list_categories(&self, query: CategoryListQuery) -> RepositoryResult<Vec<Category>>;
    fn get_category_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Category>>;
    fn get_category_by_name(&self, name: &str, hub_id: i32) -> RepositoryResult<Option<Category>>;
}

/// Write operations over menu categories.
pub trait CategoryWriter {
    fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
    fn update_category(
        &self,
        category_id: i32,
        hub_id: i32,
        updates: &UpdateCategory,
    ) -> RepositoryResult<Category>;
    fn delete_category(&self, category_id: i32, hub_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over subcategories.
pub trait SubcategoryReader {
    /// List subcategories of a hub, optionally restricted to one category.
    fn list_subcategories(
        &self,
        hub_id: i32,
        category_id: Option<i32>,
    ) -> RepositoryResult<Vec<Subcategory>>;
    fn get_subcategory_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Subcategory>>;
}

/// Write operations over subcategories.
pub trait SubcategoryWriter {
    fn create_subcategory(&self, new_subcategory: &NewSubcategory) -> RepositoryResult<Subcategory>;
    fn update_subcategory(
        &self,
        subcategory_id: i32,
        hub_id: i32,
        updates: &UpdateSubcategory,
    ) -> RepositoryResult<Subcategory>;
    fn delete_subcategory(&self, subcategory_id: i32, hub_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over products.
pub trait ProductReader {
    fn get_product_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Product>>;
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
}

/// Write operations over products.
pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    fn update_product(
        &self,
        product_id: i32,
        hub_id: i32,
        updates: &UpdateProduct,
    ) -> RepositoryResult<Product>;
    fn delete_product(&self, product_id: i32, hub_id: i32) -> RepositoryResult<()>;
}

/// Bulk catalog seeding.
pub trait MenuWriter {
    /// Create the seed catalog for a hub unless it already has categories or products.
    fn seed_menu(
        &self,
        hub_id: i32,
        currency: &str,
        seed: &[SeedCategory],
    ) -> RepositoryResult<MenuInitOutcome>;
}

/// Read-only operations over customers.
pub trait CustomerReader {
    fn get_customer_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Customer>>;
    fn list_customers(&self, query: CustomerListQuery)
    -> RepositoryResult<(usize, Vec<Customer>)>;
}

/// Write operations over customers.
pub trait CustomerWriter {
    fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer>;
    fn update_customer(
        &self,
        customer_id: i32,
        hub_id: i32,
        updates: &UpdateCustomer,
    ) -> RepositoryResult<Customer>;
    fn delete_customer(&self, customer_id: i32, hub_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over companies.
pub trait CompanyReader {
    fn get_company_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Company>>;
    fn list_companies(&self, query: CompanyListQuery) -> RepositoryResult<(usize, Vec<Company>)>;
}

/// Write operations over companies.
pub trait CompanyWriter {
    fn create_company(&self, new_company: &NewCompany) -> RepositoryResult<Company>;
    fn update_company(
        &self,
        company_id: i32,
        hub_id: i32,
        updates: &UpdateCompany,
    ) -> RepositoryResult<Company>;
    /// Delete a company and detach its customers.
    fn delete_company(&self, company_id: i32, hub_id: i32) -> RepositoryResult<()>;
}

/// Read-only access to per-hub settings.
pub trait SettingsReader {
    fn get_company_settings(&self, hub_id: i32) -> RepositoryResult<Option<CompanySettings>>;
    fn get_map_settings(&self, hub_id: i32) -> RepositoryResult<Option<MapSettings>>;
}

/// Upserts of per-hub settings.
pub trait SettingsWriter {
    fn save_company_settings(
        &self,
        settings: &SaveCompanySettings,
    ) -> RepositoryResult<CompanySettings>;
    fn save_map_settings(&self, settings: &SaveMapSettings) -> RepositoryResult<MapSettings>;
}

/// Read-only operations over dining areas.
pub trait AreaReader {
    fn list_areas(&self, hub_id: i32) -> RepositoryResult<Vec<Area>>;
    fn get_area_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Area>>;
}

/// Write operations over dining areas.
pub trait AreaWriter {
    fn create_area(&self, new_area: &NewArea) -> RepositoryResult<Area>;
    fn update_area(&self, area_id: i32, hub_id: i32, updates: &UpdateArea)
    -> RepositoryResult<Area>;
    /// Delete an area and move its tables to the main map.
    fn delete_area(&self, area_id: i32, hub_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over dining tables.
pub trait TableReader {
    fn list_tables(&self, query: TableListQuery) -> RepositoryResult<Vec<Table>>;
    fn get_table_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Table>>;
    fn get_table_by_label(&self, label: &str, hub_id: i32) -> RepositoryResult<Option<Table>>;
}

/// Write operations over dining tables.
pub trait TableWriter {
    fn create_table(&self, new_table: &NewTable) -> RepositoryResult<Table>;
    fn update_table(
        &self,
        table_id: i32,
        hub_id: i32,
        updates: &UpdateTable,
    ) -> RepositoryResult<Table>;
    fn set_table_status(
        &self,
        table_id: i32,
        hub_id: i32,
        status: TableStatus,
    ) -> RepositoryResult<Table>;
    /// Persist a batch of placements atomically; any unknown table aborts the batch.
    fn save_table_layout(
        &self,
        hub_id: i32,
        placements: &[TablePlacement],
    ) -> RepositoryResult<Vec<Table>>;
    /// Delete a table and detach it from historical orders.
    fn delete_table(&self, table_id: i32, hub_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over orders.
pub trait OrderReader {
    fn get_order_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Order>>;
    fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<(usize, Vec<Order>)>;
}

/// Write operations over orders.
pub trait OrderWriter {
    /// Insert a pending order at the end of the pending column.
    ///
    /// When the order has a table, the table is marked occupied.
    fn create_order(&self, new_order: &NewOrder) -> RepositoryResult<Order>;
    /// Change status, appending the order to the end of the target column.
    fn update_order_status(
        &self,
        order_id: i32,
        hub_id: i32,
        status: OrderStatus,
    ) -> RepositoryResult<Order>;
    /// Move the order to `position` within the `status` column and renumber
    /// the affected columns.
    fn move_kitchen_order(
        &self,
        order_id: i32,
        hub_id: i32,
        status: OrderStatus,
        position: usize,
    ) -> RepositoryResult<Order>;
    fn delete_order(&self, order_id: i32, hub_id: i32) -> RepositoryResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_bounds_skip_previous_pages() {
        let pagination = Pagination {
            page: 3,
            per_page: 20,
        };
        assert_eq!(page_bounds(&pagination), (40, 20));

        let first = Pagination {
            page: 0,
            per_page: 20,
        };
        assert_eq!(page_bounds(&first), (0, 20));
    }

    #[test]
    fn page_bounds_saturate_on_huge_pages() {
        let pagination = Pagination {
            page: usize::MAX,
            per_page: 20,
        };
        assert_eq!(page_bounds(&pagination), (i64::MAX, 20));
    }
}
