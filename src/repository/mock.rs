use mockall::mock;

use super::{
    AreaReader, AreaWriter, CategoryReader, CategoryWriter, CompanyReader, CompanyWriter,
    CustomerReader, CustomerWriter, MenuWriter, OrderReader, OrderWriter, ProductReader,
    ProductWriter, SettingsReader, SettingsWriter, SubcategoryReader, SubcategoryWriter,
    TableReader, TableWriter,
};
use crate::domain::{
    area::{Area, NewArea, UpdateArea},
    category::{Category, CategoryListQuery, NewCategory, UpdateCategory},
    company::{Company, CompanyListQuery, NewCompany, UpdateCompany},
    customer::{Customer, CustomerListQuery, NewCustomer, UpdateCustomer},
    menu::{MenuInitOutcome, SeedCategory},
    order::{NewOrder, Order, OrderListQuery, OrderStatus},
    product::{NewProduct, Product, ProductListQuery, UpdateProduct},
    settings::{CompanySettings, MapSettings, SaveCompanySettings, SaveMapSettings},
    subcategory::{NewSubcategory, Subcategory, UpdateSubcategory},
    table::{NewTable, Table, TableListQuery, TablePlacement, TableStatus, UpdateTable},
};
use pushkind_common::repository::errors::RepositoryResult;

mock! {
    /// Catalog, menu and settings reads used by the catalog, menu and chat services.
    pub CatalogRepository {}

    impl CategoryReader for CatalogRepository {
        fn list_categories(&self, query: CategoryListQuery) -> RepositoryResult<Vec<Category>>;
        fn get_category_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Category>>;
        fn get_category_by_name(&self, name: &str, hub_id: i32) -> RepositoryResult<Option<Category>>;
    }

    impl CategoryWriter for CatalogRepository {
        fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
        fn update_category(&self, category_id: i32, hub_id: i32, updates: &UpdateCategory) -> RepositoryResult<Category>;
        fn delete_category(&self, category_id: i32, hub_id: i32) -> RepositoryResult<()>;
    }

    impl SubcategoryReader for CatalogRepository {
        fn list_subcategories(&self, hub_id: i32, category_id: Option<i32>) -> RepositoryResult<Vec<Subcategory>>;
        fn get_subcategory_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Subcategory>>;
    }

    impl SubcategoryWriter for CatalogRepository {
        fn create_subcategory(&self, new_subcategory: &NewSubcategory) -> RepositoryResult<Subcategory>;
        fn update_subcategory(&self, subcategory_id: i32, hub_id: i32, updates: &UpdateSubcategory) -> RepositoryResult<Subcategory>;
        fn delete_subcategory(&self, subcategory_id: i32, hub_id: i32) -> RepositoryResult<()>;
    }

    impl ProductReader for CatalogRepository {
        fn get_product_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Product>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    }

    impl ProductWriter for CatalogRepository {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
        fn update_product(&self, product_id: i32, hub_id: i32, updates: &UpdateProduct) -> RepositoryResult<Product>;
        fn delete_product(&self, product_id: i32, hub_id: i32) -> RepositoryResult<()>;
    }

    impl MenuWriter for CatalogRepository {
        fn seed_menu(&self, hub_id: i32, currency: &str, seed: &[SeedCategory]) -> RepositoryResult<MenuInitOutcome>;
    }

    impl SettingsReader for CatalogRepository {
        fn get_company_settings(&self, hub_id: i32) -> RepositoryResult<Option<CompanySettings>>;
        fn get_map_settings(&self, hub_id: i32) -> RepositoryResult<Option<MapSettings>>;
    }
}

mock! {
    pub CustomerRepository {}

    impl CustomerReader for CustomerRepository {
        fn get_customer_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Customer>>;
        fn list_customers(&self, query: CustomerListQuery) -> RepositoryResult<(usize, Vec<Customer>)>;
    }

    impl CustomerWriter for CustomerRepository {
        fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer>;
        fn update_customer(&self, customer_id: i32, hub_id: i32, updates: &UpdateCustomer) -> RepositoryResult<Customer>;
        fn delete_customer(&self, customer_id: i32, hub_id: i32) -> RepositoryResult<()>;
    }

    impl CompanyReader for CustomerRepository {
        fn get_company_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Company>>;
        fn list_companies(&self, query: CompanyListQuery) -> RepositoryResult<(usize, Vec<Company>)>;
    }

    impl CompanyWriter for CustomerRepository {
        fn create_company(&self, new_company: &NewCompany) -> RepositoryResult<Company>;
        fn update_company(&self, company_id: i32, hub_id: i32, updates: &UpdateCompany) -> RepositoryResult<Company>;
        fn delete_company(&self, company_id: i32, hub_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    /// Settings, areas and tables behind the floor designer.
    pub FloorRepository {}

    impl SettingsReader for FloorRepository {
        fn get_company_settings(&self, hub_id: i32) -> RepositoryResult<Option<CompanySettings>>;
        fn get_map_settings(&self, hub_id: i32) -> RepositoryResult<Option<MapSettings>>;
    }

    impl SettingsWriter for FloorRepository {
        fn save_company_settings(&self, settings: &SaveCompanySettings) -> RepositoryResult<CompanySettings>;
        fn save_map_settings(&self, settings: &SaveMapSettings) -> RepositoryResult<MapSettings>;
    }

    impl AreaReader for FloorRepository {
        fn list_areas(&self, hub_id: i32) -> RepositoryResult<Vec<Area>>;
        fn get_area_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Area>>;
    }

    impl AreaWriter for FloorRepository {
        fn create_area(&self, new_area: &NewArea) -> RepositoryResult<Area>;
        fn update_area(&self, area_id: i32, hub_id: i32, updates: &UpdateArea) -> RepositoryResult<Area>;
        fn delete_area(&self, area_id: i32, hub_id: i32) -> RepositoryResult<()>;
    }

    impl TableReader for FloorRepository {
        fn list_tables(&self, query: TableListQuery) -> RepositoryResult<Vec<Table>>;
        fn get_table_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Table>>;
        fn get_table_by_label(&self, label: &str, hub_id: i32) -> RepositoryResult<Option<Table>>;
    }

    impl TableWriter for FloorRepository {
        fn create_table(&self, new_table: &NewTable) -> RepositoryResult<Table>;
        fn update_table(&self, table_id: i32, hub_id: i32, updates: &UpdateTable) -> RepositoryResult<Table>;
        fn set_table_status(&self, table_id: i32, hub_id: i32, status: TableStatus) -> RepositoryResult<Table>;
        fn save_table_layout(&self, hub_id: i32, placements: &[TablePlacement]) -> RepositoryResult<Vec<Table>>;
        fn delete_table(&self, table_id: i32, hub_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    /// Orders plus the catalog and floor reads needed to place them.
    pub OrderRepository {}

    impl OrderReader for OrderRepository {
        fn get_order_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Order>>;
        fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<(usize, Vec<Order>)>;
    }

    impl OrderWriter for OrderRepository {
        fn create_order(&self, new_order: &NewOrder) -> RepositoryResult<Order>;
        fn update_order_status(&self, order_id: i32, hub_id: i32, status: OrderStatus) -> RepositoryResult<Order>;
        fn move_kitchen_order(&self, order_id: i32, hub_id: i32, status: OrderStatus, position: usize) -> RepositoryResult<Order>;
        fn delete_order(&self, order_id: i32, hub_id: i32) -> RepositoryResult<()>;
    }

    impl ProductReader for OrderRepository {
        fn get_product_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Product>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    }

    impl TableReader for OrderRepository {
        fn list_tables(&self, query: TableListQuery) -> RepositoryResult<Vec<Table>>;
        fn get_table_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Table>>;
        fn get_table_by_label(&self, label: &str, hub_id: i32) -> RepositoryResult<Option<Table>>;
    }

    impl CustomerReader for OrderRepository {
        fn get_customer_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Customer>>;
        fn list_customers(&self, query: CustomerListQuery) -> RepositoryResult<(usize, Vec<Customer>)>;
    }
}
