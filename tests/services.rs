use std::io::{Seek, SeekFrom, Write};

use actix_multipart::form::tempfile::TempFile;
use pushkind_common::services::errors::ServiceError;
use pushkind_restaurant::domain::order::OrderStatus;
use pushkind_restaurant::domain::product::{NewProduct, ProductListQuery};
use pushkind_restaurant::domain::table::{NewTable, TableStatus};
use pushkind_restaurant::forms::orders::{
    CreateOrderForm, MoveOrderForm, OrderItemForm, OrderStatusForm,
};
use pushkind_restaurant::forms::products::UploadProductsForm;
use pushkind_restaurant::repository::{
    CategoryReader, ProductReader, ProductWriter, TableReader, TableWriter,
};
use pushkind_restaurant::services::companies::{CompaniesQuery, load_companies_page};
use pushkind_restaurant::services::customers::{CustomersQuery, load_customers_page};
use pushkind_restaurant::services::dashboard::{DashboardQuery, load_dashboard};
use pushkind_restaurant::services::menu::{init_menu, load_menu};
use pushkind_restaurant::services::orders::{
    OrdersQuery, change_order_status, create_order, load_kitchen_board, load_orders_page,
    move_kitchen_order,
};
use pushkind_restaurant::services::products::{ProductsQuery, import_products, load_products_page};
use pushkind_restaurant::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};
use tempfile::NamedTempFile;

mod common;

use common::HUB_ID;

fn build_upload_form(csv: &str) -> UploadProductsForm {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(csv.as_bytes()).expect("write csv contents");
    file.as_file_mut()
        .seek(SeekFrom::Start(0))
        .expect("rewind csv");

    UploadProductsForm {
        csv: TempFile {
            file,
            content_type: None,
            file_name: Some("products.csv".to_string()),
            size: csv.len(),
        },
    }
}

fn order_form(table_id: Option<i32>, lines: &[(i32, i32)]) -> CreateOrderForm {
    CreateOrderForm {
        table_id,
        customer_id: None,
        notes: None,
        items: lines
            .iter()
            .map(|(product_id, quantity)| OrderItemForm {
                product_id: *product_id,
                quantity: *quantity,
                notes: None,
            })
            .collect(),
    }
}

#[test]
fn test_import_products_creates_missing_categories() {
    let test_db = common::TestDb::new("test_import_products_creates_missing_categories.db");
    let repo = test_db.repo();
    let admin = common::user(&[SERVICE_ADMIN_ROLE]);

    let form = build_upload_form(
        "Name,Price,Currency,Category,Icon\n\
         Lemonade,3.5,usd,Drinks,🍋\n\
         Cola,2,USD,Drinks,\n\
         Cake,4.25,USD,,\n",
    );

    let imported = import_products(&repo, &admin, form).expect("import succeeds");
    assert_eq!(imported, 3);

    let drinks = repo
        .get_category_by_name("Drinks", HUB_ID)
        .unwrap()
        .expect("category created on the fly");
    let (in_drinks, products) = repo
        .list_products(ProductListQuery::new(HUB_ID).category_id(drinks.id))
        .unwrap();
    assert_eq!(in_drinks, 2);
    let lemonade = products
        .iter()
        .find(|product| product.name == "Lemonade")
        .expect("lemonade imported");
    assert_eq!(lemonade.price_cents, 350);
    assert_eq!(lemonade.currency, "USD");
    assert_eq!(lemonade.icon.as_deref(), Some("🍋"));
}

#[test]
fn test_import_products_reports_bad_row() {
    let test_db = common::TestDb::new("test_import_products_reports_bad_row.db");
    let repo = test_db.repo();
    let admin = common::user(&[SERVICE_ADMIN_ROLE]);

    let form = build_upload_form("name,price,currency\nTea,2.00,USD\nCoffee,abc,USD\n");

    let err = import_products(&repo, &admin, form).expect_err("invalid price");
    assert!(matches!(err, ServiceError::Form(ref message) if message.contains("row 3")));

    let (total, _) = repo
        .list_products(ProductListQuery::new(HUB_ID).include_archived())
        .unwrap();
    assert_eq!(total, 0);
}

#[test]
fn test_order_lifecycle_on_pos_and_kitchen() {
    let test_db = common::TestDb::new("test_order_lifecycle_on_pos_and_kitchen.db");
    let repo = test_db.repo();
    let staff = common::user(&[SERVICE_ACCESS_ROLE]);

    let table = repo.create_table(&NewTable::new(HUB_ID, "A1", 4)).unwrap();
    let soup = repo
        .create_product(&NewProduct::new(HUB_ID, "Soup", 650, "USD"))
        .unwrap();
    let bread = repo
        .create_product(&NewProduct::new(HUB_ID, "Bread", 150, "USD"))
        .unwrap();

    let first = create_order(
        &repo,
        &staff,
        order_form(Some(table.id), &[(soup.id, 2), (bread.id, 1), (soup.id, 1)]),
    )
    .expect("order placed");
    assert_eq!(first.items.len(), 2);
    assert_eq!(first.total_cents, 650 * 3 + 150);
    assert_eq!(first.status, OrderStatus::Pending);

    let table = repo.get_table_by_id(table.id, HUB_ID).unwrap().unwrap();
    assert_eq!(table.status, TableStatus::Occupied);

    let second = create_order(&repo, &staff, order_form(None, &[(bread.id, 4)])).unwrap();

    let moved = move_kitchen_order(
        &repo,
        &staff,
        second.id,
        MoveOrderForm {
            status: "preparing".to_string(),
            position: 0,
        },
    )
    .unwrap();
    assert_eq!(moved.status, OrderStatus::Preparing);

    let board = load_kitchen_board(&repo, &staff).unwrap();
    assert_eq!(board.pending.len(), 1);
    assert_eq!(board.preparing.len(), 1);
    assert!(board.ready.is_empty());

    let err = change_order_status(
        &repo,
        &staff,
        first.id,
        OrderStatusForm {
            status: "served".to_string(),
        },
    )
    .expect_err("pending orders cannot be served directly");
    assert!(matches!(err, ServiceError::Form(_)));

    for status in ["ready", "served"] {
        change_order_status(
            &repo,
            &staff,
            second.id,
            OrderStatusForm {
                status: status.to_string(),
            },
        )
        .unwrap();
    }

    let board = load_kitchen_board(&repo, &staff).unwrap();
    assert_eq!(board.pending.len(), 1);
    assert!(board.preparing.is_empty());
    assert!(board.ready.is_empty());

    let admin = common::user(&[SERVICE_ADMIN_ROLE]);
    let summary = load_dashboard(&repo, &admin, DashboardQuery::default()).unwrap();
    assert_eq!(summary.order_count, 2);
    assert_eq!(summary.revenue_cents, 650 * 3 + 150 + 150 * 4);
    assert_eq!(summary.tables.occupied, 1);
    assert_eq!(summary.top_products[0].name, "Bread");
    assert_eq!(summary.top_products[0].quantity, 5);
}

#[test]
fn test_order_rejects_unavailable_product() {
    let test_db = common::TestDb::new("test_order_rejects_unavailable_product.db");
    let repo = test_db.repo();
    let staff = common::user(&[SERVICE_ACCESS_ROLE]);

    let sold_out = repo
        .create_product(&NewProduct::new(HUB_ID, "Truffle", 2500, "USD").with_availability(false))
        .unwrap();

    let err = create_order(&repo, &staff, order_form(None, &[(sold_out.id, 1)]))
        .expect_err("unavailable product");
    assert!(matches!(err, ServiceError::Form(_)));

    let err = create_order(&repo, &staff, order_form(Some(404), &[(sold_out.id, 1)]))
        .expect_err("unknown table");
    assert!(matches!(err, ServiceError::Form(_)));

    let mut form = order_form(None, &[(sold_out.id, 1)]);
    form.customer_id = Some(404);
    let err = create_order(&repo, &staff, form).expect_err("unknown customer");
    assert!(matches!(err, ServiceError::Form(_)));
}

#[test]
fn test_init_menu_feeds_the_pos_menu() {
    let test_db = common::TestDb::new("test_init_menu_feeds_the_pos_menu.db");
    let repo = test_db.repo();
    let admin = common::user(&[SERVICE_ADMIN_ROLE, SERVICE_ACCESS_ROLE]);

    let outcome = init_menu(&repo, &admin).unwrap();
    assert!(!outcome.already_initialized);
    assert!(outcome.products_created > 0);

    let menu = load_menu(&repo, &admin).unwrap();
    assert_eq!(menu.product_count(), outcome.products_created);

    let again = init_menu(&repo, &admin).unwrap();
    assert!(again.already_initialized);

    let staff = common::user(&[SERVICE_ACCESS_ROLE]);
    assert!(matches!(
        init_menu(&repo, &staff),
        Err(ServiceError::Unauthorized)
    ));
}

#[test]
fn test_page_far_past_the_end_is_empty() {
    let test_db = common::TestDb::new("test_page_far_past_the_end_is_empty.db");
    let repo = test_db.repo();
    let user = common::user(&[SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE]);

    repo.create_product(&NewProduct::new(HUB_ID, "Soup", 650, "USD"))
        .unwrap();

    let products = ProductsQuery {
        page: Some(usize::MAX),
        ..ProductsQuery::default()
    };
    assert!(load_products_page(&repo, &user, products).is_ok());

    let customers = CustomersQuery {
        page: Some(usize::MAX),
        ..CustomersQuery::default()
    };
    assert!(load_customers_page(&repo, &user, customers).is_ok());

    let companies = CompaniesQuery {
        page: Some(usize::MAX),
        ..CompaniesQuery::default()
    };
    assert!(load_companies_page(&repo, &user, companies).is_ok());

    let orders = OrdersQuery {
        page: Some(usize::MAX),
        ..OrdersQuery::default()
    };
    assert!(load_orders_page(&repo, &user, orders).is_ok());
}
