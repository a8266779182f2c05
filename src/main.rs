use std::path::PathBuf;

use actix_files::{Files, NamedFile};
use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::dev::{ServiceRequest, ServiceResponse, fn_service};
use actix_web::{App, HttpServer, middleware, web};
use dotenvy::dotenv;
use pushkind_common::db::establish_connection_pool;
use pushkind_common::middleware::RedirectUnauthorized;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::logout;
use tera::Tera;

use pushkind_restaurant::assistant::GeminiClient;
use pushkind_restaurant::config::ServerConfig;
use pushkind_restaurant::repository::DieselRepository;
use pushkind_restaurant::routes::chat::{AssistantClient, chat_with_assistant};
use pushkind_restaurant::routes::json_config;
use pushkind_restaurant::routes::{
    categories, companies, customers, dashboard, menu, orders, products, settings, tables,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let secret_key = match &config.secret {
        Some(key) => Key::from(key.as_bytes()),
        None => Key::generate(),
    };

    let common_config = CommonServerConfig {
        secret: config.secret.clone().unwrap_or_default(),
        auth_service_url: config.auth_service_url.clone(),
    };

    let pool = match establish_connection_pool(&config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    let tera = match Tera::new("templates/**/*") {
        Ok(t) => t,
        Err(e) => {
            log::error!("Parsing error(s): {e}");
            std::process::exit(1);
        }
    };

    let assistant: AssistantClient = config.gemini.clone().map(GeminiClient::new);
    let assistant = web::Data::new(assistant);

    let domain = config.domain.clone();
    let static_dir = PathBuf::from(&config.static_dir);
    let index_file = static_dir.join("index.html");

    log::info!("Listening on {}:{}", config.address, config.port);

    HttpServer::new(move || {
        let index_file = index_file.clone();

        App::new()
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(format!(".{domain}")))
                    .build(),
            )
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .app_data(json_config())
            .service(
                web::scope("/api")
                    .service(categories::list_categories)
                    .service(categories::add_category)
                    .service(categories::edit_category)
                    .service(categories::delete_category)
                    .service(categories::add_subcategory)
                    .service(categories::edit_subcategory)
                    .service(categories::delete_subcategory)
                    .service(products::upload_products)
                    .service(products::list_products)
                    .service(products::show_product)
                    .service(products::add_product)
                    .service(products::edit_product)
                    .service(products::delete_product)
                    .service(menu::show_menu)
                    .service(menu::initialize_menu)
                    .service(customers::list_customers)
                    .service(customers::show_customer)
                    .service(customers::add_customer)
                    .service(customers::edit_customer)
                    .service(customers::delete_customer)
                    .service(companies::list_companies)
                    .service(companies::show_company)
                    .service(companies::add_company)
                    .service(companies::edit_company)
                    .service(companies::delete_company)
                    .service(settings::show_company_settings)
                    .service(settings::update_company_settings)
                    .service(settings::show_map_settings)
                    .service(settings::update_map_settings)
                    .service(settings::list_areas)
                    .service(settings::add_area)
                    .service(settings::show_area_settings)
                    .service(settings::update_area_settings)
                    .service(settings::delete_area)
                    .service(tables::save_layout)
                    .service(tables::list_tables)
                    .service(tables::add_table)
                    .service(tables::show_table)
                    .service(tables::edit_table)
                    .service(tables::update_table_status)
                    .service(tables::delete_table)
                    .service(orders::show_kitchen_board)
                    .service(orders::move_kitchen_order)
                    .service(orders::list_orders)
                    .service(orders::add_order)
                    .service(orders::show_order)
                    .service(orders::update_order_status)
                    .service(orders::delete_order)
                    .service(dashboard::show_dashboard)
                    .service(chat_with_assistant),
            )
            .service(
                web::scope("")
                    .wrap(RedirectUnauthorized)
                    .service(logout)
                    .service(
                        Files::new("/", &static_dir)
                            .index_file("index.html")
                            .default_handler(fn_service(move |req: ServiceRequest| {
                                // Client-side routes fall back to the SPA entry point.
                                let index_file = index_file.clone();
                                async move {
                                    let (req, _) = req.into_parts();
                                    let file = NamedFile::open_async(index_file).await?;
                                    let res = file.into_response(&req);
                                    Ok(ServiceResponse::new(req, res))
                                }
                            })),
                    ),
            )
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(common_config.clone()))
            .app_data(assistant.clone())
    })
    .bind((config.address.clone(), config.port))?
    .run()
    .await
}
