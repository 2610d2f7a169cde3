use std::sync::Arc;

use actix_cors::Cors;
use actix_identity::IdentityMiddleware;
use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::{cookie::Key, web, App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use storefront::config::{Config, LogFormat};
use storefront::core::db_initializer;
use storefront::core::pagination::PAGINATION_HEADER;
use storefront::middleware::{json_config, query_config, RateLimiter, RequestId};
use storefront::modules::account::{AccountService, MySqlUserRepository, UserRepository};
use storefront::modules::cart::controllers::CartCookieConfig;
use storefront::modules::cart::{CartRepository, CartService, MySqlCartRepository};
use storefront::modules::catalog::{CatalogService, MySqlProductRepository, ProductRepository};
use storefront::modules::health;

fn init_tracing(format: LogFormat, level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("storefront={},actix_web=info", level).into());

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    init_tracing(config.app.log_format, &config.app.log_level);
    config.validate().context("Configuration validation failed")?;

    tracing::info!("Starting Storefront API");
    tracing::info!(env = %config.app.env, "Environment");
    tracing::info!(address = %config.server.bind_address(), "Server binding");

    let db_pool = config
        .database
        .create_pool()
        .await
        .context("Failed to create database pool")?;

    tracing::info!(
        pool_size = config.database.pool_size,
        max_connections = config.database.max_connections,
        "Database pool initialized"
    );

    let product_repo: Arc<dyn ProductRepository> =
        Arc::new(MySqlProductRepository::new(db_pool.clone()));
    let cart_repo: Arc<dyn CartRepository> = Arc::new(MySqlCartRepository::new(db_pool.clone()));
    let user_repo: Arc<dyn UserRepository> = Arc::new(MySqlUserRepository::new(db_pool.clone()));

    if config.app.seed_database {
        db_initializer::initialize(&db_pool, product_repo.as_ref(), user_repo.as_ref())
            .await
            .context("Failed to initialize database")?;
    } else {
        db_initializer::run_migrations(&db_pool)
            .await
            .context("Failed to apply migrations")?;
    }

    let catalog_service = Arc::new(CatalogService::new(product_repo.clone()));
    let cart_service = Arc::new(CartService::new(cart_repo, product_repo));
    let account_service = Arc::new(AccountService::new(user_repo));

    let session_key = Key::try_from(config.security.session_secret.as_bytes())
        .map_err(|e| anyhow::anyhow!("SESSION_SECRET is not a usable session key: {:?}", e))?;
    let cookie_config = CartCookieConfig {
        secure: config.security.cookie_secure,
    };

    let bind_address = config.server.bind_address();
    let workers = config.server.workers;
    let server_config = config.clone();
    let rate_limiter = RateLimiter::new(config.security.rate_limit_per_minute)
        .trust_proxy_headers(config.security.trust_proxy_headers);

    let server = HttpServer::new(move || {
        let mut cors = Cors::default()
            .allow_any_method()
            .allow_any_header()
            .supports_credentials()
            .expose_headers([PAGINATION_HEADER])
            .max_age(3600);
        for origin in &server_config.cors.allowed_origins {
            cors = cors.allowed_origin(origin);
        }

        let session = SessionMiddleware::builder(CookieSessionStore::default(), session_key.clone())
            .cookie_secure(server_config.security.cookie_secure)
            .cookie_http_only(true)
            .build();

        App::new()
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(web::Data::new(catalog_service.clone()))
            .app_data(web::Data::new(cart_service.clone()))
            .app_data(web::Data::new(account_service.clone()))
            .app_data(web::Data::new(cookie_config))
            .app_data(json_config())
            .app_data(query_config())
            .wrap(IdentityMiddleware::default())
            .wrap(session)
            .wrap(rate_limiter.clone())
            .wrap(cors)
            .wrap(RequestId)
            .wrap(TracingLogger::default())
            .configure(health::controllers::configure)
            .service(web::scope("/api").configure(storefront::configure_api))
    })
    .workers(workers)
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await?;
    Ok(())
}
