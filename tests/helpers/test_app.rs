// Test Application
//
// Builds the API exactly as the server mounts it, backed by in-memory
// repositories. Use `init_test_app!(ctx)` inside an async test.

use std::sync::Arc;

use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;

use storefront::account::AccountService;
use storefront::cart::CartService;
use storefront::catalog::CatalogService;

use super::memory_repositories::{
    InMemoryCartRepository, InMemoryProductRepository, InMemoryUserRepository,
};
use super::test_data::TestDataFactory;

/// Name of the session cookie issued by the session middleware
pub const SESSION_COOKIE: &str = "id";

pub struct TestContext {
    pub products: Arc<InMemoryProductRepository>,
    pub carts: Arc<InMemoryCartRepository>,
    pub users: Arc<InMemoryUserRepository>,
    pub catalog_service: Arc<CatalogService>,
    pub cart_service: Arc<CartService>,
    pub account_service: Arc<AccountService>,
    pub session_key: Key,
}

impl TestContext {
    /// Context seeded with [`TestDataFactory::products`]
    pub fn new() -> Self {
        let products = Arc::new(InMemoryProductRepository::with_products(
            TestDataFactory::products(),
        ));
        let carts = Arc::new(InMemoryCartRepository::new());
        let users = Arc::new(InMemoryUserRepository::new());

        Self {
            catalog_service: Arc::new(CatalogService::new(products.clone())),
            cart_service: Arc::new(CartService::new(carts.clone(), products.clone())),
            account_service: Arc::new(AccountService::new(users.clone())),
            products,
            carts,
            users,
            session_key: Key::generate(),
        }
    }
}

#[macro_export]
macro_rules! init_test_app {
    ($ctx:expr) => {{
        let ctx = &$ctx;
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new(ctx.catalog_service.clone()))
                .app_data(actix_web::web::Data::new(ctx.cart_service.clone()))
                .app_data(actix_web::web::Data::new(ctx.account_service.clone()))
                .app_data(actix_web::web::Data::new(
                    storefront::cart::controllers::CartCookieConfig { secure: false },
                ))
                .app_data(storefront::middleware::json_config())
                .app_data(storefront::middleware::query_config())
                .wrap(actix_identity::IdentityMiddleware::default())
                .wrap(
                    actix_session::SessionMiddleware::builder(
                        actix_session::storage::CookieSessionStore::default(),
                        ctx.session_key.clone(),
                    )
                    .cookie_secure(false)
                    .build(),
                )
                .wrap(storefront::middleware::RequestId)
                .service(
                    actix_web::web::scope("/api").configure(storefront::configure_api),
                ),
        )
        .await
    }};
}

/// Owned copy of a cookie set on the response
pub fn response_cookie<B>(resp: &ServiceResponse<B>, name: &str) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == name)
        .map(|c| c.into_owned())
}
