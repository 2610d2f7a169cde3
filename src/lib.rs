//! Storefront API Library
//!
//! Catalog browsing, cookie-keyed shopping carts and cookie-session accounts
//! served over actix-web and backed by MySQL.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

use actix_web::web;

// Re-export commonly used types
pub use modules::account;
pub use modules::cart;
pub use modules::catalog;

/// Register every API route; mounted under `/api` by the server
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.configure(modules::catalog::controllers::configure)
        .configure(modules::cart::controllers::configure)
        .configure(modules::account::controllers::configure);
}
