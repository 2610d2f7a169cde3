pub mod cart_controller;

pub use cart_controller::{configure, expired_cart_cookie, CartCookieConfig, CART_COOKIE};
