use std::sync::Arc;

use actix_web::cookie::{time::Duration, Cookie, SameSite};
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::core::AppError;
use crate::modules::cart::services::CartService;

/// Cookie holding the opaque cart id
pub const CART_COOKIE: &str = "CartId";

/// Lifetime of a newly issued cart cookie
pub const CART_COOKIE_DAYS: i64 = 30;

/// Attributes applied to the cart cookie
#[derive(Debug, Clone, Copy)]
pub struct CartCookieConfig {
    pub secure: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemQuery {
    pub product_id: i64,
    pub quantity: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveItemQuery {
    pub product_id: i64,
    pub quantity: Option<i32>,
}

/// Get the current cart
/// GET /cart
pub async fn get_cart(
    service: web::Data<Arc<CartService>>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let cart_id = cart_id_from(&req);

    match service.get_cart(cart_id.as_deref()).await? {
        Some(cart) => Ok(HttpResponse::Ok().json(cart.to_dto())),
        None => Ok(HttpResponse::NoContent().finish()),
    }
}

/// Add a product to the cart, creating the cart on first use
/// POST /cart?productId={id}&quantity={n}
pub async fn add_item(
    service: web::Data<Arc<CartService>>,
    cookie_config: web::Data<CartCookieConfig>,
    req: HttpRequest,
    query: web::Query<AddItemQuery>,
) -> Result<HttpResponse, AppError> {
    let cart_id = cart_id_from(&req);
    let update = service
        .add_item(cart_id.as_deref(), query.product_id, query.quantity)
        .await?;

    let mut response = HttpResponse::Ok();
    if update.created {
        response.cookie(cart_cookie(update.cart.cart_id.clone(), cookie_config.secure));
    }

    Ok(response.json(update.cart.to_dto()))
}

/// Remove units of a product from the cart
/// DELETE /cart?productId={id}[&quantity={n}]
pub async fn remove_item(
    service: web::Data<Arc<CartService>>,
    req: HttpRequest,
    query: web::Query<RemoveItemQuery>,
) -> Result<HttpResponse, AppError> {
    let cart_id = cart_id_from(&req);

    match service
        .remove_item(cart_id.as_deref(), query.product_id, query.quantity)
        .await?
    {
        Some(cart) => Ok(HttpResponse::Ok().json(cart.to_dto())),
        None => Ok(HttpResponse::NoContent().finish()),
    }
}

fn cart_id_from(req: &HttpRequest) -> Option<String> {
    req.cookie(CART_COOKIE).map(|c| c.value().to_string())
}

fn cart_cookie(cart_id: String, secure: bool) -> Cookie<'static> {
    Cookie::build(CART_COOKIE, cart_id)
        .path("/")
        .max_age(Duration::days(CART_COOKIE_DAYS))
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .finish()
}

/// Cookie that tells the browser to drop its cart id
pub fn expired_cart_cookie(secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::build(CART_COOKIE, "")
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .finish();
    cookie.make_removal();
    cookie
}

/// Configure cart routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/cart")
            .route(web::get().to(get_cart))
            .route(web::post().to(add_item))
            .route(web::delete().to(remove_item)),
    );
}
