use std::sync::Arc;

use actix_identity::Identity;
use actix_web::{web, HttpMessage, HttpRequest, HttpResponse};

use crate::core::{AppError, Result};
use crate::modules::account::models::{Address, LoginQuery, LoginRequest, RegisterDto};
use crate::modules::account::services::AccountService;
use crate::modules::cart::controllers::{expired_cart_cookie, CartCookieConfig};

/// Register a new public account
/// POST /account/register
pub async fn register(
    service: web::Data<Arc<AccountService>>,
    body: web::Json<RegisterDto>,
) -> Result<HttpResponse> {
    let registered = service.register(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(registered))
}

/// Sign in and attach the session cookie
/// POST /login?useCookies=true
pub async fn login(
    service: web::Data<Arc<AccountService>>,
    req: HttpRequest,
    _query: web::Query<LoginQuery>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    let user = service.login(&body.email, &body.password).await?;

    Identity::login(&req.extensions(), user.id)
        .map_err(|e| AppError::internal(format!("Failed to start session: {}", e)))?;

    Ok(HttpResponse::Ok().finish())
}

/// Profile of the signed-in user
/// GET /account/user-info
pub async fn user_info(
    service: web::Data<Arc<AccountService>>,
    identity: Option<Identity>,
) -> Result<HttpResponse> {
    let user_id = current_user_id(identity)?;
    let info = service.user_info(&user_id).await?;
    Ok(HttpResponse::Ok().json(info))
}

/// Saved address of the signed-in user, or `null`
/// GET /account/address
pub async fn get_address(
    service: web::Data<Arc<AccountService>>,
    identity: Option<Identity>,
) -> Result<HttpResponse> {
    let user_id = current_user_id(identity)?;
    let address = service.get_address(&user_id).await?;
    Ok(HttpResponse::Ok().json(address))
}

/// Create or replace the address of the signed-in user
/// POST /account/address
pub async fn save_address(
    service: web::Data<Arc<AccountService>>,
    identity: Option<Identity>,
    body: web::Json<Address>,
) -> Result<HttpResponse> {
    let user_id = current_user_id(identity)?;
    let address = service.save_address(&user_id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(address))
}

/// End the session and drop the cart cookie
/// POST /account/logout
pub async fn logout(
    identity: Option<Identity>,
    cookie_config: web::Data<CartCookieConfig>,
) -> Result<HttpResponse> {
    if let Some(identity) = identity {
        if let Ok(user_id) = identity.id() {
            tracing::info!(user_id = %user_id, "User logged out");
        }
        identity.logout();
    }

    Ok(HttpResponse::NoContent()
        .cookie(expired_cart_cookie(cookie_config.secure))
        .finish())
}

fn current_user_id(identity: Option<Identity>) -> Result<String> {
    identity
        .ok_or_else(|| AppError::unauthorized("Authentication required"))?
        .id()
        .map_err(|_| AppError::unauthorized("Authentication required"))
}

/// Configure account routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/login", web::post().to(login)).service(
        web::scope("/account")
            .route("/register", web::post().to(register))
            .route("/user-info", web::get().to(user_info))
            .route("/address", web::get().to(get_address))
            .route("/address", web::post().to(save_address))
            .route("/logout", web::post().to(logout)),
    );
}
