// Contract tests for the account endpoints
//
// Registration, cookie login with lockout, profile, address and logout.

#[path = "../helpers/mod.rs"]
mod helpers;

use actix_web::{cookie::Cookie, http::StatusCode, test};
use chrono::Utc;
use serde_json::{json, Value};

use helpers::*;
use storefront::account::seed::{seed_accounts, DEMO_PASSWORD};
use storefront::account::services::{LOCKOUT_MINUTES, MAX_FAILED_ACCESS_ATTEMPTS};
use storefront::cart::controllers::CART_COOKIE;

#[actix_web::test]
async fn test_register_returns_public_account() {
    let ctx = TestContext::new();
    let app = init_test_app!(ctx);
    let email = TestDataFactory::random_email();

    let req = test::TestRequest::post()
        .uri("/api/account/register")
        .set_json(TestDataFactory::register_payload(&email))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["email"], email.as_str());
    assert_eq!(body["accountType"], "Public");
    assert!(body["businessName"].is_null());
    assert!(!body["id"].as_str().unwrap().is_empty());

    let user = ctx.users.user(&email).unwrap();
    assert!(user.password_hash.starts_with("$argon2"));
    assert_eq!(ctx.users.role_names(), vec!["Public"]);
}

#[actix_web::test]
async fn test_register_duplicate_email_ignores_case() {
    let ctx = TestContext::new();
    let app = init_test_app!(ctx);
    let email = TestDataFactory::random_email();

    let req = test::TestRequest::post()
        .uri("/api/account/register")
        .set_json(TestDataFactory::register_payload(&email))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/account/register")
        .set_json(TestDataFactory::register_payload(&email.to_uppercase()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("already taken"));
}

#[actix_web::test]
async fn test_register_weak_password_is_400() {
    let ctx = TestContext::new();
    let app = init_test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/account/register")
        .set_json(json!({ "email": "weak@test.com", "password": "short" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    let message = body["error"]["message"].as_str().unwrap();
    assert!(message.contains("at least 8 characters"));
    assert!(message.contains("uppercase"));
    assert!(ctx.users.user("weak@test.com").is_none());
}

#[actix_web::test]
async fn test_register_overlong_email_is_400() {
    let ctx = TestContext::new();
    let app = init_test_app!(ctx);
    let email = format!("{}@test.com", "a".repeat(250));

    let req = test::TestRequest::post()
        .uri("/api/account/register")
        .set_json(TestDataFactory::register_payload(&email))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("at most 256 characters"));
    assert!(ctx.users.user(&email).is_none());
}

#[actix_web::test]
async fn test_register_with_address_uses_full_name() {
    let ctx = TestContext::new();
    let app = init_test_app!(ctx);
    let email = TestDataFactory::random_email();

    let mut address = TestDataFactory::address_payload();
    address["fullName"] = json!("");
    let req = test::TestRequest::post()
        .uri("/api/account/register")
        .set_json(json!({
            "email": email,
            "password": TEST_PASSWORD,
            "fullName": "Jane Buyer",
            "businessName": "Jane Co",
            "shippingAddress": address
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["businessName"], "Jane Co");

    let user_id = body["id"].as_str().unwrap().to_string();
    let stored = ctx
        .account_service
        .get_address(&user_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.full_name, "Jane Buyer");
    assert_eq!(stored.country, "US");
}

#[actix_web::test]
async fn test_malformed_json_is_400() {
    let ctx = TestContext::new();
    let app = init_test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/account/register")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"email\":")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], 400);
}

#[actix_web::test]
async fn test_login_sets_session_and_user_info_works() {
    let ctx = TestContext::new();
    let app = init_test_app!(ctx);
    seed_accounts(ctx.users.as_ref()).await.unwrap();

    let req = test::TestRequest::post()
        .uri("/api/login?useCookies=true")
        .set_json(json!({ "email": "business@test.com", "password": DEMO_PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let session = response_cookie(&resp, SESSION_COOKIE).expect("session cookie must be set");

    let req = test::TestRequest::get()
        .uri("/api/account/user-info")
        .cookie(session)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["email"], "business@test.com");
    assert_eq!(body["accountType"], "Business");
    assert_eq!(body["businessName"], "NeoWasl Business LLC");
    assert_eq!(body["taxId"], "11-1111111");
    assert_eq!(body["tier"], "Bronze");
    assert_eq!(body["roles"], json!(["Business"]));
    assert_eq!(body["shippingAddress"]["line2"], "Suite 10");
}

#[actix_web::test]
async fn test_login_email_ignores_case() {
    let ctx = TestContext::new();
    let app = init_test_app!(ctx);
    seed_accounts(ctx.users.as_ref()).await.unwrap();

    let req = test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({ "email": "PUBLIC@test.com", "password": DEMO_PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_login_bad_credentials_is_401() {
    let ctx = TestContext::new();
    let app = init_test_app!(ctx);
    seed_accounts(ctx.users.as_ref()).await.unwrap();

    for email in ["public@test.com", "nobody@test.com"] {
        let req = test::TestRequest::post()
            .uri("/api/login")
            .set_json(json!({ "email": email, "password": "WrongPass1" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert!(response_cookie(&resp, SESSION_COOKIE).is_none());
    }

    assert_eq!(
        ctx.users.user("public@test.com").unwrap().access_failed_count,
        1
    );
}

#[actix_web::test]
async fn test_repeated_failures_lock_account() {
    let ctx = TestContext::new();
    seed_accounts(ctx.users.as_ref()).await.unwrap();

    for _ in 0..MAX_FAILED_ACCESS_ATTEMPTS {
        let err = ctx
            .account_service
            .login("admin@test.com", "WrongPass1")
            .await
            .unwrap_err();
        assert!(matches!(err, storefront::core::AppError::Unauthorized(_)));
    }

    let user = ctx.users.user("admin@test.com").unwrap();
    let lockout_end = user.lockout_end.expect("account must be locked");
    let remaining = lockout_end - Utc::now();
    assert!(remaining.num_minutes() >= LOCKOUT_MINUTES - 1);
    assert_eq!(user.access_failed_count, 0);

    // the right password is refused while locked out
    let err = ctx
        .account_service
        .login("admin@test.com", DEMO_PASSWORD)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("locked out"));
}

#[actix_web::test]
async fn test_successful_login_resets_failures() {
    let ctx = TestContext::new();
    seed_accounts(ctx.users.as_ref()).await.unwrap();

    for _ in 0..2 {
        let _ = ctx.account_service.login("public@test.com", "WrongPass1").await;
    }
    assert_eq!(ctx.users.user("public@test.com").unwrap().access_failed_count, 2);

    ctx.account_service
        .login("public@test.com", DEMO_PASSWORD)
        .await
        .unwrap();
    assert_eq!(ctx.users.user("public@test.com").unwrap().access_failed_count, 0);
}

#[actix_web::test]
async fn test_user_info_requires_session() {
    let ctx = TestContext::new();
    let app = init_test_app!(ctx);

    for uri in ["/api/account/user-info", "/api/account/address"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], 401);
    }
}

#[actix_web::test]
async fn test_address_round_trip() {
    let ctx = TestContext::new();
    let app = init_test_app!(ctx);
    let email = TestDataFactory::random_email();

    let req = test::TestRequest::post()
        .uri("/api/account/register")
        .set_json(TestDataFactory::register_payload(&email))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/login?useCookies=true")
        .set_json(json!({ "email": email, "password": TEST_PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let session = response_cookie(&resp, SESSION_COOKIE).unwrap();

    let req = test::TestRequest::get()
        .uri("/api/account/address")
        .cookie(session.clone())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body.is_null());

    let req = test::TestRequest::post()
        .uri("/api/account/address")
        .cookie(session.clone())
        .set_json(TestDataFactory::address_payload())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["city"], "Albany");
    assert_eq!(body["country"], "US");

    let mut updated = TestDataFactory::address_payload();
    updated["city"] = json!("Buffalo");
    let req = test::TestRequest::post()
        .uri("/api/account/address")
        .cookie(session.clone())
        .set_json(updated)
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get()
        .uri("/api/account/address")
        .cookie(session)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["city"], "Buffalo");
}

#[actix_web::test]
async fn test_logout_expires_cart_cookie() {
    let ctx = TestContext::new();
    let app = init_test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/account/logout")
        .cookie(Cookie::new(CART_COOKIE, "some-cart"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let cookie = response_cookie(&resp, CART_COOKIE).expect("CartId must be expired");
    assert_eq!(cookie.value(), "");
    assert_eq!(cookie.max_age(), Some(actix_web::cookie::time::Duration::ZERO));
}

#[actix_web::test]
async fn test_logout_ends_session() {
    let ctx = TestContext::new();
    let app = init_test_app!(ctx);
    seed_accounts(ctx.users.as_ref()).await.unwrap();

    let req = test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({ "email": "public@test.com", "password": DEMO_PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let session = response_cookie(&resp, SESSION_COOKIE).unwrap();

    let req = test::TestRequest::post()
        .uri("/api/account/logout")
        .cookie(session)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    // the session cookie is replaced by a removal cookie
    let cleared = response_cookie(&resp, SESSION_COOKIE).expect("session must be cleared");
    assert_eq!(cleared.value(), "");
}

#[actix_web::test]
async fn test_seeding_is_idempotent() {
    let ctx = TestContext::new();

    assert_eq!(seed_accounts(ctx.users.as_ref()).await.unwrap(), 3);
    assert_eq!(seed_accounts(ctx.users.as_ref()).await.unwrap(), 0);
    assert_eq!(ctx.users.role_names(), vec!["Admin", "Business", "User"]);

    let info = ctx
        .account_service
        .user_info(&ctx.users.user("admin@test.com").unwrap().id)
        .await
        .unwrap();
    assert_eq!(info.roles, vec!["Admin"]);
}
