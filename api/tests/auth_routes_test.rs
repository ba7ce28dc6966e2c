//! Integration tests for the auth endpoints

use std::sync::Arc;

use actix_web::{http::header, test, web};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{json, Value};

use spear_api::app::create_app;
use spear_api::routes::auth::AppState;
use spear_core::domain::{TokenUse, User};
use spear_core::errors::DirectoryError;
use spear_core::services::auth::AuthService;
use spear_core::services::token::{TokenService, TokenServiceConfig};
use spear_core::testing::{token_service, MockUserDirectory};

const PREFIX: &str = "/api/v1/auth";

fn tony() -> User {
    User::new("newid", "IronMan", "Tony Stark").with_picture("https://picture.com/ironman")
}

fn user_info(payload: Value) -> String {
    STANDARD.encode(payload.to_string())
}

fn iron_man_info() -> String {
    user_info(json!({
        "username": "IronMan",
        "name": "Tony Stark",
        "picture": "https://picture.com/ironman",
        "role": "hero",
        "provider": "StarkIndustries",
        "tokenID": "tokenId"
    }))
}

fn setup(
    directory: MockUserDirectory,
) -> (web::Data<AppState<MockUserDirectory>>, Arc<TokenService>) {
    let tokens = token_service(TokenServiceConfig::default());
    let auth_service = Arc::new(AuthService::new(Arc::new(directory), Arc::clone(&tokens)));
    (web::Data::new(AppState::new(auth_service)), tokens)
}

fn assert_error(body: &Value, code: &str, legacy_code: i64) {
    assert_eq!(body["error"]["code"], code);
    assert_eq!(body["error"]["legacyCode"], legacy_code);
    assert!(body["error"]["message"].is_string());
}

#[actix_web::test]
async fn test_login_success() {
    let (state, tokens) = setup(MockUserDirectory::with_users([tony()]));
    let app = test::init_service(create_app(state, PREFIX)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .insert_header(("X-USER-INFO", iron_man_info()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    let data = &body["data"];
    assert_eq!(data["tokenType"], "Bearer");
    assert_eq!(data["info"]["id"], "newid");
    assert!(data["expireTime"].is_string());

    let access = tokens.verify(data["accessToken"].as_str().unwrap()).unwrap();
    assert_eq!(access.user, Some(tony()));
    let refresh = tokens.verify(data["refreshToken"].as_str().unwrap()).unwrap();
    assert_eq!(refresh.token_use, TokenUse::Refresh);
}

#[actix_web::test]
async fn test_login_unregistered() {
    let (state, _) = setup(MockUserDirectory::new());
    let app = test::init_service(create_app(state, PREFIX)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .insert_header(("X-USER-INFO", iron_man_info()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 404);
    let body: Value = test::read_body_json(resp).await;
    assert_error(&body, "identity-not-registered", 54002);
}

#[actix_web::test]
async fn test_login_invalid_payloads() {
    let (state, _) = setup(MockUserDirectory::with_users([tony()]));
    let app = test::init_service(create_app(state, PREFIX)).await;

    let missing = test::TestRequest::post().uri("/api/v1/auth/login").to_request();
    let resp = test::call_service(&app, missing).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_error(&body, "invalid-request", 54005);

    let not_json = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .insert_header(("X-USER-INFO", STANDARD.encode("IronMan")))
        .to_request();
    let resp = test::call_service(&app, not_json).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_error(&body, "invalid-request", 54000);
}

#[actix_web::test]
async fn test_register_success() {
    let directory = MockUserDirectory::new();
    let (state, tokens) = setup(directory.clone());
    let app = test::init_service(create_app(state, PREFIX)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .insert_header(("X-USER-INFO", iron_man_info()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["info"]["username"], "IronMan");

    let access = tokens
        .verify(body["data"]["accessToken"].as_str().unwrap())
        .unwrap();
    assert_eq!(Some(access.sub.as_str()), body["data"]["info"]["id"].as_str());
    assert_eq!(directory.created_requests().await.len(), 1);
}

#[actix_web::test]
async fn test_register_duplicate() {
    let (state, _) = setup(MockUserDirectory::with_users([tony()]));
    let app = test::init_service(create_app(state, PREFIX)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .insert_header(("X-USER-INFO", iron_man_info()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 409);
    let body: Value = test::read_body_json(resp).await;
    assert_error(&body, "identity-already-registered", 54003);
    assert!(body.get("data").is_none());
}

#[actix_web::test]
async fn test_authenticate_registers_unknown_identity() {
    let directory = MockUserDirectory::new();
    let (state, _) = setup(directory.clone());
    let app = test::init_service(create_app(state, PREFIX)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/authenticate")
        .insert_header(("X-USER-INFO", iron_man_info()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["info"]["username"], "IronMan");
    assert_eq!(body["data"]["info"]["name"], "Tony Stark");
    assert_eq!(directory.created_requests().await.len(), 1);
}

#[actix_web::test]
async fn test_authenticate_logs_in_known_identity() {
    let directory = MockUserDirectory::with_users([tony()]);
    let (state, _) = setup(directory.clone());
    let app = test::init_service(create_app(state, PREFIX)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/authenticate")
        .insert_header(("X-USER-INFO", iron_man_info()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["info"]["id"], "newid");
    assert!(directory.created_requests().await.is_empty());
}

#[actix_web::test]
async fn test_authenticate_does_not_register_on_outage() {
    let directory = MockUserDirectory::new();
    directory
        .set_outage(Some(DirectoryError::Unavailable {
            message: "connection refused".into(),
        }))
        .await;
    let (state, _) = setup(directory.clone());
    let app = test::init_service(create_app(state, PREFIX)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/authenticate")
        .insert_header(("X-USER-INFO", iron_man_info()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 500);
    let body: Value = test::read_body_json(resp).await;
    assert_error(&body, "internal-error", 54004);
    assert!(directory.created_requests().await.is_empty());
}

#[actix_web::test]
async fn test_refresh_success() {
    let (state, tokens) = setup(MockUserDirectory::with_users([tony()]));
    let pair = tokens.issue_pair(&tony()).unwrap();
    let app = test::init_service(create_app(state, PREFIX)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", pair.refresh_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    let new_refresh = body["data"]["refreshToken"].as_str().unwrap();
    assert_ne!(new_refresh, pair.refresh_token);
    assert_eq!(tokens.verify(new_refresh).unwrap().sub, "newid");
}

#[actix_web::test]
async fn test_refresh_with_access_token() {
    let (state, tokens) = setup(MockUserDirectory::with_users([tony()]));
    let pair = tokens.issue_pair(&tony()).unwrap();
    let app = test::init_service(create_app(state, PREFIX)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", pair.access_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
    let body: Value = test::read_body_json(resp).await;
    assert_error(&body, "invalid-token", 54001);
}

#[actix_web::test]
async fn test_refresh_without_bearer() {
    let (state, _) = setup(MockUserDirectory::with_users([tony()]));
    let app = test::init_service(create_app(state, PREFIX)).await;

    for value in [None, Some("Token abc"), Some("Bearer not-a-token")] {
        let mut req = test::TestRequest::post().uri("/api/v1/auth/refresh");
        if let Some(value) = value {
            req = req.insert_header((header::AUTHORIZATION, value));
        }
        let resp = test::call_service(&app, req.to_request()).await;

        assert_eq!(resp.status(), 401, "authorization {:?}", value);
        let body: Value = test::read_body_json(resp).await;
        assert_error(&body, "invalid-token", 54001);
    }
}

#[actix_web::test]
async fn test_refresh_for_removed_identity() {
    let directory = MockUserDirectory::with_users([tony()]);
    let (state, tokens) = setup(directory.clone());
    let pair = tokens.issue_pair(&tony()).unwrap();
    directory.remove("newid").await;
    let app = test::init_service(create_app(state, PREFIX)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", pair.refresh_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 404);
    let body: Value = test::read_body_json(resp).await;
    assert_error(&body, "identity-not-registered", 54002);
}

#[actix_web::test]
async fn test_me() {
    let (state, _) = setup(MockUserDirectory::with_users([tony()]));
    let app = test::init_service(create_app(state, PREFIX)).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(("X-USER-ID", "newid"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({ "data": {
            "id": "newid",
            "username": "IronMan",
            "name": "Tony Stark",
            "picture": "https://picture.com/ironman"
        } })
    );
}

#[actix_web::test]
async fn test_me_errors() {
    let (state, _) = setup(MockUserDirectory::with_users([tony()]));
    let app = test::init_service(create_app(state, PREFIX)).await;

    let missing_header = test::TestRequest::get().uri("/api/v1/auth/me").to_request();
    let resp = test::call_service(&app, missing_header).await;
    assert_eq!(resp.status(), 400);

    let unknown = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(("X-USER-ID", "missing"))
        .to_request();
    let resp = test::call_service(&app, unknown).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn test_custom_prefix_and_health() {
    let (state, _) = setup(MockUserDirectory::with_users([tony()]));
    let app = test::init_service(create_app(state, "/auth")).await;

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .insert_header(("X-USER-INFO", iron_man_info()))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
}
