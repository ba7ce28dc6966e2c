//! Application factory
//!
//! Builds the actix-web application around an already wired [`AppState`].

use actix_web::{web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use spear_core::repositories::UserDirectory;
use spear_shared::types::{ErrorBody, ErrorEnvelope};

use crate::handlers::ErrorCode;
use crate::routes::auth::{
    authenticate::authenticate, login::login, me::me, refresh::refresh, register::register,
    AppState,
};

/// Create and configure the application with all dependencies
///
/// Auth routes are mounted under `api_prefix`.
pub fn create_app<U>(
    app_state: web::Data<AppState<U>>,
    api_prefix: &str,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserDirectory + 'static,
{
    App::new()
        // Add application state
        .app_data(app_state)
        .wrap(TracingLogger::default())
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        .service(
            web::scope(api_prefix)
                .route("/login", web::post().to(login::<U>))
                .route("/register", web::post().to(register::<U>))
                .route("/authenticate", web::post().to(authenticate::<U>))
                .route("/refresh", web::post().to(refresh::<U>))
                .route("/me", web::get().to(me::<U>)),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "spear-auth",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorEnvelope::from(ErrorBody {
        code: "not-found".to_string(),
        legacy_code: ErrorCode::InvalidRequest.legacy_code(),
        message: "The requested resource was not found".to_string(),
    }))
}
