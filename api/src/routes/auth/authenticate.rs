use actix_web::{web, HttpRequest, HttpResponse};
use spear_core::domain::{LoginRequest, RegisterRequest};
use spear_core::errors::{AuthError, DomainError};
use spear_core::repositories::UserDirectory;
use spear_shared::types::ApiResponse;

use crate::dto::RegisterInfo;
use crate::handlers::{headers, ApiError};

use super::AppState;

/// Handler for POST {prefix}/authenticate
///
/// Tries to log in with the `X-USER-INFO` payload; only when the identity
/// is not registered does it register the same payload instead. Any other
/// login failure is returned as is.
pub async fn authenticate<U>(
    req: HttpRequest,
    state: web::Data<AppState<U>>,
) -> Result<HttpResponse, ApiError>
where
    U: UserDirectory + 'static,
{
    let info: RegisterInfo = headers::user_info(&req)?;
    let register_request = RegisterRequest::from(info);
    let login_request = LoginRequest::from(&register_request);

    let pair = match state.auth_service.login(&login_request).await {
        Err(DomainError::Auth(AuthError::UserNotFound)) => {
            tracing::info!(
                username = %register_request.username,
                "Identity not registered, registering"
            );
            state.auth_service.register(&register_request).await?
        }
        result => result?,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::new(pair)))
}
