use actix_web::{web, HttpRequest, HttpResponse};
use spear_core::domain::LoginRequest;
use spear_core::repositories::UserDirectory;
use spear_shared::types::ApiResponse;

use crate::dto::LoginInfo;
use crate::handlers::{headers, ApiError};

use super::AppState;

/// Handler for POST {prefix}/login
///
/// Logs in an identity already known to the user directory. The identity
/// is read from the base64 JSON `X-USER-INFO` header.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "data": {
///         "accessToken": "eyJ...",
///         "refreshToken": "eyJ...",
///         "tokenType": "Bearer",
///         "expireTime": "2024-01-08T10:00:00Z",
///         "info": { "id": "...", "username": "...", "name": "..." }
///     }
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Header missing or undecodable
/// - 404 Not Found: No identity with that username
/// - 500 Internal Server Error: Directory unavailable or signing failure
pub async fn login<U>(
    req: HttpRequest,
    state: web::Data<AppState<U>>,
) -> Result<HttpResponse, ApiError>
where
    U: UserDirectory + 'static,
{
    let info: LoginInfo = headers::user_info(&req)?;
    let request = LoginRequest::from(info);

    let pair = state.auth_service.login(&request).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::new(pair)))
}
