use actix_web::{web, HttpRequest, HttpResponse};
use spear_core::repositories::UserDirectory;
use spear_shared::types::ApiResponse;

use crate::handlers::{headers, ApiError};

use super::AppState;

/// Handler for POST {prefix}/refresh
///
/// Exchanges the refresh token in `Authorization: Bearer <token>` for a
/// new token pair.
///
/// ## Errors
/// - 401 Unauthorized: Missing bearer credential, invalid or expired token, or not a refresh token
/// - 404 Not Found: The token's identity no longer exists
/// - 500 Internal Server Error: Directory unavailable or signing failure
pub async fn refresh<U>(
    req: HttpRequest,
    state: web::Data<AppState<U>>,
) -> Result<HttpResponse, ApiError>
where
    U: UserDirectory + 'static,
{
    let token = headers::bearer_token(&req)?;

    let pair = state.auth_service.refresh(token).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::new(pair)))
}
