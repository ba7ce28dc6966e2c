use actix_web::{web, HttpRequest, HttpResponse};
use spear_core::domain::RegisterRequest;
use spear_core::repositories::UserDirectory;
use spear_shared::types::ApiResponse;

use crate::dto::RegisterInfo;
use crate::handlers::{headers, ApiError};

use super::AppState;

/// Handler for POST {prefix}/register
///
/// Creates the identity described by the `X-USER-INFO` header and returns
/// its first token pair.
///
/// ## Errors
/// - 400 Bad Request: Header missing or undecodable
/// - 409 Conflict: The username is already registered
/// - 500 Internal Server Error: Directory unavailable or signing failure
pub async fn register<U>(
    req: HttpRequest,
    state: web::Data<AppState<U>>,
) -> Result<HttpResponse, ApiError>
where
    U: UserDirectory + 'static,
{
    let info: RegisterInfo = headers::user_info(&req)?;
    let request = RegisterRequest::from(info);

    let pair = state.auth_service.register(&request).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::new(pair)))
}
