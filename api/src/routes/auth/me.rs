use actix_web::{web, HttpRequest, HttpResponse};
use spear_core::repositories::UserDirectory;
use spear_shared::types::ApiResponse;

use crate::handlers::{headers, ApiError};

use super::AppState;

/// Handler for GET {prefix}/me
///
/// Returns the identity named by the `X-USER-ID` header.
pub async fn me<U>(
    req: HttpRequest,
    state: web::Data<AppState<U>>,
) -> Result<HttpResponse, ApiError>
where
    U: UserDirectory + 'static,
{
    let user_id = headers::user_id(&req)?;

    let user = state.auth_service.me(user_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::new(user)))
}
