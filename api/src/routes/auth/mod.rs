//! Authentication route handlers
//!
//! This module contains all token lifecycle endpoints:
//! - Login and registration from the `X-USER-INFO` payload
//! - Authenticate (login, falling back to registration)
//! - Token refresh
//! - Profile lookup

pub mod authenticate;
pub mod login;
pub mod me;
pub mod refresh;
pub mod register;

use std::sync::Arc;

use spear_core::repositories::UserDirectory;
use spear_core::services::auth::AuthService;

/// Application state that holds shared services
pub struct AppState<U>
where
    U: UserDirectory,
{
    pub auth_service: Arc<AuthService<U>>,
}

impl<U> AppState<U>
where
    U: UserDirectory,
{
    pub fn new(auth_service: Arc<AuthService<U>>) -> Self {
        Self { auth_service }
    }
}
