//! User directory trait defining the interface to the external system of
//! record for identities.
//!
//! The directory is a remote collaborator; this crate only needs creation
//! and two lookups. Failures come back as a closed set of
//! [`DirectoryError`] kinds so callers can classify them without looking
//! at message text.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::entities::user::{RegisterRequest, User};
use crate::errors::DirectoryError;

/// Port to the user directory
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use spear_core::domain::{RegisterRequest, User};
/// use spear_core::errors::DirectoryError;
/// use spear_core::repositories::UserDirectory;
///
/// struct StaticDirectory {
///     user: User,
/// }
///
/// #[async_trait]
/// impl UserDirectory for StaticDirectory {
///     async fn create(&self, _request: &RegisterRequest) -> Result<User, DirectoryError> {
///         Err(DirectoryError::Duplicate)
///     }
///
///     async fn find_by_id(&self, id: &str) -> Result<User, DirectoryError> {
///         if id == self.user.id {
///             Ok(self.user.clone())
///         } else {
///             Err(DirectoryError::NotFound)
///         }
///     }
///
///     async fn find_by_username(&self, username: &str) -> Result<User, DirectoryError> {
///         if username == self.user.username {
///             Ok(self.user.clone())
///         } else {
///             Err(DirectoryError::NotFound)
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Create a new identity from a registration request
    ///
    /// # Returns
    /// * `Ok(User)` - The created identity, with its directory-assigned ID
    /// * `Err(DirectoryError::Duplicate)` - The username is already taken
    async fn create(&self, request: &RegisterRequest) -> Result<User, DirectoryError>;

    /// Find an identity by its identifier
    ///
    /// # Returns
    /// * `Err(DirectoryError::NotFound)` - No identity has this ID
    async fn find_by_id(&self, id: &str) -> Result<User, DirectoryError>;

    /// Find an identity by its username
    ///
    /// # Returns
    /// * `Err(DirectoryError::NotFound)` - No identity has this username
    async fn find_by_username(&self, username: &str) -> Result<User, DirectoryError>;
}

#[async_trait]
impl<T: UserDirectory + ?Sized> UserDirectory for Arc<T> {
    async fn create(&self, request: &RegisterRequest) -> Result<User, DirectoryError> {
        (**self).create(request).await
    }

    async fn find_by_id(&self, id: &str) -> Result<User, DirectoryError> {
        (**self).find_by_id(id).await
    }

    async fn find_by_username(&self, username: &str) -> Result<User, DirectoryError> {
        (**self).find_by_username(username).await
    }
}
