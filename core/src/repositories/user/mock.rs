//! In-memory implementation of UserDirectory for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::{RegisterRequest, User};
use crate::errors::DirectoryError;

use super::trait_::UserDirectory;

/// Mock user directory for testing
#[derive(Clone, Default)]
pub struct MockUserDirectory {
    users: Arc<RwLock<HashMap<String, User>>>,
    created: Arc<RwLock<Vec<RegisterRequest>>>,
    outage: Arc<RwLock<Option<DirectoryError>>>,
}

impl MockUserDirectory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a directory holding the given identities
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let users = users.into_iter().map(|u| (u.id.clone(), u)).collect();
        Self {
            users: Arc::new(RwLock::new(users)),
            ..Default::default()
        }
    }

    /// Add or replace an identity
    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.id.clone(), user);
    }

    /// Remove an identity, returning whether it existed
    pub async fn remove(&self, id: &str) -> bool {
        self.users.write().await.remove(id).is_some()
    }

    /// Make every subsequent call fail with `error` (None restores service)
    pub async fn set_outage(&self, error: Option<DirectoryError>) {
        *self.outage.write().await = error;
    }

    /// Registration requests received so far
    pub async fn created_requests(&self) -> Vec<RegisterRequest> {
        self.created.read().await.clone()
    }

    async fn check_outage(&self) -> Result<(), DirectoryError> {
        match self.outage.read().await.as_ref() {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl UserDirectory for MockUserDirectory {
    async fn create(&self, request: &RegisterRequest) -> Result<User, DirectoryError> {
        self.check_outage().await?;
        self.created.write().await.push(request.clone());

        let mut users = self.users.write().await;
        if users.values().any(|u| u.username == request.username) {
            return Err(DirectoryError::Duplicate);
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            username: request.username.clone(),
            name: request.name.clone(),
            picture: request.picture.clone(),
        };
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> Result<User, DirectoryError> {
        self.check_outage().await?;
        self.users
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or(DirectoryError::NotFound)
    }

    async fn find_by_username(&self, username: &str) -> Result<User, DirectoryError> {
        self.check_outage().await?;
        self.users
            .read()
            .await
            .values()
            .find(|u| u.username == username)
            .cloned()
            .ok_or(DirectoryError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_request(username: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            name: "Tony Stark".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_then_lookup() {
        let directory = MockUserDirectory::new();
        let created = directory.create(&register_request("IronMan")).await.unwrap();

        assert!(!created.id.is_empty());
        assert_eq!(directory.find_by_id(&created.id).await.unwrap(), created);
        assert_eq!(directory.find_by_username("IronMan").await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_duplicate_username() {
        let directory = MockUserDirectory::new();
        directory.create(&register_request("IronMan")).await.unwrap();

        let result = directory.create(&register_request("IronMan")).await;
        assert_eq!(result, Err(DirectoryError::Duplicate));
    }

    #[tokio::test]
    async fn test_missing_identity() {
        let directory = MockUserDirectory::new();
        assert_eq!(directory.find_by_id("nope").await, Err(DirectoryError::NotFound));
        assert_eq!(directory.find_by_username("nope").await, Err(DirectoryError::NotFound));
    }

    #[tokio::test]
    async fn test_outage() {
        let directory =
            MockUserDirectory::with_users([User::new("newid", "IronMan", "Tony Stark")]);
        directory
            .set_outage(Some(DirectoryError::Unavailable { message: "down".into() }))
            .await;

        assert!(matches!(
            directory.find_by_id("newid").await,
            Err(DirectoryError::Unavailable { .. })
        ));

        directory.set_outage(None).await;
        assert!(directory.find_by_id("newid").await.is_ok());
    }
}
