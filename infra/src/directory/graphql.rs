//! GraphQL-backed user directory
//!
//! Talks to the user service over plain HTTP POST of GraphQL documents.
//! Every failure is classified here, once, into a [`DirectoryError`] kind.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

use spear_core::domain::{RegisterRequest, User};
use spear_core::errors::DirectoryError;
use spear_core::repositories::UserDirectory;
use spear_shared::config::UserDirectoryConfig;

use crate::InfrastructureError;

const CREATE_USER: &str = r#"mutation CreateUser(
  $name: String!
  $username: String!
  $role: String!
  $tokenID: String!
  $provider: String!
  $picture: String!
) {
  createUser(input: {
    name: $name
    username: $username
    role: $role
    tokenID: $tokenID
    provider: $provider
    picture: $picture
    status: "active"
  }) {
    id
    name
    username
    picture
  }
}"#;

const USER_BY_ID: &str = r#"query User($id: ID!) {
  user(id: $id) {
    id
    name
    username
    picture
  }
}"#;

const USER_BY_USERNAME: &str = r#"query UserByUsername($username: String!) {
  userByUsername(username: $username) {
    id
    name
    username
    picture
  }
}"#;

/// Error code the user service reports for a missing identity
const NOT_FOUND_CODE: &str = "not_found";

/// Error code the user service reports for a uniqueness violation
const DUPLICATED_VALUE_CODE: &str = "duplicated_value";

#[derive(Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: Value,
}

#[derive(Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<HashMap<String, Option<UserNode>>>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
    #[serde(default)]
    extensions: Option<GraphQlErrorExtensions>,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorExtensions {
    #[serde(default)]
    code: Option<String>,
}

impl GraphQlError {
    fn code(&self) -> &str {
        self.extensions
            .as_ref()
            .and_then(|ext| ext.code.as_deref())
            .unwrap_or(&self.message)
    }

    fn classify(&self) -> DirectoryError {
        match self.code() {
            NOT_FOUND_CODE => DirectoryError::NotFound,
            DUPLICATED_VALUE_CODE => DirectoryError::Duplicate,
            _ => DirectoryError::InvalidResponse {
                message: self.message.clone(),
            },
        }
    }
}

#[derive(Deserialize)]
struct UserNode {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    username: String,
    #[serde(default)]
    picture: Option<String>,
}

impl From<UserNode> for User {
    fn from(node: UserNode) -> Self {
        User {
            id: node.id,
            username: node.username,
            name: node.name,
            picture: node.picture.filter(|p| !p.is_empty()),
        }
    }
}

/// User directory client for the GraphQL user service
pub struct GraphQlUserDirectory {
    client: reqwest::Client,
    url: String,
}

impl GraphQlUserDirectory {
    pub fn new(config: &UserDirectoryConfig) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    /// Sends a document and extracts the user returned under `field`
    async fn execute(
        &self,
        operation: &str,
        document: &str,
        variables: Value,
        field: &str,
    ) -> Result<User, DirectoryError> {
        debug!(operation, "Sending user directory request");

        let request = GraphQlRequest {
            query: document,
            variables,
        };

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                warn!(operation, error = %e, "User directory unreachable");
                DirectoryError::Unavailable {
                    message: e.to_string(),
                }
            })?;

        let body: GraphQlResponse = response.json().await.map_err(|e| {
            warn!(operation, error = %e, "Undecodable user directory response");
            DirectoryError::InvalidResponse {
                message: e.to_string(),
            }
        })?;

        if let Some(error) = body.errors.first() {
            let classified = error.classify();
            debug!(operation, code = error.code(), "User directory returned an error");
            return Err(classified);
        }

        body.data
            .and_then(|mut data| data.remove(field))
            .flatten()
            .map(User::from)
            .ok_or(DirectoryError::NotFound)
    }
}

#[async_trait]
impl UserDirectory for GraphQlUserDirectory {
    async fn create(&self, request: &RegisterRequest) -> Result<User, DirectoryError> {
        let variables = json!({
            "name": request.name,
            "username": request.username,
            "role": request.role,
            "tokenID": request.token_id,
            "provider": request.provider,
            "picture": request.picture.as_deref().unwrap_or_default(),
        });

        self.execute("createUser", CREATE_USER, variables, "createUser")
            .await
    }

    async fn find_by_id(&self, id: &str) -> Result<User, DirectoryError> {
        self.execute("user", USER_BY_ID, json!({ "id": id }), "user")
            .await
    }

    async fn find_by_username(&self, username: &str) -> Result<User, DirectoryError> {
        self.execute(
            "userByUsername",
            USER_BY_USERNAME,
            json!({ "username": username }),
            "userByUsername",
        )
        .await
    }
}
