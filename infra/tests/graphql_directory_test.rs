//! Integration tests for the GraphQL user directory against a mock server

use serde_json::json;
use spear_core::domain::{RegisterRequest, User};
use spear_core::errors::DirectoryError;
use spear_core::repositories::UserDirectory;
use spear_infra::GraphQlUserDirectory;
use spear_shared::config::UserDirectoryConfig;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn directory_for(server: &MockServer) -> GraphQlUserDirectory {
    let config = UserDirectoryConfig::new(format!("{}/graphql", server.uri()));
    GraphQlUserDirectory::new(&config).unwrap()
}

fn tony_json() -> serde_json::Value {
    json!({
        "id": "newid",
        "name": "Tony Stark",
        "username": "IronMan",
        "picture": "https://picture.com/ironman"
    })
}

async fn respond_with(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_find_by_username() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(json!({ "variables": { "username": "IronMan" } })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": { "userByUsername": tony_json() } })),
        )
        .mount(&server)
        .await;

    let user = directory_for(&server)
        .find_by_username("IronMan")
        .await
        .unwrap();

    assert_eq!(
        user,
        User::new("newid", "IronMan", "Tony Stark").with_picture("https://picture.com/ironman")
    );
}

#[tokio::test]
async fn test_find_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "variables": { "id": "newid" } })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "user": tony_json() } })),
        )
        .mount(&server)
        .await;

    let user = directory_for(&server).find_by_id("newid").await.unwrap();

    assert_eq!(user.id, "newid");
}

#[tokio::test]
async fn test_create_sends_active_user() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "variables": {
                "name": "Tony Stark",
                "username": "IronMan",
                "role": "hero",
                "tokenID": "tokenId",
                "provider": "StarkIndustries",
                "picture": ""
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "createUser": {
                    "id": "newid",
                    "name": "Tony Stark",
                    "username": "IronMan",
                    "picture": ""
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = RegisterRequest {
        username: "IronMan".into(),
        name: "Tony Stark".into(),
        picture: None,
        role: "hero".into(),
        provider: "StarkIndustries".into(),
        token_id: "tokenId".into(),
    };

    let user = directory_for(&server).create(&request).await.unwrap();

    assert_eq!(user.id, "newid");
    assert!(user.picture.is_none());
}

#[tokio::test]
async fn test_not_found_error() {
    let server = MockServer::start().await;
    respond_with(
        &server,
        json!({ "data": null, "errors": [{ "message": "not_found", "path": ["userByUsername"] }] }),
    )
    .await;

    let result = directory_for(&server).find_by_username("nobody").await;

    assert_eq!(result, Err(DirectoryError::NotFound));
}

#[tokio::test]
async fn test_null_user_is_not_found() {
    let server = MockServer::start().await;
    respond_with(&server, json!({ "data": { "user": null } })).await;

    let result = directory_for(&server).find_by_id("missing").await;

    assert_eq!(result, Err(DirectoryError::NotFound));
}

#[tokio::test]
async fn test_duplicated_value_error() {
    let server = MockServer::start().await;
    respond_with(
        &server,
        json!({
            "data": null,
            "errors": [{ "message": "duplicated_value", "path": ["createUser"] }]
        }),
    )
    .await;

    let result = directory_for(&server)
        .create(&RegisterRequest {
            username: "IronMan".into(),
            ..Default::default()
        })
        .await;

    assert_eq!(result, Err(DirectoryError::Duplicate));
}

#[tokio::test]
async fn test_error_code_in_extensions() {
    let server = MockServer::start().await;
    respond_with(
        &server,
        json!({
            "errors": [{
                "message": "user does not exist",
                "extensions": { "code": "not_found" }
            }]
        }),
    )
    .await;

    let result = directory_for(&server).find_by_id("missing").await;

    assert_eq!(result, Err(DirectoryError::NotFound));
}

#[tokio::test]
async fn test_other_graphql_error() {
    let server = MockServer::start().await;
    respond_with(
        &server,
        json!({ "errors": [{ "message": "Cannot query field \"user\"" }] }),
    )
    .await;

    let result = directory_for(&server).find_by_id("newid").await;

    assert!(matches!(result, Err(DirectoryError::InvalidResponse { .. })));
}

#[tokio::test]
async fn test_undecodable_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let result = directory_for(&server).find_by_id("newid").await;

    assert!(matches!(result, Err(DirectoryError::InvalidResponse { .. })));
}

#[tokio::test]
async fn test_server_error_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = directory_for(&server).find_by_id("newid").await;

    assert!(matches!(result, Err(DirectoryError::Unavailable { .. })));
}

#[tokio::test]
async fn test_timeout_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": { "user": tony_json() } }))
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = UserDirectoryConfig {
        url: format!("{}/graphql", server.uri()),
        timeout: 1,
    };
    let directory = GraphQlUserDirectory::new(&config).unwrap();

    let result = directory.find_by_id("newid").await;

    assert!(matches!(result, Err(DirectoryError::Unavailable { .. })));
}
