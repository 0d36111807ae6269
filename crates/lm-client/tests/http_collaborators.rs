//! Integration tests for the HTTP collaborators against a mock server.

use lm_client::{AdminApiClient, AdminSession, ClientError, LegacySource};
use lm_model::{ComponentRepresentation, UserRepresentation};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn http() -> reqwest::Client {
    reqwest::Client::new()
}

fn session(server: &MockServer) -> AdminSession {
    AdminSession::new(http(), &server.uri(), "master", "admin-cli", "admin", "admin")
}

#[tokio::test]
async fn acquires_token_via_password_grant() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/realms/master/protocol/openid-connect/token"))
        .and(body_string_contains("grant_type=password"))
        .and(body_string_contains("client_id=admin-cli"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "tok-123",
            "token_type": "Bearer"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let token = session(&server).acquire_token().await.unwrap();
    assert_eq!(token, "tok-123");
}

#[tokio::test]
async fn token_error_body_is_preserved() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/realms/master/protocol/openid-connect/token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Invalid user credentials"
        })))
        .mount(&server)
        .await;

    let err = session(&server).acquire_token().await.unwrap_err();
    match err {
        ClientError::Auth(detail) => {
            assert!(detail.contains("invalid_grant"), "detail: {detail}");
            assert!(detail.contains("Invalid user credentials"), "detail: {detail}");
        }
        other => panic!("expected Auth error, got {other}"),
    }
}

#[tokio::test]
async fn missing_access_token_is_an_auth_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/realms/master/protocol/openid-connect/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token_type": "Bearer"})))
        .mount(&server)
        .await;

    let err = session(&server).acquire_token().await.unwrap_err();
    assert!(matches!(err, ClientError::Auth(_)));
}

fn admin(server: &MockServer) -> AdminApiClient {
    AdminApiClient::new(http(), &server.uri(), "research", "tok-123")
}

fn payload(username: &str) -> UserRepresentation {
    UserRepresentation {
        username: username.to_string(),
        email: Some(format!("{username}@example.com")),
        enabled: true,
        email_verified: true,
        ..Default::default()
    }
}

#[tokio::test]
async fn create_user_returns_sub_500_statuses() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/admin/realms/research/users"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(409))
        .mount(&server)
        .await;

    let status = admin(&server).create_user(&payload("a")).await.unwrap();
    assert_eq!(status.as_u16(), 409);
}

#[tokio::test]
async fn create_user_5xx_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/admin/realms/research/users"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let err = admin(&server).create_user(&payload("a")).await.unwrap_err();
    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 502);
            assert_eq!(message, "bad gateway");
        }
        other => panic!("expected Api error, got {other}"),
    }
}

#[tokio::test]
async fn find_user_filters_to_exact_username() {
    let server = MockServer::start().await;

    // The exact=true query can still return near matches on some servers;
    // the client filters to the precise username.
    Mock::given(method("GET"))
        .and(path("/admin/realms/research/users"))
        .and(query_param("username", "test-user"))
        .and(query_param("exact", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "u-2", "username": "test-user-2", "enabled": true},
            {"id": "u-1", "username": "test-user", "enabled": true}
        ])))
        .mount(&server)
        .await;

    let found = admin(&server)
        .find_user_by_username("test-user")
        .await
        .unwrap()
        .expect("should find the exact match");
    assert_eq!(found.id.as_deref(), Some("u-1"));
}

#[tokio::test]
async fn find_user_returns_none_for_empty_result() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/realms/research/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let found = admin(&server).find_user_by_username("ghost").await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn get_component_maps_404_to_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/realms/research/components/legacy-user-storage"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let component = admin(&server)
        .get_component("legacy-user-storage")
        .await
        .unwrap();
    assert!(component.is_none());
}

#[tokio::test]
async fn get_component_deserializes_config() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/realms/research/components/legacy-user-storage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "legacy-user-storage",
            "name": "legacy",
            "providerId": "legacy-user-storage",
            "providerType": "org.keycloak.storage.UserStorageProvider",
            "parentId": "research",
            "config": {"enabled": ["true"], "priority": ["0"]}
        })))
        .mount(&server)
        .await;

    let component: ComponentRepresentation = admin(&server)
        .get_component("legacy-user-storage")
        .await
        .unwrap()
        .expect("component should exist");
    assert_eq!(component.enabled_value(), "true");
    assert_eq!(component.parent_id.as_deref(), Some("research"));
}

#[tokio::test]
async fn legacy_source_fetches_full_listing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"username": "a", "displayName": "A One", "email": "a@example.com", "roles": ["r1"]},
            {"username": "b", "displayName": "B Two", "email": "b@example.com"}
        ])))
        .mount(&server)
        .await;

    let source = LegacySource::new(http(), &server.uri(), "/users");
    let users = source.fetch_all().await.unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].username, "a");
    assert!(users[1].roles.is_empty());
}

#[tokio::test]
async fn legacy_source_non_2xx_is_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let source = LegacySource::new(http(), &server.uri(), "/users");
    let err = source.fetch_all().await.unwrap_err();
    match err {
        ClientError::Source(detail) => assert!(detail.contains("maintenance"), "detail: {detail}"),
        other => panic!("expected Source error, got {other}"),
    }
}
