#![cfg(not(coverage))]

use super::*;
use httpmock::prelude::*;
use serde_json::json;
use std::time::Duration;

fn user_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "aud": "authenticated",
        "role": "authenticated",
        "email": "admin@example.com",
        "email_confirmed_at": "2025-01-02T10:00:00Z",
        "last_sign_in_at": "2025-01-03T08:30:00Z",
        "created_at": "2025-01-01T00:00:00Z",
        "updated_at": "2025-01-03T08:30:00Z"
    })
}

fn session_json() -> serde_json::Value {
    json!({
        "access_token": "access-123",
        "token_type": "bearer",
        "expires_in": 3600,
        "expires_at": 1_900_000_000,
        "refresh_token": "refresh-456",
        "user": user_json("u1")
    })
}

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new_with_base_url(server.url("/auth/v1"))
        .with_anon_key("anon-key")
        .with_timeout(Duration::from_secs(5))
}

#[tokio::test]
async fn sign_in_posts_password_grant_with_apikey() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/auth/v1/token")
            .query_param("grant_type", "password")
            .header("apikey", "anon-key")
            .json_body(json!({ "email": "admin@example.com", "password": "Secret123" }));
        then.status(200).json_body(session_json());
    });

    let session = client(&server)
        .sign_in_with_password("admin@example.com", "Secret123")
        .await
        .unwrap();

    mock.assert();
    assert_eq!(session.access_token, "access-123");
    assert_eq!(session.user.email.as_deref(), Some("admin@example.com"));
}

#[tokio::test]
async fn sign_in_surfaces_provider_description() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST).path("/auth/v1/token");
        then.status(400).json_body(json!({
            "error": "invalid_grant",
            "error_description": "Invalid login credentials"
        }));
    });

    let err = client(&server)
        .sign_in_with_password("admin@example.com", "wrong")
        .await
        .expect_err("should fail");
    assert_eq!(err.error, "Invalid login credentials");
    assert_eq!(err.status(), Some(400));
}

#[tokio::test]
async fn update_password_sends_bearer_and_password() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(PUT)
            .path("/auth/v1/user")
            .header("authorization", "Bearer recovery-token")
            .json_body(json!({ "password": "NewPass123" }));
        then.status(200).json_body(user_json("u1"));
    });

    client(&server)
        .update_password("recovery-token", "NewPass123")
        .await
        .unwrap();

    mock.assert();
}

#[tokio::test]
async fn update_password_accepts_empty_or_partial_body() {
    let server = MockServer::start_async().await;
    let mut mock = server.mock(|when, then| {
        when.method(PUT).path("/auth/v1/user");
        then.status(200).json_body(json!({}));
    });
    client(&server)
        .update_password("recovery-token", "NewPass123")
        .await
        .expect("200 with an empty object is a success");
    mock.delete();

    server.mock(|when, then| {
        when.method(PUT).path("/auth/v1/user");
        then.status(204);
    });
    client(&server)
        .update_password("recovery-token", "NewPass123")
        .await
        .expect("204 is a success");
}

#[tokio::test]
async fn update_password_keeps_provider_message_verbatim() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(PUT).path("/auth/v1/user");
        then.status(422).json_body(json!({
            "code": 422,
            "error_code": "weak_password",
            "msg": "weak password"
        }));
    });

    let err = client(&server)
        .update_password("recovery-token", "NewPass123")
        .await
        .expect_err("should fail");
    assert_eq!(err.error, "weak password");
    assert_eq!(err.code, "weak_password");
    assert!(err.is_provider_error());
}

#[tokio::test]
async fn non_json_error_body_yields_empty_message() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(PUT).path("/auth/v1/user");
        then.status(502).body("<html>Bad gateway</html>");
    });

    let err = client(&server)
        .update_password("recovery-token", "NewPass123")
        .await
        .expect_err("should fail");
    assert!(err.error.is_empty());
    assert_eq!(err.code, CODE_PROVIDER);
    assert_eq!(err.status(), Some(502));
}

#[tokio::test]
async fn slow_provider_maps_to_timeout() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path("/auth/v1/user");
        then.status(200)
            .json_body(user_json("u1"))
            .delay(Duration::from_millis(500));
    });

    let err = ApiClient::new_with_base_url(server.url("/auth/v1"))
        .with_timeout(Duration::from_millis(50))
        .get_user("recovery-token")
        .await
        .expect_err("should time out");
    assert!(err.is_timeout());
    assert!(!err.is_provider_error());
}

#[tokio::test]
async fn unreachable_provider_is_request_failure() {
    let err = ApiClient::new_with_base_url("http://127.0.0.1:9/auth/v1")
        .with_timeout(Duration::from_secs(2))
        .get_user("recovery-token")
        .await
        .expect_err("should fail");
    assert!(err.code == CODE_REQUEST_FAILED || err.code == CODE_TIMEOUT);
    assert!(!err.is_provider_error());
}

#[tokio::test]
async fn recover_passes_redirect_to() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/auth/v1/recover")
            .query_param(
                "redirect_to",
                "https://admin.example.com/admin/reset-password",
            )
            .json_body(json!({ "email": "admin@example.com" }));
        then.status(200).json_body(json!({}));
    });

    client(&server)
        .request_password_reset(
            "admin@example.com",
            Some("https://admin.example.com/admin/reset-password"),
        )
        .await
        .unwrap();
    mock.assert();
}

#[tokio::test]
async fn sign_out_accepts_no_content() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/auth/v1/logout")
            .header("authorization", "Bearer access-123");
        then.status(204);
    });

    client(&server).sign_out("access-123").await.unwrap();
    mock.assert();
}
