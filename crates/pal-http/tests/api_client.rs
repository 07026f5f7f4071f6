//! End-to-end transport tests against a wiremock backend.

use pal_config::{ApiConfig, SessionConfig};
use pal_core::{AuthTransport, ChatTransport, Credentials, Registration, TransportError};
use pal_http::{ApiClient, CSRF_HEADER};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let client = ApiClient::with_base_url(&format!("{}/api", server.uri())).expect("client builds");
    (server, client)
}

fn credentials() -> Credentials {
    Credentials {
        email: "ada@example.com".into(),
        password: "hunter2hunter2".into(),
    }
}

fn profile() -> serde_json::Value {
    json!({"id": 1, "email": "ada@example.com", "username": "ada", "created_at": "2025-01-01T00:00:00Z"})
}

#[tokio::test]
async fn get_profile_returns_user() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/profile/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile()))
        .expect(1)
        .mount(&server)
        .await;

    let user = client.get_profile().await.expect("profile");
    assert_eq!(user.display_name(), "ada");
}

#[tokio::test]
async fn get_profile_unauthenticated_is_api_error() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/profile/"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(json!({"detail": "Authentication credentials were not provided."})),
        )
        .mount(&server)
        .await;

    let err = client.get_profile().await.unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn login_posts_credentials() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .and(body_json(json!({"email": "ada@example.com", "password": "hunter2hunter2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile()))
        .expect(1)
        .mount(&server)
        .await;

    let user = client.login(&credentials()).await.expect("login");
    assert_eq!(user.email, "ada@example.com");
}

#[tokio::test]
async fn login_failure_carries_payload() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"non_field_errors": ["Invalid email or password"]})),
        )
        .mount(&server)
        .await;

    let err = client.login(&credentials()).await.unwrap_err();
    let TransportError::Api { status, payload } = err else {
        panic!("expected API error, got {err:?}");
    };
    assert_eq!(status, 400);
    assert_eq!(payload.message().as_deref(), Some("Invalid email or password"));
}

#[tokio::test]
async fn register_posts_all_fields() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register/"))
        .and(body_json(json!({
            "email": "ada@example.com",
            "username": "ada",
            "password": "hunter2hunter2",
            "password_confirm": "hunter2hunter2"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(profile()))
        .expect(1)
        .mount(&server)
        .await;

    let registration = Registration {
        email: "ada@example.com".into(),
        username: "ada".into(),
        password: "hunter2hunter2".into(),
        password_confirm: "hunter2hunter2".into(),
    };
    let user = client.register(&registration).await.expect("register");
    assert_eq!(user.display_name(), "ada");
}

#[tokio::test]
async fn csrf_cookie_is_echoed_on_post() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/profile/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Set-Cookie", "csrftoken=tok123; Path=/")
                .set_body_json(profile()),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/logout/"))
        .and(header(CSRF_HEADER, "tok123"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "Logged out successfully"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    client.get_profile().await.expect("profile");
    assert_eq!(client.csrf_token().as_deref(), Some("tok123"));
    client.logout().await.expect("logout with csrf header");
}

#[tokio::test]
async fn send_message_posts_text_and_parses_record() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/chatbot/chat/"))
        .and(body_json(json!({"message": "hello"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 9,
            "message": "hello",
            "response": "hi there",
            "created_at": "2025-01-01T00:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let record = client.send_message("hello").await.expect("send");
    assert_eq!(record.id.to_string(), "9");
    assert_eq!(record.response.as_deref(), Some("hi there"));
}

#[tokio::test]
async fn send_message_server_error_carries_error_field() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/chatbot/chat/"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "rate limited"})))
        .mount(&server)
        .await;

    let err = client.send_message("hi").await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(
        err.payload().and_then(|p| p.field("error")).as_deref(),
        Some("rate limited")
    );
}

#[tokio::test]
async fn history_is_returned_in_server_order() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/chatbot/history/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 2, "message": "second", "response": "b"},
            {"id": 1, "message": "first", "response": "a"}
        ])))
        .mount(&server)
        .await;

    let records = client.get_history().await.expect("history");
    let ids: Vec<String> = records.iter().map(|r| r.id.to_string()).collect();
    assert_eq!(ids, vec!["2", "1"]);
}

#[tokio::test]
async fn malformed_success_body_is_parse_error() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/chatbot/history/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client.get_history().await.unwrap_err();
    assert!(matches!(err, TransportError::Parse(_)), "{err:?}");
}

#[tokio::test]
async fn unreachable_backend_is_network_error() {
    let client = ApiClient::with_base_url("http://127.0.0.1:9/api").expect("client builds");
    let err = client.get_profile().await.unwrap_err();
    assert!(matches!(err, TransportError::Network(_)), "{err:?}");
}

#[tokio::test]
async fn session_cookie_survives_a_new_client() {
    let server = MockServer::start().await;
    let tmp = tempfile::TempDir::new().expect("tmp dir");
    let cookie_path = tmp.path().join("cookies");

    let api = ApiConfig {
        base_url: format!("{}/api", server.uri()),
        ..ApiConfig::default()
    };
    let session = SessionConfig {
        persist_cookies: true,
        cookie_path: cookie_path.to_string_lossy().into_owned(),
    };

    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Set-Cookie", "sessionid=s3cr3t; Path=/; HttpOnly")
                .set_body_json(profile()),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/auth/profile/"))
        .and(header("cookie", "sessionid=s3cr3t"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile()))
        .expect(1)
        .mount(&server)
        .await;

    let first = ApiClient::from_config(&api, &session).expect("client builds");
    first.login(&credentials()).await.expect("login");
    assert!(cookie_path.exists());

    let second = ApiClient::from_config(&api, &session).expect("client builds");
    let user = second.get_profile().await.expect("profile with restored cookie");
    assert_eq!(user.display_name(), "ada");
}

#[test]
fn rejects_invalid_base_url() {
    assert!(ApiClient::with_base_url("not a url").is_err());
}
