use chatgate_core::ChatGateError;
use chatgate_core::auth::{AuthError, AuthService};
use chatgate_core::chat::ChatService;
use chatgate_core::history::{HistoryStore, QaPair, RecordId, UserDirectory, UserId};
use chatgate_interaction::{AuthApiClient, ChatApiClient, HistoryApiClient, ServiceClient};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service(server: &MockServer) -> ServiceClient {
    ServiceClient::new(server.uri())
}

#[tokio::test]
async fn test_register_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/register"))
        .and(body_json(json!({"email": "alice@example.com", "password": "pw1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "email": "alice@example.com"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = AuthApiClient::new(service(&server));
    client.register("alice@example.com", "pw1").await.unwrap();
}

#[tokio::test]
async fn test_register_conflict_is_user_already_exists() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/register"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "Email already registered"})),
        )
        .mount(&server)
        .await;

    let client = AuthApiClient::new(service(&server));
    let err = client.register("alice@example.com", "pw1").await.unwrap_err();
    assert_eq!(err, ChatGateError::Auth(AuthError::UserAlreadyExists));
    assert_eq!(err.to_string(), "user already exists");
}

#[tokio::test]
async fn test_register_server_error_is_registration_failed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/register"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "db down"})))
        .mount(&server)
        .await;

    let client = AuthApiClient::new(service(&server));
    let err = client.register("alice@example.com", "pw1").await.unwrap_err();
    assert_eq!(
        err,
        ChatGateError::Auth(AuthError::RegistrationFailed("db down".to_string()))
    );
}

#[tokio::test]
async fn test_login_returns_email() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/login"))
        .and(body_json(json!({"email": "alice@example.com", "password": "pw1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Login successful",
            "email": "alice@example.com"
        })))
        .mount(&server)
        .await;

    let client = AuthApiClient::new(service(&server));
    let email = client.login("alice@example.com", "pw1").await.unwrap();
    assert_eq!(email, "alice@example.com");
}

#[tokio::test]
async fn test_login_unauthorized_is_invalid_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid"})))
        .mount(&server)
        .await;

    let client = AuthApiClient::new(service(&server));
    let err = client.login("alice@example.com", "wrong").await.unwrap_err();
    assert_eq!(err, ChatGateError::Auth(AuthError::InvalidCredentials));
}

#[tokio::test]
async fn test_login_unreachable_service_is_login_failed() {
    // Nothing listens on the discard port.
    let client = AuthApiClient::new(ServiceClient::new("http://127.0.0.1:9"));
    let err = client.login("alice@example.com", "pw1").await.unwrap_err();
    assert!(matches!(err, ChatGateError::Auth(AuthError::LoginFailed(_))));
}

#[tokio::test]
async fn test_lookup_user_by_email() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/by-email/alice@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 42,
            "email": "alice@example.com"
        })))
        .mount(&server)
        .await;

    let client = HistoryApiClient::new(service(&server));
    assert_eq!(client.lookup("alice@example.com").await.unwrap(), UserId(42));
}

#[tokio::test]
async fn test_lookup_unknown_user_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/by-email/ghost@example.com"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "User not found"})))
        .mount(&server)
        .await;

    let client = HistoryApiClient::new(service(&server));
    let err = client.lookup("ghost@example.com").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_load_history_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/42/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "question": "hi", "answer": "hello", "timestamp": "2025-03-01T10:00:00"},
            {"id": 2, "question": "how are you", "answer": "fine", "timestamp": "2025-03-01T10:01:00"}
        ])))
        .mount(&server)
        .await;

    let client = HistoryApiClient::new(service(&server));
    let records = client.load(UserId(42)).await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, RecordId(1));
    assert_eq!(records[0].question, "hi");
    assert_eq!(records[1].answer, "fine");
}

#[tokio::test]
async fn test_append_returns_record() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/42/messages"))
        .and(body_json(json!({"question": "hi", "answer": "hello"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 9,
            "question": "hi",
            "answer": "hello",
            "timestamp": "2025-03-01T10:00:00"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = HistoryApiClient::new(service(&server));
    let record = client
        .append(UserId(42), &QaPair::new("hi", "hello"))
        .await
        .unwrap();
    assert_eq!(record.id, RecordId(9));
}

#[tokio::test]
async fn test_update_puts_record() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/messages/9"))
        .and(body_json(json!({"question": "hi there", "answer": "hello there"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 9,
            "question": "hi there",
            "answer": "hello there"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = HistoryApiClient::new(service(&server));
    client
        .update(RecordId(9), &QaPair::new("hi there", "hello there"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_update_missing_record_is_service_error() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/messages/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Message not found"})))
        .mount(&server)
        .await;

    let client = HistoryApiClient::new(service(&server));
    let err = client
        .update(RecordId(99), &QaPair::new("q", "a"))
        .await
        .unwrap_err();
    assert_eq!(err, ChatGateError::service(404, "Message not found"));
}

#[tokio::test]
async fn test_clear_deletes_history() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/users/42/messages"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = HistoryApiClient::new(service(&server));
    client.clear(UserId(42)).await.unwrap();
}

#[tokio::test]
async fn test_chat_sends_prompt_and_user() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_json(json!({"prompt": "hi", "user_id": 42})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "hello"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = ChatApiClient::new(service(&server));
    assert_eq!(client.chat("hi", Some(UserId(42))).await.unwrap(), "hello");
}

#[tokio::test]
async fn test_chat_without_user_omits_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_json(json!({"prompt": "hi"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "hello"})))
        .mount(&server)
        .await;

    let client = ChatApiClient::new(service(&server));
    assert_eq!(client.chat("hi", None).await.unwrap(), "hello");
}

#[tokio::test]
async fn test_chat_missing_response_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client = ChatApiClient::new(service(&server));
    assert_eq!(client.chat("hi", None).await.unwrap(), "");
}

#[tokio::test]
async fn test_chat_server_error_is_service_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let client = ChatApiClient::new(service(&server));
    let err = client.chat("hi", None).await.unwrap_err();
    assert!(matches!(err, ChatGateError::Service { status: 502, .. }));
}
