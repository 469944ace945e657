//! Mock backend tests for the boxoffice HTTP client.
//!
//! These tests use wiremock to simulate the back-office API and exercise
//! validation, bootstrap and request authorization end to end.

use std::sync::Arc;
use std::time::Duration;

use boxoffice_core::{
    ApiUrl, BearerToken, CredentialStore, MemoryCredentialStore, SessionContext, SessionValidator,
};
use boxoffice_http::{ApiClient, ClientConfig, HttpSessionValidator, Resource};
use jsonwebtoken::{EncodingKey, Header};
use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

/// Helper to create an API URL from a mock server.
fn mock_api_url(server: &MockServer) -> ApiUrl {
    ApiUrl::new(format!("http://127.0.0.1:{}/api/", server.address().port())).unwrap()
}

fn mint(username: &str, roles: Value) -> String {
    jsonwebtoken::encode(
        &Header::default(),
        &json!({ "username": username, "roles": roles }),
        &EncodingKey::from_secret(b"backend-secret"),
    )
    .unwrap()
}

/// Matches requests that carry no `Authorization` header.
struct NoAuthorization;

impl Match for NoAuthorization {
    fn matches(&self, request: &Request) -> bool {
        !request.headers.contains_key("authorization")
    }
}

/// A session wired to the mock server, the way an application assembles it.
struct Console {
    store: Arc<MemoryCredentialStore>,
    session: SessionContext,
    client: ApiClient,
}

fn console(server: &MockServer, store: MemoryCredentialStore) -> Console {
    let config = ClientConfig::new(mock_api_url(server));
    let validator = Arc::new(HttpSessionValidator::new(ApiClient::new(config.clone())));
    let store = Arc::new(store);
    let session = SessionContext::new(store.clone(), validator);
    let client = ApiClient::authorized(config, session.subscribe());
    Console {
        store,
        session,
        client,
    }
}

async fn mount_check(server: &MockServer, token: &str, body: Value) {
    Mock::given(method("POST"))
        .and(path("/api/auth/check-token"))
        .and(NoAuthorization)
        .and(body_json(json!({ "token": token })))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

// ============================================================================
// Validator Tests
// ============================================================================

#[tokio::test]
async fn test_validate_accepts_explicit_true() {
    let server = MockServer::start().await;
    mount_check(&server, "a.b.c", json!({ "isValid": true })).await;

    let validator = HttpSessionValidator::new(ApiClient::new(ClientConfig::new(mock_api_url(
        &server,
    ))));
    assert!(validator.validate(&BearerToken::new("a.b.c")).await);
}

#[tokio::test]
async fn test_validate_rejects_false_and_missing_flag() {
    let server = MockServer::start().await;
    mount_check(&server, "revoked", json!({ "isValid": false })).await;
    mount_check(&server, "odd", json!({ "status": "ok" })).await;

    let validator = HttpSessionValidator::new(ApiClient::new(ClientConfig::new(mock_api_url(
        &server,
    ))));
    assert!(!validator.validate(&BearerToken::new("revoked")).await);
    assert!(!validator.validate(&BearerToken::new("odd")).await);
}

#[tokio::test]
async fn test_validate_rejects_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/check-token"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "isValid": true })))
        .mount(&server)
        .await;

    let validator = HttpSessionValidator::new(ApiClient::new(ClientConfig::new(mock_api_url(
        &server,
    ))));
    assert!(!validator.validate(&BearerToken::new("a.b.c")).await);
}

#[tokio::test]
async fn test_validate_rejects_unreachable_backend() {
    let server = MockServer::start().await;
    let api = mock_api_url(&server);
    drop(server);

    let validator = HttpSessionValidator::new(ApiClient::new(ClientConfig::new(api)));
    assert!(!validator.validate(&BearerToken::new("a.b.c")).await);
}

#[tokio::test]
async fn test_validate_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/check-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "isValid": true }))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let config =
        ClientConfig::new(mock_api_url(&server)).with_validation_timeout(Duration::from_millis(50));
    let validator = HttpSessionValidator::new(ApiClient::new(config));
    assert!(!validator.validate(&BearerToken::new("a.b.c")).await);
}

// ============================================================================
// Bootstrap & Authorization Tests
// ============================================================================

#[tokio::test]
async fn test_fresh_start_sends_no_credential() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/clusters"))
        .and(NoAuthorization)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let console = console(&server, MemoryCredentialStore::new());
    let identity = console.session.bootstrap().await;
    assert!(!identity.is_authenticated());

    let clusters = console.client.list(Resource::Clusters).await.unwrap();
    assert_eq!(clusters, json!([]));
}

#[tokio::test]
async fn test_bootstrap_restores_session_and_authorizes() {
    let server = MockServer::start().await;
    let token = mint("alice", json!("Admin"));
    mount_check(&server, &token, json!({ "isValid": true })).await;

    Mock::given(method("GET"))
        .and(path("/api/movies"))
        .and(header("authorization", format!("Bearer {token}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": "m1" }])))
        .expect(1)
        .mount(&server)
        .await;

    let console = console(&server, MemoryCredentialStore::with_token(token.as_str()));
    let identity = console.session.bootstrap().await;

    assert_eq!(identity.username, "alice");
    assert_eq!(identity.roles, vec!["Admin"]);

    let movies = console.client.list(Resource::Movies).await.unwrap();
    assert_eq!(movies[0]["id"], "m1");
}

#[tokio::test]
async fn test_bootstrap_network_failure_clears_credential() {
    let server = MockServer::start().await;
    let api = mock_api_url(&server);
    drop(server);

    let config = ClientConfig::new(api);
    let store = Arc::new(MemoryCredentialStore::with_token(mint("alice", json!("Admin"))));
    let session = SessionContext::new(
        store.clone(),
        Arc::new(HttpSessionValidator::new(ApiClient::new(config))),
    );

    let identity = session.bootstrap().await;

    assert!(!identity.is_authenticated());
    assert!(store.load().is_none());
}

#[tokio::test]
async fn test_relogin_replaces_credential() {
    let server = MockServer::start().await;
    let token_a = mint("alice", json!("Admin"));
    let token_b = mint("bob", json!(["Staff"]));

    Mock::given(method("GET"))
        .and(path("/api/showtimes"))
        .and(header("authorization", format!("Bearer {token_a}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/showtimes"))
        .and(header("authorization", format!("Bearer {token_b}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": "s1" }])))
        .expect(1)
        .mount(&server)
        .await;

    let console = console(&server, MemoryCredentialStore::new());
    console.session.establish(&token_a).unwrap();
    console.session.establish(&token_b).unwrap();

    let showtimes = console.client.list(Resource::Showtimes).await.unwrap();
    assert_eq!(showtimes[0]["id"], "s1");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let values: Vec<_> = requests[0].headers.get_all("authorization").iter().collect();
    assert_eq!(values.len(), 1);
    assert_eq!(values[0].to_str().unwrap(), format!("Bearer {token_b}"));
    assert_eq!(console.store.load().unwrap().as_str(), token_b);
}

#[tokio::test]
async fn test_logout_drops_credential_from_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/genres"))
        .and(NoAuthorization)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let console = console(&server, MemoryCredentialStore::new());
    console
        .session
        .establish(&mint("alice", json!("Admin")))
        .unwrap();
    console.session.logout();

    console.client.list(Resource::Genres).await.unwrap();
}

// ============================================================================
// Resource Tests
// ============================================================================

#[tokio::test]
async fn test_resource_crud_paths() {
    let server = MockServer::start().await;
    let token = mint("alice", json!("Admin"));
    let bearer = format!("Bearer {token}");

    Mock::given(method("POST"))
        .and(path("/api/promotions"))
        .and(header("authorization", bearer.as_str()))
        .and(body_json(json!({ "code": "SPRING", "discountAmount": 10 })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "p1" })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/promotions/p1"))
        .and(header("authorization", bearer.as_str()))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/promotions/p1"))
        .and(header("authorization", bearer.as_str()))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/Reports"))
        .and(body_json(json!({ "date": "2026-09" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "total": 42 })))
        .expect(1)
        .mount(&server)
        .await;

    let console = console(&server, MemoryCredentialStore::new());
    console.session.establish(&token).unwrap();

    let created = console
        .client
        .create(
            Resource::Promotions,
            &json!({ "code": "SPRING", "discountAmount": 10 }),
        )
        .await
        .unwrap();
    assert_eq!(created["id"], "p1");

    let updated = console
        .client
        .update(Resource::Promotions, "p1", &json!({ "code": "SUMMER" }))
        .await
        .unwrap();
    assert_eq!(updated, Value::Null);

    console
        .client
        .remove(Resource::Promotions, "p1")
        .await
        .unwrap();

    let report = console.client.monthly_report("2026-09").await.unwrap();
    assert_eq!(report["total"], 42);
}

#[tokio::test]
async fn test_backend_error_is_protocol_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({ "message": "Admins only" })),
        )
        .mount(&server)
        .await;

    let console = console(&server, MemoryCredentialStore::new());
    let err = console.client.list(Resource::Users).await.unwrap_err();

    match err {
        boxoffice_core::Error::Protocol(e) => {
            assert_eq!(e.status, 403);
            assert_eq!(e.message.as_deref(), Some("Admins only"));
            assert!(e.is_auth_error());
        }
        other => panic!("unexpected error: {other}"),
    }
}
