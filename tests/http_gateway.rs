//! Integration tests for [`HttpGateway`] against a loopback HTTP server.
//!
//! Each test starts an axum stub that answers canned responses per
//! `METHOD /path` and records every request it receives, so the tests can
//! check both what the client sent and how it interpreted the answer.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use axum::{
    Router,
    body::to_bytes,
    extract::{Request, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use taskdeck::gateway::{ApiError, GatewayError, HttpGateway, SESSION_EXPIRED_MESSAGE};
use taskdeck::session::{
    adapters::InMemoryTokenStore,
    domain::{AuthResponse, SessionToken, User},
    ports::TokenStore,
    services::{AuthError, AuthService, SessionContext, SessionStatus},
};
use taskdeck::task::{
    domain::{Attachment, TaskDraft, TaskId, TaskPatch, TaskPriority, TaskStatus},
    ports::TaskGateway,
};
use tokio::net::TcpListener;

/// One request as seen by the stub server.
#[derive(Debug, Clone)]
struct SeenRequest {
    route: String,
    authorization: Option<String>,
    content_type: Option<String>,
    body: Vec<u8>,
}

impl SeenRequest {
    fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    fn body_json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("request body should be JSON")
    }
}

#[derive(Clone, Default)]
struct StubServer {
    routes: Arc<HashMap<String, (StatusCode, String)>>,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

impl StubServer {
    fn seen(&self) -> Vec<SeenRequest> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn only_request(&self) -> SeenRequest {
        let seen = self.seen();
        assert_eq!(seen.len(), 1, "expected exactly one request, got {seen:?}");
        seen.into_iter().next().expect("one request recorded")
    }
}

async fn respond(State(server): State<StubServer>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, usize::MAX).await.unwrap_or_default();
    let header_value = |name: header::HeaderName| {
        parts
            .headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
    };
    let route = format!("{} {}", parts.method, parts.uri.path());
    server
        .seen
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(SeenRequest {
            route: route.clone(),
            authorization: header_value(header::AUTHORIZATION),
            content_type: header_value(header::CONTENT_TYPE),
            body: bytes.to_vec(),
        });

    match server.routes.get(&route) {
        Some((status, reply)) => (
            *status,
            [(header::CONTENT_TYPE, "application/json")],
            reply.clone(),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, r#"{"message":"no such route"}"#).into_response(),
    }
}

/// Starts a stub server and returns its base URL.
async fn serve(routes: Vec<(&str, StatusCode, Value)>) -> (String, StubServer) {
    let table = routes
        .into_iter()
        .map(|(route, status, reply)| {
            let body = if reply.is_null() {
                String::new()
            } else {
                reply.to_string()
            };
            (route.to_owned(), (status, body))
        })
        .collect();
    let server = StubServer {
        routes: Arc::new(table),
        seen: Arc::default(),
    };
    let app = Router::new()
        .fallback(respond)
        .with_state(server.clone());
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind loopback listener");
    let addr = listener.local_addr().expect("listener address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub server");
    });
    (format!("http://{addr}/api"), server)
}

struct Client {
    store: InMemoryTokenStore,
    session: Arc<SessionContext>,
}

impl Client {
    fn gateway(&self, base_url: &str) -> HttpGateway {
        HttpGateway::new(base_url, Arc::clone(&self.session)).expect("gateway builds")
    }

    fn sign_in(&self, token: &str) {
        self.session
            .establish(AuthResponse {
                user: User::new("u-1", "Ada", "ada@example.com"),
                token: SessionToken::new(token).expect("valid token"),
            })
            .expect("session established");
    }
}

#[fixture]
fn client() -> Client {
    let store = InMemoryTokenStore::new();
    let session = Arc::new(SessionContext::new(Arc::new(store.clone())));
    Client { store, session }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_sends_bearer_token_and_reads_wrapped_envelope(client: Client) {
    let (base_url, server) = serve(vec![(
        "GET /api/tasks",
        StatusCode::OK,
        json!({ "tasks": [
            { "_id": "1", "title": "Buy milk", "priority": "low", "dueDate": "2024-01-10" },
            { "_id": "2", "title": "File taxes", "status": "completed" }
        ] }),
    )])
    .await;
    client.sign_in("abc123");

    let tasks = client
        .gateway(&base_url)
        .list_tasks()
        .await
        .expect("list should succeed");

    let ids: Vec<&str> = tasks.iter().map(|task| task.id().as_str()).collect();
    assert_eq!(ids, vec!["1", "2"]);
    assert_eq!(
        tasks.last().map(|task| task.status()),
        Some(TaskStatus::Completed)
    );
    assert_eq!(
        server.only_request().authorization.as_deref(),
        Some("Bearer abc123")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn anonymous_requests_carry_no_authorization(client: Client) {
    let (base_url, server) = serve(vec![("GET /api/tasks", StatusCode::OK, json!([]))]).await;

    let tasks = client
        .gateway(&base_url)
        .list_tasks()
        .await
        .expect("list should succeed");

    assert!(tasks.is_empty());
    assert_eq!(server.only_request().authorization, None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_without_attachment_sends_json(client: Client) {
    let (base_url, server) = serve(vec![(
        "POST /api/tasks",
        StatusCode::CREATED,
        json!({ "task": { "_id": "9", "title": "Walk dog", "priority": "high" } }),
    )])
    .await;
    let draft = TaskDraft::new("Walk dog").with_priority(TaskPriority::High);

    let created = client
        .gateway(&base_url)
        .create_task(&draft)
        .await
        .expect("create should succeed");

    assert_eq!(created.id().as_str(), "9");
    let request = server.only_request();
    assert_eq!(request.content_type.as_deref(), Some("application/json"));
    assert_eq!(
        request.body_json(),
        json!({
            "title": "Walk dog",
            "description": "",
            "priority": "high",
            "status": "pending"
        })
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_with_attachment_sends_multipart(client: Client) {
    let (base_url, server) = serve(vec![(
        "POST /api/tasks",
        StatusCode::CREATED,
        json!({ "_id": "10", "title": "File taxes", "image": "/uploads/receipt.png" }),
    )])
    .await;
    let attachment =
        Attachment::new("receipt.png", "image/png", vec![0x89, 0x50]).expect("valid attachment");
    let draft = TaskDraft::new("File taxes").with_attachment(attachment);

    let created = client
        .gateway(&base_url)
        .create_task(&draft)
        .await
        .expect("create should succeed");

    assert_eq!(created.image(), Some("/uploads/receipt.png"));
    let request = server.only_request();
    assert!(
        request
            .content_type
            .as_deref()
            .is_some_and(|value| value.starts_with("multipart/form-data")),
        "unexpected content type {:?}",
        request.content_type
    );
    let body = request.body_text();
    assert!(body.contains(r#"name="title""#));
    assert!(body.contains(r#"name="image"; filename="receipt.png""#));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_and_delete_address_the_task(client: Client) {
    let (base_url, server) = serve(vec![
        (
            "PUT /api/tasks/42",
            StatusCode::OK,
            json!({ "_id": "42", "title": "File taxes", "status": "completed" }),
        ),
        ("DELETE /api/tasks/42", StatusCode::NO_CONTENT, Value::Null),
    ])
    .await;
    let gateway = client.gateway(&base_url);
    let id = TaskId::new("42").expect("valid id");

    let updated = gateway
        .update_task(&id, &TaskPatch::status_only(TaskStatus::Completed))
        .await
        .expect("update should succeed");
    gateway.delete_task(&id).await.expect("delete should succeed");

    assert_eq!(updated.status(), TaskStatus::Completed);
    let routes: Vec<String> = server.seen().into_iter().map(|seen| seen.route).collect();
    assert_eq!(routes, vec!["PUT /api/tasks/42", "DELETE /api/tasks/42"]);
    assert_eq!(
        server.seen().first().map(SeenRequest::body_json),
        Some(json!({ "status": "completed" }))
    );
}

#[rstest]
#[case(json!({ "message": "Task not found" }), "Task not found")]
#[case(json!({ "error": "database unavailable" }), "database unavailable")]
#[case(json!({}), "An error occurred")]
#[tokio::test(flavor = "multi_thread")]
async fn server_errors_are_normalised(
    client: Client,
    #[case] reply: Value,
    #[case] expected: &str,
) {
    let (base_url, _server) = serve(vec![(
        "DELETE /api/tasks/7",
        StatusCode::INTERNAL_SERVER_ERROR,
        reply,
    )])
    .await;
    client.sign_in("still-valid");

    let err = client
        .gateway(&base_url)
        .delete_task(&TaskId::new("7").expect("valid id"))
        .await
        .expect_err("delete should fail");

    assert_eq!(ApiError::from(err), ApiError::new(expected, Some(500)));
    assert_eq!(client.session.status(), SessionStatus::Authenticated);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unauthorized_response_invalidates_the_session(client: Client) {
    let (base_url, _server) =
        serve(vec![("GET /api/tasks", StatusCode::UNAUTHORIZED, json!({}))]).await;
    client.sign_in("stale");
    let mut status = client.session.subscribe();

    let err = client
        .gateway(&base_url)
        .list_tasks()
        .await
        .expect_err("list should fail");

    assert_eq!(
        err,
        GatewayError::Unauthorized {
            message: SESSION_EXPIRED_MESSAGE.to_owned()
        }
    );
    status.changed().await.expect("status broadcast");
    assert_eq!(*status.borrow(), SessionStatus::Expired);
    assert!(client.session.token().is_none());
    assert!(client.store.load().expect("store readable").is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn undecodable_success_body_is_reported(client: Client) {
    let (base_url, _server) = serve(vec![(
        "GET /api/tasks",
        StatusCode::OK,
        json!({ "unexpected": true }),
    )])
    .await;

    let err = client
        .gateway(&base_url)
        .list_tasks()
        .await
        .expect_err("list should fail");

    assert!(matches!(err, GatewayError::InvalidResponse(_)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unreachable_server_is_a_transport_error(client: Client) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind loopback listener");
    let addr = listener.local_addr().expect("listener address");
    drop(listener);

    let err = client
        .gateway(&format!("http://{addr}/api"))
        .list_tasks()
        .await
        .expect_err("list should fail");

    assert!(matches!(err, GatewayError::Transport(_)));
    assert_eq!(err.status(), None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn login_over_http_installs_the_session(client: Client) {
    let (base_url, server) = serve(vec![(
        "POST /api/auth/login",
        StatusCode::OK,
        json!({
            "user": { "_id": "u-7", "name": "Ada", "email": "ada@example.com" },
            "token": "issued-token"
        }),
    )])
    .await;
    let service = AuthService::new(
        Arc::new(client.gateway(&base_url)),
        Arc::clone(&client.session),
    );

    let user = service
        .login("ada@example.com", "secret")
        .await
        .expect("login should succeed");

    assert_eq!(user.id(), "u-7");
    assert_eq!(client.session.status(), SessionStatus::Authenticated);
    assert_eq!(
        client
            .store
            .load()
            .expect("store readable")
            .map(|token| token.expose().to_owned()),
        Some("issued-token".to_owned())
    );
    let request = server.only_request();
    assert_eq!(request.authorization, None);
    assert_eq!(request.body_json().get("email"), Some(&json!("ada@example.com")));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_credentials_leave_the_session_signed_out(client: Client) {
    let (base_url, server) = serve(vec![(
        "POST /api/auth/login",
        StatusCode::UNAUTHORIZED,
        json!({ "message": "Invalid credentials" }),
    )])
    .await;
    let service = AuthService::new(
        Arc::new(client.gateway(&base_url)),
        Arc::clone(&client.session),
    );

    let result = service.login("ada@example.com", "wrong").await;

    let Err(AuthError::Gateway(err)) = result else {
        panic!("login should fail with a gateway error");
    };
    assert_eq!(err, ApiError::new("Invalid credentials", Some(401)));
    assert_eq!(client.session.status(), SessionStatus::SignedOut);
    assert_eq!(server.only_request().authorization, None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn anonymous_401_without_body_uses_the_generic_message(client: Client) {
    let (base_url, _server) =
        serve(vec![("GET /api/tasks", StatusCode::UNAUTHORIZED, Value::Null)]).await;

    let err = client
        .gateway(&base_url)
        .list_tasks()
        .await
        .expect_err("list should fail");

    assert_eq!(
        err,
        GatewayError::Status {
            status: 401,
            message: "An error occurred".to_owned()
        }
    );
    assert_eq!(client.session.status(), SessionStatus::SignedOut);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn google_login_over_http_posts_the_id_token(client: Client) {
    let (base_url, server) = serve(vec![(
        "POST /api/auth/google",
        StatusCode::OK,
        json!({
            "user": { "_id": "u-9", "name": "Grace", "email": "grace@example.com" },
            "token": "google-session"
        }),
    )])
    .await;
    let service = AuthService::new(
        Arc::new(client.gateway(&base_url)),
        Arc::clone(&client.session),
    );

    let user = service
        .google_login("google-id-token")
        .await
        .expect("Google sign-in should succeed");

    assert_eq!(user.email(), "grace@example.com");
    assert_eq!(
        client.session.token().map(|token| token.expose().to_owned()),
        Some("google-session".to_owned())
    );
    let request = server.only_request();
    assert_eq!(request.content_type.as_deref(), Some("application/json"));
    assert_eq!(request.body_json(), json!({ "token": "google-id-token" }));
}

#[rstest]
#[case("7/../42", "DELETE /api/tasks/7%2F..%2F42")]
#[case("a?b#c", "DELETE /api/tasks/a%3Fb%23c")]
#[case("50%", "DELETE /api/tasks/50%25")]
#[tokio::test(flavor = "multi_thread")]
async fn task_ids_stay_inside_their_path_segment(
    client: Client,
    #[case] raw_id: &str,
    #[case] expected_route: &str,
) {
    let (base_url, server) = serve(vec![(
        "DELETE /api/tasks/42",
        StatusCode::NO_CONTENT,
        Value::Null,
    )])
    .await;

    let err = client
        .gateway(&base_url)
        .delete_task(&TaskId::new(raw_id).expect("valid id"))
        .await
        .expect_err("no route matches the escaped id");

    assert_eq!(err.status(), Some(404));
    assert_eq!(server.only_request().route, expected_route);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn clearing_the_due_date_sends_null(client: Client) {
    let (base_url, server) = serve(vec![(
        "PUT /api/tasks/42",
        StatusCode::OK,
        json!({ "_id": "42", "title": "File taxes" }),
    )])
    .await;
    let id = TaskId::new("42").expect("valid id");

    let updated = client
        .gateway(&base_url)
        .update_task(&id, &TaskPatch::new().clear_due_date())
        .await
        .expect("update should succeed");

    assert_eq!(updated.due_date(), None);
    assert_eq!(server.only_request().body_json(), json!({ "dueDate": null }));
}
