use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use http_body_util::BodyExt;
use postboard::router::init_router;
use postboard::state::AppState;
use postboard_config::{CorsConfig, JwtConfig};
use postboard_db::Store;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "integration-test-secret-at-least-32-chars";

#[allow(dead_code)]
pub fn setup_test_app() -> Router {
    setup_test_app_with_store(Store::in_memory())
}

#[allow(dead_code)]
pub fn setup_test_app_with_store(store: Store) -> Router {
    let state = AppState::new(
        store,
        JwtConfig::new(TEST_JWT_SECRET),
        CorsConfig::permissive(),
    );
    init_router(state)
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

/// Sends one request through a clone of `app` and returns status and JSON body.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    into_json(response).await
}

pub async fn into_json(response: Response<Body>) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

pub async fn register(app: &Router, email: &str, password: &str, name: &str) -> Value {
    let (status, body) = send(
        app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({ "email": email, "password": password, "name": name })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
    body
}

/// Registers a fresh user and returns `(token, user_id)`.
#[allow(dead_code)]
pub async fn register_and_login(app: &Router) -> (String, String) {
    let email = generate_unique_email();
    register(app, &email, "123123", "Test").await;

    let (status, body) = send(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": "123123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);

    (
        body["token"].as_str().unwrap().to_string(),
        body["userId"].as_str().unwrap().to_string(),
    )
}

#[allow(dead_code)]
pub async fn create_post(app: &Router, token: &str, title: &str, content: &str) -> Value {
    let (status, body) = send(
        app,
        "POST",
        "/api/posts",
        Some(token),
        Some(json!({ "title": title, "content": content })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create post failed: {}", body);
    body
}
