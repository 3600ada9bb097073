//! Integration tests for Shopdesk.
//!
//! The suites under `tests/` drive the full admin router in process. A mock
//! DummyJSON server on a loopback port stands in for the demo API and records
//! every request it receives, so tests can assert not just on rendered pages
//! but on exactly what went over the wire (and what never did).
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopdesk-integration-tests
//! ```
//!
//! Tests marked `#[ignore]` talk to the live demo API and need network
//! access:
//!
//! ```bash
//! cargo test -p shopdesk-integration-tests -- --ignored
//! ```

#![allow(clippy::missing_panics_doc)] // Test helpers panic on failure

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use axum::response::{IntoResponse, Response};
use secrecy::SecretString;
use serde_json::{Map, Value, json};
use tower::util::ServiceExt;

use shopdesk_admin::config::{AdminConfig, DummyJsonConfig};
use shopdesk_admin::middleware::session::SESSION_COOKIE_NAME;
use shopdesk_admin::routes;
use shopdesk_admin::state::AppState;

/// Product id the mock API refuses to delete.
pub const FAILING_DELETE_ID: i64 = 999;

/// Product title the mock API refuses to create.
pub const FAILING_CREATE_TITLE: &str = "Rejected Product";

/// Number of users in the mock directory.
pub const MOCK_USER_TOTAL: i64 = 30;

// =============================================================================
// Test Application
// =============================================================================

/// The admin app wired to a mock upstream.
pub struct TestApp {
    pub router: Router,
    pub mock: MockApi,
}

/// Spawn a mock API and build the admin router against it.
pub async fn spawn_app() -> TestApp {
    let mock = MockApi::spawn().await;
    let state = AppState::new(test_config(mock.base_url()));

    TestApp {
        router: routes::app(state),
        mock,
    }
}

/// Build a config pointing at the given upstream.
///
/// Constructed directly instead of via `from_env` so tests neither read nor
/// mutate the process environment.
#[must_use]
pub fn test_config(api_base_url: String) -> AdminConfig {
    AdminConfig {
        host: std::net::Ipv4Addr::LOCALHOST.into(),
        port: 0,
        base_url: "http://localhost:3001".to_string(),
        session_secret: SecretString::from("kJ8#mP2$vN5&xQ9!wR4@tL7^zB1*cF6%"),
        api: DummyJsonConfig {
            base_url: api_base_url,
        },
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

// =============================================================================
// Request Helpers
// =============================================================================

/// A response in a form tests can assert on directly.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The `Location` header, if any.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
    }

    /// The session cookie pair from `Set-Cookie`, if any.
    #[must_use]
    pub fn session_cookie(&self) -> Option<String> {
        let raw = self.headers.get(header::SET_COOKIE)?.to_str().ok()?;
        let pair = raw.split(';').next()?;
        pair.starts_with(&format!("{SESSION_COOKIE_NAME}="))
            .then(|| pair.to_string())
    }
}

/// Send one request through the router.
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    cookie: Option<&str>,
    form_body: Option<&str>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    let request = match form_body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("Router returned an error");

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");

    TestResponse {
        status,
        headers,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    }
}

/// GET a page.
pub async fn get(router: &Router, uri: &str, cookie: Option<&str>) -> TestResponse {
    send(router, Method::GET, uri, cookie, None).await
}

/// POST a urlencoded form.
pub async fn post_form(
    router: &Router,
    uri: &str,
    cookie: Option<&str>,
    body: &str,
) -> TestResponse {
    send(router, Method::POST, uri, cookie, Some(body)).await
}

/// Sign in and return the session cookie pair.
pub async fn sign_in(router: &Router) -> String {
    let response = post_form(router, "/", None, "username=ana&password=hunter2").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    response
        .session_cookie()
        .expect("Sign-in response carried no session cookie")
}

// =============================================================================
// Mock DummyJSON Server
// =============================================================================

/// A request the app made upstream.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: String,
    pub body: Option<Value>,
}

#[derive(Clone, Default)]
struct MockState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// A mock DummyJSON server bound to a loopback port.
///
/// Serves a three-product catalog and a generated user directory, records
/// every request, and fails on the trigger ids above so error paths can be
/// exercised.
#[derive(Clone)]
pub struct MockApi {
    addr: SocketAddr,
    state: MockState,
}

impl MockApi {
    /// Bind a port and spawn the mock server.
    pub async fn spawn() -> Self {
        let state = MockState::default();
        let app = Router::new()
            .fallback(mock_handler)
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock API listener");
        let addr = listener
            .local_addr()
            .expect("Failed to read mock API address");

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Mock API server failed");
        });

        Self { addr, state }
    }

    /// Base URL of the mock server.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Every request received so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state
            .requests
            .lock()
            .expect("Mock request log poisoned")
            .clone()
    }

    /// Number of requests matching a method and exact path.
    #[must_use]
    pub fn count(&self, method: &str, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|request| request.method == method && request.path == path)
            .count()
    }
}

async fn mock_handler(State(state): State<MockState>, request: Request<Body>) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let query = request.uri().query().unwrap_or_default().to_string();

    let bytes = axum::body::to_bytes(request.into_body(), usize::MAX)
        .await
        .unwrap_or_default();
    let body: Option<Value> = serde_json::from_slice(&bytes).ok();

    state
        .requests
        .lock()
        .expect("Mock request log poisoned")
        .push(RecordedRequest {
            method: method.to_string(),
            path: path.clone(),
            query: query.clone(),
            body: body.clone(),
        });

    route_mock(&method, &path, &query, body)
}

fn route_mock(method: &Method, path: &str, query: &str, body: Option<Value>) -> Response {
    if *method == Method::GET && path == "/products" {
        return json_ok(product_listing());
    }

    if *method == Method::POST && path == "/products/add" {
        let title = body
            .as_ref()
            .and_then(|value| value.get("title"))
            .and_then(Value::as_str);
        if title == Some(FAILING_CREATE_TITLE) {
            return error_response(StatusCode::BAD_REQUEST, "Product payload rejected");
        }
        return json_ok(with_fields(
            body.unwrap_or_else(|| json!({})),
            &[("id", json!(195))],
        ));
    }

    if *method == Method::GET && path == "/users" {
        return json_ok(user_page(query));
    }

    if let Some(id) = path
        .strip_prefix("/products/")
        .and_then(|rest| rest.parse::<i64>().ok())
    {
        return product_route(method, id, body);
    }

    error_response(StatusCode::NOT_FOUND, "Route not found")
}

fn product_route(method: &Method, id: i64, body: Option<Value>) -> Response {
    if *method == Method::DELETE && id == FAILING_DELETE_ID {
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Delete failed");
    }

    let Some(product) = product_fixture(id) else {
        let message = format!("Product with id '{id}' not found");
        return error_response(StatusCode::NOT_FOUND, &message);
    };

    if *method == Method::GET {
        return json_ok(product);
    }
    if *method == Method::PUT {
        return json_ok(with_fields(
            body.unwrap_or_else(|| json!({})),
            &[("id", json!(id))],
        ));
    }
    if *method == Method::DELETE {
        return json_ok(with_fields(
            product,
            &[
                ("isDeleted", json!(true)),
                ("deletedOn", json!("2026-08-25T00:00:00.000Z")),
            ],
        ));
    }

    error_response(StatusCode::METHOD_NOT_ALLOWED, "Unsupported method")
}

fn json_ok(value: Value) -> Response {
    axum::Json(value).into_response()
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(json!({ "message": message }))).into_response()
}

/// Overlay fields onto a JSON object.
fn with_fields(value: Value, fields: &[(&str, Value)]) -> Value {
    let mut map = match value {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    for (key, field) in fields {
        map.insert((*key).to_string(), field.clone());
    }
    Value::Object(map)
}

// =============================================================================
// Fixtures
// =============================================================================

fn product_fixture(id: i64) -> Option<Value> {
    product_fixtures()
        .into_iter()
        .find(|product| product.get("id") == Some(&Value::from(id)))
}

fn product_fixtures() -> Vec<Value> {
    vec![
        json!({
            "id": 1,
            "title": "Essence Mascara Lash Princess",
            "description": "A popular mascara known for its volumizing and lengthening effects.",
            "price": 9.99,
            "discountPercentage": 7.17,
            "rating": 4.94,
            "stock": 5,
            "brand": "Essence",
            "category": "beauty",
            "thumbnail": "https://cdn.example.com/mascara.png",
            "images": ["https://cdn.example.com/mascara-1.png"]
        }),
        json!({
            "id": 2,
            "title": "Eyeshadow Palette with Mirror",
            "description": "A versatile palette with a built-in mirror for travel.",
            "price": 19.99,
            "discountPercentage": 5.5,
            "rating": 3.28,
            "stock": 44,
            "brand": "Glamour Beauty",
            "category": "beauty",
            "thumbnail": "https://cdn.example.com/palette.png",
            "images": []
        }),
        // No brand field, like several live catalog entries
        json!({
            "id": 3,
            "title": "Powder Canister",
            "description": "A finely milled setting powder with a silky texture.",
            "price": 14.99,
            "discountPercentage": 0.0,
            "rating": 3.82,
            "stock": 59,
            "category": "beauty",
            "thumbnail": "https://cdn.example.com/powder.png"
        }),
    ]
}

fn product_listing() -> Value {
    let products = product_fixtures();
    let total = products.len();
    json!({
        "products": products,
        "total": total,
        "skip": 0,
        "limit": 30
    })
}

fn query_param(query: &str, name: &str) -> Option<i64> {
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == name).then(|| value.parse().ok()).flatten()
    })
}

fn user_page(query: &str) -> Value {
    let limit = query_param(query, "limit").unwrap_or(30);
    let skip = query_param(query, "skip").unwrap_or(0);

    let end = (skip + limit).min(MOCK_USER_TOTAL);
    let users: Vec<Value> = (skip + 1..=end).map(user_fixture).collect();

    json!({
        "users": users,
        "total": MOCK_USER_TOTAL,
        "skip": skip,
        "limit": limit
    })
}

fn user_fixture(n: i64) -> Value {
    json!({
        "id": n,
        "firstName": format!("User{n}"),
        "lastName": "Example",
        "email": format!("user{n}@example.com"),
        "phone": format!("+1 555-000-{n:04}"),
        "username": format!("user{n}"),
        "image": format!("https://cdn.example.com/avatars/{n}.png"),
        "address": {
            "address": format!("{n} Main Street"),
            "city": "Springfield",
            "postalCode": "49224",
            "coordinates": { "lat": 37.42, "lng": -122.08 }
        }
    })
}
