//! HTTP route handlers.
//!
//! # Route Tree
//!
//! ```text
//! /                          GET login page, POST sign in
//! /logout                    POST sign out
//! /products                  GET product listing (+ ?edit= overlay)
//! /products/{id}             GET product detail
//! /products/{id}/edit        POST save product changes
//! /products/{id}/delete      POST delete product
//! /new-product               GET creation form, POST create product
//! /users                     GET user directory (paged)
//! /health                    GET liveness check
//! /static/*                  GET stylesheets and assets
//! ```
//!
//! Everything except `/`, `/health` and `/static` requires a signed-in
//! admin and silently redirects to the login page otherwise.

use axum::Router;
use axum::routing::{get, post};
use serde::Deserialize;
use tower_http::services::ServeDir;

use crate::middleware::create_session_layer;
use crate::state::AppState;

pub mod auth;
pub mod products;
pub mod users;

/// Query parameters carrying a one-shot notice code across a redirect.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub success: Option<String>,
    pub error: Option<String>,
}

/// A banner rendered at the top of a page.
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    /// CSS class for the banner.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Success => "notice notice-success",
            Self::Error => "notice notice-error",
        }
    }
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// Map redirect query codes to a notice banner.
///
/// Success codes win when both are present. Unknown codes still produce a
/// banner so a mistyped link never renders as nothing.
#[must_use]
pub fn notice_from_query(success: Option<&str>, error: Option<&str>) -> Option<Notice> {
    if let Some(code) = success {
        let message = match code {
            "created" => "Product created",
            "updated" => "Product updated",
            "deleted" => "Product deleted",
            _ => "Done",
        };
        return Some(Notice::success(message));
    }

    if let Some(code) = error {
        let message = match code {
            "not_found" => "Product not found",
            "load_failed" => "Could not load the product",
            "delete_failed" => "Could not delete the product",
            "session" => "Session error. Please sign in again",
            _ => "Something went wrong",
        };
        return Some(Notice::error(message));
    }

    None
}

/// Authentication routes.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Product catalog routes.
fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::index))
        .route("/products/{id}", get(products::show))
        .route("/products/{id}/edit", post(products::edit))
        .route("/products/{id}/delete", post(products::remove))
        .route(
            "/new-product",
            get(products::new_form).post(products::create),
        )
}

/// User directory routes.
fn user_routes() -> Router<AppState> {
    Router::new().route("/users", get(users::index))
}

/// All application routes.
#[must_use]
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(product_routes())
        .merge(user_routes())
}

/// Assemble the application: routes, static assets, session layer.
///
/// Integration tests drive this router directly; `main` stacks tracing and
/// Sentry layers on top.
#[must_use]
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());

    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .nest_service("/static", ServeDir::new("crates/admin/static"))
        .layer(session_layer)
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
