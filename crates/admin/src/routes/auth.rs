//! Authentication routes: login page, sign in, sign out.

use askama::Template;
use askama_web::WebTemplate;
use axum::Form;
use axum::extract::Query;
use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::{self, Result};
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::middleware::auth::{clear_current_user, set_current_user};
use crate::models::session::CurrentUser;
use crate::services::token;

use super::{MessageQuery, Notice, notice_from_query};

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    username_value: String,
    username_error: Option<String>,
    password_error: Option<String>,
    notice: Option<Notice>,
}

impl LoginTemplate {
    fn empty(notice: Option<Notice>) -> Self {
        Self {
            username_value: String::new(),
            username_error: None,
            password_error: None,
            notice,
        }
    }
}

/// Sign-in form body.
#[derive(Deserialize)]
pub struct LoginForm {
    username: String,
    password: String,
}

/// GET / - login page.
///
/// A signed-in admin has no business here; send them to the products.
pub async fn login_page(
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<MessageQuery>,
) -> Response {
    if user.is_some() {
        return Redirect::to("/products").into_response();
    }

    let notice = notice_from_query(query.success.as_deref(), query.error.as_deref());
    LoginTemplate::empty(notice).into_response()
}

/// POST / - sign in.
///
/// Validation runs before anything else. A failed check re-renders the
/// form with field errors and the entered username; no token is minted.
pub async fn login(session: Session, Form(form): Form<LoginForm>) -> Result<Response> {
    let username_error = form
        .username
        .trim()
        .is_empty()
        .then(|| "Username is required".to_string());
    let password_error = form
        .password
        .trim()
        .is_empty()
        .then(|| "Password is required".to_string());

    if username_error.is_some() || password_error.is_some() {
        return Ok(LoginTemplate {
            username_value: form.username,
            username_error,
            password_error,
            notice: None,
        }
        .into_response());
    }

    // The demo backend has no auth endpoint. The token is minted locally;
    // its presence in the session is what counts as signed in.
    let user = CurrentUser {
        username: form.username.trim().to_string(),
        token: token::generate_token(),
    };
    set_current_user(&session, &user).await?;
    error::set_sentry_user(&user.username);

    tracing::info!(username = %user.username, "Admin signed in");
    Ok(Redirect::to("/products").into_response())
}

/// POST /logout - sign out.
///
/// Flushes the whole session so the cookie and the stored token both go.
pub async fn logout(session: Session) -> Result<Response> {
    clear_current_user(&session).await?;
    session.flush().await?;
    error::clear_sentry_user();

    tracing::info!("Admin signed out");
    Ok(Redirect::to("/").into_response())
}
