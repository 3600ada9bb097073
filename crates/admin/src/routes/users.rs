//! User directory routes.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;
use tracing::instrument;

use crate::dummyjson::types::User;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::state::AppState;

use super::Notice;

/// Users shown per page.
const USERS_PAGE_SIZE: i64 = 12;

/// Query parameters for the user directory.
#[derive(Debug, Deserialize)]
pub struct UsersQuery {
    page: Option<i64>,
}

/// One card in the directory grid.
struct UserCardView {
    name: String,
    username: String,
    email: String,
    phone: String,
    image: String,
    address_line: String,
    coordinates: String,
}

impl From<&User> for UserCardView {
    fn from(user: &User) -> Self {
        Self {
            name: format!("{} {}", user.first_name, user.last_name),
            username: user.username.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            image: user.image.clone(),
            address_line: format!(
                "{}, {} {}",
                user.address.address, user.address.city, user.address.postal_code
            ),
            coordinates: format!(
                "{:.4}, {:.4}",
                user.address.coordinates.lat, user.address.coordinates.lng
            ),
        }
    }
}

/// Pagination controls.
struct Pager {
    page: i64,
    total_pages: i64,
    total: i64,
    prev: Option<i64>,
    next: Option<i64>,
}

impl Pager {
    fn new(page: i64, total: i64) -> Self {
        let total_pages = (total.max(1) + USERS_PAGE_SIZE - 1) / USERS_PAGE_SIZE;
        Self {
            page,
            total_pages,
            total,
            prev: (page > 1).then(|| page - 1),
            next: (page < total_pages).then(|| page + 1),
        }
    }
}

/// User directory template.
#[derive(Template, WebTemplate)]
#[template(path = "users/index.html")]
pub struct UsersTemplate {
    username: String,
    users: Vec<UserCardView>,
    pager: Pager,
    notice: Option<Notice>,
}

/// GET /users - the user directory, twelve per page.
///
/// `?page=` is clamped to 1 at the low end. Each page slice is its own
/// cache entry, so paging back does not refetch. A failed fetch renders
/// an empty page with an error banner.
#[instrument(skip(user, state))]
pub async fn index(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Query(query): Query<UsersQuery>,
) -> UsersTemplate {
    let page = query.page.unwrap_or(1).max(1);
    let skip = (page - 1) * USERS_PAGE_SIZE;

    let (users, total, notice) = match state.api().get_users(USERS_PAGE_SIZE, skip).await {
        Ok(page_data) => (page_data.users, page_data.total, None),
        Err(e) => {
            tracing::error!("Failed to fetch users: {e}");
            (Vec::new(), 0, Some(Notice::error("Could not load users")))
        }
    };

    UsersTemplate {
        username: user.username,
        users: users.iter().map(UserCardView::from).collect(),
        pager: Pager::new(page, total),
        notice,
    }
}
