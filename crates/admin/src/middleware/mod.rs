//! Middleware and extractors.
//!
//! - `auth` - authentication extractors and the route guard
//! - `session` - signed-cookie session layer

pub mod auth;
pub mod session;

pub use auth::{OptionalAuth, RequireAuth};
pub use session::create_session_layer;
