//! Session-scoped models.

use serde::{Deserialize, Serialize};

/// The signed-in admin stored in the session.
///
/// Holds the opaque token minted at sign-in. The token is the proof of
/// authentication; a `CurrentUser` with an empty token does not count as
/// signed in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Username entered at sign-in
    pub username: String,
    /// Opaque admin token minted at sign-in
    pub token: String,
}

/// Session data keys.
pub mod keys {
    /// The signed-in admin (`CurrentUser`)
    pub const CURRENT_USER: &str = "current_user";
}
