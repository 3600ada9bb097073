//! Domain models shared across routes.

pub mod session;
