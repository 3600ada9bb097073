//! Application services.

pub mod token;
