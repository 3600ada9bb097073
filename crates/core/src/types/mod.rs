//! Core types for Shopdesk.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod draft;
pub mod id;

pub use draft::{DraftErrors, ProductDraft, ProductFields};
pub use id::*;
