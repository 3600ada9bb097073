//! Shopdesk Core - Shared types library.
//!
//! This crate provides common types used across the Shopdesk components:
//! - `admin` - The storefront admin panel web application
//! - `integration-tests` - End-to-end tests against the admin router
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and the product form schema

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
