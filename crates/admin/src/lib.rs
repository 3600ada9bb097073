//! Shopdesk Admin - storefront administration panel.
//!
//! A server-rendered admin app for browsing and editing a product catalog
//! backed by the DummyJSON demo API (<https://dummyjson.com>).
//!
//! # Architecture
//!
//! - Axum web framework with Askama templates for server-side rendering
//! - Signed-cookie sessions holding the opaque admin token
//! - A caching HTTP client over the DummyJSON REST endpoints
//!
//! # The demo backend
//!
//! DummyJSON accepts writes but never persists them. Create, update and
//! delete calls return plausible bodies while the catalog stays unchanged,
//! so a product list re-fetched after a successful create will not contain
//! the new product. Handlers report what the API said, nothing more.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod dummyjson;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
