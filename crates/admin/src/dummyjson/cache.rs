//! Request cache keys and values.
//!
//! A cache key is the operation plus its parameters, so two pages of the
//! same listing never collide. Values are whole response bodies.

use shopdesk_core::ProductId;

use super::types::{Product, ProductPage, UserPage};

/// Cache key: one variant per cacheable read, parameters included.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// The full product listing
    Products,
    /// A single product by id
    Product(ProductId),
    /// One page of the user listing
    Users { limit: i64, skip: i64 },
}

/// Cached response bodies.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Products(ProductPage),
    /// Boxed to keep the enum variants close in size
    Product(Box<Product>),
    Users(UserPage),
}
