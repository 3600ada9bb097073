//! Wire types for the DummyJSON REST API.
//!
//! The API speaks camelCase JSON. Everything crossing that boundary is
//! declared here with explicit serde contracts; nothing else in the app
//! touches raw JSON.

use serde::{Deserialize, Serialize};
use shopdesk_core::{ProductDraft, ProductFields, ProductId, UserId};

/// A catalog product as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub discount_percentage: f64,
    pub rating: f64,
    pub stock: i64,
    /// Some products ship without a brand
    #[serde(default)]
    pub brand: String,
    pub category: String,
    pub thumbnail: String,
    #[serde(default)]
    pub images: Vec<String>,
}

/// One page of the product listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub total: i64,
    pub skip: i64,
    pub limit: i64,
}

/// The write shape for product create and update calls.
///
/// Built from a validated `ProductDraft`, so numeric fields are already
/// parsed and range-checked by the time they get here.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub discount_percentage: f64,
    pub rating: f64,
    pub stock: i64,
    pub brand: String,
    pub category: String,
    pub thumbnail: String,
}

impl From<&ProductDraft> for ProductPayload {
    fn from(draft: &ProductDraft) -> Self {
        Self {
            title: draft.title.clone(),
            description: draft.description.clone(),
            price: draft.price,
            discount_percentage: draft.discount_percentage,
            rating: draft.rating,
            stock: draft.stock,
            brand: draft.brand.clone(),
            category: draft.category.clone(),
            thumbnail: draft.thumbnail.clone(),
        }
    }
}

/// Response body from a delete call.
///
/// The demo API echoes the product back with a deletion marker; nothing is
/// actually removed server-side.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedProduct {
    pub id: ProductId,
    pub title: String,
    pub is_deleted: bool,
}

/// A user as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub username: String,
    pub image: String,
    pub address: Address,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub coordinates: Coordinates,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// One page of the user listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPage {
    pub users: Vec<User>,
    pub total: i64,
    pub skip: i64,
    pub limit: i64,
}

/// Prefill form fields from an existing product, for the edit form.
impl From<&Product> for ProductFields {
    fn from(product: &Product) -> Self {
        Self {
            title: product.title.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            discount_percentage: product.discount_percentage.to_string(),
            rating: product.rating.to_string(),
            stock: product.stock.to_string(),
            brand: product.brand.clone(),
            category: product.category.clone(),
            thumbnail: product.thumbnail.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_product_deserializes_from_camel_case() {
        let body = json!({
            "id": 1,
            "title": "Essence Mascara Lash Princess",
            "description": "A popular mascara known for its volumizing effects.",
            "price": 9.99,
            "discountPercentage": 7.17,
            "rating": 4.94,
            "stock": 5,
            "brand": "Essence",
            "category": "beauty",
            "thumbnail": "https://cdn.dummyjson.com/products/images/beauty/thumb.png",
            "images": ["https://cdn.dummyjson.com/products/images/beauty/1.png"]
        });

        let product: Product = serde_json::from_value(body).unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.title, "Essence Mascara Lash Princess");
        assert!((product.discount_percentage - 7.17).abs() < f64::EPSILON);
        assert_eq!(product.stock, 5);
    }

    #[test]
    fn test_product_without_brand_still_deserializes() {
        // Several live catalog entries omit the brand field entirely
        let body = json!({
            "id": 20,
            "title": "Nail Polish",
            "description": "Quick-dry nail polish.",
            "price": 8.99,
            "discountPercentage": 0.0,
            "rating": 3.1,
            "stock": 79,
            "category": "beauty",
            "thumbnail": "https://cdn.dummyjson.com/products/images/beauty/polish.png"
        });

        let product: Product = serde_json::from_value(body).unwrap();
        assert_eq!(product.brand, "");
        assert!(product.images.is_empty());
    }

    #[test]
    fn test_payload_serializes_to_camel_case() {
        let draft = ProductDraft {
            title: "Walnut Desk".to_string(),
            description: "A sturdy desk made of walnut.".to_string(),
            price: 249.5,
            discount_percentage: 10.0,
            rating: 4.5,
            stock: 12,
            brand: "Oakline".to_string(),
            category: "furniture".to_string(),
            thumbnail: "https://example.com/desk.png".to_string(),
        };

        let value = serde_json::to_value(ProductPayload::from(&draft)).unwrap();
        assert_eq!(value["title"], "Walnut Desk");
        assert_eq!(value["discountPercentage"], 10.0);
        assert_eq!(value["stock"], 12);
        assert!(value.get("discount_percentage").is_none());
    }

    #[test]
    fn test_deleted_product_parses_deletion_marker() {
        let body = json!({
            "id": 42,
            "title": "Walnut Desk",
            "isDeleted": true,
            "deletedOn": "2026-08-25T12:00:00.000Z"
        });

        let deleted: DeletedProduct = serde_json::from_value(body).unwrap();
        assert_eq!(deleted.id, ProductId::new(42));
        assert!(deleted.is_deleted);
    }

    #[test]
    fn test_user_page_deserializes() {
        let body = json!({
            "users": [{
                "id": 1,
                "firstName": "Emily",
                "lastName": "Johnson",
                "email": "emily.johnson@x.dummyjson.com",
                "phone": "+81 965-431-3024",
                "username": "emilys",
                "image": "https://dummyjson.com/icon/emilys/128",
                "address": {
                    "address": "626 Main Street",
                    "city": "Phoenix",
                    "postalCode": "29112",
                    "coordinates": { "lat": -77.16213, "lng": -92.084824 }
                }
            }],
            "total": 208,
            "skip": 0,
            "limit": 12
        });

        let page: UserPage = serde_json::from_value(body).unwrap();
        assert_eq!(page.total, 208);
        assert_eq!(page.users.len(), 1);
        assert_eq!(page.users[0].address.city, "Phoenix");
    }

    #[test]
    fn test_form_fields_prefill_from_product() {
        let product = Product {
            id: ProductId::new(7),
            title: "Walnut Desk".to_string(),
            description: "A sturdy desk.".to_string(),
            price: 249.5,
            discount_percentage: 0.0,
            rating: 4.5,
            stock: 12,
            brand: "Oakline".to_string(),
            category: "furniture".to_string(),
            thumbnail: "https://example.com/desk.png".to_string(),
            images: vec![],
        };

        let fields = ProductFields::from(&product);
        assert_eq!(fields.title, "Walnut Desk");
        assert_eq!(fields.price, "249.5");
        assert_eq!(fields.discount_percentage, "0");
        assert_eq!(fields.stock, "12");
    }
}
