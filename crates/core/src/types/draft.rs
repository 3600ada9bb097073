//! Product form schema.
//!
//! Forms arrive as raw strings; [`ProductDraft::parse`] turns them into a
//! validated payload or a set of field-scoped error messages. Validation runs
//! entirely before any network call, so a rejected form never leaves the
//! process.

use serde::{Deserialize, Serialize};
use url::Url;

/// Raw product form fields, exactly as submitted.
///
/// Every field is kept as the entered string so a failed validation can
/// re-render the form without losing input. [`ProductFields::default`]
/// returns the creation form's initial values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductFields {
    pub title: String,
    pub description: String,
    pub price: String,
    pub discount_percentage: String,
    pub rating: String,
    pub stock: String,
    pub brand: String,
    pub category: String,
    pub thumbnail: String,
}

impl Default for ProductFields {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            price: "0.1".to_owned(),
            discount_percentage: "0".to_owned(),
            rating: "0".to_owned(),
            stock: "0".to_owned(),
            brand: String::new(),
            category: String::new(),
            thumbnail: String::new(),
        }
    }
}

/// Field-scoped validation messages.
///
/// `None` means the field passed. The struct mirrors [`ProductFields`] so
/// templates can render each message next to its input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftErrors {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub discount_percentage: Option<String>,
    pub rating: Option<String>,
    pub stock: Option<String>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub thumbnail: Option<String>,
}

impl DraftErrors {
    /// Returns true when no field has a message.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.discount_percentage.is_none()
            && self.rating.is_none()
            && self.stock.is_none()
            && self.brand.is_none()
            && self.category.is_none()
            && self.thumbnail.is_none()
    }
}

/// A validated product payload.
///
/// ## Constraints
///
/// - `title` at least 3 characters
/// - `description` at least 10 characters
/// - `brand` at least 2 characters
/// - `category` at least 3 characters
/// - `price` a finite number, at least 0.1
/// - `discount_percentage` in `[0, 100]`
/// - `rating` in `[0, 5]`
/// - `stock` a whole number, at least 0
/// - `thumbnail` an absolute URL with a host
///
/// ## Examples
///
/// ```
/// use shopdesk_core::{ProductDraft, ProductFields};
///
/// let mut fields = ProductFields::default();
/// fields.title = "Vanilla candle".to_owned();
/// fields.description = "Hand-poured soy wax candle".to_owned();
/// fields.brand = "Glow".to_owned();
/// fields.category = "home".to_owned();
/// fields.thumbnail = "https://cdn.example.com/candle.png".to_owned();
///
/// let draft = ProductDraft::parse(&fields).unwrap();
/// assert_eq!(draft.title, "Vanilla candle");
/// assert!((draft.price - 0.1).abs() < f64::EPSILON);
///
/// fields.title = "ab".to_owned();
/// let errors = ProductDraft::parse(&fields).unwrap_err();
/// assert!(errors.title.is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
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

impl ProductDraft {
    /// Minimum title length in characters.
    pub const MIN_TITLE_CHARS: usize = 3;
    /// Minimum description length in characters.
    pub const MIN_DESCRIPTION_CHARS: usize = 10;
    /// Minimum brand length in characters.
    pub const MIN_BRAND_CHARS: usize = 2;
    /// Minimum category length in characters.
    pub const MIN_CATEGORY_CHARS: usize = 3;
    /// Minimum price.
    pub const MIN_PRICE: f64 = 0.1;
    /// Maximum discount percentage.
    pub const MAX_DISCOUNT: f64 = 100.0;
    /// Maximum rating.
    pub const MAX_RATING: f64 = 5.0;

    /// Validate raw form fields into a draft.
    ///
    /// All fields are checked; the error value carries a message for every
    /// field that failed, not just the first.
    ///
    /// # Errors
    ///
    /// Returns [`DraftErrors`] if any field is out of bounds, not a number
    /// where a number is expected, or not a URL where a URL is expected.
    pub fn parse(fields: &ProductFields) -> Result<Self, DraftErrors> {
        let mut errors = DraftErrors::default();

        if fields.title.chars().count() < Self::MIN_TITLE_CHARS {
            errors.title = Some(format!(
                "Title must be at least {} characters",
                Self::MIN_TITLE_CHARS
            ));
        }

        if fields.description.chars().count() < Self::MIN_DESCRIPTION_CHARS {
            errors.description = Some(format!(
                "Description must be at least {} characters",
                Self::MIN_DESCRIPTION_CHARS
            ));
        }

        if fields.brand.chars().count() < Self::MIN_BRAND_CHARS {
            errors.brand = Some(format!(
                "Brand must be at least {} characters",
                Self::MIN_BRAND_CHARS
            ));
        }

        if fields.category.chars().count() < Self::MIN_CATEGORY_CHARS {
            errors.category = Some(format!(
                "Category must be at least {} characters",
                Self::MIN_CATEGORY_CHARS
            ));
        }

        let price = match parse_number(&fields.price) {
            Some(value) if value >= Self::MIN_PRICE => Some(value),
            Some(_) => {
                errors.price = Some(format!("Price must be at least {}", Self::MIN_PRICE));
                None
            }
            None => {
                errors.price = Some("Price must be a number".to_owned());
                None
            }
        };

        let discount_percentage = match parse_number(&fields.discount_percentage) {
            Some(value) if (0.0..=Self::MAX_DISCOUNT).contains(&value) => Some(value),
            Some(_) => {
                errors.discount_percentage =
                    Some(format!("Discount must be between 0 and {}", Self::MAX_DISCOUNT));
                None
            }
            None => {
                errors.discount_percentage = Some("Discount must be a number".to_owned());
                None
            }
        };

        let rating = match parse_number(&fields.rating) {
            Some(value) if (0.0..=Self::MAX_RATING).contains(&value) => Some(value),
            Some(_) => {
                errors.rating = Some(format!("Rating must be between 0 and {}", Self::MAX_RATING));
                None
            }
            None => {
                errors.rating = Some("Rating must be a number".to_owned());
                None
            }
        };

        let stock = match fields.stock.trim().parse::<i64>() {
            Ok(value) if value >= 0 => Some(value),
            Ok(_) => {
                errors.stock = Some("Stock cannot be negative".to_owned());
                None
            }
            Err(_) => {
                errors.stock = Some("Stock must be a whole number".to_owned());
                None
            }
        };

        match Url::parse(&fields.thumbnail) {
            Ok(url) if url.has_host() => {}
            _ => {
                errors.thumbnail = Some("Thumbnail must be a valid URL".to_owned());
            }
        }

        if let (Some(price), Some(discount_percentage), Some(rating), Some(stock)) =
            (price, discount_percentage, rating, stock)
            && errors.is_empty()
        {
            return Ok(Self {
                title: fields.title.clone(),
                description: fields.description.clone(),
                price,
                discount_percentage,
                rating,
                stock,
                brand: fields.brand.clone(),
                category: fields.category.clone(),
                thumbnail: fields.thumbnail.clone(),
            });
        }

        Err(errors)
    }
}

/// Parse a finite float from a form string.
fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}
