//! Product catalog routes: listing, detail, create, edit, delete.
//!
//! Mutations follow one pattern. Validation failures re-render the page the
//! user was on, with field errors and the entered values, without touching
//! the API. Remote failures render a notice and keep the entered values.
//! Successes redirect, carrying a notice code in the query string.

use askama::Template;
use askama_web::WebTemplate;
use axum::Form;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;
use shopdesk_core::{DraftErrors, ProductDraft, ProductFields, ProductId};
use tracing::instrument;

use crate::dummyjson::DummyJsonError;
use crate::dummyjson::types::Product;
use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::state::AppState;

use super::{MessageQuery, Notice, notice_from_query};

/// Query parameters for the product listing.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Product id whose edit overlay should be open
    edit: Option<i64>,
    success: Option<String>,
    error: Option<String>,
}

/// One card in the listing grid.
struct ProductCardView {
    id: ProductId,
    title: String,
    description: String,
    price: String,
    thumbnail: String,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            description: product.description.clone(),
            price: format_price(product.price),
            thumbnail: product.thumbnail.clone(),
        }
    }
}

/// Full detail view of a product.
struct ProductDetailView {
    id: ProductId,
    title: String,
    description: String,
    price: f64,
    discount_percentage: f64,
    rating: f64,
    stock: i64,
    brand: String,
    category: String,
    thumbnail: String,
}

impl From<&Product> for ProductDetailView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            description: product.description.clone(),
            price: product.price,
            discount_percentage: product.discount_percentage,
            rating: product.rating,
            stock: product.stock,
            brand: product.brand.clone(),
            category: product.category.clone(),
            thumbnail: product.thumbnail.clone(),
        }
    }
}

/// The product form plus everything needed to render it.
struct ProductFormView {
    action: String,
    submit_label: &'static str,
    fields: ProductFields,
    errors: DraftErrors,
}

impl ProductFormView {
    fn create(fields: ProductFields, errors: DraftErrors) -> Self {
        Self {
            action: "/new-product".to_string(),
            submit_label: "Create product",
            fields,
            errors,
        }
    }

    fn edit(id: ProductId, fields: ProductFields, errors: DraftErrors) -> Self {
        Self {
            action: format!("/products/{id}/edit"),
            submit_label: "Save changes",
            fields,
            errors,
        }
    }
}

/// Product listing template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsTemplate {
    username: String,
    products: Vec<ProductCardView>,
    notice: Option<Notice>,
    edit_modal: Option<ProductFormView>,
}

/// Product detail template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductDetailTemplate {
    username: String,
    product: ProductDetailView,
}

/// Product creation template.
#[derive(Template, WebTemplate)]
#[template(path = "products/new.html")]
pub struct NewProductTemplate {
    username: String,
    form: ProductFormView,
    notice: Option<Notice>,
}

/// GET /products - the product listing.
///
/// A failed fetch renders an empty listing with an error banner; the page
/// itself always loads.
#[instrument(skip(user, state))]
pub async fn index(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ProductsTemplate {
    let (products, fetch_notice) = match state.api().get_products().await {
        Ok(page) => (page.products, None),
        Err(e) => {
            tracing::error!("Failed to fetch products: {e}");
            (Vec::new(), Some(Notice::error("Could not load products")))
        }
    };

    let notice =
        notice_from_query(query.success.as_deref(), query.error.as_deref()).or(fetch_notice);

    // ?edit= opens the edit overlay for a product on this page, prefilled
    // from the listing. An id that is not in the listing is ignored.
    let edit_modal = query.edit.and_then(|id| {
        let id = ProductId::new(id);
        products.iter().find(|product| product.id == id).map(|product| {
            ProductFormView::edit(id, ProductFields::from(product), DraftErrors::default())
        })
    });

    ProductsTemplate {
        username: user.username,
        products: products.iter().map(ProductCardView::from).collect(),
        notice,
        edit_modal,
    }
}

/// GET /products/{id} - product detail.
#[instrument(skip(user, state))]
pub async fn show(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<ProductDetailTemplate> {
    let product = state.api().get_product(ProductId::new(id)).await?;

    Ok(ProductDetailTemplate {
        username: user.username,
        product: ProductDetailView::from(&product),
    })
}

/// GET /new-product - the creation form.
///
/// Always starts from defaults. A fresh visit never shows leftovers from
/// an earlier submission.
#[instrument(skip(user))]
pub async fn new_form(
    RequireAuth(user): RequireAuth,
    Query(query): Query<MessageQuery>,
) -> NewProductTemplate {
    let notice = notice_from_query(query.success.as_deref(), query.error.as_deref());

    NewProductTemplate {
        username: user.username,
        form: ProductFormView::create(ProductFields::default(), DraftErrors::default()),
        notice,
    }
}

/// POST /new-product - create a product.
///
/// Parse failures re-render the form without calling the API. On success
/// the redirect reloads the form at its defaults.
#[instrument(skip(user, state, form))]
pub async fn create(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Form(form): Form<ProductFields>,
) -> Response {
    let draft = match ProductDraft::parse(&form) {
        Ok(draft) => draft,
        Err(errors) => {
            return NewProductTemplate {
                username: user.username,
                form: ProductFormView::create(form, errors),
                notice: None,
            }
            .into_response();
        }
    };

    add_breadcrumb(
        "catalog",
        "Creating product",
        Some(&[("title", draft.title.as_str())]),
    );

    match state.api().create_product(&draft).await {
        Ok(product) => {
            tracing::info!(id = %product.id, title = %product.title, "Product created");
            Redirect::to("/new-product?success=created").into_response()
        }
        Err(e) => {
            tracing::error!("Failed to create product: {e}");
            NewProductTemplate {
                username: user.username,
                form: ProductFormView::create(form, DraftErrors::default()),
                notice: Some(Notice::error(remote_error_message(&e))),
            }
            .into_response()
        }
    }
}

/// POST /products/{id}/edit - save changes to a product.
///
/// Parse failures re-render the listing with the overlay open and the
/// entered values intact, without calling the API. Success closes the
/// overlay via redirect.
#[instrument(skip(user, state, form))]
pub async fn edit(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<ProductFields>,
) -> Response {
    let id = ProductId::new(id);

    let draft = match ProductDraft::parse(&form) {
        Ok(draft) => draft,
        Err(errors) => return edit_failure(user.username, &state, id, form, errors, None).await,
    };

    let id_str = id.to_string();
    add_breadcrumb(
        "catalog",
        "Updating product",
        Some(&[("product_id", id_str.as_str())]),
    );

    match state.api().update_product(id, &draft).await {
        Ok(product) => {
            tracing::info!(id = %product.id, "Product updated");
            Redirect::to("/products?success=updated").into_response()
        }
        Err(e) => {
            tracing::error!(id = %id, "Failed to update product: {e}");
            let notice = Some(Notice::error(remote_error_message(&e)));
            edit_failure(user.username, &state, id, form, DraftErrors::default(), notice).await
        }
    }
}

/// POST /products/{id}/delete - delete a product.
///
/// Both outcomes land back on the listing; only the banner differs.
#[instrument(skip(_user, state))]
pub async fn remove(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Redirect {
    let id = ProductId::new(id);
    let id_str = id.to_string();
    add_breadcrumb(
        "catalog",
        "Deleting product",
        Some(&[("product_id", id_str.as_str())]),
    );

    match state.api().delete_product(id).await {
        Ok(deleted) => {
            tracing::info!(id = %deleted.id, title = %deleted.title, "Product deleted");
            Redirect::to("/products?success=deleted")
        }
        Err(e) => {
            tracing::error!(id = %id, "Failed to delete product: {e}");
            Redirect::to("/products?error=delete_failed")
        }
    }
}

/// Re-render the listing with the edit overlay open and the entered
/// values intact.
async fn edit_failure(
    username: String,
    state: &AppState,
    id: ProductId,
    fields: ProductFields,
    errors: DraftErrors,
    notice: Option<Notice>,
) -> Response {
    let products = match state.api().get_products().await {
        Ok(page) => page.products,
        Err(e) => {
            tracing::error!("Failed to fetch products: {e}");
            Vec::new()
        }
    };

    ProductsTemplate {
        username,
        products: products.iter().map(ProductCardView::from).collect(),
        notice,
        edit_modal: Some(ProductFormView::edit(id, fields, errors)),
    }
    .into_response()
}

/// Surface the API's own message when it has one.
fn remote_error_message(err: &DummyJsonError) -> String {
    match err {
        DummyJsonError::Api { message, .. } if !message.is_empty() => message.clone(),
        DummyJsonError::NotFound(_) => "Product not found".to_string(),
        _ => "The catalog API did not accept the request".to_string(),
    }
}

fn format_price(amount: f64) -> String {
    format!("${amount:.2}")
}
