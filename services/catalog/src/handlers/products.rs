use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use mercato_auth_types::identity::IdentityHeaders;

use crate::domain::types::{PageRequest, ROLE_ADMIN};
use crate::error::CatalogServiceError;
use crate::handlers::ProductResponse;
use crate::state::AppState;
use crate::usecase::product::{
    CreateProductInput, CreateProductUseCase, DeleteProductUseCase, GetProductUseCase,
    ListProductsUseCase, UpdateProductInput, UpdateProductUseCase,
};

fn require_admin(identity: &IdentityHeaders) -> Result<(), CatalogServiceError> {
    if identity.user_role != ROLE_ADMIN {
        return Err(CatalogServiceError::Forbidden);
    }
    Ok(())
}

// ── GET /products ────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct ProductListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

pub async fn list_products(
    State(state): State<AppState>,
    axum::extract::RawQuery(raw_query): axum::extract::RawQuery,
) -> Result<Json<Vec<ProductResponse>>, CatalogServiceError> {
    let query: ProductListQuery = raw_query
        .as_deref()
        .map(serde_qs::from_str)
        .transpose()
        .map_err(|_| CatalogServiceError::Validation("malformed query string".to_owned()))?
        .unwrap_or_default();

    let usecase = ListProductsUseCase {
        repo: state.product_repo(),
    };
    let items = usecase
        .execute(PageRequest::clamped(query.per_page, query.page))
        .await?;
    Ok(Json(items.into_iter().map(ProductResponse::from).collect()))
}

// ── GET /products/{slug} ─────────────────────────────────────────────────────

pub async fn get_product(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ProductResponse>, CatalogServiceError> {
    let usecase = GetProductUseCase {
        repo: state.product_repo(),
    };
    let product = usecase.execute(&slug).await?;
    Ok(Json(product.into()))
}

// ── POST /products ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateProductRequest {
    pub title: String,
    pub slug: Option<String>,
    pub short_description: Option<String>,
    pub full_details: Option<String>,
    pub price: Decimal,
    pub discount_price: Option<Decimal>,
    #[serde(default)]
    pub quantity: i32,
    pub sku: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

pub async fn create_product(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), CatalogServiceError> {
    require_admin(&identity)?;
    let usecase = CreateProductUseCase {
        repo: state.product_repo(),
    };
    let product = usecase
        .execute(CreateProductInput {
            title: body.title,
            slug: body.slug,
            short_description: body.short_description,
            full_details: body.full_details,
            price: body.price,
            discount_price: body.discount_price,
            quantity: body.quantity,
            sku: body.sku,
            is_active: body.is_active,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(product.into())))
}

// ── PATCH /products/{id} ─────────────────────────────────────────────────────

/// Absent fields are untouched; nullable fields accept explicit `null` to
/// clear, distinguished from absence by the double-Option deserializer.
#[derive(Deserialize, Default)]
pub struct UpdateProductRequest {
    pub title: Option<String>,
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub short_description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub full_details: Option<Option<String>>,
    pub price: Option<Decimal>,
    #[serde(default, deserialize_with = "double_option")]
    pub discount_price: Option<Option<Decimal>>,
    pub quantity: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    pub sku: Option<Option<String>>,
    pub is_active: Option<bool>,
}

/// A field that was present deserializes to `Some(inner)`; an absent field
/// falls back to the `default` (`None`).
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

pub async fn update_product(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateProductRequest>,
) -> Result<Json<ProductResponse>, CatalogServiceError> {
    require_admin(&identity)?;
    let usecase = UpdateProductUseCase {
        repo: state.product_repo(),
    };
    let product = usecase
        .execute(
            id,
            UpdateProductInput {
                title: body.title,
                slug: body.slug,
                short_description: body.short_description,
                full_details: body.full_details,
                price: body.price,
                discount_price: body.discount_price,
                quantity: body.quantity,
                sku: body.sku,
                is_active: body.is_active,
            },
        )
        .await?;
    Ok(Json(product.into()))
}

// ── DELETE /products/{id} ────────────────────────────────────────────────────

pub async fn delete_product(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, CatalogServiceError> {
    require_admin(&identity)?;
    let usecase = DeleteProductUseCase {
        repo: state.product_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
