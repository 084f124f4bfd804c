pub mod products;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::types::Product;

/// Product shape returned by both public and admin endpoints.
#[derive(Serialize)]
pub struct ProductResponse {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub short_description: Option<String>,
    pub full_details: Option<String>,
    pub price: Decimal,
    pub discount_price: Option<Decimal>,
    pub quantity: i32,
    pub sku: Option<String>,
    pub is_active: bool,
    pub views_count: i32,
    #[serde(serialize_with = "mercato_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.to_string(),
            title: product.title,
            slug: product.slug,
            short_description: product.short_description,
            full_details: product.full_details,
            price: product.price,
            discount_price: product.discount_price,
            quantity: product.quantity,
            sku: product.sku,
            is_active: product.is_active,
            views_count: product.views_count,
            created_at: product.created_at,
        }
    }
}
