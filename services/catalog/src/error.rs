use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Catalog service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum CatalogServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("product not found")]
    ProductNotFound,
    #[error("slug already in use")]
    SlugTaken,
    #[error("sku already in use")]
    SkuTaken,
    #[error("admin role required")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl CatalogServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION",
            Self::ProductNotFound => "PRODUCT_NOT_FOUND",
            Self::SlugTaken => "SLUG_TAKEN",
            Self::SkuTaken => "SKU_TAKEN",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for CatalogServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::ProductNotFound => StatusCode::NOT_FOUND,
            Self::SlugTaken | Self::SkuTaken => StatusCode::CONFLICT,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
