#![allow(async_fn_in_trait)]

use uuid::Uuid;

use crate::domain::types::{PageRequest, Product};
use crate::error::CatalogServiceError;

/// Repository for storefront products.
pub trait ProductRepository: Send + Sync {
    /// Active products, newest first.
    async fn list_active(&self, page: PageRequest) -> Result<Vec<Product>, CatalogServiceError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Product>, CatalogServiceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, CatalogServiceError>;

    async fn slug_exists(&self, slug: &str) -> Result<bool, CatalogServiceError>;

    async fn sku_exists(&self, sku: &str) -> Result<bool, CatalogServiceError>;

    async fn create(&self, product: &Product) -> Result<(), CatalogServiceError>;

    /// Full-row update keyed by id.
    async fn update(&self, product: &Product) -> Result<(), CatalogServiceError>;

    /// Returns false when no row matched.
    async fn delete(&self, id: Uuid) -> Result<bool, CatalogServiceError>;

    /// Fire-and-count view increment; the fetched row keeps its old count.
    async fn bump_views(&self, id: Uuid) -> Result<(), CatalogServiceError>;
}
