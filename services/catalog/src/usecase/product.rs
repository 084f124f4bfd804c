use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::repository::ProductRepository;
use crate::domain::types::{PageRequest, Product, slugify, validate_slug};
use crate::error::CatalogServiceError;

fn validate_title(title: &str) -> Result<(), CatalogServiceError> {
    if title.trim().is_empty() || title.len() > 255 {
        return Err(CatalogServiceError::Validation(
            "title must be between 1 and 255 characters".to_owned(),
        ));
    }
    Ok(())
}

fn validate_pricing(
    price: Decimal,
    discount_price: Option<Decimal>,
) -> Result<(), CatalogServiceError> {
    if price < Decimal::ZERO {
        return Err(CatalogServiceError::Validation(
            "price must not be negative".to_owned(),
        ));
    }
    if let Some(discount) = discount_price {
        if discount < Decimal::ZERO || discount >= price {
            return Err(CatalogServiceError::Validation(
                "discount price must be between zero and the regular price".to_owned(),
            ));
        }
    }
    Ok(())
}

// ── ListProducts ─────────────────────────────────────────────────────────────

pub struct ListProductsUseCase<R: ProductRepository> {
    pub repo: R,
}

impl<R: ProductRepository> ListProductsUseCase<R> {
    /// Public storefront listing: active products only.
    pub async fn execute(&self, page: PageRequest) -> Result<Vec<Product>, CatalogServiceError> {
        self.repo.list_active(page).await
    }
}

// ── GetProduct ───────────────────────────────────────────────────────────────

pub struct GetProductUseCase<R: ProductRepository> {
    pub repo: R,
}

impl<R: ProductRepository> GetProductUseCase<R> {
    /// Public detail fetch by slug. Counts the view; an inactive product is
    /// indistinguishable from a missing one.
    pub async fn execute(&self, slug: &str) -> Result<Product, CatalogServiceError> {
        let product = self
            .repo
            .find_by_slug(slug)
            .await?
            .filter(|p| p.is_active)
            .ok_or(CatalogServiceError::ProductNotFound)?;
        self.repo.bump_views(product.id).await?;
        Ok(product)
    }
}

// ── CreateProduct ────────────────────────────────────────────────────────────

pub struct CreateProductInput {
    pub title: String,
    /// Canonical slug; generated from the title when absent.
    pub slug: Option<String>,
    pub short_description: Option<String>,
    pub full_details: Option<String>,
    pub price: Decimal,
    pub discount_price: Option<Decimal>,
    pub quantity: i32,
    pub sku: Option<String>,
    pub is_active: bool,
}

pub struct CreateProductUseCase<R: ProductRepository> {
    pub repo: R,
}

impl<R: ProductRepository> CreateProductUseCase<R> {
    pub async fn execute(
        &self,
        input: CreateProductInput,
    ) -> Result<Product, CatalogServiceError> {
        validate_title(&input.title)?;
        validate_pricing(input.price, input.discount_price)?;
        if input.quantity < 0 {
            return Err(CatalogServiceError::Validation(
                "quantity must not be negative".to_owned(),
            ));
        }

        let slug = match input.slug {
            Some(slug) => {
                if !validate_slug(&slug) {
                    return Err(CatalogServiceError::Validation(
                        "slug must be lowercase alphanumerics and single hyphens".to_owned(),
                    ));
                }
                slug
            }
            None => {
                let slug = slugify(&input.title);
                if slug.is_empty() {
                    return Err(CatalogServiceError::Validation(
                        "title yields an empty slug, provide one explicitly".to_owned(),
                    ));
                }
                slug
            }
        };
        if self.repo.slug_exists(&slug).await? {
            return Err(CatalogServiceError::SlugTaken);
        }
        if let Some(ref sku) = input.sku {
            if self.repo.sku_exists(sku).await? {
                return Err(CatalogServiceError::SkuTaken);
            }
        }

        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4(),
            title: input.title,
            slug,
            short_description: input.short_description,
            full_details: input.full_details,
            price: input.price,
            discount_price: input.discount_price,
            quantity: input.quantity,
            sku: input.sku,
            is_active: input.is_active,
            views_count: 0,
            created_at: now,
            updated_at: now,
        };
        self.repo.create(&product).await?;
        Ok(product)
    }
}

// ── UpdateProduct ────────────────────────────────────────────────────────────

/// Partial update; `None` leaves the field untouched. Slug and sku changes
/// re-check uniqueness against other products.
#[derive(Default)]
pub struct UpdateProductInput {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub short_description: Option<Option<String>>,
    pub full_details: Option<Option<String>>,
    pub price: Option<Decimal>,
    pub discount_price: Option<Option<Decimal>>,
    pub quantity: Option<i32>,
    pub sku: Option<Option<String>>,
    pub is_active: Option<bool>,
}

pub struct UpdateProductUseCase<R: ProductRepository> {
    pub repo: R,
}

impl<R: ProductRepository> UpdateProductUseCase<R> {
    pub async fn execute(
        &self,
        id: Uuid,
        input: UpdateProductInput,
    ) -> Result<Product, CatalogServiceError> {
        let mut product = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(CatalogServiceError::ProductNotFound)?;

        if let Some(title) = input.title {
            validate_title(&title)?;
            product.title = title;
        }
        if let Some(slug) = input.slug {
            if !validate_slug(&slug) {
                return Err(CatalogServiceError::Validation(
                    "slug must be lowercase alphanumerics and single hyphens".to_owned(),
                ));
            }
            if slug != product.slug && self.repo.slug_exists(&slug).await? {
                return Err(CatalogServiceError::SlugTaken);
            }
            product.slug = slug;
        }
        if let Some(short_description) = input.short_description {
            product.short_description = short_description;
        }
        if let Some(full_details) = input.full_details {
            product.full_details = full_details;
        }
        if let Some(price) = input.price {
            product.price = price;
        }
        if let Some(discount_price) = input.discount_price {
            product.discount_price = discount_price;
        }
        validate_pricing(product.price, product.discount_price)?;
        if let Some(quantity) = input.quantity {
            if quantity < 0 {
                return Err(CatalogServiceError::Validation(
                    "quantity must not be negative".to_owned(),
                ));
            }
            product.quantity = quantity;
        }
        if let Some(sku) = input.sku {
            if let Some(ref new_sku) = sku {
                if product.sku.as_deref() != Some(new_sku.as_str())
                    && self.repo.sku_exists(new_sku).await?
                {
                    return Err(CatalogServiceError::SkuTaken);
                }
            }
            product.sku = sku;
        }
        if let Some(is_active) = input.is_active {
            product.is_active = is_active;
        }

        product.updated_at = Utc::now();
        self.repo.update(&product).await?;
        Ok(product)
    }
}

// ── DeleteProduct ────────────────────────────────────────────────────────────

pub struct DeleteProductUseCase<R: ProductRepository> {
    pub repo: R,
}

impl<R: ProductRepository> DeleteProductUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<(), CatalogServiceError> {
        if !self.repo.delete(id).await? {
            return Err(CatalogServiceError::ProductNotFound);
        }
        Ok(())
    }
}
