use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Admin role wire value in `x-mercato-user-role`, matching the identity
/// service's `users.role` column.
pub const ROLE_ADMIN: i16 = 1;

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: Uuid,
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Page selector for listings. One-based page, capped page size.
#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    pub per_page: u32,
    pub page: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            per_page: 25,
            page: 1,
        }
    }
}

impl PageRequest {
    pub const MAX_PER_PAGE: u32 = 100;

    pub fn clamped(per_page: Option<u32>, page: Option<u32>) -> Self {
        Self {
            per_page: per_page.unwrap_or(25).clamp(1, Self::MAX_PER_PAGE),
            page: page.unwrap_or(1).max(1),
        }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.per_page) * u64::from(self.page - 1)
    }
}

/// Derive a URL-safe slug from a product title: lowercase alphanumerics,
/// runs of everything else collapsed to single hyphens.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

/// A caller-supplied slug must already be in canonical form.
pub fn validate_slug(slug: &str) -> bool {
    !slug.is_empty() && slug == slugify(slug)
}
