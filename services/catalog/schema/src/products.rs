use sea_orm::entity::prelude::*;

/// Storefront product.
///
/// `slug` is the public identifier (unique, URL-safe); `views_count` is
/// bumped on every public detail fetch. Inactive products stay in the table
/// but never appear in public listings.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub short_description: Option<String>,
    pub full_details: Option<String>,
    pub price: Decimal,
    pub discount_price: Option<Decimal>,
    pub quantity: i32,
    #[sea_orm(unique)]
    pub sku: Option<String>,
    pub is_active: bool,
    pub views_count: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
