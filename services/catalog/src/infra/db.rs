use anyhow::Context as _;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, sea_query::Expr,
};
use uuid::Uuid;

use mercato_catalog_schema::products;

use crate::domain::repository::ProductRepository;
use crate::domain::types::{PageRequest, Product};
use crate::error::CatalogServiceError;

#[derive(Clone)]
pub struct DbProductRepository {
    pub db: DatabaseConnection,
}

impl ProductRepository for DbProductRepository {
    async fn list_active(&self, page: PageRequest) -> Result<Vec<Product>, CatalogServiceError> {
        let models = products::Entity::find()
            .filter(products::Column::IsActive.eq(true))
            .order_by_desc(products::Column::CreatedAt)
            .offset(page.offset())
            .limit(u64::from(page.per_page))
            .all(&self.db)
            .await
            .context("list active products")?;
        Ok(models.into_iter().map(product_from_model).collect())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Product>, CatalogServiceError> {
        let model = products::Entity::find()
            .filter(products::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .context("find product by slug")?;
        Ok(model.map(product_from_model))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, CatalogServiceError> {
        let model = products::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find product by id")?;
        Ok(model.map(product_from_model))
    }

    async fn slug_exists(&self, slug: &str) -> Result<bool, CatalogServiceError> {
        let count = products::Entity::find()
            .filter(products::Column::Slug.eq(slug))
            .count(&self.db)
            .await
            .context("count products by slug")?;
        Ok(count > 0)
    }

    async fn sku_exists(&self, sku: &str) -> Result<bool, CatalogServiceError> {
        let count = products::Entity::find()
            .filter(products::Column::Sku.eq(sku))
            .count(&self.db)
            .await
            .context("count products by sku")?;
        Ok(count > 0)
    }

    async fn create(&self, product: &Product) -> Result<(), CatalogServiceError> {
        active_model_from(product)
            .insert(&self.db)
            .await
            .context("create product")?;
        Ok(())
    }

    async fn update(&self, product: &Product) -> Result<(), CatalogServiceError> {
        active_model_from(product)
            .update(&self.db)
            .await
            .context("update product")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, CatalogServiceError> {
        let result = products::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete product")?;
        Ok(result.rows_affected == 1)
    }

    async fn bump_views(&self, id: Uuid) -> Result<(), CatalogServiceError> {
        products::Entity::update_many()
            .col_expr(
                products::Column::ViewsCount,
                Expr::col(products::Column::ViewsCount).add(1),
            )
            .filter(products::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("bump product views")?;
        Ok(())
    }
}

fn active_model_from(product: &Product) -> products::ActiveModel {
    products::ActiveModel {
        id: Set(product.id),
        title: Set(product.title.clone()),
        slug: Set(product.slug.clone()),
        short_description: Set(product.short_description.clone()),
        full_details: Set(product.full_details.clone()),
        price: Set(product.price),
        discount_price: Set(product.discount_price),
        quantity: Set(product.quantity),
        sku: Set(product.sku.clone()),
        is_active: Set(product.is_active),
        views_count: Set(product.views_count),
        created_at: Set(product.created_at),
        updated_at: Set(product.updated_at),
    }
}

fn product_from_model(model: products::Model) -> Product {
    Product {
        id: model.id,
        title: model.title,
        slug: model.slug,
        short_description: model.short_description,
        full_details: model.full_details,
        price: model.price,
        discount_price: model.discount_price,
        quantity: model.quantity,
        sku: model.sku,
        is_active: model.is_active,
        views_count: model.views_count,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}
