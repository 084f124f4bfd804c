use sea_orm::DatabaseConnection;

use crate::infra::db::DbProductRepository;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

impl AppState {
    pub fn product_repo(&self) -> DbProductRepository {
        DbProductRepository {
            db: self.db.clone(),
        }
    }
}
