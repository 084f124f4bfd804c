use sea_orm::Database;
use tracing::info;

use mercato_catalog::config::CatalogConfig;
use mercato_catalog::router::build_router;
use mercato_catalog::state::AppState;

#[tokio::main]
async fn main() {
    mercato_core::tracing::init_tracing("catalog");

    let config = CatalogConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState { db };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.catalog_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("catalog service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
