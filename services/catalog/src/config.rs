/// Catalog service configuration loaded from environment variables.
#[derive(Debug)]
pub struct CatalogConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port to listen on (default 3320). Env var: `CATALOG_PORT`.
    pub catalog_port: u16,
}

impl CatalogConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            catalog_port: std::env::var("CATALOG_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3320),
        }
    }
}
