use axum::{Router, extract::State, http::StatusCode, routing::get};
use tower_http::trace::TraceLayer;

use mercato_core::health::healthz;
use mercato_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::products::{
    create_product, delete_product, get_product, list_products, update_product,
};
use crate::state::AppState;

/// `GET /readyz` — ready only while the database answers.
async fn readyz(State(state): State<AppState>) -> StatusCode {
    match state.db.ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Public list + admin create share the collection path.
        .route("/products", get(list_products).post(create_product))
        // GET reads the segment as a slug; PATCH/DELETE as the product id.
        .route(
            "/products/{key}",
            get(get_product)
                .patch(update_product)
                .delete(delete_product),
        )
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id_layer())
        .layer(request_id_layer())
        .with_state(state)
}
