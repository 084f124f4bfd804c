use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{delete, get, patch, post},
};
use tower_http::trace::TraceLayer;

use mercato_core::health::healthz;
use mercato_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    password::{complete_reset, request_reset, resend_reset_otp, verify_reset_otp},
    profile::{get_me, update_me},
    register::{register, resend_registration_otp, verify_registration},
    session::{login, logout},
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
        // Registration
        .route("/auth/register", post(register))
        .route("/auth/register/verify", post(verify_registration))
        .route("/auth/register/resend", post(resend_registration_otp))
        // Password reset
        .route("/auth/password/forgot", post(request_reset))
        .route("/auth/password/verify", post(verify_reset_otp))
        .route("/auth/password/reset", post(complete_reset))
        .route("/auth/password/resend", post(resend_reset_otp))
        // Session
        .route("/auth/session", post(login))
        .route("/auth/session", delete(logout))
        // Profile
        .route("/auth/me", get(get_me))
        .route("/auth/me", patch(update_me))
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id_layer())
        .layer(request_id_layer())
        .with_state(state)
}
