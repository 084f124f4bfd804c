use axum::Json;

/// Handler for `GET /healthz` — liveness only. Says nothing about
/// dependencies; each service wires its own `/readyz` with a real
/// database ping.
pub async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
