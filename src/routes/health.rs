use axum::extract::State;
use axum::Json;

use crate::state::AppState;

/// Liveness probe. The `timestamp` field carries the masked token prefix,
/// identifying which credential the deployment loaded.
pub async fn ping(state: State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": state.token_hint,
    }))
}
