mod emojis;
mod health;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router. The browser client is served from a
/// different origin, so CORS stays permissive.
pub fn router(state: AppState) -> Router {
    let mut app = Router::new()
        .route("/ping", get(health::ping))
        .route("/emoji/list", get(emojis::list_emojis))
        .route("/emoji/add", post(emojis::add_emoji));

    if let Some(ref dir) = state.static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
