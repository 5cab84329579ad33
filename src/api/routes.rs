//! API Routes
//!
//! Configures the Axum router with all object cache endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    add_handler, batch_handler, decr_handler, delete_handler, flush_handler, get_handler,
    health_handler, incr_handler, replace_handler, set_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /add` - Store a value if the key is new
/// - `PUT /set` - Store a value unconditionally
/// - `POST /replace` - Overwrite an existing value
/// - `GET /get/:group/:key` - Retrieve a value
/// - `DELETE /del/:group/:key` - Delete a value
/// - `POST /incr`, `POST /decr` - Adjust a counter
/// - `POST /batch` - Run several operations against one local cache
/// - `POST /flush` - Clear everything
/// - `GET /stats` - Shared store statistics
/// - `GET /health` - Health check endpoint
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/add", post(add_handler))
        .route("/set", put(set_handler))
        .route("/replace", post(replace_handler))
        .route("/get/:group/:key", get(get_handler))
        .route("/del/:group/:key", delete(delete_handler))
        .route("/incr", post(incr_handler))
        .route("/decr", post(decr_handler))
        .route("/batch", post(batch_handler))
        .route("/flush", post(flush_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
