pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::chat::handlers;
use crate::errors::AppError;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/status", get(health::status_handler))
        .route("/chat", post(handlers::handle_chat))
        .fallback(not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // Open to every origin, method and header: the portfolio frontend is served elsewhere.
        .layer(CorsLayer::permissive())
}
