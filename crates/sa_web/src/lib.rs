use std::sync::Arc;

use axum::{routing::post, Router};
use tower_http::cors::CorsLayer;

pub mod handlers;
pub mod state;

pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/api/analyze", post(handlers::analyze))
        .fallback(handlers::not_found)
        .layer(cors)
        .with_state(Arc::new(state))
}
