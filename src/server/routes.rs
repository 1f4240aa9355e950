//! Router configuration for the relay server.

use axum::{routing::post, Router};
use tower_http::cors::CorsLayer;

use super::handlers;
use super::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/send-email", post(handlers::send_email))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
