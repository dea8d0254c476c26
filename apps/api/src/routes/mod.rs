pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::documents::handlers as document_handlers;
use crate::generation::handlers as generation_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Generation pipeline
        .route("/api/v1/generate", post(generation_handlers::handle_generate))
        .route("/api/v1/compile", post(generation_handlers::handle_compile))
        // Compiled documents
        .route(
            "/api/v1/documents/:id",
            get(document_handlers::handle_download).delete(document_handlers::handle_dispose),
        )
        .with_state(state)
}
