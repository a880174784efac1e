pub mod health;

use axum::{routing::get, routing::post, Router};

use crate::letter::handlers::handle_generate_letter;
use crate::minutes::handlers::handle_generate_minutes;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/cover-letter", post(handle_generate_letter))
        .route("/api/v1/meeting-minutes", post(handle_generate_minutes))
        .with_state(state)
}
