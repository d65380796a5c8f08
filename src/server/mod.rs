use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

mod errors;
pub mod handlers;
mod state;

pub use errors::ApiError;
pub use state::AppState;

/// Build the HTTP router for the relay.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/search", get(handlers::search))
        .route("/featured", get(handlers::featured))
        .route("/food-news", get(handlers::food_news))
        .route("/cooking-assistant", post(handlers::cooking_assistant))
        .layer(cors)
        .with_state(Arc::new(state))
}
