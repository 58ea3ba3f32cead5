// API-layer components: handlers and the route table
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub mod handlers {
    pub use crate::handlers::*;
}

/// Routes for the fiscal-code facade, without rate limiting or body limits.
pub fn router(state: Arc<handlers::AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/v1/fiscal-codes", post(handlers::compute_fiscal_code))
        .route(
            "/api/v1/fiscal-codes/verified",
            post(handlers::compute_verified_fiscal_code),
        )
        .route(
            "/api/v1/fiscal-codes/:code/verification",
            get(handlers::verify_fiscal_code),
        )
        .with_state(state)
}
