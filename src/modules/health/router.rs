use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{healthz, readyz};

pub fn init_health_router() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
}
