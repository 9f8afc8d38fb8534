use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusResponse {
    pub status: &'static str,
}

/// Liveness: always healthy while the process runs, no dependency check.
#[utoipa::path(
    get,
    path = "/healthz",
    responses((status = 200, description = "Process is alive", body = StatusResponse)),
    tag = "Health"
)]
pub async fn healthz() -> Json<StatusResponse> {
    Json(StatusResponse { status: "ok" })
}

/// Readiness: a trivial database probe. Failure is reported, never fatal;
/// the process keeps serving liveness while the database is unreachable.
#[utoipa::path(
    get,
    path = "/readyz",
    responses(
        (status = 200, description = "Database reachable", body = StatusResponse),
        (status = 503, description = "Database unreachable", body = StatusResponse)
    ),
    tag = "Health"
)]
pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    match sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(&state.db).await {
        Ok(_) => (StatusCode::OK, Json(StatusResponse { status: "ready" })),
        Err(err) => {
            warn!(error = %err, "readiness probe failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(StatusResponse {
                    status: "not_ready",
                }),
            )
        }
    }
}
