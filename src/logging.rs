//! Structured logging and the request lifecycle middleware.

use axum::{
    extract::{ConnectInfo, MatchedPath, Request, State},
    http::{HeaderValue, header},
    middleware::Next,
    response::Response,
};
use std::net::SocketAddr;
use std::time::Instant;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::state::AppState;
use crate::utils::jwt::verify_token;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Initializes the global subscriber. `LOG_LEVEL` sets the default filter
/// (overridable per target via `RUST_LOG`); `LOG_FORMAT` selects `json`
/// (default) or `text` output on stdout.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()))
    });

    let registry = tracing_subscriber::registry().with(filter);

    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("text") => registry.with(tracing_subscriber::fmt::layer().compact()).init(),
        _ => registry
            .with(tracing_subscriber::fmt::layer().json().flatten_event(true))
            .init(),
    }
}

/// Request lifecycle middleware.
///
/// Assigns or propagates the request id, times the request, resolves the
/// caller identity when a valid bearer token is present, emits one
/// structured log event per request, and attaches the request id to the
/// response. 4xx log at WARN and 5xx at ERROR; the error cause itself is
/// logged where the response is produced.
pub async fn lifecycle_middleware(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| path.clone());
    let remote_addr = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string());

    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let user_id = resolve_identity(&req, &state);

    let mut response = next.run(req).await;

    let status = response.status().as_u16();
    let latency_ms = start.elapsed().as_millis() as u64;
    let remote_addr = remote_addr.as_deref().unwrap_or("unknown");
    let user_id = user_id.as_deref().unwrap_or("-");

    match status {
        400..=499 => warn!(
            request_id = %request_id,
            method = %method,
            route = %route,
            path = %path,
            status,
            latency_ms,
            remote_addr,
            user_id,
            "Client error"
        ),
        500..=599 => error!(
            request_id = %request_id,
            method = %method,
            route = %route,
            path = %path,
            status,
            latency_ms,
            remote_addr,
            user_id,
            "Server error"
        ),
        _ => info!(
            request_id = %request_id,
            method = %method,
            route = %route,
            path = %path,
            status,
            latency_ms,
            remote_addr,
            user_id,
            "Request completed"
        ),
    }

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// Best-effort: a missing or invalid token leaves the request anonymous
/// here; enforcement happens in the auth extractors.
fn resolve_identity(req: &Request, state: &AppState) -> Option<String> {
    let header = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?;
    verify_token(token, &state.jwt_config)
        .ok()
        .map(|claims| claims.sub)
}
