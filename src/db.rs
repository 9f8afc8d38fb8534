//! Lazy schema bootstrap.
//!
//! The schema is not applied at startup: the first routed request creates
//! all tables (idempotently) and seeds the sentinel Unassigned store, under
//! a double-checked [`InitGuard`] so concurrent first requests initialize
//! exactly once. Probe, metrics and documentation routes bypass the gate so
//! they stay responsive while the database is down.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use sqlx::PgPool;
use tokio::sync::Mutex;
use tracing::info;

use crate::modules::stores::model::{UNASSIGNED_STORE_ID, UNASSIGNED_STORE_NAME};
use crate::state::AppState;
use crate::utils::errors::AppError;

const SCHEMA_STATEMENTS: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS stores (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL UNIQUE
    )",
    "CREATE TABLE IF NOT EXISTS items (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        price DOUBLE PRECISION NOT NULL,
        store_id BIGINT NOT NULL REFERENCES stores(id) ON DELETE CASCADE
    )",
    "CREATE TABLE IF NOT EXISTS tags (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        store_id BIGINT NOT NULL REFERENCES stores(id) ON DELETE CASCADE,
        UNIQUE (store_id, name)
    )",
    "CREATE TABLE IF NOT EXISTS items_tags (
        item_id BIGINT NOT NULL REFERENCES items(id) ON DELETE CASCADE,
        tag_id BIGINT NOT NULL REFERENCES tags(id) ON DELETE CASCADE,
        PRIMARY KEY (item_id, tag_id)
    )",
    "CREATE TABLE IF NOT EXISTS users (
        id BIGSERIAL PRIMARY KEY,
        username TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL
    )",
];

/// Creates all tables and seeds the sentinel Unassigned store. Safe to run
/// more than once.
pub async fn create_schema(db: &PgPool) -> Result<(), AppError> {
    for statement in SCHEMA_STATEMENTS {
        sqlx::query(statement).execute(db).await?;
    }

    sqlx::query("INSERT INTO stores (id, name) VALUES ($1, $2) ON CONFLICT (id) DO NOTHING")
        .bind(UNASSIGNED_STORE_ID)
        .bind(UNASSIGNED_STORE_NAME)
        .execute(db)
        .await?;

    Ok(())
}

/// One-time initialization guard with a double-checked fast path.
///
/// The ready flag is a single atomic read once initialization has succeeded;
/// the first callers serialize on the mutex and re-check under it, so the
/// initializer runs exactly once however many requests race in. A failed
/// initialization leaves the flag unset and a later request retries.
#[derive(Debug, Default)]
pub struct InitGuard {
    ready: AtomicBool,
    lock: Mutex<()>,
}

impl InitGuard {
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub async fn ensure<F, Fut>(&self, init: F) -> Result<(), AppError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(), AppError>>,
    {
        if self.is_ready() {
            return Ok(());
        }

        let _guard = self.lock.lock().await;
        if self.is_ready() {
            return Ok(());
        }

        init().await?;
        self.ready.store(true, Ordering::Release);
        Ok(())
    }
}

/// Middleware gating routed requests on schema initialization.
pub async fn schema_middleware(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    // Unmatched routes carry no MatchedPath and skip the gate.
    let gated = req
        .extensions()
        .get::<MatchedPath>()
        .map(|path| requires_schema(path.as_str()))
        .unwrap_or(false);

    if gated {
        let result = state
            .schema_init
            .ensure(|| async {
                create_schema(&state.db).await?;
                info!("database schema initialized");
                Ok(())
            })
            .await;

        if let Err(err) = result {
            return err.into_response();
        }
    }

    next.run(req).await
}

/// Probe, metrics and documentation routes must stay responsive while the
/// database is down.
fn requires_schema(route: &str) -> bool {
    !(matches!(route, "/healthz" | "/readyz" | "/metrics")
        || route.starts_with("/swagger-ui")
        || route.starts_with("/scalar")
        || route.starts_with("/api-docs"))
}
