//! Request-processing middleware and extractors.
//!
//! - [`auth`]: bearer-token extractors (`AuthUser`, `RequireAdmin`,
//!   `RequireFreshAdmin`)
//!
//! The request lifecycle middleware lives in [`crate::logging`], the metrics
//! middleware in [`crate::metrics`], and the schema gate in [`crate::db`].

pub mod auth;
