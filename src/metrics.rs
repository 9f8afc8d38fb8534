//! Prometheus metrics: a static registry described at startup, an HTTP
//! middleware for request volume/latency, and per-business-event counters
//! incremented by handlers after a successful operation.
//!
//! Every series carries a `service` label; the in-flight gauge is the only
//! metric ever decremented.

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use metrics::{
    counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram,
};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use crate::config::service::ServiceConfig;

/// Fixed latency bucket ladder for the request duration histogram.
const REQUEST_DURATION_BUCKETS: &[f64] =
    &[0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0];

static OBSERVABILITY_ENABLED: OnceLock<bool> = OnceLock::new();
static SERVICE: OnceLock<ServiceConfig> = OnceLock::new();

/// Check if observability is enabled via OBSERVABILITY_ENABLED env var.
pub fn is_observability_enabled() -> bool {
    *OBSERVABILITY_ENABLED.get_or_init(|| {
        std::env::var("OBSERVABILITY_ENABLED")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true) // Enabled by default
    })
}

pub fn service_name() -> String {
    SERVICE.get_or_init(ServiceConfig::from_env).name.clone()
}

fn service_version() -> String {
    SERVICE.get_or_init(ServiceConfig::from_env).version.clone()
}

/// Installs the Prometheus recorder, describes the static metric set and
/// spawns the upkeep task. Returns None if observability is disabled.
pub fn init_metrics() -> Option<PrometheusHandle> {
    if !is_observability_enabled() {
        return None;
    }

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            REQUEST_DURATION_BUCKETS,
        )
        .expect("Failed to set buckets")
        .install_recorder()
        .expect("Failed to install Prometheus recorder");

    describe_metrics();
    gauge!("service_info", "service" => service_name(), "version" => service_version()).set(1.0);

    // Spawn upkeep task to clean stale metrics
    let upkeep_handle = handle.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(5)).await;
            upkeep_handle.run_upkeep();
        }
    });

    Some(handle)
}

fn describe_metrics() {
    describe_gauge!("service_info", "Static service metadata.");
    describe_gauge!(
        "http_requests_in_flight",
        "Current number of in-flight HTTP requests."
    );
    describe_counter!("http_requests_total", "Total number of HTTP requests.");
    describe_counter!(
        "http_requests_errors_total",
        "Total number of error HTTP requests (4xx, 5xx)."
    );
    describe_histogram!(
        "http_request_duration_seconds",
        "HTTP request latency in seconds."
    );
    describe_counter!("stores_created_total", "Total number of stores created.");
    describe_counter!("items_created_total", "Total number of items created.");
    describe_counter!("tags_created_total", "Total number of tags created.");
    describe_counter!("store_search_total", "Total number of store search requests.");
    describe_counter!(
        "store_item_link_total",
        "Total number of store-item link operations."
    );
    describe_counter!(
        "store_item_unlink_total",
        "Total number of store-item unlink operations."
    );
    describe_counter!(
        "item_tag_link_total",
        "Total number of item-tag link operations."
    );
    describe_counter!(
        "item_tag_unlink_total",
        "Total number of item-tag unlink operations."
    );
    describe_counter!("users_registered_total", "Total number of registered users.");
    describe_counter!("user_login_total", "Total number of successful user logins.");
    describe_counter!(
        "token_refresh_total",
        "Total number of successful token refreshes."
    );
    describe_counter!("logout_total", "Total number of successful user logouts.");
}

/// Metrics middleware tracking request volume, error volume, latency and the
/// in-flight gauge per (method, route).
pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    if !is_observability_enabled() {
        return next.run(req).await;
    }

    let start = Instant::now();
    let method = req.method().as_str().to_owned();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());
    let service = service_name();

    gauge!("http_requests_in_flight", "service" => service.clone(), "method" => method.clone(), "route" => route.clone())
        .increment(1.0);

    let response = next.run(req).await;

    let latency = start.elapsed().as_secs_f64();
    let status = response.status();
    let status_code = status.as_u16().to_string();

    counter!("http_requests_total", "service" => service.clone(), "method" => method.clone(), "route" => route.clone(), "status_code" => status_code.clone())
        .increment(1);

    if status.is_client_error() || status.is_server_error() {
        counter!("http_requests_errors_total", "service" => service.clone(), "method" => method.clone(), "route" => route.clone(), "status_code" => status_code)
            .increment(1);
    }

    histogram!("http_request_duration_seconds", "service" => service.clone(), "method" => method.clone(), "route" => route.clone())
        .record(latency);

    gauge!("http_requests_in_flight", "service" => service, "method" => method, "route" => route)
        .decrement(1.0);

    response
}

// Business metrics helpers, one per event. Handlers call these after the
// operation has succeeded.

pub fn track_store_created() {
    if !is_observability_enabled() {
        return;
    }
    counter!("stores_created_total", "service" => service_name()).increment(1);
}

pub fn track_item_created() {
    if !is_observability_enabled() {
        return;
    }
    counter!("items_created_total", "service" => service_name()).increment(1);
}

pub fn track_tag_created() {
    if !is_observability_enabled() {
        return;
    }
    counter!("tags_created_total", "service" => service_name()).increment(1);
}

pub fn track_store_search() {
    if !is_observability_enabled() {
        return;
    }
    counter!("store_search_total", "service" => service_name()).increment(1);
}

pub fn track_store_item_link() {
    if !is_observability_enabled() {
        return;
    }
    counter!("store_item_link_total", "service" => service_name()).increment(1);
}

pub fn track_store_item_unlink() {
    if !is_observability_enabled() {
        return;
    }
    counter!("store_item_unlink_total", "service" => service_name()).increment(1);
}

pub fn track_item_tag_link() {
    if !is_observability_enabled() {
        return;
    }
    counter!("item_tag_link_total", "service" => service_name()).increment(1);
}

pub fn track_item_tag_unlink() {
    if !is_observability_enabled() {
        return;
    }
    counter!("item_tag_unlink_total", "service" => service_name()).increment(1);
}

pub fn track_user_registered() {
    if !is_observability_enabled() {
        return;
    }
    counter!("users_registered_total", "service" => service_name()).increment(1);
}

pub fn track_user_login() {
    if !is_observability_enabled() {
        return;
    }
    counter!("user_login_total", "service" => service_name()).increment(1);
}

pub fn track_token_refresh() {
    if !is_observability_enabled() {
        return;
    }
    counter!("token_refresh_total", "service" => service_name()).increment(1);
}

pub fn track_logout() {
    if !is_observability_enabled() {
        return;
    }
    counter!("logout_total", "service" => service_name()).increment(1);
}
