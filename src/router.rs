use axum::{Router, middleware, routing::get};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::db::schema_middleware;
use crate::docs::ApiDoc;
use crate::logging::lifecycle_middleware;
use crate::metrics::metrics_middleware;
use crate::modules::auth::router::init_auth_router;
use crate::modules::health::router::init_health_router;
use crate::modules::items::router::init_items_router;
use crate::modules::stores::router::init_stores_router;
use crate::modules::tags::router::{init_item_tags_router, init_tags_router};
use crate::modules::users::router::init_users_router;
use crate::state::AppState;

pub fn init_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let mut router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .merge(init_health_router())
        .merge(init_auth_router())
        .merge(init_users_router())
        .nest("/store", init_stores_router())
        .nest("/item", init_items_router().merge(init_item_tags_router()))
        .nest("/tag", init_tags_router());

    if let Some(handle) = metrics_handle {
        router = router.route("/metrics", get(move || async move { handle.render() }));
    }

    // Layers run outside-in: the lifecycle middleware assigns the request id
    // and logs last, metrics wrap everything routed, and the schema gate sits
    // closest to the handlers.
    router
        .with_state(state.clone())
        .layer(middleware::from_fn_with_state(state.clone(), schema_middleware))
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn_with_state(state, lifecycle_middleware))
}
