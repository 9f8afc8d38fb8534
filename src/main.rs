use std::net::SocketAddr;

use dotenvy::dotenv;
use storehouse::logging::init_tracing;
use storehouse::metrics::init_metrics;
use storehouse::router::init_router;
use storehouse::state::init_app_state;

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_tracing();

    let metrics_handle = init_metrics();
    let state = init_app_state().await;
    let app = init_router(state, metrics_handle);

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(3000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind server address");
    tracing::info!(%addr, "Server running");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Server error");
}
