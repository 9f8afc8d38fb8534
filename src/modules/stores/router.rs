use axum::{Router, routing::get, routing::put};

use crate::state::AppState;

use super::controller::{
    create_store, delete_store, get_store, get_stores, link_item_to_store, search_stores,
    store_item_count, unlink_item_from_store,
};

pub fn init_stores_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_stores).post(create_store))
        .route("/search", get(search_stores))
        .route("/{id}", get(get_store).delete(delete_store))
        .route("/{id}/count", get(store_item_count))
        .route(
            "/{id}/item/{item_id}",
            put(link_item_to_store).delete(unlink_item_from_store),
        )
}
