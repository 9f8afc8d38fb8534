use axum::{Router, routing::get, routing::post};

use crate::state::AppState;

use super::controller::{
    create_tag, delete_tag, get_tag, get_tags, link_tag_to_item, unlink_tag_from_item,
};

pub fn init_tags_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_tags).post(create_tag))
        .route("/{id}", get(get_tag).delete(delete_tag))
}

/// Item↔tag link routes, nested under `/item` by the main router.
pub fn init_item_tags_router() -> Router<AppState> {
    Router::new().route(
        "/{id}/tag/{tag_id}",
        post(link_tag_to_item).delete(unlink_tag_from_item),
    )
}
