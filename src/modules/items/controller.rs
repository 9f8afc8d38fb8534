use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use crate::metrics::track_item_created;
use crate::middleware::auth::{RequireAdmin, RequireFreshAdmin};
use crate::modules::auth::model::MessageResponse;
use crate::modules::items::model::{CreateItemDto, Item, UpdateItemDto};
use crate::modules::items::service::ItemService;
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/item",
    responses((status = 200, description = "List of items", body = Vec<Item>)),
    tag = "Items"
)]
#[instrument(skip(state))]
pub async fn get_items(State(state): State<AppState>) -> Result<Json<Vec<Item>>, AppError> {
    let items = ItemService::get_items(&state.db).await?;
    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/item/{id}",
    params(("id" = i64, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Item details", body = Item),
        (status = 404, description = "Item not found", body = ErrorResponse)
    ),
    tag = "Items"
)]
#[instrument(skip(state))]
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Item>, AppError> {
    let item = ItemService::get_item(&state.db, id).await?;
    Ok(Json(item))
}

#[utoipa::path(
    post,
    path = "/item",
    request_body = CreateItemDto,
    responses(
        (status = 201, description = "Item created", body = Item),
        (status = 401, description = "Admin privilege required", body = ErrorResponse),
        (status = 404, description = "Store not found", body = ErrorResponse)
    ),
    tag = "Items",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _admin))]
pub async fn create_item(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ValidatedJson(dto): ValidatedJson<CreateItemDto>,
) -> Result<(StatusCode, Json<Item>), AppError> {
    let item = ItemService::create_item(&state.db, dto).await?;
    track_item_created();
    Ok((StatusCode::CREATED, Json(item)))
}

/// Full replace of name and price; creates the item under the supplied id
/// when absent.
#[utoipa::path(
    put,
    path = "/item/{id}",
    params(("id" = i64, Path, description = "Item ID")),
    request_body = UpdateItemDto,
    responses(
        (status = 200, description = "Item updated or created", body = Item),
        (status = 401, description = "Fresh admin token required", body = ErrorResponse)
    ),
    tag = "Items",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _admin))]
pub async fn update_item(
    State(state): State<AppState>,
    _admin: RequireFreshAdmin,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateItemDto>,
) -> Result<Json<Item>, AppError> {
    let (item, _created) = ItemService::upsert_item(&state.db, id, dto).await?;
    Ok(Json(item))
}

#[utoipa::path(
    delete,
    path = "/item/{id}",
    params(("id" = i64, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Item deleted", body = MessageResponse),
        (status = 401, description = "Fresh admin token required", body = ErrorResponse),
        (status = 404, description = "Item not found", body = ErrorResponse)
    ),
    tag = "Items",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _admin))]
pub async fn delete_item(
    State(state): State<AppState>,
    _admin: RequireFreshAdmin,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    ItemService::delete_item(&state.db, id).await?;
    Ok(Json(MessageResponse {
        message: "Item deleted".to_string(),
    }))
}
