use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use crate::metrics::{
    track_store_created, track_store_item_link, track_store_item_unlink, track_store_search,
};
use crate::modules::auth::model::MessageResponse;
use crate::modules::stores::model::{
    CreateStoreDto, Store, StoreItemCount, StoreItemLinkResponse, StoreSearchParams,
};
use crate::modules::stores::service::StoreService;
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/store",
    responses((status = 200, description = "List of stores", body = Vec<Store>)),
    tag = "Stores"
)]
#[instrument(skip(state))]
pub async fn get_stores(State(state): State<AppState>) -> Result<Json<Vec<Store>>, AppError> {
    let stores = StoreService::get_stores(&state.db).await?;
    Ok(Json(stores))
}

#[utoipa::path(
    post,
    path = "/store",
    request_body = CreateStoreDto,
    responses(
        (status = 201, description = "Store created", body = Store),
        (status = 400, description = "Validation error or duplicate name", body = ErrorResponse)
    ),
    tag = "Stores"
)]
#[instrument(skip(state))]
pub async fn create_store(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateStoreDto>,
) -> Result<(StatusCode, Json<Store>), AppError> {
    let store = StoreService::create_store(&state.db, dto).await?;
    track_store_created();
    Ok((StatusCode::CREATED, Json(store)))
}

#[utoipa::path(
    get,
    path = "/store/search",
    params(StoreSearchParams),
    responses(
        (status = 200, description = "Matching stores", body = Vec<Store>),
        (status = 400, description = "Missing name parameter", body = ErrorResponse)
    ),
    tag = "Stores"
)]
#[instrument(skip(state))]
pub async fn search_stores(
    State(state): State<AppState>,
    Query(params): Query<StoreSearchParams>,
) -> Result<Json<Vec<Store>>, AppError> {
    let name = params
        .name
        .as_deref()
        .filter(|name| !name.is_empty())
        .ok_or_else(|| AppError::bad_request(anyhow::anyhow!("Provide ?name=<term>")))?;

    let stores = StoreService::search_stores(&state.db, name).await?;
    track_store_search();
    Ok(Json(stores))
}

#[utoipa::path(
    get,
    path = "/store/{id}",
    params(("id" = i64, Path, description = "Store ID")),
    responses(
        (status = 200, description = "Store details", body = Store),
        (status = 404, description = "Store not found", body = ErrorResponse)
    ),
    tag = "Stores"
)]
#[instrument(skip(state))]
pub async fn get_store(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Store>, AppError> {
    let store = StoreService::get_store(&state.db, id).await?;
    Ok(Json(store))
}

#[utoipa::path(
    delete,
    path = "/store/{id}",
    params(("id" = i64, Path, description = "Store ID")),
    responses(
        (status = 200, description = "Store deleted", body = MessageResponse),
        (status = 404, description = "Store not found", body = ErrorResponse)
    ),
    tag = "Stores"
)]
#[instrument(skip(state))]
pub async fn delete_store(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    StoreService::delete_store(&state.db, id).await?;
    Ok(Json(MessageResponse {
        message: "Store deleted".to_string(),
    }))
}

#[utoipa::path(
    get,
    path = "/store/{id}/count",
    params(("id" = i64, Path, description = "Store ID")),
    responses((status = 200, description = "Item count for the store", body = StoreItemCount)),
    tag = "Stores"
)]
#[instrument(skip(state))]
pub async fn store_item_count(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<StoreItemCount>, AppError> {
    let item_count = StoreService::item_count(&state.db, id).await?;
    Ok(Json(StoreItemCount {
        store_id: id,
        item_count,
    }))
}

#[utoipa::path(
    put,
    path = "/store/{id}/item/{item_id}",
    params(
        ("id" = i64, Path, description = "Store ID"),
        ("item_id" = i64, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item linked (or already linked)", body = StoreItemLinkResponse),
        (status = 404, description = "Store or item not found", body = ErrorResponse)
    ),
    tag = "Stores"
)]
#[instrument(skip(state))]
pub async fn link_item_to_store(
    State(state): State<AppState>,
    Path((store_id, item_id)): Path<(i64, i64)>,
) -> Result<Json<StoreItemLinkResponse>, AppError> {
    let (item, already_linked) = StoreService::link_item(&state.db, store_id, item_id).await?;
    track_store_item_link();

    let message = if already_linked {
        "Item already assigned to this store"
    } else {
        "Item linked to store"
    };

    Ok(Json(StoreItemLinkResponse {
        message: message.to_string(),
        item,
    }))
}

#[utoipa::path(
    delete,
    path = "/store/{id}/item/{item_id}",
    params(
        ("id" = i64, Path, description = "Store ID"),
        ("item_id" = i64, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item moved to the Unassigned store", body = StoreItemLinkResponse),
        (status = 404, description = "Item not found under this store", body = ErrorResponse)
    ),
    tag = "Stores"
)]
#[instrument(skip(state))]
pub async fn unlink_item_from_store(
    State(state): State<AppState>,
    Path((store_id, item_id)): Path<(i64, i64)>,
) -> Result<Json<StoreItemLinkResponse>, AppError> {
    let item = StoreService::unlink_item(&state.db, store_id, item_id).await?;
    track_store_item_unlink();

    Ok(Json(StoreItemLinkResponse {
        message: "Item moved to Unassigned store".to_string(),
        item,
    }))
}
