use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use crate::metrics::{track_item_tag_link, track_item_tag_unlink, track_tag_created};
use crate::modules::auth::model::MessageResponse;
use crate::modules::tags::model::{CreateTagDto, Tag, TagLinkResponse};
use crate::modules::tags::service::TagService;
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/tag",
    responses((status = 200, description = "List of tags", body = Vec<Tag>)),
    tag = "Tags"
)]
#[instrument(skip(state))]
pub async fn get_tags(State(state): State<AppState>) -> Result<Json<Vec<Tag>>, AppError> {
    let tags = TagService::get_tags(&state.db).await?;
    Ok(Json(tags))
}

#[utoipa::path(
    post,
    path = "/tag",
    request_body = CreateTagDto,
    responses(
        (status = 201, description = "Tag created", body = Tag),
        (status = 400, description = "Duplicate name within the store", body = ErrorResponse),
        (status = 404, description = "Store not found", body = ErrorResponse)
    ),
    tag = "Tags"
)]
#[instrument(skip(state))]
pub async fn create_tag(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateTagDto>,
) -> Result<(StatusCode, Json<Tag>), AppError> {
    let tag = TagService::create_tag(&state.db, dto).await?;
    track_tag_created();
    Ok((StatusCode::CREATED, Json(tag)))
}

#[utoipa::path(
    get,
    path = "/tag/{id}",
    params(("id" = i64, Path, description = "Tag ID")),
    responses(
        (status = 200, description = "Tag details", body = Tag),
        (status = 404, description = "Tag not found", body = ErrorResponse)
    ),
    tag = "Tags"
)]
#[instrument(skip(state))]
pub async fn get_tag(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Tag>, AppError> {
    let tag = TagService::get_tag(&state.db, id).await?;
    Ok(Json(tag))
}

#[utoipa::path(
    delete,
    path = "/tag/{id}",
    params(("id" = i64, Path, description = "Tag ID")),
    responses(
        (status = 200, description = "Tag deleted", body = MessageResponse),
        (status = 400, description = "Tag still linked to items", body = ErrorResponse),
        (status = 404, description = "Tag not found", body = ErrorResponse)
    ),
    tag = "Tags"
)]
#[instrument(skip(state))]
pub async fn delete_tag(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    TagService::delete_tag(&state.db, id).await?;
    Ok(Json(MessageResponse {
        message: "Tag deleted".to_string(),
    }))
}

#[utoipa::path(
    post,
    path = "/item/{id}/tag/{tag_id}",
    params(
        ("id" = i64, Path, description = "Item ID"),
        ("tag_id" = i64, Path, description = "Tag ID")
    ),
    responses(
        (status = 200, description = "Tag linked (or already linked)", body = TagLinkResponse),
        (status = 400, description = "Item and tag belong to different stores", body = ErrorResponse),
        (status = 404, description = "Item or tag not found", body = ErrorResponse)
    ),
    tag = "Tags"
)]
#[instrument(skip(state))]
pub async fn link_tag_to_item(
    State(state): State<AppState>,
    Path((item_id, tag_id)): Path<(i64, i64)>,
) -> Result<Json<TagLinkResponse>, AppError> {
    let (tag, already_linked) = TagService::link_tag(&state.db, item_id, tag_id).await?;
    track_item_tag_link();

    let message = if already_linked {
        "Tag already linked to item"
    } else {
        "Tag linked to item"
    };

    Ok(Json(TagLinkResponse {
        message: message.to_string(),
        tag,
    }))
}

#[utoipa::path(
    delete,
    path = "/item/{id}/tag/{tag_id}",
    params(
        ("id" = i64, Path, description = "Item ID"),
        ("tag_id" = i64, Path, description = "Tag ID")
    ),
    responses(
        (status = 200, description = "Tag removed from item", body = MessageResponse),
        (status = 404, description = "Pair not linked", body = ErrorResponse)
    ),
    tag = "Tags"
)]
#[instrument(skip(state))]
pub async fn unlink_tag_from_item(
    State(state): State<AppState>,
    Path((item_id, tag_id)): Path<(i64, i64)>,
) -> Result<Json<MessageResponse>, AppError> {
    TagService::unlink_tag(&state.db, item_id, tag_id).await?;
    track_item_tag_unlink();

    Ok(Json(MessageResponse {
        message: "Tag removed from item".to_string(),
    }))
}
