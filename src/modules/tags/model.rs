use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Tags are scoped to a store: the same name may exist in different stores
/// but only once within one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub store_id: i64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTagDto {
    #[validate(length(min = 1, max = 80))]
    pub name: String,
    pub store_id: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TagLinkResponse {
    pub message: String,
    pub tag: Tag,
}
