use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub store_id: i64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateItemDto {
    #[validate(length(min = 1, max = 80))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    pub store_id: i64,
}

/// Full replace of the mutable fields. `store_id` is only consulted when the
/// update creates the item (upsert-by-id); it defaults to the Unassigned
/// store.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateItemDto {
    #[validate(length(min = 1, max = 80))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    pub store_id: Option<i64>,
}
