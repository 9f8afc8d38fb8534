use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::modules::items::model::Item;

/// Sentinel store that receives items unlinked from their store. Seeded at
/// schema initialization and never deleted.
pub const UNASSIGNED_STORE_ID: i64 = 0;
pub const UNASSIGNED_STORE_NAME: &str = "Unassigned";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Store {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateStoreDto {
    #[validate(length(min = 1, max = 80))]
    pub name: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct StoreSearchParams {
    /// Case-insensitive name substring to match.
    pub name: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StoreItemCount {
    pub store_id: i64,
    pub item_count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StoreItemLinkResponse {
    pub message: String,
    pub item: Item,
}
