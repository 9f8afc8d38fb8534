use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::model::{
    AccessTokenResponse, LoginRequest, MessageResponse, RegisterRequest, TokenPairResponse,
};
use crate::modules::health::controller::StatusResponse;
use crate::modules::items::model::{CreateItemDto, Item, UpdateItemDto};
use crate::modules::stores::model::{
    CreateStoreDto, Store, StoreItemCount, StoreItemLinkResponse,
};
use crate::modules::tags::model::{CreateTagDto, Tag, TagLinkResponse};
use crate::modules::users::model::User;
use crate::utils::errors::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::health::controller::healthz,
        crate::modules::health::controller::readyz,
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::refresh_token,
        crate::modules::auth::controller::logout_user,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::delete_user,
        crate::modules::stores::controller::get_stores,
        crate::modules::stores::controller::create_store,
        crate::modules::stores::controller::search_stores,
        crate::modules::stores::controller::get_store,
        crate::modules::stores::controller::delete_store,
        crate::modules::stores::controller::store_item_count,
        crate::modules::stores::controller::link_item_to_store,
        crate::modules::stores::controller::unlink_item_from_store,
        crate::modules::items::controller::get_items,
        crate::modules::items::controller::get_item,
        crate::modules::items::controller::create_item,
        crate::modules::items::controller::update_item,
        crate::modules::items::controller::delete_item,
        crate::modules::tags::controller::get_tags,
        crate::modules::tags::controller::create_tag,
        crate::modules::tags::controller::get_tag,
        crate::modules::tags::controller::delete_tag,
        crate::modules::tags::controller::link_tag_to_item,
        crate::modules::tags::controller::unlink_tag_from_item,
    ),
    components(
        schemas(
            StatusResponse,
            RegisterRequest,
            LoginRequest,
            TokenPairResponse,
            AccessTokenResponse,
            MessageResponse,
            ErrorResponse,
            User,
            Store,
            CreateStoreDto,
            StoreItemCount,
            StoreItemLinkResponse,
            Item,
            CreateItemDto,
            UpdateItemDto,
            Tag,
            CreateTagDto,
            TagLinkResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness and readiness probes"),
        (name = "Authentication", description = "Registration, login and token lifecycle"),
        (name = "Users", description = "User lookup and removal"),
        (name = "Stores", description = "Store CRUD, search and item linkage"),
        (name = "Items", description = "Item CRUD (admin-gated writes)"),
        (name = "Tags", description = "Tag CRUD and item linkage"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
