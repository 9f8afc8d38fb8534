use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use crate::metrics::{track_logout, track_token_refresh, track_user_login, track_user_registered};
use crate::middleware::auth::BearerToken;
use crate::modules::users::model::User;
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};
use crate::validator::ValidatedJson;

use super::model::{
    AccessTokenResponse, LoginRequest, MessageResponse, RegisterRequest, TokenPairResponse,
};
use super::service::AuthService;

/// Register a new user
#[utoipa::path(
    post,
    path = "/user/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = User),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 409, description = "Username already taken", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = AuthService::register(&state.db, dto).await?;
    track_user_registered();
    Ok((StatusCode::CREATED, Json(user)))
}

/// Login and receive an access/refresh token pair
#[utoipa::path(
    post,
    path = "/user/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenPairResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<TokenPairResponse>, AppError> {
    let tokens = AuthService::login(&state.db, dto, &state.jwt_config).await?;
    track_user_login();
    Ok(Json(tokens))
}

/// Exchange a refresh token for a new, non-fresh access token
#[utoipa::path(
    post,
    path = "/refresh",
    responses(
        (status = 200, description = "New access token", body = AccessTokenResponse),
        (status = 401, description = "Missing, invalid, expired or revoked token", body = ErrorResponse)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
#[instrument(skip_all)]
pub async fn refresh_token(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<Json<AccessTokenResponse>, AppError> {
    let response = AuthService::refresh(&token, &state.jwt_config, &state.blocklist)?;
    track_token_refresh();
    Ok(Json(response))
}

/// Revoke the presented token
#[utoipa::path(
    post,
    path = "/logout",
    responses(
        (status = 200, description = "Logged out", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
#[instrument(skip_all)]
pub async fn logout_user(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<Json<MessageResponse>, AppError> {
    AuthService::logout(&token, &state.jwt_config, &state.blocklist)?;
    track_logout();
    Ok(Json(MessageResponse {
        message: "Successfully logged out".to_string(),
    }))
}
