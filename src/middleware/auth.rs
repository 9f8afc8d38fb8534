use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::modules::auth::model::{Claims, TokenType};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::verify_token;

/// Raw bearer token, for endpoints that consume the token itself (refresh,
/// logout) rather than its claims.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                AppError::unauthorized(
                    "authorization_required",
                    anyhow::anyhow!("Missing authorization header"),
                )
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::unauthorized(
                "invalid_token",
                anyhow::anyhow!("Invalid authorization header format"),
            )
        })?;

        Ok(BearerToken(token.to_string()))
    }
}

/// Extractor that validates the bearer token and provides its claims.
/// Refresh tokens and revoked tokens are rejected here, so a handler taking
/// `AuthUser` always sees a live access token.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn user_id(&self) -> Result<i64, AppError> {
        self.0.sub.parse().map_err(|_| {
            AppError::unauthorized("invalid_token", anyhow::anyhow!("Invalid user id in token"))
        })
    }

    pub fn is_admin(&self) -> bool {
        self.0.is_admin
    }

    pub fn is_fresh(&self) -> bool {
        self.0.fresh
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let BearerToken(token) = BearerToken::from_request_parts(parts, state).await?;

        let claims = verify_token(&token, &state.jwt_config)?;

        if claims.typ != TokenType::Access {
            return Err(AppError::unauthorized(
                "invalid_token",
                anyhow::anyhow!("An access token is required"),
            ));
        }
        if state.blocklist.contains(&claims.jti) {
            return Err(AppError::unauthorized(
                "token_revoked",
                anyhow::anyhow!("Token has been revoked"),
            ));
        }

        Ok(AuthUser(claims))
    }
}

/// Admin-gated extractor for privileged operations.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;

        if !auth_user.is_admin() {
            return Err(AppError::unauthorized(
                "admin_required",
                anyhow::anyhow!("Admin privilege is required"),
            ));
        }

        Ok(RequireAdmin(auth_user))
    }
}

/// Admin plus fresh-token gate for destructive operations. Freshness is
/// checked first, so a stale admin token reports `fresh_token_required`.
#[derive(Debug, Clone)]
pub struct RequireFreshAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireFreshAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;

        if !auth_user.is_fresh() {
            return Err(AppError::unauthorized(
                "fresh_token_required",
                anyhow::anyhow!("A fresh token is required"),
            ));
        }
        if !auth_user.is_admin() {
            return Err(AppError::unauthorized(
                "admin_required",
                anyhow::anyhow!("Admin privilege is required"),
            ));
        }

        Ok(RequireFreshAdmin(auth_user))
    }
}
