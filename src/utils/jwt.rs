use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind};
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::auth::model::{Claims, TokenType};
use crate::modules::users::model::Role;
use crate::utils::errors::AppError;

/// Issues an access token. `fresh` marks a token obtained directly from a
/// password login; refresh-derived access tokens are never fresh.
pub fn create_access_token(
    user_id: i64,
    fresh: bool,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    sign(
        user_id,
        TokenType::Access,
        fresh,
        jwt_config.access_token_expiry,
        jwt_config,
    )
}

pub fn create_refresh_token(user_id: i64, jwt_config: &JwtConfig) -> Result<String, AppError> {
    sign(
        user_id,
        TokenType::Refresh,
        false,
        jwt_config.refresh_token_expiry,
        jwt_config,
    )
}

fn sign(
    user_id: i64,
    typ: TokenType,
    fresh: bool,
    expiry: i64,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp();

    // The admin claim is derived from the identity here and nowhere else.
    let claims = Claims {
        sub: user_id.to_string(),
        jti: Uuid::new_v4().to_string(),
        iat: now as usize,
        exp: (now + expiry) as usize,
        fresh,
        is_admin: Role::for_user(user_id).is_admin(),
        typ,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create token: {}", e)))
}

pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => {
            AppError::unauthorized("token_expired", anyhow::anyhow!("Token has expired"))
        }
        _ => AppError::unauthorized("invalid_token", anyhow::anyhow!("Invalid token")),
    })
}
