use sqlx::PgPool;
use tracing::instrument;

use crate::config::jwt::JwtConfig;
use crate::modules::users::model::User;
use crate::modules::users::service::UserService;
use crate::utils::blocklist::TokenBlocklist;
use crate::utils::errors::AppError;
use crate::utils::jwt::{create_access_token, create_refresh_token, verify_token};
use crate::utils::password::{hash_password, verify_password};

use super::model::{AccessTokenResponse, LoginRequest, RegisterRequest, TokenPairResponse, TokenType};

pub struct AuthService;

impl AuthService {
    #[instrument(skip_all)]
    pub async fn register(db: &PgPool, dto: RegisterRequest) -> Result<User, AppError> {
        let hashed_password = hash_password(&dto.password)?;
        UserService::create_user(db, &dto.username, &hashed_password).await
    }

    #[instrument(skip_all)]
    pub async fn login(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<TokenPairResponse, AppError> {
        let user = UserService::find_by_username(db, &dto.username)
            .await?
            .ok_or_else(|| {
                AppError::unauthorized(
                    "invalid_credentials",
                    anyhow::anyhow!("Invalid username or password"),
                )
            })?;

        if !verify_password(&dto.password, &user.password)? {
            return Err(AppError::unauthorized(
                "invalid_credentials",
                anyhow::anyhow!("Invalid username or password"),
            ));
        }

        let access_token = create_access_token(user.id, true, jwt_config)?;
        let refresh_token = create_refresh_token(user.id, jwt_config)?;

        Ok(TokenPairResponse {
            access_token,
            refresh_token,
        })
    }

    #[instrument(skip_all)]
    pub fn refresh(
        token: &str,
        jwt_config: &JwtConfig,
        blocklist: &TokenBlocklist,
    ) -> Result<AccessTokenResponse, AppError> {
        let claims = verify_token(token, jwt_config)?;

        if claims.typ != TokenType::Refresh {
            return Err(AppError::unauthorized(
                "invalid_token",
                anyhow::anyhow!("A refresh token is required"),
            ));
        }
        if blocklist.contains(&claims.jti) {
            return Err(AppError::unauthorized(
                "token_revoked",
                anyhow::anyhow!("Token has been revoked"),
            ));
        }

        let user_id: i64 = claims.sub.parse().map_err(|_| {
            AppError::unauthorized("invalid_token", anyhow::anyhow!("Invalid user id in token"))
        })?;

        // Refresh-derived access tokens are never fresh.
        let access_token = create_access_token(user_id, false, jwt_config)?;

        Ok(AccessTokenResponse { access_token })
    }

    /// Revokes the presented token. Revoking an already-revoked token is a
    /// success.
    #[instrument(skip_all)]
    pub fn logout(
        token: &str,
        jwt_config: &JwtConfig,
        blocklist: &TokenBlocklist,
    ) -> Result<(), AppError> {
        let claims = verify_token(token, jwt_config)?;
        blocklist.revoke(&claims.jti);
        Ok(())
    }
}
