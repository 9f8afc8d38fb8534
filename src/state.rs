use sqlx::PgPool;
use std::sync::Arc;

use crate::config::database::init_db_pool;
use crate::config::jwt::JwtConfig;
use crate::db::InitGuard;
use crate::utils::blocklist::TokenBlocklist;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub blocklist: TokenBlocklist,
    pub schema_init: Arc<InitGuard>,
}

pub async fn init_app_state() -> AppState {
    AppState {
        db: init_db_pool().await,
        jwt_config: JwtConfig::from_env(),
        blocklist: TokenBlocklist::default(),
        schema_init: Arc::new(InitGuard::default()),
    }
}
