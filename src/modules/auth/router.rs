use axum::{Router, routing::post};

use crate::state::AppState;

use super::controller::{login_user, logout_user, refresh_token, register_user};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/user/register", post(register_user))
        .route("/user/login", post(login_user))
        .route("/refresh", post(refresh_token))
        .route("/logout", post(logout_user))
}
