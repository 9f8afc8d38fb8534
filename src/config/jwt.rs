use rand::Rng;
use rand::distributions::Alphanumeric;
use std::env;

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry: i64,
    pub refresh_token_expiry: i64,
}

impl JwtConfig {
    /// Reads JWT settings from the environment.
    ///
    /// When `JWT_SECRET` is unset a random secret is generated for this
    /// process: every restart then invalidates previously issued tokens, and
    /// replicas cannot verify each other's tokens. Set `JWT_SECRET` for any
    /// deployment with more than one instance or with rolling restarts.
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET").unwrap_or_else(|_| generate_secret()),
            access_token_expiry: env::var("JWT_ACCESS_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3600), // 1 hour
            refresh_token_expiry: env::var("JWT_REFRESH_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(604_800), // 7 days
        }
    }
}

fn generate_secret() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}
