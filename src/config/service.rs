use std::env;

/// Service identity attached to every metric series and the `service_info`
/// gauge.
#[derive(Clone, Debug)]
pub struct ServiceConfig {
    pub name: String,
    pub version: String,
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        Self {
            name: env::var("SERVICE_NAME").unwrap_or_else(|_| "storehouse".to_string()),
            version: env::var("SERVICE_VERSION")
                .unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string()),
        }
    }
}
