//! Startup configuration from the environment.

use dojo_auth::{DEFAULT_BCRYPT_COST, DEFAULT_TOKEN_TTL_HOURS};

/// Runtime settings for the API process.
///
/// Tests construct this directly; the binary reads it from the environment.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: String,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub bcrypt_cost: u32,
}

impl ApiConfig {
    /// Read settings from `BIND_ADDR`, `JWT_SECRET`, `TOKEN_TTL_HOURS`, and
    /// `BCRYPT_COST`, with dev defaults for anything unset.
    pub fn from_env() -> Self {
        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set; using insecure dev default");
            "dev-secret".to_string()
        });

        let token_ttl_hours = std::env::var("TOKEN_TTL_HOURS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TOKEN_TTL_HOURS);

        let bcrypt_cost = std::env::var("BCRYPT_COST")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_BCRYPT_COST);

        Self {
            bind_addr,
            jwt_secret,
            token_ttl_hours,
            bcrypt_cost,
        }
    }
}
