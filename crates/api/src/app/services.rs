use std::sync::Arc;

use dojo_auth::{PasswordError, TokenClaims, TokenError, claims, password};
use dojo_domain::User;
use dojo_infra::{MemoryStore, Store};

use crate::config::ApiConfig;

/// Token and password mechanics bound to the process configuration.
pub struct AuthService {
    jwt_secret: Vec<u8>,
    token_ttl_hours: i64,
    bcrypt_cost: u32,
}

impl AuthService {
    /// Sign a fresh access token for `user`.
    pub fn issue_token(&self, user: &User) -> Result<String, TokenError> {
        let claims =
            TokenClaims::new(user.id, user.username.clone(), user.role, self.token_ttl_hours);
        claims::issue_token(&self.jwt_secret, &claims)
    }

    pub fn verify_token(&self, token: &str) -> Result<TokenClaims, TokenError> {
        claims::verify_token(&self.jwt_secret, token)
    }

    pub async fn hash_password(&self, plaintext: &str) -> Result<String, PasswordError> {
        password::hash_password(plaintext, self.bcrypt_cost).await
    }

    pub async fn verify_password(
        &self,
        plaintext: &str,
        hash: &str,
    ) -> Result<bool, PasswordError> {
        password::verify_password(plaintext, hash).await
    }
}

/// Shared per-process services handed to every handler.
pub struct AppServices {
    pub store: Arc<dyn Store>,
    pub auth: AuthService,
}

pub fn build_services(config: &ApiConfig) -> AppServices {
    AppServices {
        store: Arc::new(MemoryStore::new()),
        auth: AuthService {
            jwt_secret: config.jwt_secret.clone().into_bytes(),
            token_ttl_hours: config.token_ttl_hours,
            bcrypt_cost: config.bcrypt_cost,
        },
    }
}
