use dojo_auth::Role;
use dojo_core::{DomainError, DomainResult, UserId};

/// A user account.
///
/// Deliberately not serializable: `password_hash` must never reach a wire
/// format, so response mapping builds its own view field by field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

impl User {
    pub fn validate(&self) -> DomainResult<()> {
        if self.username.trim().is_empty() {
            return Err(DomainError::validation("username cannot be empty"));
        }
        // Basic shape check only; an empty email is allowed.
        if !self.email.is_empty() && !self.email.contains('@') {
            return Err(DomainError::validation("invalid email format"));
        }
        Ok(())
    }
}

/// Input for creating a user. The id and any defaulting happen in storage.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

/// Partial update; `None` keeps the existing value.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<Role>,
}
