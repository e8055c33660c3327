//! `dojo-auth` — authentication and authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: tokens,
//! password hashing, and the role-scoped access policy live here; resolving
//! a token to a live user record is the API layer's job.

pub mod caller;
pub mod claims;
pub mod password;
pub mod policy;
pub mod roles;

pub use caller::Caller;
pub use claims::{DEFAULT_TOKEN_TTL_HOURS, TokenClaims, TokenError, issue_token, verify_token};
pub use password::{DEFAULT_BCRYPT_COST, PasswordError, hash_password, verify_password};
pub use policy::{Action, Decision, DenyReason, Scope, decide};
pub use roles::Role;
