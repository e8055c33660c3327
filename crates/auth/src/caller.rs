use dojo_core::UserId;

use crate::Role;

/// An authenticated caller.
///
/// Resolved per request from a verified token against the current user
/// record, so role changes take effect on the next request rather than at
/// token expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub user_id: UserId,
    pub username: String,
    pub role: Role,
}

impl Caller {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn is_staff(&self) -> bool {
        self.role.is_staff()
    }
}
