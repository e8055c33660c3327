use serde::{Deserialize, Serialize};

use dojo_core::DomainError;

/// Role attached to a user account.
///
/// The set is closed: every account carries exactly one of these, and the
/// access policy keys off it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Instructor,
    /// Self-service registrations land here unless a role is supplied.
    #[default]
    Student,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Instructor => "instructor",
            Role::Student => "student",
        }
    }

    /// Admins and instructors run the dojo; class creation is limited to them.
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Admin | Role::Instructor)
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "instructor" => Ok(Role::Instructor),
            "student" => Ok(Role::Student),
            other => Err(DomainError::validation(format!("unknown role: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_display_and_parse() {
        for role in [Role::Admin, Role::Instructor, Role::Student] {
            let parsed: Role = role.as_str().parse().unwrap();
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn unknown_role_is_a_validation_error() {
        let err = "sensei".parse::<Role>().unwrap_err();
        match err {
            DomainError::Validation(msg) => assert!(msg.contains("sensei")),
            other => panic!("expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn default_role_is_student() {
        assert_eq!(Role::default(), Role::Student);
    }

    #[test]
    fn staff_covers_admin_and_instructor_only() {
        assert!(Role::Admin.is_staff());
        assert!(Role::Instructor.is_staff());
        assert!(!Role::Student.is_staff());
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Instructor).unwrap(), "\"instructor\"");
        let parsed: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(parsed, Role::Admin);
    }
}
