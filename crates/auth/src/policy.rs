//! Role-scoped access policy.
//!
//! Every API operation maps to one [`Action`]; [`decide`] is the single place
//! that says whether a caller may perform it and under what scope. Handlers
//! never compare roles inline.
//!
//! The table, in brief:
//! - registration, class browsing, schedule listing, and the instructor
//!   directory are open to anonymous callers;
//! - class creation is limited to staff (admin or instructor);
//! - aggregate stats and enrollment reports are admin-only;
//! - enrollment creation and the personal schedule are always scoped to the
//!   caller, whatever the request body claims;
//! - everything else requires authentication but no particular role.

use dojo_core::UserId;

use crate::{Caller, Role};

// ─────────────────────────────────────────────────────────────────────────────
// Actions
// ─────────────────────────────────────────────────────────────────────────────

/// An operation a caller can request against the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    RegisterUser,

    ListClasses,
    CreateClass,
    GetClass,
    UpdateClass,
    DeleteClass,

    ListSchedules,
    CreateSchedule,
    GetSchedule,
    UpdateSchedule,
    DeleteSchedule,

    ListEnrollments,
    CreateEnrollment,
    GetEnrollment,
    DeleteEnrollment,

    ListPayments,
    CreatePayment,
    GetPayment,

    ListUsers,
    GetUser,
    UpdateUser,
    DeleteUser,

    AdminStats,
    EnrollmentReport,
    MySchedule,
    ListInstructors,
}

// ─────────────────────────────────────────────────────────────────────────────
// Decisions
// ─────────────────────────────────────────────────────────────────────────────

/// Constraint attached to an allowed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// The operation must treat this user as the student it concerns,
    /// regardless of any student id supplied in the request.
    StudentIs(UserId),
}

/// Why an operation was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// No caller identity was presented.
    Unauthenticated,
    /// The caller is authenticated but lacks the required role.
    Forbidden(&'static str),
}

/// Outcome of a policy check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    AllowWithScope(Scope),
    Deny(DenyReason),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        !matches!(self, Decision::Deny(_))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Policy
// ─────────────────────────────────────────────────────────────────────────────

/// Decide whether `caller` may perform `action`.
///
/// - No IO
/// - No panics
/// - Depends only on the caller's role and identity
pub fn decide(caller: Option<&Caller>, action: Action) -> Decision {
    use Action::*;

    match action {
        // Open to anonymous callers.
        RegisterUser | ListClasses | GetClass | ListSchedules | ListInstructors => Decision::Allow,

        CreateClass => match caller {
            None => Decision::Deny(DenyReason::Unauthenticated),
            Some(c) if c.is_staff() => Decision::Allow,
            Some(_) => Decision::Deny(DenyReason::Forbidden(
                "only admins and instructors may create classes",
            )),
        },

        AdminStats | EnrollmentReport => match caller {
            None => Decision::Deny(DenyReason::Unauthenticated),
            Some(c) if c.is_admin() => Decision::Allow,
            Some(_) => Decision::Deny(DenyReason::Forbidden("not authorized")),
        },

        // Always scoped to the caller; a supplied student id is ignored.
        CreateEnrollment | MySchedule => match caller {
            None => Decision::Deny(DenyReason::Unauthenticated),
            Some(c) => Decision::AllowWithScope(Scope::StudentIs(c.user_id)),
        },

        // Authentication only, no role requirement.
        UpdateClass | DeleteClass | CreateSchedule | GetSchedule | UpdateSchedule
        | DeleteSchedule | ListEnrollments | GetEnrollment | DeleteEnrollment | ListPayments
        | CreatePayment | GetPayment | ListUsers | GetUser | UpdateUser | DeleteUser => {
            match caller {
                None => Decision::Deny(DenyReason::Unauthenticated),
                Some(_) => Decision::Allow,
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
