use chrono::NaiveDate;

use dojo_core::{ClassId, EnrollmentId, UserId};

/// Links a student to a class.
///
/// Duplicate (student, class) pairs are allowed; re-enrolling records a new
/// row with its own date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrollment {
    pub id: EnrollmentId,
    pub student_id: UserId,
    pub class_id: ClassId,
    /// Set by storage at creation, never updated.
    pub date_enrolled: NaiveDate,
}

/// Input for creating an enrollment. The student id comes from the access
/// policy's scope, never from the request body.
#[derive(Debug, Clone)]
pub struct NewEnrollment {
    pub student_id: UserId,
    pub class_id: ClassId,
}
