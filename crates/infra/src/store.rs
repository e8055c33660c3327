//! Storage abstraction.
//!
//! Reads are infallible (`Option`/`Vec`); writes return a domain result so
//! the store can enforce uniqueness, referential integrity, and record
//! validation in one place.

use dojo_auth::Role;
use dojo_core::{ClassId, DomainResult, EnrollmentId, PaymentId, ScheduleId, UserId};
use dojo_domain::{
    ClassPatch, DojoClass, Enrollment, NewDojoClass, NewEnrollment, NewPayment, NewSchedule,
    NewUser, Payment, Schedule, SchedulePatch, User, UserPatch,
};

/// Typed record storage.
///
/// Identifiers are surrogate keys assigned on create. Deleting a record
/// cascades to everything hanging off it: a user takes their classes and
/// enrollments, a class takes its schedules and enrollments, an enrollment
/// takes its payments.
pub trait Store: Send + Sync {
    // Users
    fn create_user(&self, new: NewUser) -> DomainResult<User>;
    fn get_user(&self, id: UserId) -> Option<User>;
    fn get_user_by_username(&self, username: &str) -> Option<User>;
    fn list_users(&self, role: Option<Role>) -> Vec<User>;
    fn update_user(&self, id: UserId, patch: UserPatch) -> DomainResult<User>;
    fn delete_user(&self, id: UserId) -> DomainResult<()>;

    // Classes
    fn create_class(&self, new: NewDojoClass) -> DomainResult<DojoClass>;
    fn get_class(&self, id: ClassId) -> Option<DojoClass>;
    fn list_classes(&self) -> Vec<DojoClass>;
    fn update_class(&self, id: ClassId, patch: ClassPatch) -> DomainResult<DojoClass>;
    fn delete_class(&self, id: ClassId) -> DomainResult<()>;

    // Schedules
    fn create_schedule(&self, new: NewSchedule) -> DomainResult<Schedule>;
    fn get_schedule(&self, id: ScheduleId) -> Option<Schedule>;
    fn list_schedules(&self) -> Vec<Schedule>;
    fn list_schedules_for_class(&self, class_id: ClassId) -> Vec<Schedule>;
    fn update_schedule(&self, id: ScheduleId, patch: SchedulePatch) -> DomainResult<Schedule>;
    fn delete_schedule(&self, id: ScheduleId) -> DomainResult<()>;

    // Enrollments
    fn create_enrollment(&self, new: NewEnrollment) -> DomainResult<Enrollment>;
    fn get_enrollment(&self, id: EnrollmentId) -> Option<Enrollment>;
    fn list_enrollments(&self) -> Vec<Enrollment>;
    fn list_enrollments_for_student(&self, student_id: UserId) -> Vec<Enrollment>;
    fn delete_enrollment(&self, id: EnrollmentId) -> DomainResult<()>;

    // Payments
    fn create_payment(&self, new: NewPayment) -> DomainResult<Payment>;
    fn get_payment(&self, id: PaymentId) -> Option<Payment>;
    fn list_payments(&self) -> Vec<Payment>;

    // Aggregate counts
    fn count_users_with_role(&self, role: Role) -> u64;
    fn count_classes(&self) -> u64;
    fn count_enrollments(&self) -> u64;
}
