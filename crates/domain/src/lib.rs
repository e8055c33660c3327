//! `dojo-domain` — the records the dojo runs on.
//!
//! Plain data types with validation; storage assigns ids and enforces
//! referential integrity, the API layer maps wire formats.

pub mod class;
pub mod enrollment;
pub mod payment;
pub mod schedule;
pub mod user;

pub use class::{ClassPatch, DEFAULT_CAPACITY, DojoClass, NewDojoClass};
pub use enrollment::{Enrollment, NewEnrollment};
pub use payment::{NewPayment, Payment, PaymentStatus};
pub use schedule::{NewSchedule, Schedule, SchedulePatch, Weekday};
pub use user::{NewUser, User, UserPatch};
