//! Storage and reporting for the dojo backend.
//!
//! [`Store`] is the persistence seam: handlers and reports only ever see the
//! trait, so the in-memory engine can be swapped for a database-backed one
//! without touching them.

pub mod memory;
pub mod reports;
pub mod store;

pub use memory::MemoryStore;
pub use reports::{
    ClassEnrollmentCount, DojoStats, EnrollmentReport, dojo_stats, enrollment_report,
    student_schedule,
};
pub use store::Store;
