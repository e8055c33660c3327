//! Strongly-typed identifiers used across the domain.
//!
//! Records are keyed by storage-assigned surrogate integers. The newtypes
//! keep a class id from being passed where a user id is expected.

use serde::{Deserialize, Serialize};

/// Identifier of a user account (admin, instructor, or student).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

/// Identifier of a martial-arts class.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassId(i64);

/// Identifier of a weekly schedule slot.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScheduleId(i64);

/// Identifier of an enrollment linking a student to a class.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnrollmentId(i64);

/// Identifier of a payment against an enrollment.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentId(i64);

macro_rules! impl_record_id {
    ($t:ty) => {
        impl $t {
            pub const fn from_i64(id: i64) -> Self {
                Self(id)
            }

            pub const fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<i64> for $t {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$t> for i64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }
    };
}

impl_record_id!(UserId);
impl_record_id!(ClassId);
impl_record_id!(ScheduleId);
impl_record_id!(EnrollmentId);
impl_record_id!(PaymentId);
