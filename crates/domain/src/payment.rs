use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use dojo_core::{DomainError, DomainResult, EnrollmentId, PaymentId};

/// Settlement state of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    Pending,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Pending => "pending",
        }
    }
}

impl core::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recorded payment against an enrollment. Stored fact only; no gateway
/// integration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payment {
    pub id: PaymentId,
    pub enrollment_id: EnrollmentId,
    /// Minor currency units (e.g. cents).
    pub amount: i64,
    /// Set by storage at creation.
    pub date: NaiveDate,
    pub status: PaymentStatus,
}

impl Payment {
    pub fn validate(&self) -> DomainResult<()> {
        if self.amount <= 0 {
            return Err(DomainError::validation("amount must be positive"));
        }
        Ok(())
    }
}

/// Input for recording a payment.
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub enrollment_id: EnrollmentId,
    pub amount: i64,
    pub status: PaymentStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payment(amount: i64) -> Payment {
        Payment {
            id: PaymentId::from_i64(1),
            enrollment_id: EnrollmentId::from_i64(1),
            amount,
            date: NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
            status: PaymentStatus::Paid,
        }
    }

    #[test]
    fn positive_amount_passes() {
        assert!(payment(5000).validate().is_ok());
    }

    #[test]
    fn zero_and_negative_amounts_are_rejected() {
        assert!(payment(0).validate().is_err());
        assert!(payment(-100).validate().is_err());
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&PaymentStatus::Pending).unwrap(), "\"pending\"");
        let parsed: PaymentStatus = serde_json::from_str("\"paid\"").unwrap();
        assert_eq!(parsed, PaymentStatus::Paid);
    }
}
