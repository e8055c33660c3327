use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use dojo_core::{ClassId, DomainError, DomainResult, ScheduleId};

/// Day of week for a recurring slot.
///
/// Not chrono's weekday: the wire format is the full lowercase name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }
}

impl core::fmt::Display for Weekday {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for Weekday {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "monday" => Ok(Weekday::Monday),
            "tuesday" => Ok(Weekday::Tuesday),
            "wednesday" => Ok(Weekday::Wednesday),
            "thursday" => Ok(Weekday::Thursday),
            "friday" => Ok(Weekday::Friday),
            "saturday" => Ok(Weekday::Saturday),
            "sunday" => Ok(Weekday::Sunday),
            other => Err(DomainError::validation(format!("unknown weekday: {other}"))),
        }
    }
}

/// A recurring weekly time slot belonging to one class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub id: ScheduleId,
    pub class_id: ClassId,
    pub weekday: Weekday,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub location: String,
}

impl Schedule {
    /// A slot must end after it starts; storage rejects any write that
    /// would leave the pair inverted or equal.
    pub fn validate(&self) -> DomainResult<()> {
        if self.start_time >= self.end_time {
            return Err(DomainError::validation("start_time must be before end_time"));
        }
        Ok(())
    }
}

/// Input for creating a schedule slot.
#[derive(Debug, Clone)]
pub struct NewSchedule {
    pub class_id: ClassId,
    pub weekday: Weekday,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub location: String,
}

/// Partial update; `None` keeps the existing value.
#[derive(Debug, Clone, Default)]
pub struct SchedulePatch {
    pub class_id: Option<ClassId>,
    pub weekday: Option<Weekday>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub location: Option<String>,
}
