use dojo_core::{ClassId, DomainError, DomainResult, UserId};

/// Capacity applied when a class is created without one.
pub const DEFAULT_CAPACITY: u32 = 20;

/// A taught class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DojoClass {
    pub id: ClassId,
    pub name: String,
    pub description: String,
    /// Must reference a user whose role is instructor; storage enforces it.
    pub instructor_id: UserId,
    /// Legacy free-text schedule note, kept alongside structured slots.
    pub schedule: String,
    pub capacity: u32,
}

impl DojoClass {
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if self.capacity == 0 {
            return Err(DomainError::validation("capacity must be at least 1"));
        }
        Ok(())
    }
}

/// Input for creating a class.
#[derive(Debug, Clone)]
pub struct NewDojoClass {
    pub name: String,
    pub description: String,
    pub instructor_id: UserId,
    pub schedule: String,
    pub capacity: u32,
}

/// Partial update; `None` keeps the existing value.
#[derive(Debug, Clone, Default)]
pub struct ClassPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub instructor_id: Option<UserId>,
    pub schedule: Option<String>,
    pub capacity: Option<u32>,
}
