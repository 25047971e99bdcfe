//! Patient domain: identifiers, validated value objects, and the patient record.

pub mod id;
pub mod values;

pub use id::PatientId;
pub use values::{Age, Name, ELIGIBILITY_AGE, MAX_AGE};

use crate::priority::{self, PriorityLevel};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A patient waiting for (or having received) service
///
/// `arrival_order` is `None` until the patient has been admitted; the store
/// assigns it and `QueueService::admit` returns the finalized patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: PatientId,
    pub name: Name,
    pub age: Age,
    pub priority: PriorityLevel,
    pub arrival_order: Option<u64>,
}

impl Patient {
    /// Create a not-yet-admitted patient with a freshly generated id.
    pub fn new(name: Name, age: Age, priority: PriorityLevel) -> Self {
        Self::with_id(PatientId::generate(), name, age, priority)
    }

    pub fn with_id(id: PatientId, name: Name, age: Age, priority: PriorityLevel) -> Self {
        Self {
            id,
            name,
            age,
            priority,
            arrival_order: None,
        }
    }

    pub fn is_eligible(&self) -> bool {
        self.age.is_eligible()
    }

    pub fn priority_score(&self) -> u32 {
        priority::score(self.priority, self.is_eligible())
    }
}

impl fmt::Display for Patient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | Priority: {} | Age: {}",
            self.name, self.priority, self.age
        )
    }
}
