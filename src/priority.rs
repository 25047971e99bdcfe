//! Priority scoring
//!
//! Maps a priority class and an eligibility flag to the integer score used to
//! order the queue. Pure and total.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Multiplier applied to a priority class weight.
pub const BASE_MULTIPLIER: u32 = 10;

/// Flat bonus added for eligible (elderly) patients.
pub const ELIGIBILITY_BONUS: u32 = 5;

/// Priority class, ordered from least to most urgent
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriorityLevel {
    Low = 1,
    Medium = 2,
    High = 3,
    Extreme = 4,
}

impl PriorityLevel {
    pub const ALL: [PriorityLevel; 4] = [
        PriorityLevel::Low,
        PriorityLevel::Medium,
        PriorityLevel::High,
        PriorityLevel::Extreme,
    ];

    /// Ordinal weight (LOW=1 .. EXTREME=4)
    pub fn weight(self) -> u32 {
        self as u32
    }

    pub fn from_weight(weight: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.weight() == weight)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PriorityLevel::Low => "LOW",
            PriorityLevel::Medium => "MEDIUM",
            PriorityLevel::High => "HIGH",
            PriorityLevel::Extreme => "EXTREME",
        }
    }
}

impl fmt::Display for PriorityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriorityLevel {
    type Err = ValidationError;

    /// Accepts the numeric weight ("1".."4") or the level name in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(weight) = trimmed.parse::<u32>() {
            return Self::from_weight(weight)
                .ok_or_else(|| ValidationError::InvalidPriority(s.to_string()));
        }
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ValidationError::InvalidPriority(s.to_string()))
    }
}

/// Compute the queue score for a priority class.
///
/// score = weight * 10, plus 5 when the patient is eligible.
pub fn score(level: PriorityLevel, is_eligible: bool) -> u32 {
    let base = level.weight() * BASE_MULTIPLIER;
    if is_eligible {
        base + ELIGIBILITY_BONUS
    } else {
        base
    }
}
