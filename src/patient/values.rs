//! Validated value objects: Name and Age

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Oldest accepted age.
pub const MAX_AGE: u8 = 130;

/// Age from which a patient receives the eligibility bonus.
pub const ELIGIBILITY_AGE: u8 = 60;

/// Patient name: non-blank, letters and whitespace only
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Name(String);

impl Name {
    /// Validate and trim a raw name.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if !trimmed.chars().all(is_name_char) {
            return Err(ValidationError::InvalidName(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// ASCII letters, the Latin-1 accented range (U+00C0..=U+00FF), and whitespace.
fn is_name_char(c: char) -> bool {
    c.is_ascii_alphabetic() || ('\u{C0}'..='\u{FF}').contains(&c) || c.is_whitespace()
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Name {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Name> for String {
    fn from(name: Name) -> Self {
        name.0
    }
}

/// Patient age in years, within [0, 130]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Age(u8);

impl Age {
    pub fn new(years: i64) -> Result<Self, ValidationError> {
        if !(0..=i64::from(MAX_AGE)).contains(&years) {
            return Err(ValidationError::AgeOutOfRange(years));
        }
        Ok(Self(years as u8))
    }

    pub fn years(&self) -> u8 {
        self.0
    }

    pub fn is_eligible(&self) -> bool {
        self.0 >= ELIGIBILITY_AGE
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for Age {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(i64::from(value))
    }
}

impl From<Age> for u8 {
    fn from(age: Age) -> Self {
        age.0
    }
}
