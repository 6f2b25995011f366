//! Reader profile: display name plus a level on each of three skill dimensions.
//!
//! The tutor service steers each dimension from the reader's current level
//! toward its [goal](SkillLevel::goal), one step higher.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three literary-competency dimensions a reader is assessed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillDimension {
    /// Engaging with the feelings and motives inside the text
    Empathy,
    /// Noticing how form, style and rhetoric shape meaning
    Aesthetic,
    /// Inferring what the text leaves unsaid
    Interpretive,
}

impl SkillDimension {
    pub const ALL: [SkillDimension; 3] = [
        SkillDimension::Empathy,
        SkillDimension::Aesthetic,
        SkillDimension::Interpretive,
    ];

    /// Field name used by the tutor backend (`emp_state`, ...).
    pub fn wire_key(&self) -> &'static str {
        match self {
            SkillDimension::Empathy => "emp_state",
            SkillDimension::Aesthetic => "ase_state",
            SkillDimension::Interpretive => "int_state",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SkillDimension::Empathy => "empathy",
            SkillDimension::Aesthetic => "aesthetic",
            SkillDimension::Interpretive => "interpretive",
        }
    }
}

impl fmt::Display for SkillDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for SkillDimension {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "empathy" | "emp" | "emp_state" => Ok(SkillDimension::Empathy),
            "aesthetic" | "ase" | "ase_state" => Ok(SkillDimension::Aesthetic),
            "interpretive" | "int" | "int_state" => Ok(SkillDimension::Interpretive),
            _ => Err(DomainError::UnknownDimension(s.to_string())),
        }
    }
}

/// A competency level in `1..=6` (Value Object).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SkillLevel(u8);

impl SkillLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 6;

    pub fn new(value: u8) -> Result<Self, DomainError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DomainError::LevelOutOfRange(value))
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// The next level up, capped at [`SkillLevel::MAX`].
    pub fn goal(&self) -> SkillLevel {
        SkillLevel((self.0 + 1).min(Self::MAX))
    }
}

impl Default for SkillLevel {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl TryFrom<u8> for SkillLevel {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        SkillLevel::new(value)
    }
}

impl From<SkillLevel> for u8 {
    fn from(level: SkillLevel) -> Self {
        level.0
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One level per [`SkillDimension`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SkillLevels {
    pub empathy: SkillLevel,
    pub aesthetic: SkillLevel,
    pub interpretive: SkillLevel,
}

impl SkillLevels {
    pub fn new(empathy: SkillLevel, aesthetic: SkillLevel, interpretive: SkillLevel) -> Self {
        Self {
            empathy,
            aesthetic,
            interpretive,
        }
    }

    /// Build from raw integers, validating each.
    pub fn from_values(empathy: u8, aesthetic: u8, interpretive: u8) -> Result<Self, DomainError> {
        Ok(Self::new(
            SkillLevel::new(empathy)?,
            SkillLevel::new(aesthetic)?,
            SkillLevel::new(interpretive)?,
        ))
    }

    pub fn get(&self, dimension: SkillDimension) -> SkillLevel {
        match dimension {
            SkillDimension::Empathy => self.empathy,
            SkillDimension::Aesthetic => self.aesthetic,
            SkillDimension::Interpretive => self.interpretive,
        }
    }

    pub fn with(mut self, dimension: SkillDimension, level: SkillLevel) -> Self {
        match dimension {
            SkillDimension::Empathy => self.empathy = level,
            SkillDimension::Aesthetic => self.aesthetic = level,
            SkillDimension::Interpretive => self.interpretive = level,
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (SkillDimension, SkillLevel)> + '_ {
        SkillDimension::ALL.into_iter().map(|d| (d, self.get(d)))
    }
}

/// The reader taking part in a session (Value Object).
///
/// A profile with a blank name is representable (it is the reset state) but
/// cannot be submitted; see [`Profile::has_name`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Profile {
    display_name: String,
    levels: SkillLevels,
}

impl Profile {
    pub fn new(display_name: impl Into<String>, levels: SkillLevels) -> Self {
        Self {
            display_name: display_name.into().trim().to_string(),
            levels,
        }
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn levels(&self) -> &SkillLevels {
        &self.levels
    }

    pub fn has_name(&self) -> bool {
        !self.display_name.is_empty()
    }
}
