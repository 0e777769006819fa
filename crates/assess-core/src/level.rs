//! # Answers and Answer Scales
//!
//! The two answer scales of the platform and the answer records built on them:
//!
//! - [`MaturityLevel`] (0–3) for the full tiered assessment.
//! - [`QuickResponse`] (`yes | partial | no`) for the abbreviated quick check.
//!
//! Both convert to points on the same 0–100 scale, which is what lets the
//! scoring engine run one aggregation routine for both modes.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::identity::{CategoryId, QuestionId};

/// Maturity of one control, from 0 (nothing in place) to 3
/// (systematic/automated).
///
/// Out-of-range values are rejected at construction and at
/// deserialization; nothing in the engine ever clamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct MaturityLevel(u8);

impl MaturityLevel {
    /// Highest maturity level.
    pub const MAX: u8 = 3;

    /// Create a level, rejecting anything above 3.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::LevelOutOfRange`] for values above 3.
    pub fn new(level: u8) -> Result<Self, ValidationError> {
        if level > Self::MAX {
            return Err(ValidationError::LevelOutOfRange(i64::from(level)));
        }
        Ok(Self(level))
    }

    /// The raw level value.
    pub fn value(self) -> u8 {
        self.0
    }

    /// Points on the 0–100 scale: `level / 3 * 100`, at full precision.
    pub fn points(self) -> f64 {
        f64::from(self.0) / f64::from(Self::MAX) * 100.0
    }
}

impl TryFrom<i64> for MaturityLevel {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| ValidationError::LevelOutOfRange(value))
            .and_then(Self::new)
    }
}

impl From<MaturityLevel> for u8 {
    fn from(level: MaturityLevel) -> Self {
        level.0
    }
}

impl std::fmt::Display for MaturityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Coarse quick-check answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuickResponse {
    /// Fully in place (100 points).
    Yes,
    /// Partly in place (50 points).
    Partial,
    /// Not in place (0 points).
    No,
}

impl QuickResponse {
    /// Points on the 0–100 scale.
    pub fn points(self) -> f64 {
        match self {
            Self::Yes => 100.0,
            Self::Partial => 50.0,
            Self::No => 0.0,
        }
    }
}

/// Question subset within a framework's assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// The baseline question set every entity answers.
    Core,
    /// The extended question set for mature organisations.
    Advanced,
}

impl Tier {
    /// The snake_case identifier, matching serde.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Core => "core",
            Self::Advanced => "advanced",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Tier {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "core" => Ok(Self::Core),
            "advanced" => Ok(Self::Advanced),
            other => Err(ValidationError::UnknownTier(other.to_string())),
        }
    }
}

/// One maturity answer. Later answers for the same question replace
/// earlier ones; no history is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    /// The answered question.
    pub question_id: QuestionId,
    /// The category the question belongs to.
    pub category_id: CategoryId,
    /// The chosen maturity level.
    pub level: MaturityLevel,
}

impl Answer {
    /// Build an answer from raw parts, validating identifiers and level.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for blank identifiers or a level above 3.
    pub fn new(
        question_id: impl Into<String>,
        category_id: impl Into<String>,
        level: u8,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            question_id: QuestionId::new(question_id)?,
            category_id: CategoryId::new(category_id)?,
            level: MaturityLevel::new(level)?,
        })
    }
}

/// One quick-check answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickAnswer {
    /// The answered quick-check question.
    pub question_id: QuestionId,
    /// The coarse response.
    pub response: QuickResponse,
}
