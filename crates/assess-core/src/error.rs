//! # Error Hierarchy
//!
//! Structured error types for the assessment engine, built with `thiserror`.
//! No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! Two failure classes matter to callers:
//!
//! - [`ConfigurationError`]: the static tables are wrong (unknown framework,
//!   malformed rule table, dangling topic reference). Configuration is
//!   trusted at deploy time, so this is a packaging bug. Never retry.
//! - [`ValidationError`]: the caller handed in bad input (out-of-range level,
//!   answer to an unknown question, mistyped profile attribute). Reject that
//!   input; nothing from the batch has been applied.
//!
//! "Nothing found" is not an error anywhere in the engine. Lookups return
//! empty collections or `None` for that.

use thiserror::Error;

/// Top-level error type for the assessment engine.
#[derive(Error, Debug)]
pub enum AssessError {
    /// Static configuration is invalid or does not contain the requested item.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Caller-supplied input was rejected.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// JSON serialization failed while computing a digest.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AssessError {
    /// Whether this error signals broken configuration rather than bad input.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// Whether the caller can recover by rejecting the offending input.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Errors in the static per-framework tables.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// A framework id was requested that the registry does not know.
    #[error("unknown framework: {0:?}")]
    UnknownFramework(String),

    /// A category id was requested that the framework does not declare.
    #[error("framework {framework:?} has no category {category:?}")]
    UnknownCategory {
        /// The framework that was searched.
        framework: String,
        /// The missing category.
        category: String,
    },

    /// The same identifier was declared twice in one scope.
    #[error("duplicate {kind} id {id:?}")]
    DuplicateId {
        /// What kind of item was duplicated (framework, question, ...).
        kind: &'static str,
        /// The duplicated identifier.
        id: String,
    },

    /// A classification rule table breaks its structural contract.
    #[error("malformed classification rules for {framework:?}: {detail}")]
    MalformedRules {
        /// The framework whose rule table is malformed.
        framework: String,
        /// What is wrong with it.
        detail: String,
    },

    /// A table references a framework, question, category or recommendation
    /// that does not exist.
    #[error("{context} references unknown {framework:?}/{id:?}")]
    DanglingReference {
        /// Where the reference appears (topic key, pillar id, ...).
        context: String,
        /// Framework half of the reference.
        framework: String,
        /// Item half of the reference (empty when the framework itself is missing).
        id: String,
    },

    /// An overlap mapping is structurally invalid.
    #[error("invalid overlap {framework_a:?} <-> {framework_b:?}: {detail}")]
    InvalidOverlap {
        /// First side of the pair.
        framework_a: String,
        /// Second side of the pair.
        framework_b: String,
        /// What is wrong with it.
        detail: String,
    },

    /// More than one overlap mapping exists for the same unordered pair.
    #[error("duplicate overlap mapping for {framework_a:?} <-> {framework_b:?}")]
    DuplicateOverlap {
        /// First side of the pair.
        framework_a: String,
        /// Second side of the pair.
        framework_b: String,
    },

    /// Any other structural fault.
    #[error("{0}")]
    Invalid(String),
}

/// Errors in caller-supplied input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Maturity level outside 0..=3.
    #[error("maturity level {0} is out of range (expected 0..=3)")]
    LevelOutOfRange(i64),

    /// An identifier was empty or whitespace-only.
    #[error("invalid {kind}: must be non-empty")]
    EmptyIdentifier {
        /// Which identifier type rejected the value.
        kind: &'static str,
    },

    /// A tier name other than `core` or `advanced`.
    #[error("unknown tier {0:?} (expected core or advanced)")]
    UnknownTier(String),

    /// An answer references a question the framework does not contain.
    #[error("framework {framework:?} has no question {question:?}")]
    UnknownQuestion {
        /// The framework being scored.
        framework: String,
        /// The unknown question.
        question: String,
    },

    /// A quick-check answer references an unknown quick-check question.
    #[error("framework {framework:?} has no quick-check question {question:?}")]
    UnknownQuickCheckQuestion {
        /// The framework being scored.
        framework: String,
        /// The unknown quick-check question.
        question: String,
    },

    /// A lookup names a recommendation the framework does not contain.
    #[error("framework {framework:?} has no recommendation {recommendation:?}")]
    UnknownRecommendation {
        /// The framework that was searched.
        framework: String,
        /// The unknown recommendation.
        recommendation: String,
    },

    /// An answer is filed under a category that does not own its question.
    #[error("question {question:?} belongs to category {expected:?}, answer says {actual:?}")]
    CategoryMismatch {
        /// The answered question.
        question: String,
        /// The category that owns the question.
        expected: String,
        /// The category given on the answer.
        actual: String,
    },

    /// A profile attribute is present but has the wrong JSON type for the
    /// rule that reads it.
    #[error("profile attribute {attribute:?} must be {expected}, found {found}")]
    AttributeType {
        /// The attribute name.
        attribute: String,
        /// The JSON type the rule requires.
        expected: &'static str,
        /// The JSON type actually supplied.
        found: &'static str,
    },
}
