#![deny(missing_docs)]

//! # assess-core — Foundational Types for the Assessment Engine
//!
//! This crate defines the types every other crate in the workspace depends
//! on. It has no internal crate dependencies, only `serde`, `serde_json`,
//! `thiserror` and `sha2` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for identifiers.** You cannot pass a [`QuestionId`]
//!    where a [`RecommendationId`] is expected, and no identifier is empty.
//!
//! 2. **Invalid levels are unrepresentable.** [`MaturityLevel`] is validated
//!    at construction and at deserialization. Nothing downstream clamps.
//!
//! 3. **One severity function.** [`Severity::from_percentage`] and
//!    [`round_percentage`] are the only place the platform-wide thresholds
//!    and the one-decimal rounding rule live. Full assessments, quick checks,
//!    and pillar scores all go through them.
//!
//! 4. **[`AssessError`] hierarchy.** Configuration faults and caller input
//!    faults are distinct types so callers can tell a packaging bug from a
//!    rejected request.

pub mod digest;
pub mod error;
pub mod identity;
pub mod level;
pub mod profile;
pub mod severity;

// Re-export primary types at crate root for ergonomic imports.
pub use digest::{canonical_json_digest, ContentDigest};
pub use error::{AssessError, ConfigurationError, ValidationError};
pub use identity::{CategoryId, FrameworkId, PillarId, QuestionId, RecommendationId, RuleId};
pub use level::{Answer, MaturityLevel, QuickAnswer, QuickResponse, Tier};
pub use profile::EntityProfile;
pub use severity::{round_percentage, Severity, RED_BELOW, YELLOW_BELOW};
