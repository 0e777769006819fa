//! # assess-engine — Rule Evaluation & Aggregation
//!
//! The algorithmic core of the assessment product. Every function here is
//! pure and synchronous over a [`Registry`](assess_schema::Registry) and the
//! data passed in:
//!
//! - **Classification** ([`classification`]): first-match-wins evaluation of
//!   a framework's rule table against an entity profile.
//!
//! - **Scoring** ([`scoring`]): category and overall maturity scores with a
//!   red/yellow/green severity, for full assessments and quick checks.
//!
//! - **Roadmap** ([`roadmap`]): three-phase remediation plan from category
//!   scores and recommendations.
//!
//! - **Equivalence** ([`equivalence`]): pre-filled answer suggestions from
//!   equivalent questions in other frameworks.
//!
//! - **Overlap** ([`overlap`]) and **pillars** ([`pillar`]): static
//!   cross-framework mappings and composite scores.
//!
//! ## Injected data
//!
//! The engine never reads storage. Stored answers and scores arrive through
//! [`AnswerSource`] and [`ScoreSource`]; their errors come back unchanged
//! inside [`LookupError::Source`].

pub mod classification;
pub mod equivalence;
pub mod error;
pub mod overlap;
pub mod pillar;
pub mod roadmap;
pub mod scoring;
pub mod source;

#[cfg(test)]
pub(crate) mod testing;

// Re-export primary types.
pub use classification::{classify, evaluate_rules, ClassificationResult};
pub use equivalence::{EquivalenceService, SuggestedAnswer};
pub use error::LookupError;
pub use overlap::{
    also_covered_by, find_synergies, overlaps_for, related_recommendations, RelatedRecommendation,
};
pub use pillar::{pillar_scores, ComponentScore, PillarScore};
pub use roadmap::{
    build_roadmap, PhaseKind, Roadmap, RoadmapItem, RoadmapPhase, Urgency, UrgencySummary,
};
pub use scoring::{score, score_quick_check, CategoryScore, OverallScore};
pub use source::{AnswerSource, AnsweredScores, InMemoryAnswers, InMemoryScores, ScoreSource};
