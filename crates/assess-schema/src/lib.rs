//! # assess-schema — The Schema Store
//!
//! Static configuration for every framework the engine can assess, loaded
//! from YAML/JSON and validated once into a read-only [`Registry`]:
//!
//! - **Framework schemas** ([`framework`]): categories, tiered questions,
//!   recommendations, quick-check questions.
//!
//! - **Classification rules** ([`rules`]): ordered `(condition, outcome)`
//!   tables and the small condition DSL they are written in.
//!
//! - **Cross-framework tables** ([`topics`], [`overlap`], [`pillar`]):
//!   equivalence topics, recommendation topics, pairwise overlaps and
//!   pillar groupings.
//!
//! ## Data Format
//!
//! See [`registry`] for the directory layout. Every structural rule is
//! checked by [`Registry::build`]; a registry that exists is valid, so the
//! engine never re-checks configuration on the hot path.

pub mod error;
pub mod framework;
pub mod overlap;
pub mod parser;
pub mod pillar;
pub mod registry;
pub mod rules;
pub mod topics;

// Re-export primary types.
pub use error::{SchemaError, SchemaResult};
pub use framework::{
    Category, Effort, FrameworkSchema, Priority, Question, QuickCheckQuestion, Recommendation,
    TierCounts, LEVEL_COUNT,
};
pub use overlap::{OverlapMapping, OverlapTable};
pub use pillar::{Pillar, PillarComponent, PillarTable};
pub use registry::{Registry, RegistryConfig};
pub use rules::{validate_rule_table, ClassificationOutcome, ClassificationRule, Condition};
pub use topics::{
    Confidence, EquivalenceTopic, RecommendationMember, RecommendationTopic, TopicMember,
    TopicTables,
};
