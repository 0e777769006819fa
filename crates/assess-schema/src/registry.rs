//! # Registry
//!
//! The validated, read-only view over every static table. Built once at
//! startup (from files with [`Registry::load_dir`] or from in-memory tables
//! with [`Registry::build`]) and passed by reference into every engine call.
//! There is no global instance, so tests can substitute fixtures freely.
//!
//! ## Directory layout
//!
//! ```text
//! config/
//! ├── frameworks/        one file per framework, loaded in file-name order
//! │   ├── dora.yaml
//! │   └── nis2.yaml
//! ├── topics.yaml        optional: equivalence + recommendation topics
//! ├── overlaps.yaml      optional: pairwise overlap mappings
//! └── pillars.yaml       optional: pillar definitions
//! ```

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use assess_core::{canonical_json_digest, ConfigurationError, ContentDigest, FrameworkId};

use crate::error::SchemaResult;
use crate::framework::FrameworkSchema;
use crate::overlap::{OverlapMapping, OverlapTable};
use crate::parser::{config_files_in, find_config_file, load_typed};
use crate::pillar::{Pillar, PillarTable};
use crate::topics::{EquivalenceTopic, RecommendationTopic, TopicTables};

/// Subdirectory holding one file per framework.
pub const FRAMEWORKS_DIR: &str = "frameworks";

/// Raw, unvalidated tables. This is also the canonical form hashed by
/// [`Registry::digest`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Framework schemas in load order.
    pub frameworks: Vec<FrameworkSchema>,
    /// Equivalence and recommendation topics.
    #[serde(default)]
    pub topics: TopicTables,
    /// Pairwise overlaps.
    #[serde(default)]
    pub overlaps: Vec<OverlapMapping>,
    /// Pillar definitions.
    #[serde(default)]
    pub pillars: Vec<Pillar>,
}

/// Validated configuration. Immutable once built.
#[derive(Debug, Clone)]
pub struct Registry {
    config: RegistryConfig,
    index: HashMap<FrameworkId, usize>,
}

impl Registry {
    /// Validate `config` and build the registry.
    pub fn build(config: RegistryConfig) -> Result<Self, ConfigurationError> {
        let mut index = HashMap::with_capacity(config.frameworks.len());
        for (i, fw) in config.frameworks.iter().enumerate() {
            fw.validate()?;
            if index.insert(fw.id.clone(), i).is_some() {
                return Err(ConfigurationError::DuplicateId {
                    kind: "framework",
                    id: fw.id.to_string(),
                });
            }
        }

        let registry = Self { config, index };
        registry.validate_equivalence_topics()?;
        registry.validate_recommendation_topics()?;
        registry.validate_overlaps()?;
        registry.validate_pillars()?;

        tracing::info!(
            frameworks = registry.config.frameworks.len(),
            equivalence_topics = registry.config.topics.equivalence.len(),
            recommendation_topics = registry.config.topics.recommendations.len(),
            overlaps = registry.config.overlaps.len(),
            pillars = registry.config.pillars.len(),
            "configuration registry built"
        );
        Ok(registry)
    }

    /// Load and validate a configuration directory.
    pub fn load_dir(dir: &Path) -> SchemaResult<Self> {
        let mut config = RegistryConfig::default();

        for path in config_files_in(&dir.join(FRAMEWORKS_DIR))? {
            tracing::debug!(path = %path.display(), "loading framework schema");
            config.frameworks.push(load_typed(&path)?);
        }
        if let Some(path) = find_config_file(dir, "topics") {
            tracing::debug!(path = %path.display(), "loading topic tables");
            config.topics = load_typed(&path)?;
        }
        if let Some(path) = find_config_file(dir, "overlaps") {
            tracing::debug!(path = %path.display(), "loading overlap table");
            config.overlaps = load_typed::<OverlapTable>(&path)?.overlaps;
        }
        if let Some(path) = find_config_file(dir, "pillars") {
            tracing::debug!(path = %path.display(), "loading pillar table");
            config.pillars = load_typed::<PillarTable>(&path)?.pillars;
        }

        Ok(Self::build(config)?)
    }

    /// Look up a framework.
    pub fn framework(&self, id: &FrameworkId) -> Result<&FrameworkSchema, ConfigurationError> {
        self.index
            .get(id)
            .map(|&i| &self.config.frameworks[i])
            .ok_or_else(|| ConfigurationError::UnknownFramework(id.to_string()))
    }

    /// Whether the framework is configured.
    pub fn contains(&self, id: &FrameworkId) -> bool {
        self.index.contains_key(id)
    }

    /// All frameworks in load order.
    pub fn frameworks(&self) -> &[FrameworkSchema] {
        &self.config.frameworks
    }

    pub fn equivalence_topics(&self) -> &[EquivalenceTopic] {
        &self.config.topics.equivalence
    }

    pub fn recommendation_topics(&self) -> &[RecommendationTopic] {
        &self.config.topics.recommendations
    }

    pub fn overlaps(&self) -> &[OverlapMapping] {
        &self.config.overlaps
    }

    pub fn pillars(&self) -> &[Pillar] {
        &self.config.pillars
    }

    /// The tables this registry was built from.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// SHA-256 over the canonical JSON form of the configuration.
    pub fn digest(&self) -> Result<ContentDigest, assess_core::AssessError> {
        canonical_json_digest(&self.config)
    }

    fn require(&self, context: &str, framework: &FrameworkId) -> Result<&FrameworkSchema, ConfigurationError> {
        self.framework(framework).map_err(|_| ConfigurationError::DanglingReference {
            context: context.to_string(),
            framework: framework.to_string(),
            id: String::new(),
        })
    }

    fn validate_equivalence_topics(&self) -> Result<(), ConfigurationError> {
        for topic in &self.config.topics.equivalence {
            let context = format!("equivalence topic {:?}", topic.topic);
            let mut members = HashSet::new();
            for member in &topic.members {
                if !members.insert(&member.framework) {
                    return Err(ConfigurationError::DuplicateId {
                        kind: "topic member",
                        id: format!("{}/{}", topic.topic, member.framework),
                    });
                }
                let fw = self.require(&context, &member.framework)?;
                if let Some(q) = member.questions.iter().find(|q| !fw.has_question(q)) {
                    return Err(ConfigurationError::DanglingReference {
                        context,
                        framework: member.framework.to_string(),
                        id: q.to_string(),
                    });
                }
            }
            if topic.members.len() < 2 {
                tracing::warn!(topic = %topic.topic, "equivalence topic has fewer than two member frameworks");
            }
        }
        Ok(())
    }

    fn validate_recommendation_topics(&self) -> Result<(), ConfigurationError> {
        for topic in &self.config.topics.recommendations {
            let context = format!("recommendation topic {:?}", topic.topic);
            for member in &topic.members {
                let fw = self.require(&context, &member.framework)?;
                if let Some(r) = member
                    .recommendations
                    .iter()
                    .find(|r| fw.recommendation(r).is_none())
                {
                    return Err(ConfigurationError::DanglingReference {
                        context,
                        framework: member.framework.to_string(),
                        id: r.to_string(),
                    });
                }
            }
            if topic.members.len() < 2 {
                tracing::warn!(topic = %topic.topic, "recommendation topic has fewer than two member frameworks");
            }
        }
        Ok(())
    }

    fn validate_overlaps(&self) -> Result<(), ConfigurationError> {
        let mut pairs = HashSet::new();
        for m in &self.config.overlaps {
            let invalid = |detail: &str| ConfigurationError::InvalidOverlap {
                framework_a: m.framework_a.to_string(),
                framework_b: m.framework_b.to_string(),
                detail: detail.to_string(),
            };
            if m.framework_a == m.framework_b {
                return Err(invalid("a framework cannot overlap with itself"));
            }
            if m.overlap_percent > 100 {
                return Err(invalid("overlap_percent exceeds 100"));
            }
            for side in [&m.framework_a, &m.framework_b] {
                if !self.contains(side) {
                    return Err(invalid(&format!("unknown framework {side:?}")));
                }
            }
            if !pairs.insert(m.pair_key()) {
                return Err(ConfigurationError::DuplicateOverlap {
                    framework_a: m.framework_a.to_string(),
                    framework_b: m.framework_b.to_string(),
                });
            }
            if m.overlap_percent == 0 {
                tracing::warn!(
                    framework_a = %m.framework_a,
                    framework_b = %m.framework_b,
                    "overlap mapping declares 0% overlap"
                );
            }
        }
        Ok(())
    }

    fn validate_pillars(&self) -> Result<(), ConfigurationError> {
        let mut ids = HashSet::new();
        for pillar in &self.config.pillars {
            if !ids.insert(&pillar.id) {
                return Err(ConfigurationError::DuplicateId {
                    kind: "pillar",
                    id: pillar.id.to_string(),
                });
            }
            let mut components = HashSet::new();
            for component in &pillar.components {
                if !components.insert(component.id.as_str()) {
                    return Err(ConfigurationError::DuplicateId {
                        kind: "pillar component",
                        id: format!("{}/{}", pillar.id, component.id),
                    });
                }
                let context = format!("pillar {}/{}", pillar.id, component.id);
                for fw in &component.frameworks {
                    self.require(&context, fw)?;
                }
            }
        }
        Ok(())
    }
}
