//! # assess-cli — Command-Line Interface
//!
//! Exposes every engine operation over a configuration directory and a
//! file-backed answer store. Results go to stdout as pretty JSON; logs go to
//! stderr.
//!
//! ## Subcommands
//!
//! - `assess frameworks`: configured frameworks and the config digest.
//! - `assess classify`: legal category for an entity profile.
//! - `assess score` / `assess quick-check`: maturity scores and roadmap.
//! - `assess suggest`: pre-filled answers from equivalent questions.
//! - `assess overlaps` / `synergies` / `also-covered`: cross-framework maps.
//! - `assess pillars`: composite pillar scores.
//!
//! ```bash
//! assess --answers ./answers score nis2 --tier core --roadmap
//! assess classify nis2 --profile entity.yaml
//! ```

pub mod classify;
pub mod frameworks;
pub mod overlap;
pub mod pillars;
pub mod score;
pub mod store;
pub mod suggest;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use assess_schema::Registry;

use crate::store::FileAnswerStore;

/// Directory name searched for when `--config` is not given.
pub const CONFIG_DIR: &str = "config";

/// Everything a subcommand needs: the validated registry and the answer
/// store.
#[derive(Debug)]
pub struct AssessContext {
    pub config_dir: PathBuf,
    pub registry: Registry,
    pub store: FileAnswerStore,
}

impl AssessContext {
    /// Load and validate the configuration directory.
    pub fn load(config_dir: &Path, answers_dir: &Path) -> Result<Self> {
        let registry = Registry::load_dir(config_dir)
            .with_context(|| format!("failed to load configuration from {}", config_dir.display()))?;
        Ok(Self {
            config_dir: config_dir.to_path_buf(),
            registry,
            store: FileAnswerStore::new(answers_dir),
        })
    }
}

/// Walk up from `start` to the first directory containing
/// `config/frameworks`, and return that `config` directory.
pub fn find_config_dir(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_DIR))
        .find(|candidate| candidate.join(assess_schema::registry::FRAMEWORKS_DIR).is_dir())
}

/// Write `value` to stdout as pretty JSON.
pub fn emit<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    const NIS2: &str = r#"
id: nis2
label_key: framework.nis2
categories:
  - id: governance
    label_key: cat.governance
    questions:
      - { id: nis2-gov-1, tier: core, label_key: q.gov1 }
      - { id: nis2-gov-2, tier: advanced, label_key: q.gov2 }
  - id: access-control
    label_key: cat.access_control
    questions:
      - { id: nis2-ac-1, tier: core, label_key: q.ac1 }
recommendations:
  - { id: nis2-rec-mfa, category_id: access-control, priority: high, effort: quick, legal_reference: "Art. 21(2)(j)", label_key: rec.mfa }
  - { id: nis2-rec-board, category_id: governance, priority: medium, effort: strategic, legal_reference: "Art. 20", label_key: rec.board }
quick_check:
  - { id: nis2-qc-1, category_id: governance, label_key: qc.1 }
classification:
  - id: large
    when: { at_least: { attribute: employees, value: 250 } }
    outcome: { category: essential, legal_reference: "Art. 3(1)", reason_key: reason.large }
  - id: default
    when: always
    outcome: { category: not_in_scope, legal_reference: "Art. 2", reason_key: reason.default }
"#;

    const DORA: &str = r#"
id: dora
label_key: framework.dora
categories:
  - id: access-control
    label_key: cat.access_control
    questions:
      - { id: dora-ac-1, tier: core, label_key: q.dora.ac1 }
recommendations:
  - { id: dora-rec-mfa, category_id: access-control, priority: high, effort: quick, legal_reference: "Art. 9", label_key: rec.mfa }
classification:
  - id: default
    when: always
    outcome: { category: in_scope, legal_reference: "Art. 2", reason_key: reason.dora }
"#;

    const TOPICS: &str = r#"
equivalence:
  - topic: topic.mfa
    confidence: exact
    members:
      - { framework: nis2, questions: [nis2-ac-1] }
      - { framework: dora, questions: [dora-ac-1] }
recommendations:
  - topic: topic.mfa
    members:
      - { framework: nis2, recommendations: [nis2-rec-mfa] }
      - { framework: dora, recommendations: [dora-rec-mfa] }
"#;

    const OVERLAPS: &str = r#"
overlaps:
  - { framework_a: nis2, framework_b: dora, overlap_percent: 70, shared_measures: [measure.mfa] }
"#;

    const PILLARS: &str = r#"
pillars:
  - id: resilience
    label_key: pillar.resilience
    components:
      - { id: cyber, label_key: component.cyber, frameworks: [nis2, dora] }
"#;

    /// A temporary workspace with a small configuration tree and an empty
    /// answer directory.
    pub(crate) fn context() -> (tempfile::TempDir, AssessContext) {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join(CONFIG_DIR);
        let frameworks = config.join("frameworks");
        std::fs::create_dir_all(&frameworks).unwrap();
        std::fs::write(frameworks.join("nis2.yaml"), NIS2).unwrap();
        std::fs::write(frameworks.join("dora.yaml"), DORA).unwrap();
        std::fs::write(config.join("topics.yaml"), TOPICS).unwrap();
        std::fs::write(config.join("overlaps.yaml"), OVERLAPS).unwrap();
        std::fs::write(config.join("pillars.yaml"), PILLARS).unwrap();
        let ctx = AssessContext::load(&config, &dir.path().join("answers")).unwrap();
        (dir, ctx)
    }
}
