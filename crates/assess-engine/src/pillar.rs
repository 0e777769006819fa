//! # Pillar Composite Scoring
//!
//! A pillar's score is the mean of the overall percentages of the
//! frameworks it references that have data. A pillar with no data at all
//! scores `None`, with no severity; it never renders as red.
//!
//! Each framework is fetched from the [`ScoreSource`] at most once per call,
//! however many pillars or components reference it. The memo is local to
//! the call.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use assess_core::{round_percentage, FrameworkId, PillarId, Severity};
use assess_schema::Pillar;

use crate::source::ScoreSource;

/// Score of one pillar component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentScore {
    pub id: String,
    pub label_key: String,
    pub score: Option<f64>,
    pub severity: Option<Severity>,
}

/// Composite score of one pillar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PillarScore {
    pub pillar_id: PillarId,
    pub label_key: String,
    /// Rounded mean of the contributing frameworks, `None` without data.
    pub score: Option<f64>,
    pub severity: Option<Severity>,
    pub components: Vec<ComponentScore>,
    /// Frameworks that had a score, in first-seen order.
    pub contributing: Vec<FrameworkId>,
    /// Frameworks referenced but without data.
    pub missing: Vec<FrameworkId>,
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

fn rounded(raw: Option<f64>) -> (Option<f64>, Option<Severity>) {
    let score = raw.map(round_percentage);
    (score, score.map(Severity::from_percentage))
}

/// Score every pillar against `source`.
///
/// # Errors
///
/// The source's own error, unchanged.
pub fn pillar_scores<S: ScoreSource>(
    pillars: &[Pillar],
    source: &S,
) -> Result<Vec<PillarScore>, S::Error> {
    let mut memo: HashMap<FrameworkId, Option<f64>> = HashMap::new();
    let mut lookup = |framework: &FrameworkId| -> Result<Option<f64>, S::Error> {
        if let Some(&cached) = memo.get(framework) {
            return Ok(cached);
        }
        let value = source.overall_percentage(framework)?;
        tracing::debug!(framework = %framework, score = ?value, "framework score cached");
        memo.insert(framework.clone(), value);
        Ok(value)
    };

    let mut out = Vec::with_capacity(pillars.len());
    for pillar in pillars {
        let mut contributing = Vec::new();
        let mut missing = Vec::new();
        let mut values = Vec::new();
        for framework in pillar.unique_frameworks() {
            match lookup(framework)? {
                Some(v) => {
                    values.push(v);
                    contributing.push(framework.clone());
                }
                None => missing.push(framework.clone()),
            }
        }

        let mut components = Vec::with_capacity(pillar.components.len());
        for component in &pillar.components {
            let mut component_values = Vec::new();
            for framework in &component.frameworks {
                if let Some(v) = lookup(framework)? {
                    component_values.push(v);
                }
            }
            let (score, severity) = rounded(mean(&component_values));
            components.push(ComponentScore {
                id: component.id.clone(),
                label_key: component.label_key.clone(),
                score,
                severity,
            });
        }

        let (score, severity) = rounded(mean(&values));
        out.push(PillarScore {
            pillar_id: pillar.id.clone(),
            label_key: pillar.label_key.clone(),
            score,
            severity,
            components,
            contributing,
            missing,
        });
    }
    Ok(out)
}
