//! # Roadmap Generator
//!
//! Places a framework's recommendations into three fixed phases based on
//! the severity of the category they remediate and the effort they take.
//!
//! Only recommendations for answered categories are considered. Green
//! categories surface only their high-priority or strategic items.
//!
//! | Effort \ Severity | red        | yellow     | green |
//! |-------------------|------------|------------|-------|
//! | quick             | quick-wins | quick-wins | core  |
//! | medium            | core       | core       | core  |
//! | strategic         | strategic  | strategic  | strategic |
//!
//! Within a phase items are ordered by urgency (critical first), then by
//! category percentage (worst first). The sort is stable, so ties keep the
//! recommendation list's declaration order.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use assess_core::{CategoryId, Severity};
use assess_schema::{Effort, Priority, Recommendation};

use crate::scoring::CategoryScore;

/// The three remediation phases, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    /// 0–3 months.
    QuickWins,
    /// 3–6 months.
    Core,
    /// 6–12 months.
    Strategic,
}

impl PhaseKind {
    /// All phases in output order.
    pub const ALL: [PhaseKind; 3] = [Self::QuickWins, Self::Core, Self::Strategic];

    pub fn label_key(self) -> &'static str {
        match self {
            Self::QuickWins => "roadmap.phase.quick_wins",
            Self::Core => "roadmap.phase.core",
            Self::Strategic => "roadmap.phase.strategic",
        }
    }

    /// Month window `(start, end)` relative to the start of the plan.
    pub fn months(self) -> (u8, u8) {
        match self {
            Self::QuickWins => (0, 3),
            Self::Core => (3, 6),
            Self::Strategic => (6, 12),
        }
    }

    fn index(self) -> usize {
        match self {
            Self::QuickWins => 0,
            Self::Core => 1,
            Self::Strategic => 2,
        }
    }

    /// Phase for a recommendation of `effort` in a category at `severity`.
    pub fn assign(severity: Severity, effort: Effort) -> Self {
        match (severity, effort) {
            (_, Effort::Strategic) => Self::Strategic,
            (Severity::Red, Effort::Quick) => Self::QuickWins,
            (Severity::Red, _) => Self::Core,
            (Severity::Yellow, Effort::Quick) => Self::QuickWins,
            (Severity::Yellow, Effort::Medium) => Self::Core,
            _ => Self::Core,
        }
    }
}

/// How soon an item should be tackled. Ordered most urgent first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Critical,
    High,
    Medium,
    Low,
}

impl Urgency {
    /// Sort rank, 0 for critical.
    pub fn rank(self) -> u8 {
        self as u8
    }

    pub fn assign(severity: Severity, priority: Priority) -> Self {
        match (severity, priority) {
            (Severity::Red, Priority::High) => Self::Critical,
            (Severity::Red, _) => Self::High,
            (Severity::Yellow, Priority::High) => Self::High,
            (Severity::Yellow, _) => Self::Medium,
            _ => Self::Low,
        }
    }
}

/// One scheduled recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapItem {
    pub recommendation: Recommendation,
    /// Score of the category the recommendation remediates.
    pub category_score: CategoryScore,
    pub urgency: Urgency,
}

/// One phase of the plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapPhase {
    pub kind: PhaseKind,
    /// Opaque label key for the phase name.
    pub label_key: String,
    pub start_month: u8,
    pub end_month: u8,
    /// Items sorted by urgency, then category percentage ascending.
    pub items: Vec<RoadmapItem>,
}

impl RoadmapPhase {
    fn empty(kind: PhaseKind) -> Self {
        let (start_month, end_month) = kind.months();
        Self {
            kind,
            label_key: kind.label_key().to_string(),
            start_month,
            end_month,
            items: Vec::new(),
        }
    }
}

/// Number of items at each urgency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrgencySummary {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

/// A phased remediation plan. Always exactly three phases, in
/// [`PhaseKind::ALL`] order, even when some are empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roadmap {
    pub phases: [RoadmapPhase; 3],
}

impl Roadmap {
    /// Total items across all phases.
    pub fn item_count(&self) -> usize {
        self.phases.iter().map(|p| p.items.len()).sum()
    }

    pub fn phase(&self, kind: PhaseKind) -> &RoadmapPhase {
        &self.phases[kind.index()]
    }

    pub fn urgency_summary(&self) -> UrgencySummary {
        let mut summary = UrgencySummary::default();
        for item in self.phases.iter().flat_map(|p| &p.items) {
            match item.urgency {
                Urgency::Critical => summary.critical += 1,
                Urgency::High => summary.high += 1,
                Urgency::Medium => summary.medium += 1,
                Urgency::Low => summary.low += 1,
            }
        }
        summary
    }
}

/// Build the remediation roadmap from category scores and a framework's
/// recommendations.
pub fn build_roadmap(scores: &[CategoryScore], recommendations: &[Recommendation]) -> Roadmap {
    let by_category: HashMap<&CategoryId, &CategoryScore> =
        scores.iter().map(|s| (&s.category_id, s)).collect();
    let mut phases = PhaseKind::ALL.map(RoadmapPhase::empty);

    for rec in recommendations {
        let Some(score) = by_category.get(&rec.category_id).filter(|s| s.answered_count > 0) else {
            tracing::trace!(recommendation = %rec.id, "category unanswered, skipping");
            continue;
        };
        if score.severity == Severity::Green
            && rec.priority != Priority::High
            && rec.effort != Effort::Strategic
        {
            tracing::debug!(
                recommendation = %rec.id,
                category = %rec.category_id,
                "green category, recommendation not surfaced"
            );
            continue;
        }

        let kind = PhaseKind::assign(score.severity, rec.effort);
        phases[kind.index()].items.push(RoadmapItem {
            recommendation: rec.clone(),
            category_score: (*score).clone(),
            urgency: Urgency::assign(score.severity, rec.priority),
        });
    }

    for phase in &mut phases {
        phase.items.sort_by(|a, b| {
            a.urgency
                .cmp(&b.urgency)
                .then(a.category_score.percentage.total_cmp(&b.category_score.percentage))
        });
    }

    Roadmap { phases }
}
