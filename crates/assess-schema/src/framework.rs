//! # Framework Schema
//!
//! Static per-framework configuration: categories with their tiered
//! questions, the remediation recommendation list, the quick-check
//! question battery, and the classification rule table.
//!
//! All user-facing text is referenced through opaque label keys. Nothing in
//! this crate resolves them.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use assess_core::{
    CategoryId, ConfigurationError, FrameworkId, QuestionId, RecommendationId, Tier,
};

use crate::rules::{validate_rule_table, ClassificationRule};

/// Number of maturity levels a question describes (0–3).
pub const LEVEL_COUNT: usize = 4;

/// One regulatory framework's complete static configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameworkSchema {
    /// Framework identifier, unique within a registry.
    pub id: FrameworkId,
    /// Label key for the framework's display name.
    pub label_key: String,
    /// Question categories in display order.
    #[serde(default)]
    pub categories: Vec<Category>,
    /// Remediation recommendations.
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
    /// Abbreviated quick-check battery.
    #[serde(default)]
    pub quick_check: Vec<QuickCheckQuestion>,
    /// Ordered classification rules; first match wins, last rule is the
    /// mandatory `always` fallback.
    pub classification: Vec<ClassificationRule>,
}

/// A group of questions addressing one control area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Category identifier, unique within the framework.
    pub id: CategoryId,
    /// Label key for the category name.
    pub label_key: String,
    /// Questions in display order.
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// A single maturity question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Question identifier, unique within the framework.
    pub id: QuestionId,
    /// Which question subset the question belongs to.
    pub tier: Tier,
    /// Label key for the question text.
    pub label_key: String,
    /// Label keys describing maturity levels 0..=3. Either empty or exactly
    /// four entries.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub level_keys: Vec<String>,
}

/// Question counts split by tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCounts {
    /// Number of core questions.
    pub core: usize,
    /// Number of advanced questions.
    pub advanced: usize,
}

impl Category {
    /// Questions in this category, optionally restricted to one tier.
    pub fn questions_in(&self, tier: Option<Tier>) -> impl Iterator<Item = &Question> {
        self.questions
            .iter()
            .filter(move |q| tier.map_or(true, |t| q.tier == t))
    }

    /// Question totals by tier.
    pub fn totals_by_tier(&self) -> TierCounts {
        let mut counts = TierCounts::default();
        for q in &self.questions {
            match q.tier {
                Tier::Core => counts.core += 1,
                Tier::Advanced => counts.advanced += 1,
            }
        }
        counts
    }
}

/// Recommendation priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Highest-value measure.
    High,
    /// Normal measure.
    Medium,
    /// Nice to have.
    Low,
}

/// Implementation effort of a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effort {
    /// Days to weeks.
    Quick,
    /// Weeks to a few months.
    Medium,
    /// A programme of work.
    Strategic,
}

/// A remediation measure tied to one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Recommendation identifier, unique within the framework.
    pub id: RecommendationId,
    /// The category whose score drives this recommendation.
    pub category_id: CategoryId,
    /// How much the measure matters.
    pub priority: Priority,
    /// How much work it takes.
    pub effort: Effort,
    /// Article or clause the measure implements.
    pub legal_reference: String,
    /// Label key for the recommendation text.
    pub label_key: String,
}

/// A question in the abbreviated quick-check battery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickCheckQuestion {
    /// Quick-check question identifier, unique within the framework.
    pub id: QuestionId,
    /// The category the quick-check question contributes to.
    pub category_id: CategoryId,
    /// Label key for the question text.
    pub label_key: String,
}

impl FrameworkSchema {
    /// Find a category by id.
    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| &c.id == id)
    }

    /// Find a category by id, failing with a configuration error.
    pub fn require_category(&self, id: &CategoryId) -> Result<&Category, ConfigurationError> {
        self.category(id)
            .ok_or_else(|| ConfigurationError::UnknownCategory {
                framework: self.id.to_string(),
                category: id.to_string(),
            })
    }

    /// Resolve a question to itself and the category that owns it.
    pub fn find_question(&self, id: &QuestionId) -> Option<(&Category, &Question)> {
        self.categories
            .iter()
            .find_map(|c| c.questions.iter().find(|q| &q.id == id).map(|q| (c, q)))
    }

    /// Whether the framework declares a maturity question with this id.
    pub fn has_question(&self, id: &QuestionId) -> bool {
        self.find_question(id).is_some()
    }

    /// Find a quick-check question by id.
    pub fn quick_question(&self, id: &QuestionId) -> Option<&QuickCheckQuestion> {
        self.quick_check.iter().find(|q| &q.id == id)
    }

    /// Find a recommendation by id.
    pub fn recommendation(&self, id: &RecommendationId) -> Option<&Recommendation> {
        self.recommendations.iter().find(|r| &r.id == id)
    }

    /// Total number of maturity questions across all categories.
    pub fn question_count(&self) -> usize {
        self.categories.iter().map(|c| c.questions.len()).sum()
    }

    /// Check the framework's internal consistency.
    ///
    /// Enforces unique ids per kind, well-formed level key lists,
    /// recommendation and quick-check category references, and the
    /// classification table contract.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let mut categories = HashSet::new();
        let mut questions = HashSet::new();
        for category in &self.categories {
            if !categories.insert(&category.id) {
                return Err(ConfigurationError::DuplicateId {
                    kind: "category",
                    id: format!("{}/{}", self.id, category.id),
                });
            }
            for question in &category.questions {
                if !questions.insert(&question.id) {
                    return Err(ConfigurationError::DuplicateId {
                        kind: "question",
                        id: format!("{}/{}", self.id, question.id),
                    });
                }
                if !question.level_keys.is_empty() && question.level_keys.len() != LEVEL_COUNT {
                    return Err(ConfigurationError::Invalid(format!(
                        "question {}/{} declares {} level keys, expected {LEVEL_COUNT}",
                        self.id,
                        question.id,
                        question.level_keys.len()
                    )));
                }
            }
        }

        let mut recommendations = HashSet::new();
        for rec in &self.recommendations {
            if !recommendations.insert(&rec.id) {
                return Err(ConfigurationError::DuplicateId {
                    kind: "recommendation",
                    id: format!("{}/{}", self.id, rec.id),
                });
            }
            if !categories.contains(&rec.category_id) {
                return Err(ConfigurationError::DanglingReference {
                    context: format!("recommendation {}", rec.id),
                    framework: self.id.to_string(),
                    id: rec.category_id.to_string(),
                });
            }
        }

        let mut quick = HashSet::new();
        for q in &self.quick_check {
            if !quick.insert(&q.id) {
                return Err(ConfigurationError::DuplicateId {
                    kind: "quick-check question",
                    id: format!("{}/{}", self.id, q.id),
                });
            }
            if !categories.contains(&q.category_id) {
                return Err(ConfigurationError::DanglingReference {
                    context: format!("quick-check question {}", q.id),
                    framework: self.id.to_string(),
                    id: q.category_id.to_string(),
                });
            }
        }

        validate_rule_table(&self.id, &self.classification)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::rules::{ClassificationOutcome, Condition};
    use assess_core::RuleId;

    pub(crate) fn question(id: &str, tier: Tier) -> Question {
        Question {
            id: QuestionId::new(id).unwrap(),
            tier,
            label_key: format!("q.{id}"),
            level_keys: Vec::new(),
        }
    }

    pub(crate) fn fallback_rule() -> ClassificationRule {
        ClassificationRule {
            id: RuleId::new("not-in-scope").unwrap(),
            when: Condition::Always,
            outcome: ClassificationOutcome {
                category: "not_in_scope".into(),
                legal_reference: "-".into(),
                reason_key: "classification.not_in_scope".into(),
                simplified_requirements: None,
                proportionality_note: None,
            },
        }
    }

    pub(crate) fn sample_framework(id: &str) -> FrameworkSchema {
        FrameworkSchema {
            id: FrameworkId::new(id).unwrap(),
            label_key: format!("framework.{id}"),
            categories: vec![
                Category {
                    id: CategoryId::new("governance").unwrap(),
                    label_key: "cat.governance".into(),
                    questions: vec![
                        question(&format!("{id}-gov-1"), Tier::Core),
                        question(&format!("{id}-gov-2"), Tier::Core),
                        question(&format!("{id}-gov-3"), Tier::Advanced),
                    ],
                },
                Category {
                    id: CategoryId::new("access-control").unwrap(),
                    label_key: "cat.access_control".into(),
                    questions: vec![question(&format!("{id}-ac-1"), Tier::Core)],
                },
            ],
            recommendations: vec![Recommendation {
                id: RecommendationId::new(format!("{id}-rec-1")).unwrap(),
                category_id: CategoryId::new("governance").unwrap(),
                priority: Priority::High,
                effort: Effort::Quick,
                legal_reference: "Art. 1".into(),
                label_key: "rec.1".into(),
            }],
            quick_check: vec![QuickCheckQuestion {
                id: QuestionId::new(format!("{id}-qc-1")).unwrap(),
                category_id: CategoryId::new("governance").unwrap(),
                label_key: "qc.1".into(),
            }],
            classification: vec![fallback_rule()],
        }
    }

    #[test]
    fn sample_framework_is_valid() {
        sample_framework("nis2").validate().unwrap();
    }

    #[test]
    fn find_question_returns_owning_category() {
        let fw = sample_framework("nis2");
        let (cat, q) = fw.find_question(&QuestionId::new("nis2-ac-1").unwrap()).unwrap();
        assert_eq!(cat.id.as_str(), "access-control");
        assert_eq!(q.tier, Tier::Core);
        assert!(fw.find_question(&QuestionId::new("nope").unwrap()).is_none());
    }

    #[test]
    fn totals_by_tier() {
        let fw = sample_framework("nis2");
        let counts = fw.categories[0].totals_by_tier();
        assert_eq!(counts, TierCounts { core: 2, advanced: 1 });
        assert_eq!(fw.categories[0].questions_in(Some(Tier::Core)).count(), 2);
        assert_eq!(fw.question_count(), 4);
    }

    #[test]
    fn duplicate_question_rejected() {
        let mut fw = sample_framework("nis2");
        fw.categories[1].questions.push(question("nis2-gov-1", Tier::Core));
        assert!(matches!(
            fw.validate().unwrap_err(),
            ConfigurationError::DuplicateId { kind: "question", .. }
        ));
    }

    #[test]
    fn recommendation_with_unknown_category_rejected() {
        let mut fw = sample_framework("nis2");
        fw.recommendations[0].category_id = CategoryId::new("physical").unwrap();
        assert!(matches!(
            fw.validate().unwrap_err(),
            ConfigurationError::DanglingReference { .. }
        ));
    }

    #[test]
    fn wrong_level_key_count_rejected() {
        let mut fw = sample_framework("nis2");
        fw.categories[0].questions[0].level_keys = vec!["l0".into(), "l1".into()];
        assert!(matches!(fw.validate().unwrap_err(), ConfigurationError::Invalid(_)));
    }

    #[test]
    fn require_category_reports_framework() {
        let fw = sample_framework("dora");
        let err = fw
            .require_category(&CategoryId::new("physical").unwrap())
            .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::UnknownCategory {
                framework: "dora".into(),
                category: "physical".into()
            }
        );
    }
}
