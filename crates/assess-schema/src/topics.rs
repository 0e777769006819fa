//! Cross-framework topic tables.
//!
//! An [`EquivalenceTopic`] groups questions from several frameworks that ask
//! about the same control, with a confidence grade for how close the match
//! is. A [`RecommendationTopic`] does the same for remediation
//! recommendations. Both are static and loaded from `topics.yaml`.

use serde::{Deserialize, Serialize};

use assess_core::{FrameworkId, QuestionId, RecommendationId};

/// How closely the questions in a topic correspond.
///
/// Ordered best first, so sorting ascending tries `Exact` before
/// `Approximate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    /// Same requirement, same wording or intent.
    Exact,
    /// Same control, different scope or depth.
    High,
    /// Related control; answer is a starting point only.
    Approximate,
}

impl Confidence {
    /// Sort rank, 0 for the strongest match.
    pub fn rank(self) -> u8 {
        match self {
            Self::Exact => 0,
            Self::High => 1,
            Self::Approximate => 2,
        }
    }

    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::High => "high",
            Self::Approximate => "approximate",
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One framework's questions within an equivalence topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicMember {
    /// Member framework.
    pub framework: FrameworkId,
    /// Equivalent questions in that framework, in preference order.
    pub questions: Vec<QuestionId>,
}

/// Questions across frameworks that address the same control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquivalenceTopic {
    /// Topic label key.
    pub topic: String,
    /// Match quality.
    pub confidence: Confidence,
    /// Member frameworks in declaration order.
    pub members: Vec<TopicMember>,
}

impl EquivalenceTopic {
    /// Whether `(framework, question)` is part of this topic.
    pub fn contains(&self, framework: &FrameworkId, question: &QuestionId) -> bool {
        self.questions_for(framework).contains(question)
    }

    /// The questions this topic lists for `framework`, empty if the
    /// framework is not a member.
    pub fn questions_for(&self, framework: &FrameworkId) -> &[QuestionId] {
        self.members
            .iter()
            .find(|m| &m.framework == framework)
            .map(|m| m.questions.as_slice())
            .unwrap_or(&[])
    }
}

/// One framework's recommendations within a recommendation topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationMember {
    /// Member framework.
    pub framework: FrameworkId,
    /// Recommendations in that framework addressing the topic.
    pub recommendations: Vec<RecommendationId>,
}

/// Recommendations across frameworks that address the same control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationTopic {
    /// Topic label key.
    pub topic: String,
    /// Member frameworks in declaration order.
    pub members: Vec<RecommendationMember>,
}

impl RecommendationTopic {
    /// Whether `recommendation` is listed under `framework` in this topic.
    pub fn contains(&self, framework: &FrameworkId, recommendation: &RecommendationId) -> bool {
        self.members
            .iter()
            .any(|m| &m.framework == framework && m.recommendations.contains(recommendation))
    }
}

/// Contents of `topics.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicTables {
    /// Question equivalence topics.
    #[serde(default)]
    pub equivalence: Vec<EquivalenceTopic>,
    /// Recommendation topics.
    #[serde(default)]
    pub recommendations: Vec<RecommendationTopic>,
}
