//! # Cross-Framework Equivalence
//!
//! Suggests a pre-filled answer for a question by finding an equivalent
//! question already answered in another framework.
//!
//! Candidates are ranked by topic confidence (`exact` > `high` >
//! `approximate`); within a topic, member frameworks are tried in their
//! declared order and each member's questions in their declared order. The
//! first stored answer wins. Nothing is blended.
//!
//! Every framework referenced by a matching topic is loaded before the
//! winner is picked, so a failing store surfaces regardless of which
//! candidate would have won. Each framework is loaded at most once per call;
//! [`EquivalenceService::suggest_for_category`] shares that cache across the
//! whole category without changing any per-question result.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use assess_core::{CategoryId, FrameworkId, MaturityLevel, QuestionId, ValidationError};
use assess_schema::{Confidence, EquivalenceTopic, Registry};

use crate::error::LookupError;
use crate::source::AnswerSource;

/// A pre-fill suggestion for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedAnswer {
    /// The question being suggested for.
    pub question_id: QuestionId,
    pub suggested_level: MaturityLevel,
    pub source_framework: FrameworkId,
    pub source_question_id: QuestionId,
    pub confidence: Confidence,
    /// Label key of the topic that linked the two questions.
    pub topic: String,
}

type AnswerCache = HashMap<FrameworkId, HashMap<QuestionId, MaturityLevel>>;

/// Equivalence lookups over one registry.
#[derive(Debug, Clone, Copy)]
pub struct EquivalenceService<'r> {
    registry: &'r Registry,
}

impl<'r> EquivalenceService<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Suggest an answer for `question` in `target`.
    ///
    /// Returns `Ok(None)` when a known question belongs to no topic or no
    /// other framework has answered any equivalent question.
    ///
    /// # Errors
    ///
    /// - [`assess_core::ConfigurationError::UnknownFramework`] for an unregistered `target`.
    /// - [`ValidationError::UnknownQuestion`] when `question` is not declared
    ///   by `target`.
    /// - [`LookupError::Source`] with the answer source's own failure, unchanged.
    pub fn suggest<S: AnswerSource>(
        &self,
        target: &FrameworkId,
        question: &QuestionId,
        source: &S,
    ) -> Result<Option<SuggestedAnswer>, LookupError<S::Error>> {
        let schema = self.registry.framework(target)?;
        if !schema.has_question(question) {
            return Err(ValidationError::UnknownQuestion {
                framework: target.to_string(),
                question: question.to_string(),
            }
            .into());
        }
        let mut cache = AnswerCache::new();
        self.suggest_cached(target, question, source, &mut cache)
    }

    /// Suggestions for every question in `category`, in question
    /// declaration order. Questions without a suggestion are omitted.
    ///
    /// On success the result equals calling [`suggest`](Self::suggest) for
    /// each question in turn. Each framework's answers are loaded at most
    /// once per call.
    ///
    /// # Errors
    ///
    /// All or nothing: if the source fails while loading answers for any
    /// question in the category, the whole call returns that
    /// [`LookupError::Source`] and no partial suggestions. Callers that
    /// want the suggestions that did resolve should call `suggest` per
    /// question instead. Unknown framework or category is a configuration
    /// error.
    pub fn suggest_for_category<S: AnswerSource>(
        &self,
        target: &FrameworkId,
        category: &CategoryId,
        source: &S,
    ) -> Result<Vec<SuggestedAnswer>, LookupError<S::Error>> {
        let schema = self.registry.framework(target)?;
        let category = schema.require_category(category)?;
        let mut cache = AnswerCache::new();
        let mut out = Vec::new();
        for question in &category.questions {
            if let Some(s) = self.suggest_cached(target, &question.id, source, &mut cache)? {
                out.push(s);
            }
        }
        Ok(out)
    }

    /// Matching topics, best confidence first. Stable, so equal-confidence
    /// topics keep their declaration order.
    fn matching_topics(&self, target: &FrameworkId, question: &QuestionId) -> Vec<&'r EquivalenceTopic> {
        let mut topics: Vec<&EquivalenceTopic> = self
            .registry
            .equivalence_topics()
            .iter()
            .filter(|t| t.contains(target, question))
            .collect();
        topics.sort_by_key(|t| t.confidence.rank());
        topics
    }

    fn suggest_cached<S: AnswerSource>(
        &self,
        target: &FrameworkId,
        question: &QuestionId,
        source: &S,
        cache: &mut AnswerCache,
    ) -> Result<Option<SuggestedAnswer>, LookupError<S::Error>> {
        let topics = self.matching_topics(target, question);
        if topics.is_empty() {
            return Ok(None);
        }

        for member in topics.iter().flat_map(|t| &t.members) {
            if &member.framework == target || cache.contains_key(&member.framework) {
                continue;
            }
            let answers = source
                .load_answers(&member.framework)
                .map_err(LookupError::Source)?;
            tracing::debug!(
                framework = %member.framework,
                answers = answers.len(),
                "loaded answers for equivalence lookup"
            );
            let levels = answers.into_iter().map(|a| (a.question_id, a.level)).collect();
            cache.insert(member.framework.clone(), levels);
        }

        for topic in topics {
            for member in topic.members.iter().filter(|m| &m.framework != target) {
                let Some(levels) = cache.get(&member.framework) else {
                    continue;
                };
                if let Some((q, level)) = member
                    .questions
                    .iter()
                    .find_map(|q| levels.get(q).map(|l| (q, *l)))
                {
                    return Ok(Some(SuggestedAnswer {
                        question_id: question.clone(),
                        suggested_level: level,
                        source_framework: member.framework.clone(),
                        source_question_id: q.clone(),
                        confidence: topic.confidence,
                        topic: topic.topic.clone(),
                    }));
                }
            }
        }
        Ok(None)
    }
}
