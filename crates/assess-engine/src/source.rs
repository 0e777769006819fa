//! # Injected Data Sources
//!
//! The engine never fetches data itself. Operations that need another
//! framework's stored answers or scores take a capability object with one
//! method. Closures work directly, so a test can pass
//! `|fw: &FrameworkId| Ok::<_, Infallible>(vec![])` without any storage.
//!
//! Collaborator errors are typed by the implementor (`Self::Error`) and are
//! propagated unchanged by every engine operation.

use std::collections::HashMap;
use std::convert::Infallible;

use assess_core::{Answer, FrameworkId};
use assess_schema::Registry;

use crate::error::LookupError;
use crate::scoring::raw_overall_percentage;

/// Read access to persisted maturity answers, keyed by framework.
pub trait AnswerSource {
    /// Failure type of the backing store.
    type Error;

    /// Every stored answer for `framework`. A framework that was never
    /// assessed yields an empty list, not an error.
    fn load_answers(&self, framework: &FrameworkId) -> Result<Vec<Answer>, Self::Error>;
}

impl<F, E> AnswerSource for F
where
    F: Fn(&FrameworkId) -> Result<Vec<Answer>, E>,
{
    type Error = E;

    fn load_answers(&self, framework: &FrameworkId) -> Result<Vec<Answer>, E> {
        self(framework)
    }
}

/// Overall percentage per framework, `None` when nothing has been answered.
pub trait ScoreSource {
    /// Failure type of the backing store.
    type Error;

    /// The framework's overall percentage, if it has any answers.
    fn overall_percentage(&self, framework: &FrameworkId) -> Result<Option<f64>, Self::Error>;
}

impl<F, E> ScoreSource for F
where
    F: Fn(&FrameworkId) -> Result<Option<f64>, E>,
{
    type Error = E;

    fn overall_percentage(&self, framework: &FrameworkId) -> Result<Option<f64>, E> {
        self(framework)
    }
}

/// Answers held in memory. Useful for tests and one-shot batch runs.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAnswers {
    by_framework: HashMap<FrameworkId, Vec<Answer>>,
}

impl InMemoryAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, framework: FrameworkId, answers: Vec<Answer>) -> Self {
        self.insert(framework, answers);
        self
    }

    /// Append answers for a framework. Later answers for the same question
    /// win when scored.
    pub fn insert(&mut self, framework: FrameworkId, answers: Vec<Answer>) {
        self.by_framework.entry(framework).or_default().extend(answers);
    }
}

impl AnswerSource for InMemoryAnswers {
    type Error = Infallible;

    fn load_answers(&self, framework: &FrameworkId) -> Result<Vec<Answer>, Infallible> {
        Ok(self.by_framework.get(framework).cloned().unwrap_or_default())
    }
}

/// Fixed per-framework percentages.
#[derive(Debug, Clone, Default)]
pub struct InMemoryScores {
    by_framework: HashMap<FrameworkId, f64>,
}

impl InMemoryScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, framework: FrameworkId, percentage: f64) -> Self {
        self.by_framework.insert(framework, percentage);
        self
    }
}

impl ScoreSource for InMemoryScores {
    type Error = Infallible;

    fn overall_percentage(&self, framework: &FrameworkId) -> Result<Option<f64>, Infallible> {
        Ok(self.by_framework.get(framework).copied())
    }
}

/// Derives overall percentages by scoring stored answers against the
/// registry (full assessment, no tier filter). Values are unrounded so
/// the consumer rounds once after its own aggregation.
#[derive(Debug, Clone, Copy)]
pub struct AnsweredScores<'a, A> {
    registry: &'a Registry,
    answers: &'a A,
}

impl<'a, A: AnswerSource> AnsweredScores<'a, A> {
    pub fn new(registry: &'a Registry, answers: &'a A) -> Self {
        Self { registry, answers }
    }
}

impl<A: AnswerSource> ScoreSource for AnsweredScores<'_, A> {
    type Error = LookupError<A::Error>;

    fn overall_percentage(&self, framework: &FrameworkId) -> Result<Option<f64>, Self::Error> {
        let schema = self.registry.framework(framework)?;
        let answers = self
            .answers
            .load_answers(framework)
            .map_err(LookupError::Source)?;
        if answers.is_empty() {
            return Ok(None);
        }
        Ok(raw_overall_percentage(schema, &answers)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::registry;

    fn fw(id: &str) -> FrameworkId {
        FrameworkId::new(id).unwrap()
    }

    #[test]
    fn closures_are_answer_sources() {
        let source = |f: &FrameworkId| -> Result<Vec<Answer>, Infallible> {
            if f.as_str() == "nis2" {
                Ok(vec![Answer::new("nis2-gov-1", "governance", 2).unwrap()])
            } else {
                Ok(vec![])
            }
        };
        assert_eq!(source.load_answers(&fw("nis2")).unwrap().len(), 1);
        assert!(source.load_answers(&fw("dora")).unwrap().is_empty());
    }

    #[test]
    fn in_memory_answers_default_to_empty() {
        let store = InMemoryAnswers::new()
            .with(fw("nis2"), vec![Answer::new("nis2-gov-1", "governance", 3).unwrap()]);
        assert_eq!(store.load_answers(&fw("nis2")).unwrap().len(), 1);
        assert!(store.load_answers(&fw("gdpr")).unwrap().is_empty());
    }

    #[test]
    fn answered_scores_scores_stored_answers() {
        let reg = registry();
        let store = InMemoryAnswers::new().with(
            fw("nis2"),
            vec![
                Answer::new("nis2-gov-1", "governance", 3).unwrap(),
                Answer::new("nis2-ac-1", "access-control", 0).unwrap(),
            ],
        );
        let scores = AnsweredScores::new(&reg, &store);
        assert_eq!(scores.overall_percentage(&fw("nis2")).unwrap(), Some(50.0));
        assert_eq!(scores.overall_percentage(&fw("dora")).unwrap(), None);
    }

    #[test]
    fn answered_scores_are_not_rounded() {
        let reg = registry();
        let store = InMemoryAnswers::new()
            .with(fw("nis2"), vec![Answer::new("nis2-gov-1", "governance", 1).unwrap()]);
        let scores = AnsweredScores::new(&reg, &store);
        let value = scores.overall_percentage(&fw("nis2")).unwrap().unwrap();
        assert!((value - 100.0 / 3.0).abs() < 1e-9);
        assert_ne!(value, 33.3);
    }

    #[test]
    fn answered_scores_propagates_source_failure() {
        #[derive(Debug, PartialEq)]
        struct Down;
        let reg = registry();
        let failing = |_: &FrameworkId| -> Result<Vec<Answer>, Down> { Err(Down) };
        let scores = AnsweredScores::new(&reg, &failing);
        let err = scores.overall_percentage(&fw("nis2")).unwrap_err();
        assert_eq!(err.source_error(), Some(&Down));
    }

    #[test]
    fn answered_scores_rejects_unknown_framework() {
        let reg = registry();
        let store = InMemoryAnswers::new();
        let scores = AnsweredScores::new(&reg, &store);
        assert!(matches!(
            scores.overall_percentage(&fw("pci")).unwrap_err(),
            LookupError::Engine(_)
        ));
    }
}
