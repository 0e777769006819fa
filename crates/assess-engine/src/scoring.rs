//! # Scoring & Aggregation Engine
//!
//! Turns answers into per-category scores, an overall score and a severity
//! signal. Full assessments ([`score`]) and quick checks
//! ([`score_quick_check`]) differ only in how an answer becomes points and
//! which questions a category counts; both then go through one private
//! aggregation routine, so the two modes cannot drift apart.
//!
//! ## Aggregation
//!
//! - A category's percentage is the mean of its answered questions' points.
//!   Unanswered questions are excluded, not counted as 0.
//! - A category with no answers scores 0 / red and is left out of the
//!   overall mean entirely.
//! - The overall percentage is the unweighted mean of the answered
//!   categories' percentages, 0 when nothing is answered.
//! - Aggregation runs on full precision. Every percentage is rounded once,
//!   on output, to one decimal (half-up), and severity is derived from the
//!   rounded value.
//!
//! ## Input validation
//!
//! Answers are checked before anything is counted: an answer to a question
//! the framework does not declare, or filed under the wrong category,
//! rejects the whole batch. Levels outside 0..=3 cannot be constructed.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use assess_core::{
    round_percentage, Answer, CategoryId, QuestionId, QuickAnswer, Severity, Tier,
    ValidationError,
};
use assess_schema::FrameworkSchema;

/// Score for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category_id: CategoryId,
    /// Rounded percentage in [0, 100].
    pub percentage: f64,
    pub severity: Severity,
    pub answered_count: usize,
    pub total_count: usize,
}

/// Score for a whole assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallScore {
    /// Rounded mean of the answered categories' percentages.
    pub percentage: f64,
    pub severity: Severity,
    /// Every category in declaration order, answered or not.
    pub category_scores: Vec<CategoryScore>,
    pub answered_count: usize,
    pub total_count: usize,
    /// Answered share of all counted questions, rounded; 0 when there are
    /// no questions.
    pub completion_rate: f64,
}

/// Running totals for one category before rounding.
struct Tally {
    category_id: CategoryId,
    total: usize,
    answered: usize,
    points: f64,
}

impl Tally {
    fn new(category_id: CategoryId) -> Self {
        Self { category_id, total: 0, answered: 0, points: 0.0 }
    }

    fn count(&mut self, points: Option<f64>) {
        self.total += 1;
        if let Some(p) = points {
            self.answered += 1;
            self.points += p;
        }
    }

    fn raw_percentage(&self) -> Option<f64> {
        (self.answered > 0).then(|| self.points / self.answered as f64)
    }
}

/// Unrounded mean of the answered categories, `None` when nothing is
/// answered.
fn raw_overall(tallies: &[Tally]) -> Option<f64> {
    let raw: Vec<f64> = tallies.iter().filter_map(Tally::raw_percentage).collect();
    (!raw.is_empty()).then(|| raw.iter().sum::<f64>() / raw.len() as f64)
}

fn aggregate(tallies: Vec<Tally>) -> OverallScore {
    let percentage = round_percentage(raw_overall(&tallies).unwrap_or(0.0));
    let mut category_scores = Vec::with_capacity(tallies.len());
    let mut answered_count = 0;
    let mut total_count = 0;

    for tally in tallies {
        let raw = tally.raw_percentage();
        answered_count += tally.answered;
        total_count += tally.total;

        let rounded = round_percentage(raw.unwrap_or(0.0));
        category_scores.push(CategoryScore {
            category_id: tally.category_id,
            percentage: rounded,
            severity: Severity::from_percentage(rounded),
            answered_count: tally.answered,
            total_count: tally.total,
        });
    }

    let completion_rate = if total_count == 0 {
        0.0
    } else {
        round_percentage(answered_count as f64 / total_count as f64 * 100.0)
    };

    OverallScore {
        percentage,
        severity: Severity::from_percentage(percentage),
        category_scores,
        answered_count,
        total_count,
        completion_rate,
    }
}

/// Score a full maturity assessment, optionally restricted to one tier.
///
/// Answers to questions outside `tier` are ignored; the same question
/// answered twice counts once, with the later answer.
///
/// # Errors
///
/// [`ValidationError::UnknownQuestion`] or [`ValidationError::CategoryMismatch`]
/// for any answer that does not fit the framework. Nothing is scored then.
pub fn score(
    schema: &FrameworkSchema,
    answers: &[Answer],
    tier: Option<Tier>,
) -> Result<OverallScore, ValidationError> {
    let overall = aggregate(full_tallies(schema, answers, tier)?);
    tracing::debug!(
        framework = %schema.id,
        tier = tier.map(Tier::as_str).unwrap_or("all"),
        percentage = overall.percentage,
        answered = overall.answered_count,
        total = overall.total_count,
        "assessment scored"
    );
    Ok(overall)
}

/// The full-assessment overall percentage before output rounding, `None`
/// when no question is answered. Feeds composite scores that aggregate
/// further and round once themselves.
pub(crate) fn raw_overall_percentage(
    schema: &FrameworkSchema,
    answers: &[Answer],
) -> Result<Option<f64>, ValidationError> {
    Ok(raw_overall(&full_tallies(schema, answers, None)?))
}

fn full_tallies(
    schema: &FrameworkSchema,
    answers: &[Answer],
    tier: Option<Tier>,
) -> Result<Vec<Tally>, ValidationError> {
    let mut latest: HashMap<&QuestionId, f64> = HashMap::with_capacity(answers.len());
    for answer in answers {
        let (category, _) = schema.find_question(&answer.question_id).ok_or_else(|| {
            ValidationError::UnknownQuestion {
                framework: schema.id.to_string(),
                question: answer.question_id.to_string(),
            }
        })?;
        if category.id != answer.category_id {
            return Err(ValidationError::CategoryMismatch {
                question: answer.question_id.to_string(),
                expected: category.id.to_string(),
                actual: answer.category_id.to_string(),
            });
        }
        latest.insert(&answer.question_id, answer.level.points());
    }

    Ok(schema
        .categories
        .iter()
        .map(|category| {
            let mut tally = Tally::new(category.id.clone());
            for question in category.questions_in(tier) {
                tally.count(latest.get(&question.id).copied());
            }
            tally
        })
        .collect())
}

/// Score the abbreviated quick-check battery (`yes`/`partial`/`no` →
/// 100/50/0).
///
/// Only categories with at least one quick-check question appear in the
/// result.
///
/// # Errors
///
/// [`ValidationError::UnknownQuickCheckQuestion`] for an answer to a
/// question outside the battery.
pub fn score_quick_check(
    schema: &FrameworkSchema,
    answers: &[QuickAnswer],
) -> Result<OverallScore, ValidationError> {
    let mut latest: HashMap<&QuestionId, f64> = HashMap::with_capacity(answers.len());
    for answer in answers {
        if schema.quick_question(&answer.question_id).is_none() {
            return Err(ValidationError::UnknownQuickCheckQuestion {
                framework: schema.id.to_string(),
                question: answer.question_id.to_string(),
            });
        }
        latest.insert(&answer.question_id, answer.response.points());
    }

    let tallies = schema
        .categories
        .iter()
        .filter_map(|category| {
            let mut questions = schema
                .quick_check
                .iter()
                .filter(|q| q.category_id == category.id)
                .peekable();
            questions.peek()?;
            let mut tally = Tally::new(category.id.clone());
            for q in questions {
                tally.count(latest.get(&q.id).copied());
            }
            Some(tally)
        })
        .collect();

    let overall = aggregate(tallies);
    tracing::debug!(
        framework = %schema.id,
        percentage = overall.percentage,
        answered = overall.answered_count,
        "quick check scored"
    );
    Ok(overall)
}
