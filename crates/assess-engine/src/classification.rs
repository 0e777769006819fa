//! # Classification Engine
//!
//! One interpreter for every framework's rule table: walk the rules in
//! declared order and return the outcome of the first whose condition holds.
//! Validated tables end with an `always` rule, so a validated framework
//! always yields a result.
//!
//! Evaluation is pure. The same profile against the same table returns the
//! same [`ClassificationResult`] every time.

use serde::{Deserialize, Serialize};

use assess_core::{AssessError, ConfigurationError, EntityProfile, FrameworkId, RuleId};
use assess_schema::{ClassificationOutcome, ClassificationRule, Registry};

/// The legal category an entity falls into under one framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// The framework that was evaluated.
    pub framework: FrameworkId,
    /// The rule that matched.
    pub rule_id: RuleId,
    /// The matched rule's outcome keys, unchanged.
    #[serde(flatten)]
    pub outcome: ClassificationOutcome,
}

/// Return the first rule in `rules` whose condition holds for `profile`.
///
/// `None` only when the table lacks a matching fallback, which a validated
/// registry rules out.
///
/// # Errors
///
/// Propagates [`ValidationError::AttributeType`](assess_core::ValidationError::AttributeType)
/// from a mistyped profile attribute.
pub fn evaluate_rules<'r>(
    rules: &'r [ClassificationRule],
    profile: &EntityProfile,
) -> Result<Option<&'r ClassificationRule>, AssessError> {
    for rule in rules {
        if rule.when.evaluate(profile)? {
            return Ok(Some(rule));
        }
        tracing::trace!(rule = %rule.id, "classification rule did not match");
    }
    Ok(None)
}

/// Classify `profile` under `framework`.
///
/// # Errors
///
/// [`ConfigurationError::UnknownFramework`] for an unknown id, or a
/// validation error for a mistyped profile attribute.
pub fn classify(
    registry: &Registry,
    framework: &FrameworkId,
    profile: &EntityProfile,
) -> Result<ClassificationResult, AssessError> {
    let schema = registry.framework(framework)?;
    let rule = evaluate_rules(&schema.classification, profile)?.ok_or_else(|| {
        ConfigurationError::MalformedRules {
            framework: framework.to_string(),
            detail: "no rule matched; the `always` fallback is missing".into(),
        }
    })?;

    tracing::debug!(
        framework = %framework,
        rule = %rule.id,
        category = %rule.outcome.category,
        "classification rule matched"
    );
    Ok(ClassificationResult {
        framework: framework.clone(),
        rule_id: rule.id.clone(),
        outcome: rule.outcome.clone(),
    })
}
