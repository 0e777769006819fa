//! # Classification Rule DSL
//!
//! A framework's classification logic is data: an ordered list of
//! `(condition, outcome)` pairs. One interpreter (in `assess-engine`)
//! evaluates any table, so adding a rule never touches evaluation code.
//!
//! ## Missing attributes
//!
//! Every leaf condition evaluates to `false` when the attribute it reads is
//! absent or `null`. There is no negation operator, so filling in a missing
//! attribute can only make more rules match, never fewer. A rule that needs
//! "flag is explicitly false" says so with [`Condition::Equals`].
//!
//! ## Wrong types
//!
//! A present attribute of the wrong JSON type for [`Condition::Flag`],
//! [`Condition::AtLeast`] or [`Condition::Below`] is a caller error
//! ([`ValidationError::AttributeType`]), not a silent `false`.
//!
//! ## YAML form
//!
//! ```yaml
//! classification:
//!   - id: essential-large
//!     when:
//!       all:
//!         - one_of: { attribute: sector, values: [energy, transport] }
//!         - at_least: { attribute: employees, value: 250 }
//!     outcome:
//!       category: essential
//!       legal_reference: "Art. 3(1)(a)"
//!       reason_key: nis2.classification.essential_large
//!   - id: not-in-scope
//!     when: always
//!     outcome: { category: not_in_scope, legal_reference: "Art. 2", reason_key: nis2.classification.out }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use assess_core::{ConfigurationError, EntityProfile, FrameworkId, RuleId, ValidationError};

/// One entry in a classification table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRule {
    /// Rule identifier, unique within the table.
    pub id: RuleId,
    /// Predicate over the entity profile. Written as single-key maps
    /// (`{flag: x}`, `all: [...]`) in YAML as well as JSON.
    #[serde(with = "serde_yaml::with::singleton_map_recursive")]
    pub when: Condition,
    /// What the entity is classified as if this is the first matching rule.
    pub outcome: ClassificationOutcome,
}

/// The result payload attached to a rule. All strings are opaque keys or
/// references and pass through the engine unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationOutcome {
    /// Legal category key (e.g. `essential`, `important`, `not_in_scope`).
    pub category: String,
    /// Legal basis for the classification.
    pub legal_reference: String,
    /// Label key explaining why the rule matched.
    pub reason_key: String,
    /// Label keys of simplified requirements that apply to this category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simplified_requirements: Option<Vec<String>>,
    /// Label key of a proportionality note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proportionality_note: Option<String>,
}

/// Predicate over an [`EntityProfile`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// Always true. Only valid as the last rule of a table.
    Always,
    /// Boolean attribute is `true`. Missing reads as false; a non-boolean
    /// value is an attribute type error.
    Flag(String),
    /// Attribute equals the value. Numbers compare numerically. Missing
    /// reads as false; other type differences are simply unequal.
    Equals {
        /// Attribute name.
        attribute: String,
        /// Expected value.
        value: Value,
    },
    /// Attribute equals any of the values. Missing reads as false.
    OneOf {
        /// Attribute name.
        attribute: String,
        /// Accepted values.
        values: Vec<Value>,
    },
    /// Numeric attribute `>= value`. Missing reads as false; a non-number is
    /// an attribute type error.
    AtLeast {
        /// Attribute name.
        attribute: String,
        /// Inclusive lower bound.
        value: f64,
    },
    /// Numeric attribute `< value`. Missing reads as false; a non-number is
    /// an attribute type error.
    Below {
        /// Attribute name.
        attribute: String,
        /// Exclusive upper bound.
        value: f64,
    },
    /// Every sub-condition holds. Empty is true.
    All(Vec<Condition>),
    /// At least one sub-condition holds. Empty is false.
    Any(Vec<Condition>),
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}

fn numeric(profile: &EntityProfile, attribute: &str) -> Result<Option<f64>, ValidationError> {
    match profile.get(attribute) {
        None => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(other) => Err(ValidationError::AttributeType {
            attribute: attribute.to_string(),
            expected: "number",
            found: json_type(other),
        }),
    }
}

impl Condition {
    /// Evaluate against a profile.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::AttributeType`] when a present attribute
    /// has the wrong JSON type for a typed comparison.
    pub fn evaluate(&self, profile: &EntityProfile) -> Result<bool, ValidationError> {
        match self {
            Self::Always => Ok(true),
            Self::Flag(attribute) => match profile.get(attribute) {
                None => Ok(false),
                Some(Value::Bool(b)) => Ok(*b),
                Some(other) => Err(ValidationError::AttributeType {
                    attribute: attribute.clone(),
                    expected: "boolean",
                    found: json_type(other),
                }),
            },
            Self::Equals { attribute, value } => {
                Ok(profile.get(attribute).is_some_and(|v| values_equal(v, value)))
            }
            Self::OneOf { attribute, values } => Ok(profile
                .get(attribute)
                .is_some_and(|v| values.iter().any(|candidate| values_equal(v, candidate)))),
            Self::AtLeast { attribute, value } => {
                Ok(numeric(profile, attribute)?.is_some_and(|n| n >= *value))
            }
            Self::Below { attribute, value } => {
                Ok(numeric(profile, attribute)?.is_some_and(|n| n < *value))
            }
            Self::All(conditions) => {
                for c in conditions {
                    if !c.evaluate(profile)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Self::Any(conditions) => {
                for c in conditions {
                    if c.evaluate(profile)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }

    /// Whether this is the unconditional fallback.
    pub fn is_always(&self) -> bool {
        matches!(self, Self::Always)
    }

    /// Attribute names this condition reads, in first-seen order.
    pub fn attributes(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_attributes(&mut out);
        out
    }

    fn collect_attributes<'a>(&'a self, out: &mut Vec<&'a str>) {
        let name: &'a str = match self {
            Self::Always => return,
            Self::Flag(a) => a,
            Self::Equals { attribute, .. }
            | Self::OneOf { attribute, .. }
            | Self::AtLeast { attribute, .. }
            | Self::Below { attribute, .. } => attribute,
            Self::All(cs) | Self::Any(cs) => {
                for c in cs {
                    c.collect_attributes(out);
                }
                return;
            }
        };
        if !out.contains(&name) {
            out.push(name);
        }
    }
}

/// Check the structural contract of a classification table: non-empty,
/// unique rule ids, exactly one `always` rule, and that rule is last.
pub fn validate_rule_table(
    framework: &FrameworkId,
    rules: &[ClassificationRule],
) -> Result<(), ConfigurationError> {
    let malformed = |detail: String| ConfigurationError::MalformedRules {
        framework: framework.to_string(),
        detail,
    };

    let Some(last) = rules.last() else {
        return Err(malformed("rule table is empty".into()));
    };
    if !last.when.is_always() {
        return Err(malformed(format!(
            "last rule {:?} must be the unconditional `always` fallback",
            last.id.as_str()
        )));
    }
    if let Some(early) = rules[..rules.len() - 1].iter().find(|r| r.when.is_always()) {
        return Err(malformed(format!(
            "rule {:?} is unconditional but not last; later rules are unreachable",
            early.id.as_str()
        )));
    }
    let mut seen = std::collections::HashSet::new();
    for rule in rules {
        if !seen.insert(&rule.id) {
            return Err(ConfigurationError::DuplicateId {
                kind: "classification rule",
                id: format!("{framework}/{}", rule.id),
            });
        }
    }
    Ok(())
}
