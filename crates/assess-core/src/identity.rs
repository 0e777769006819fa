//! # Identity Newtypes
//!
//! Identifier newtypes for every configured item. Each identifier is a
//! distinct type, so you cannot pass a [`QuestionId`] where a
//! [`RecommendationId`] is expected.
//!
//! ## Validation
//!
//! All identifiers are opaque strings scoped by the configuration that
//! declares them. The only constraint is non-emptiness, enforced both by
//! `new()` and by deserialization, so a YAML table with `id: ""` fails to
//! load instead of producing an unaddressable item.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Create the identifier, rejecting empty or whitespace-only input.
            ///
            /// # Errors
            ///
            /// Returns [`ValidationError::EmptyIdentifier`] for blank input.
            pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
                let s = value.into();
                if s.trim().is_empty() {
                    return Err(ValidationError::EmptyIdentifier { kind: $kind });
                }
                Ok(Self(s))
            }

            /// Access the identifier string.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// A regulatory framework being assessed (e.g. `nis2`, `dora`).
    FrameworkId,
    "framework ID"
);

string_id!(
    /// A question category, scoped to one framework.
    CategoryId,
    "category ID"
);

string_id!(
    /// A maturity or quick-check question, scoped to one framework.
    QuestionId,
    "question ID"
);

string_id!(
    /// A remediation recommendation, scoped to one framework.
    RecommendationId,
    "recommendation ID"
);

string_id!(
    /// A classification rule, scoped to one framework's rule table.
    RuleId,
    "rule ID"
);

string_id!(
    /// A pillar (or pillar component) grouping several frameworks.
    PillarId,
    "pillar ID"
);
