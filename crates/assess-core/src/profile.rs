//! # Entity Profile
//!
//! The flat attribute record that classification rules read: size, sector,
//! and flags such as "critical infrastructure operator". The attribute set
//! is framework-specific, so the profile is an opaque ordered map of JSON
//! values rather than a struct.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Entity attributes keyed by name.
///
/// A `null` value is indistinguishable from an absent key: both read as
/// missing through [`EntityProfile::get`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityProfile(BTreeMap<String, Value>);

impl EntityProfile {
    /// An empty profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(attribute, value);
        self
    }

    /// Set an attribute, replacing any previous value.
    pub fn insert(&mut self, attribute: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(attribute.into(), value.into());
    }

    /// Look up an attribute. Absent and `null` both return `None`.
    pub fn get(&self, attribute: &str) -> Option<&Value> {
        self.0.get(attribute).filter(|v| !v.is_null())
    }

    /// Number of attributes (including `null` ones).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the profile has no attributes at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate attributes in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for EntityProfile {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
