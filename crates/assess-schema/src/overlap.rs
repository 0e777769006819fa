//! Pairwise framework overlap table.

use serde::{Deserialize, Serialize};

use assess_core::FrameworkId;

/// Undirected overlap between two frameworks. At most one entry exists per
/// unordered pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlapMapping {
    /// One side of the pair.
    pub framework_a: FrameworkId,
    /// The other side.
    pub framework_b: FrameworkId,
    /// Share of controls in common, 0–100.
    pub overlap_percent: u8,
    /// Label keys of the measures both frameworks require.
    #[serde(default)]
    pub shared_measures: Vec<String>,
}

impl OverlapMapping {
    /// Whether `framework` is either side of the pair.
    pub fn involves(&self, framework: &FrameworkId) -> bool {
        &self.framework_a == framework || &self.framework_b == framework
    }

    /// The side opposite `framework`, or `None` if it is not in the pair.
    pub fn other_side(&self, framework: &FrameworkId) -> Option<&FrameworkId> {
        if &self.framework_a == framework {
            Some(&self.framework_b)
        } else if &self.framework_b == framework {
            Some(&self.framework_a)
        } else {
            None
        }
    }

    /// Order-independent key for the pair.
    pub fn pair_key(&self) -> (&FrameworkId, &FrameworkId) {
        if self.framework_a <= self.framework_b {
            (&self.framework_a, &self.framework_b)
        } else {
            (&self.framework_b, &self.framework_a)
        }
    }
}

/// Contents of `overlaps.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlapTable {
    /// All pairwise mappings.
    #[serde(default)]
    pub overlaps: Vec<OverlapMapping>,
}
