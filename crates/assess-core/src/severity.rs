//! # Severity Thresholds and Percentage Rounding
//!
//! The one piece of cross-cutting "wire format" in the platform. Every
//! percentage the engine emits is rounded here, and every severity band is
//! derived here from the rounded value, so a consumer re-deriving the band
//! from the number it displays always agrees with the engine.
//!
//! | Percentage | Severity |
//! |------------|----------|
//! | `< 40`     | red      |
//! | `< 70`     | yellow   |
//! | otherwise  | green    |

use serde::{Deserialize, Serialize};

/// Percentages strictly below this are red.
pub const RED_BELOW: f64 = 40.0;

/// Percentages strictly below this (and not red) are yellow.
pub const YELLOW_BELOW: f64 = 70.0;

/// Three-state traffic-light signal derived from a percentage.
///
/// Ordered worst first, so `Red < Yellow < Green`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Below 40%.
    Red,
    /// 40% up to (excluding) 70%.
    Yellow,
    /// 70% and above.
    Green,
}

impl Severity {
    /// Map a percentage onto the fixed platform thresholds.
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage < RED_BELOW {
            Self::Red
        } else if percentage < YELLOW_BELOW {
            Self::Yellow
        } else {
            Self::Green
        }
    }

    /// The snake_case identifier, matching serde.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Yellow => "yellow",
            Self::Green => "green",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Round a percentage to one decimal place, half-up.
///
/// Apply once, at the point of output. Aggregation runs on full precision.
pub fn round_percentage(value: f64) -> f64 {
    (value * 10.0 + 0.5).floor() / 10.0
}
