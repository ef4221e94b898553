//! Endo highlight levels for the render layer.
//!
//! Styling is a pure function of a value and two thresholds; rows do not
//! carry it.

use riven_core::config::DisplayConfig;
use serde::Serialize;

/// Highlight level of an Endo value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Highlight {
    /// Below the first threshold.
    None,
    /// At or above the first threshold.
    Notable,
    /// At or above the second threshold.
    Exceptional,
}

impl Highlight {
    /// Classify a value against two thresholds.
    pub fn for_value(value: i64, threshold_1: i64, threshold_2: i64) -> Self {
        if value >= threshold_2 {
            Highlight::Exceptional
        } else if value >= threshold_1 {
            Highlight::Notable
        } else {
            Highlight::None
        }
    }

    /// Classify an Endo value with the configured thresholds.
    pub fn classify(endo: i64, display: &DisplayConfig) -> Self {
        Self::for_value(endo, display.highlight_threshold_1, display.highlight_threshold_2)
    }

    /// One-character marker for plain-text tables.
    pub fn marker(self) -> &'static str {
        match self {
            Highlight::None => " ",
            Highlight::Notable => "*",
            Highlight::Exceptional => "!",
        }
    }
}
