//! Prediction records

use serde::{Deserialize, Serialize};
use std::fmt;

/// Verdict attached to a prediction record.
///
/// `Safe` and `Malicious` come from the classifier; `Error` marks a batch
/// row whose classification failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Safe,
    Malicious,
    Error,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Safe => write!(f, "Safe"),
            Verdict::Malicious => write!(f, "Malicious"),
            Verdict::Error => write!(f, "Error"),
        }
    }
}

/// One classified URL, as stored in the session history.
///
/// Immutable once created. `confidence` is the maximum class probability
/// as a percentage, rounded to 2 decimals (0.0 for `Error` rows).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub url: String,
    pub label: Verdict,
    pub confidence: f64,
}

impl PredictionRecord {
    pub fn new(url: impl Into<String>, label: Verdict, confidence: f64) -> Self {
        Self {
            url: url.into(),
            label,
            confidence,
        }
    }

    /// Record for a batch row whose classification failed.
    pub fn error_row(url: impl Into<String>) -> Self {
        Self::new(url, Verdict::Error, 0.0)
    }
}
