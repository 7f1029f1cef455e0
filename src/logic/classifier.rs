//! Classifier adapter.
//!
//! Handlers only see the [`UrlClassifier`] trait; the concrete model is a
//! pre-trained logistic regression loaded from a JSON artifact once at
//! startup. Swapping in another model (or a mock in tests) only requires
//! another trait impl.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use super::features::{FeatureVector, FEATURE_COUNT};
use crate::models::Verdict;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("failed to read model artifact {path}: {source}")]
    Artifact {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid model artifact: {0}")]
    Format(String),

    #[error("non-finite value in classifier input")]
    NonFiniteInput,
}

/// Binary class label produced by the classifier.
///
/// Class 1 at training time means "safe", class 0 means "malicious".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Safe,
    Malicious,
}

impl From<Label> for Verdict {
    fn from(label: Label) -> Self {
        match label {
            Label::Safe => Verdict::Safe,
            Label::Malicious => Verdict::Malicious,
        }
    }
}

/// Classification output: label plus confidence percentage.
///
/// `confidence` is the maximum class probability × 100, rounded to 2
/// decimals, so it is always in [50.0, 100.0] for a binary model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub label: Label,
    pub confidence: f64,
}

/// Narrow interface over the pre-trained model.
pub trait UrlClassifier: Send + Sync {
    fn classify(&self, features: &FeatureVector) -> Result<Classification, ClassifierError>;
}

/// Per-feature standardization parameters captured at training time.
#[derive(Debug, Clone, Deserialize)]
pub struct Scaler {
    pub means: [f64; FEATURE_COUNT],
    pub stds: [f64; FEATURE_COUNT],
}

/// Logistic regression over the seven lexical features.
///
/// The artifact is JSON with `bias`, `weights` (training feature order)
/// and an optional `scaler`. Loaded once in `main` and shared read-only.
#[derive(Debug, Clone, Deserialize)]
pub struct LogisticModel {
    pub bias: f64,
    pub weights: [f64; FEATURE_COUNT],
    #[serde(default)]
    pub scaler: Option<Scaler>,
}

impl LogisticModel {
    /// Load and validate the model artifact.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ClassifierError::Artifact {
            path: path.display().to_string(),
            source,
        })?;
        let model: LogisticModel =
            serde_json::from_str(&raw).map_err(|e| ClassifierError::Format(e.to_string()))?;
        model.validate()?;
        Ok(model)
    }

    fn validate(&self) -> Result<(), ClassifierError> {
        if !self.bias.is_finite() || self.weights.iter().any(|w| !w.is_finite()) {
            return Err(ClassifierError::Format(
                "non-finite weight in artifact".to_string(),
            ));
        }
        if let Some(scaler) = &self.scaler {
            if scaler
                .means
                .iter()
                .chain(scaler.stds.iter())
                .any(|v| !v.is_finite())
            {
                return Err(ClassifierError::Format(
                    "non-finite scaler parameter in artifact".to_string(),
                ));
            }
        }
        Ok(())
    }
}

impl UrlClassifier for LogisticModel {
    fn classify(&self, features: &FeatureVector) -> Result<Classification, ClassifierError> {
        let mut x = features.as_array();
        if x.iter().any(|v| !v.is_finite()) {
            return Err(ClassifierError::NonFiniteInput);
        }

        if let Some(scaler) = &self.scaler {
            for i in 0..FEATURE_COUNT {
                x[i] = (x[i] - scaler.means[i]) / scaler.stds[i].max(1e-12);
            }
        }

        let score: f64 = self.bias
            + x.iter()
                .zip(self.weights.iter())
                .map(|(xi, wi)| xi * wi)
                .sum::<f64>();
        let p_safe = sigmoid(score);
        if !p_safe.is_finite() {
            return Err(ClassifierError::NonFiniteInput);
        }

        let (label, p_max) = if p_safe >= 0.5 {
            (Label::Safe, p_safe)
        } else {
            (Label::Malicious, 1.0 - p_safe)
        };

        Ok(Classification {
            label,
            confidence: round2(p_max * 100.0),
        })
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Round to 2 decimal places (percent display precision).
fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_model(bias: f64) -> LogisticModel {
        LogisticModel {
            bias,
            weights: [0.0; FEATURE_COUNT],
            scaler: None,
        }
    }

    #[test]
    fn positive_score_maps_to_safe() {
        let features = FeatureVector::extract("https://example.com");
        let result = unit_model(2.0).classify(&features).unwrap();
        assert_eq!(result.label, Label::Safe);
        // sigmoid(2.0) = 0.8808 -> 88.08%
        assert_eq!(result.confidence, 88.08);
    }

    #[test]
    fn negative_score_maps_to_malicious() {
        let features = FeatureVector::extract("http://x");
        let result = unit_model(-2.0).classify(&features).unwrap();
        assert_eq!(result.label, Label::Malicious);
        assert_eq!(result.confidence, 88.08);
    }

    #[test]
    fn confidence_is_max_class_probability() {
        let features = FeatureVector::extract("");
        let result = unit_model(0.0).classify(&features).unwrap();
        // p = 0.5 exactly: label ties break toward Safe, confidence 50%.
        assert_eq!(result.label, Label::Safe);
        assert_eq!(result.confidence, 50.0);
    }

    #[test]
    fn confidence_is_bounded() {
        let model = LogisticModel {
            bias: 0.3,
            weights: [-0.04, -0.1, -0.2, 1.2, -0.4, -1.5, -0.7],
            scaler: None,
        };
        for url in ["https://example.com", "http://free-login-bank.ru/verify", ""] {
            let result = model.classify(&FeatureVector::extract(url)).unwrap();
            assert!(result.confidence >= 50.0 && result.confidence <= 100.0);
        }
    }

    #[test]
    fn non_finite_input_is_rejected() {
        let mut features = FeatureVector::extract("http://x");
        features.entropy = f64::NAN;
        let err = unit_model(0.0).classify(&features).unwrap_err();
        assert!(matches!(err, ClassifierError::NonFiniteInput));
    }

    #[test]
    fn scaler_is_applied() {
        let model = LogisticModel {
            bias: 0.0,
            weights: [1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            scaler: Some(Scaler {
                means: [10.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
                stds: [5.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
            }),
        };
        // url_length 15 -> standardized (15-10)/5 = 1.0 -> sigmoid(1.0)
        let features = FeatureVector::extract("aaaaaaaaaaaaaaa");
        let result = model.classify(&features).unwrap();
        assert_eq!(result.label, Label::Safe);
        assert_eq!(result.confidence, 73.11);
    }

    #[test]
    fn missing_artifact_is_a_typed_error() {
        let err = LogisticModel::load("/nonexistent/model.json").unwrap_err();
        assert!(matches!(err, ClassifierError::Artifact { .. }));
    }

    #[test]
    fn malformed_artifact_is_rejected() {
        let dir = std::env::temp_dir().join("phishguard-classifier-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad_model.json");
        std::fs::write(&path, "{\"bias\": 1.0}").unwrap();
        let err = LogisticModel::load(&path).unwrap_err();
        assert!(matches!(err, ClassifierError::Format(_)));
    }
}
