//! Detection logic: feature extraction, classification, batch parsing.

pub mod batch;
pub mod classifier;
pub mod features;

pub use classifier::{Classification, ClassifierError, Label, LogisticModel, UrlClassifier};
pub use features::{FeatureVector, FEATURE_COUNT};
