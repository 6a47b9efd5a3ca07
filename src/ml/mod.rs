//! ML Prediction Module
//!
//! The trained classifier is an opaque artifact behind the
//! `OutbreakClassifier` trait; `service` decides between it and the
//! rule-based scorer. Swapping artifact formats means a new trait impl,
//! nothing else changes.

pub mod features;
pub mod onnx;
pub mod service;

pub use service::PredictionService;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("classifier runtime error: {0}")]
    Runtime(String),

    #[error("classifier output malformed: {0}")]
    BadOutput(String),
}

/// Binary outbreak classifier over the fixed 19-feature input.
///
/// Implementations must be safe for concurrent calls; the service never
/// mutates a classifier after construction.
pub trait OutbreakClassifier: Send + Sync {
    /// Human-readable model name for status reporting
    fn name(&self) -> &str;

    /// Binary outbreak label (0 = low risk, 1 = high risk)
    fn predict(&self, features: &[f32; features::FEATURE_COUNT]) -> Result<i64, InferenceError>;

    /// Class-probability vector indexed by class label
    fn predict_proba(
        &self,
        features: &[f32; features::FEATURE_COUNT],
    ) -> Result<Vec<f64>, InferenceError>;
}
