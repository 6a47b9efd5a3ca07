//! Prediction Service
//!
//! Dispatches each request to the trained classifier when one is loaded,
//! falling back to the rule-based scorer otherwise. Built once at
//! startup and shared read-only across handlers; a classifier failure
//! affects only the request it happened on.

use chrono::Utc;
use tracing::{debug, warn};

use crate::config::Config;
use crate::models::{OutbreakPrediction, PredictionRequest, RiskLevel};
use crate::risk::scorer;
use super::features;
use super::onnx::OnnxClassifier;
use super::{InferenceError, OutbreakClassifier};

pub struct PredictionService {
    classifier: Option<Box<dyn OutbreakClassifier>>,
}

impl PredictionService {
    /// Build the service, attempting to load the configured artifact.
    ///
    /// A missing or corrupt artifact is not fatal: the service runs in
    /// fallback-only mode for the process lifetime.
    pub fn from_config(config: &Config) -> Self {
        match OnnxClassifier::load(&config.model_path) {
            Ok(classifier) => Self {
                classifier: Some(Box::new(classifier)),
            },
            Err(e) => {
                warn!(
                    path = %config.model_path,
                    error = %e,
                    "Classifier model unavailable, using rule-based fallback"
                );
                Self { classifier: None }
            }
        }
    }

    /// Build the service around an already-constructed classifier.
    pub fn with_classifier(classifier: Box<dyn OutbreakClassifier>) -> Self {
        Self {
            classifier: Some(classifier),
        }
    }

    /// Build the service without any classifier.
    pub fn fallback_only() -> Self {
        Self { classifier: None }
    }

    pub fn is_model_loaded(&self) -> bool {
        self.classifier.is_some()
    }

    pub fn model_name(&self) -> Option<&str> {
        self.classifier.as_deref().map(|c| c.name())
    }

    /// Predict outbreak risk for one validated parameter set.
    ///
    /// Never fails: any classifier error is logged and the rule-based
    /// scorer answers instead. The classifier stays loaded for
    /// subsequent requests.
    pub fn predict(&self, req: &PredictionRequest) -> OutbreakPrediction {
        if let Some(classifier) = &self.classifier {
            match classifier_prediction(classifier.as_ref(), req) {
                Ok(prediction) => return prediction,
                Err(e) => {
                    warn!(
                        model = classifier.name(),
                        error = %e,
                        "Classifier inference failed, falling back to rule-based scoring"
                    );
                }
            }
        }

        let prediction = scorer::score(req);
        debug!(
            probability = prediction.risk_probability,
            level = ?prediction.risk_level,
            "Rule-based prediction"
        );
        prediction
    }
}

fn classifier_prediction(
    classifier: &dyn OutbreakClassifier,
    req: &PredictionRequest,
) -> Result<OutbreakPrediction, InferenceError> {
    let features = features::encode(req);

    let label = classifier.predict(&features)?;
    let proba = classifier.predict_proba(&features)?;

    // Probability of the positive (high-risk) class
    let risk_probability = proba
        .get(1)
        .copied()
        .ok_or_else(|| InferenceError::BadOutput("missing class-1 probability".to_string()))?;
    let confidence = proba.iter().copied().fold(0.0_f64, f64::max);

    let outbreak_risk = if label != 0 { 1 } else { 0 };

    Ok(OutbreakPrediction {
        outbreak_risk,
        risk_probability,
        risk_level: RiskLevel::from_probability(risk_probability),
        confidence,
        recommendations: scorer::recommendations(outbreak_risk, risk_probability, req),
        timestamp: Utc::now(),
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IndianState, Season};

    struct StubClassifier {
        label: i64,
        proba: Vec<f64>,
    }

    impl OutbreakClassifier for StubClassifier {
        fn name(&self) -> &str {
            "stub"
        }

        fn predict(&self, _: &[f32; features::FEATURE_COUNT]) -> Result<i64, InferenceError> {
            Ok(self.label)
        }

        fn predict_proba(
            &self,
            _: &[f32; features::FEATURE_COUNT],
        ) -> Result<Vec<f64>, InferenceError> {
            Ok(self.proba.clone())
        }
    }

    struct FailingClassifier;

    impl OutbreakClassifier for FailingClassifier {
        fn name(&self) -> &str {
            "failing"
        }

        fn predict(&self, _: &[f32; features::FEATURE_COUNT]) -> Result<i64, InferenceError> {
            Err(InferenceError::Runtime("synthetic failure".to_string()))
        }

        fn predict_proba(
            &self,
            _: &[f32; features::FEATURE_COUNT],
        ) -> Result<Vec<f64>, InferenceError> {
            Err(InferenceError::Runtime("synthetic failure".to_string()))
        }
    }

    fn request() -> PredictionRequest {
        PredictionRequest {
            state: IndianState::Tripura,
            district: "Gomati".to_string(),
            season: Season::PostMonsoon,
            temperature: 28.0,
            ph: 7.1,
            conductivity: 420.0,
            tds: 260.0,
            turbidity: 1.5,
            alkalinity: 130.0,
            hardness: 160.0,
            chloride: 35.0,
            fluoride: 0.6,
            nitrate: 6.0,
            sulphate: 22.0,
            iron: 0.1,
            arsenic: 0.0,
            bod: 2.2,
            dissolved_oxygen: 6.8,
            coliform_fecal: 0.0,
        }
    }

    #[test]
    fn test_classifier_path_uses_model_outputs() {
        let service = PredictionService::with_classifier(Box::new(StubClassifier {
            label: 1,
            proba: vec![0.35, 0.65],
        }));

        let prediction = service.predict(&request());

        assert_eq!(prediction.outbreak_risk, 1);
        assert_eq!(prediction.risk_probability, 0.65);
        assert_eq!(prediction.risk_level, RiskLevel::High);
        // Confidence is the max over the probability vector
        assert_eq!(prediction.confidence, 0.65);
        // Outbreak flag drives the high-risk recommendation set
        assert!(prediction.recommendations.len() >= 4);
    }

    #[test]
    fn test_classifier_label_can_disagree_with_threshold() {
        // The model's own binary output wins even below 0.5
        let service = PredictionService::with_classifier(Box::new(StubClassifier {
            label: 1,
            proba: vec![0.55, 0.45],
        }));

        let prediction = service.predict(&request());
        assert_eq!(prediction.outbreak_risk, 1);
        assert_eq!(prediction.risk_probability, 0.45);
        assert_eq!(prediction.confidence, 0.55);
    }

    #[test]
    fn test_failure_falls_back_to_rule_scoring() {
        let service = PredictionService::with_classifier(Box::new(FailingClassifier));
        let req = request();

        let via_service = service.predict(&req);
        let via_scorer = scorer::score(&req);

        assert_eq!(via_service.outbreak_risk, via_scorer.outbreak_risk);
        assert_eq!(via_service.risk_probability, via_scorer.risk_probability);
        assert_eq!(via_service.risk_level, via_scorer.risk_level);
        assert_eq!(via_service.confidence, via_scorer.confidence);
        assert_eq!(via_service.recommendations, via_scorer.recommendations);

        // Failure is per-call: the classifier stays loaded
        assert!(service.is_model_loaded());
        let again = service.predict(&req);
        assert_eq!(again.risk_probability, via_scorer.risk_probability);
    }

    #[test]
    fn test_no_classifier_delegates_to_scorer() {
        let service = PredictionService::fallback_only();
        let mut req = request();
        req.coliform_fecal = 10.0;

        let prediction = service.predict(&req);
        assert!(!service.is_model_loaded());
        assert_eq!(prediction.risk_probability, 0.40);
        assert_eq!(prediction.confidence, 0.75);
    }

    #[test]
    fn test_malformed_probability_vector_falls_back() {
        // A single-class vector has no class-1 probability
        let service = PredictionService::with_classifier(Box::new(StubClassifier {
            label: 0,
            proba: vec![1.0],
        }));
        let req = request();

        let via_service = service.predict(&req);
        let via_scorer = scorer::score(&req);
        assert_eq!(via_service.risk_probability, via_scorer.risk_probability);
        assert_eq!(via_service.confidence, via_scorer.confidence);
    }
}
