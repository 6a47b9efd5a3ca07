//! Rule-based Risk Scorer
//!
//! Pure scoring logic: one validated parameter set in, one risk assessment
//! out. Deterministic, no side effects, never fails.

use chrono::Utc;

use crate::models::{OutbreakPrediction, PredictionRequest, RiskLevel};
use super::rules;

/// Additive rule score with the factors that triggered it
#[derive(Debug, Clone, PartialEq)]
pub struct RuleScore {
    /// Clamped to [0, 1]
    pub probability: f64,
    pub factors: Vec<&'static str>,
}

/// Evaluate the additive contamination rules.
///
/// Each rule contributes its weight independently; factors do not
/// interact. The weights sum to 1.0, so the final clamp is a safety net.
pub fn evaluate_rules(req: &PredictionRequest) -> RuleScore {
    let mut score = 0.0;
    let mut factors = Vec::new();

    if req.coliform_fecal > 0.0 {
        score += rules::FECAL_COLIFORM_WEIGHT;
        factors.push("Fecal coliform detected");
    }

    if ph_out_of_range(req.ph) {
        score += rules::PH_WEIGHT;
        factors.push("pH outside safe range");
    }

    if req.turbidity > rules::TURBIDITY_LIMIT {
        score += rules::TURBIDITY_WEIGHT;
        factors.push("High turbidity");
    }

    if req.nitrate > rules::NITRATE_LIMIT {
        score += rules::NITRATE_WEIGHT;
        factors.push("High nitrate levels");
    }

    if req.iron > rules::IRON_LIMIT {
        score += rules::IRON_WEIGHT;
        factors.push("Elevated iron content");
    }

    if req.arsenic > rules::ARSENIC_LIMIT {
        score += rules::ARSENIC_WEIGHT;
        factors.push("Arsenic contamination");
    }

    RuleScore {
        probability: score.min(1.0),
        factors,
    }
}

/// Score a parameter set with the contamination rules.
pub fn score(req: &PredictionRequest) -> OutbreakPrediction {
    let rule = evaluate_rules(req);

    // Strictly greater: a probability of exactly 0.5 does not raise the flag
    let outbreak_risk = if rule.probability > rules::OUTBREAK_THRESHOLD { 1 } else { 0 };

    OutbreakPrediction {
        outbreak_risk,
        risk_probability: rule.probability,
        risk_level: RiskLevel::from_probability(rule.probability),
        confidence: rules::RULE_CONFIDENCE,
        recommendations: recommendations(outbreak_risk, rule.probability, req),
        timestamp: Utc::now(),
    }
}

/// Generate the recommendation list for a prediction.
///
/// Order is fixed: standing items first, then targeted items in rule
/// order, then the emergency item. Shared by the rule-based and
/// classifier paths.
pub fn recommendations(
    outbreak_risk: u8,
    probability: f64,
    req: &PredictionRequest,
) -> Vec<String> {
    let mut out = Vec::new();

    if outbreak_risk == 1 || probability > rules::OUTBREAK_THRESHOLD {
        out.extend(
            [
                "Immediate water quality testing recommended",
                "Alert local ASHA workers and health officials",
                "Consider implementing water treatment measures",
                "Monitor local population for disease symptoms",
            ]
            .map(String::from),
        );

        if req.coliform_fecal > 0.0 {
            out.push("Urgent: Fecal contamination detected - boil water before consumption".to_string());
        }

        if ph_out_of_range(req.ph) {
            out.push("pH correction needed - water treatment required".to_string());
        }

        if req.turbidity > rules::TURBIDITY_LIMIT {
            out.push("High turbidity - filtration and sedimentation needed".to_string());
        }

        if req.arsenic > rules::ARSENIC_LIMIT {
            out.push("Arsenic contamination - alternative water source required".to_string());
        }

        if probability > rules::EMERGENCY_THRESHOLD {
            out.push("CRITICAL: Consider emergency response protocols".to_string());
        }
    } else {
        out.extend(
            [
                "Continue regular monitoring",
                "Maintain current water treatment practices",
                "Schedule routine water quality testing",
            ]
            .map(String::from),
        );
    }

    out
}

fn ph_out_of_range(ph: f64) -> bool {
    ph < rules::PH_SAFE_MIN || ph > rules::PH_SAFE_MAX
}

// ============================================================================
// TESTS
// ============================================================================
