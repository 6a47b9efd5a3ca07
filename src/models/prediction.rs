//! Prediction request/response models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Northeast Indian states covered by the monitoring network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndianState {
    Assam,
    Meghalaya,
    Manipur,
    Tripura,
    Mizoram,
    Nagaland,
    #[serde(rename = "Arunachal Pradesh")]
    ArunachalPradesh,
    Sikkim,
}

impl IndianState {
    /// Stable index used by the feature encoder
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn name(&self) -> &'static str {
        match self {
            IndianState::Assam => "Assam",
            IndianState::Meghalaya => "Meghalaya",
            IndianState::Manipur => "Manipur",
            IndianState::Tripura => "Tripura",
            IndianState::Mizoram => "Mizoram",
            IndianState::Nagaland => "Nagaland",
            IndianState::ArunachalPradesh => "Arunachal Pradesh",
            IndianState::Sikkim => "Sikkim",
        }
    }
}

/// Sampling season
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Season {
    #[serde(rename = "Pre-monsoon")]
    PreMonsoon,
    #[serde(rename = "Post-monsoon")]
    PostMonsoon,
}

impl Season {
    /// Stable index used by the feature encoder
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Discrete outbreak risk level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Critical,
}

impl RiskLevel {
    /// Map a risk probability to its discrete level.
    ///
    /// Boundary values belong to the higher bucket: 0.25 is moderate,
    /// 0.5 is high, 0.75 is critical.
    pub fn from_probability(probability: f64) -> Self {
        if probability < 0.25 {
            RiskLevel::Low
        } else if probability < 0.5 {
            RiskLevel::Moderate
        } else if probability < 0.75 {
            RiskLevel::High
        } else {
            RiskLevel::Critical
        }
    }
}

/// One water-quality observation submitted for outbreak-risk prediction.
///
/// All fields are required; numeric measurements are non-negative with
/// tighter bounds on temperature (0-50 °C) and pH (0-14).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PredictionRequest {
    pub state: IndianState,
    #[validate(length(min = 1, max = 100))]
    pub district: String,
    pub season: Season,

    // Physical parameters
    #[validate(range(min = 0.0, max = 50.0))]
    pub temperature: f64,
    #[serde(rename = "pH")]
    #[validate(range(min = 0.0, max = 14.0))]
    pub ph: f64,
    #[validate(range(min = 0.0))]
    pub conductivity: f64,
    #[serde(rename = "TDS")]
    #[validate(range(min = 0.0))]
    pub tds: f64,
    #[validate(range(min = 0.0))]
    pub turbidity: f64,

    // Chemical parameters
    #[validate(range(min = 0.0))]
    pub alkalinity: f64,
    #[validate(range(min = 0.0))]
    pub hardness: f64,
    #[validate(range(min = 0.0))]
    pub chloride: f64,
    #[validate(range(min = 0.0))]
    pub fluoride: f64,
    #[validate(range(min = 0.0))]
    pub nitrate: f64,
    #[validate(range(min = 0.0))]
    pub sulphate: f64,
    #[validate(range(min = 0.0))]
    pub iron: f64,
    #[validate(range(min = 0.0))]
    pub arsenic: f64,

    // Biological parameters
    #[serde(rename = "BOD")]
    #[validate(range(min = 0.0))]
    pub bod: f64,
    #[validate(range(min = 0.0))]
    pub dissolved_oxygen: f64,
    #[validate(range(min = 0.0))]
    pub coliform_fecal: f64,
}

/// Predicted outbreak risk for one observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutbreakPrediction {
    /// 0 for low risk, 1 for high risk
    pub outbreak_risk: u8,
    /// Probability of an outbreak, in [0, 1]
    pub risk_probability: f64,
    pub risk_level: RiskLevel,
    /// Model confidence, in [0, 1]
    pub confidence: f64,
    pub recommendations: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> PredictionRequest {
        PredictionRequest {
            state: IndianState::Assam,
            district: "Kamrup".to_string(),
            season: Season::PreMonsoon,
            temperature: 25.0,
            ph: 7.0,
            conductivity: 400.0,
            tds: 250.0,
            turbidity: 1.0,
            alkalinity: 120.0,
            hardness: 150.0,
            chloride: 30.0,
            fluoride: 0.5,
            nitrate: 5.0,
            sulphate: 20.0,
            iron: 0.1,
            arsenic: 0.0,
            bod: 2.0,
            dissolved_oxygen: 7.0,
            coliform_fecal: 0.0,
        }
    }

    #[test]
    fn test_risk_level_buckets() {
        assert_eq!(RiskLevel::from_probability(0.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_probability(0.24), RiskLevel::Low);
        assert_eq!(RiskLevel::from_probability(0.4), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_probability(0.6), RiskLevel::High);
        assert_eq!(RiskLevel::from_probability(0.9), RiskLevel::Critical);
        assert_eq!(RiskLevel::from_probability(1.0), RiskLevel::Critical);
    }

    #[test]
    fn test_risk_level_boundaries_map_upward() {
        assert_eq!(RiskLevel::from_probability(0.25), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_probability(0.5), RiskLevel::High);
        assert_eq!(RiskLevel::from_probability(0.75), RiskLevel::Critical);
    }

    #[test]
    fn test_valid_request_passes_validation() {
        use validator::Validate;
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        use validator::Validate;

        let mut req = valid_request();
        req.ph = 14.5;
        assert!(req.validate().is_err());

        let mut req = valid_request();
        req.temperature = 60.0;
        assert!(req.validate().is_err());

        let mut req = valid_request();
        req.nitrate = -1.0;
        assert!(req.validate().is_err());

        let mut req = valid_request();
        req.district = String::new();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_categorical_serde_names() {
        let json = serde_json::to_value(IndianState::ArunachalPradesh).unwrap();
        assert_eq!(json, serde_json::json!("Arunachal Pradesh"));

        let season: Season = serde_json::from_value(serde_json::json!("Pre-monsoon")).unwrap();
        assert_eq!(season, Season::PreMonsoon);

        // Unknown categorical values are rejected at deserialization
        let bad: Result<Season, _> = serde_json::from_value(serde_json::json!("Winter"));
        assert!(bad.is_err());
    }

    #[test]
    fn test_request_field_renames() {
        let json = serde_json::to_value(valid_request()).unwrap();
        assert!(json.get("pH").is_some());
        assert!(json.get("TDS").is_some());
        assert!(json.get("BOD").is_some());
        assert!(json.get("ph").is_none());
    }
}
