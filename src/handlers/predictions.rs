//! Prediction handlers

use axum::{extract::State, Json};
use serde::Serialize;
use validator::Validate;

use crate::{AppState, AppResult};
use crate::models::{ApiResponse, OutbreakPrediction, PredictionRequest};

#[derive(Debug, Serialize)]
pub struct ModelStatus {
    pub model_loaded: bool,
    pub model_type: String,
    pub features: Vec<&'static str>,
}

/// Predict outbreak risk from water quality parameters
pub async fn predict(
    State(state): State<AppState>,
    Json(req): Json<PredictionRequest>,
) -> AppResult<Json<ApiResponse<OutbreakPrediction>>> {
    req.validate()?;

    tracing::info!(
        district = %req.district,
        state = req.state.name(),
        "Prediction request"
    );

    let prediction = state.predictor.predict(&req);

    Ok(Json(ApiResponse::with_message(
        prediction,
        "Prediction completed successfully",
    )))
}

/// Report classifier status and input feature categories
pub async fn model_status(State(state): State<AppState>) -> Json<ApiResponse<ModelStatus>> {
    let model_type = state
        .predictor
        .model_name()
        .map(str::to_string)
        .unwrap_or_else(|| "Rule-based fallback".to_string());

    Json(ApiResponse::ok(ModelStatus {
        model_loaded: state.predictor.is_model_loaded(),
        model_type,
        features: vec![
            "Geographic location",
            "Seasonal patterns",
            "Physical parameters",
            "Chemical composition",
            "Biological indicators",
        ],
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::ml::PredictionService;
    use crate::models::{IndianState, RiskLevel, Season};
    use std::sync::Arc;

    fn test_state() -> AppState {
        AppState {
            config: Config {
                port: 8000,
                model_path: String::new(),
                environment: "test".to_string(),
            },
            predictor: Arc::new(PredictionService::fallback_only()),
        }
    }

    fn request() -> PredictionRequest {
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

    #[tokio::test]
    async fn test_predict_handler_returns_assessment() {
        let response = predict(State(test_state()), Json(request())).await.unwrap();

        assert!(response.0.success);
        assert_eq!(response.0.data.risk_level, RiskLevel::Low);
        assert_eq!(response.0.data.outbreak_risk, 0);
    }

    #[tokio::test]
    async fn test_predict_handler_rejects_invalid_request() {
        let mut req = request();
        req.ph = 20.0;

        let result = predict(State(test_state()), Json(req)).await;
        assert!(matches!(result, Err(crate::AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_model_status_reports_fallback() {
        let response = model_status(State(test_state())).await;

        assert!(!response.0.data.model_loaded);
        assert_eq!(response.0.data.model_type, "Rule-based fallback");
        assert_eq!(response.0.data.features.len(), 5);
    }
}
