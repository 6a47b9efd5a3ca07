//! Water quality reading handlers

use axum::{extract::{Path, Query}, Json};
use serde::Deserialize;
use std::collections::BTreeMap;

use crate::{AppError, AppResult};
use crate::mock;
use crate::models::{ApiResponse, HealthMetrics, SensorReading, SensorStatus};

/// Batch size of the mock store a list/metrics request draws from
const MOCK_BATCH: usize = 100;

#[derive(Debug, Deserialize, Default)]
pub struct ReadingQuery {
    pub district: Option<String>,
    pub state: Option<String>,
    pub status: Option<SensorStatus>,
    pub limit: Option<usize>,
}

/// List readings with optional filtering
pub async fn list(
    Query(query): Query<ReadingQuery>,
) -> AppResult<Json<ApiResponse<Vec<SensorReading>>>> {
    let limit = query.limit.unwrap_or(50).clamp(1, 100);

    let mut readings = mock::generate_readings(MOCK_BATCH);

    if let Some(district) = &query.district {
        readings.retain(|r| r.district.eq_ignore_ascii_case(district));
    }

    if let Some(state) = &query.state {
        readings.retain(|r| r.state.eq_ignore_ascii_case(state));
    }

    if let Some(status) = query.status {
        readings.retain(|r| r.status == status);
    }

    readings.truncate(limit);

    let message = format!("Retrieved {} water quality readings", readings.len());
    Ok(Json(ApiResponse::with_message(readings, message)))
}

/// Get a single reading by id
pub async fn get(Path(id): Path<String>) -> AppResult<Json<ApiResponse<SensorReading>>> {
    let reading = mock::generate_readings(10)
        .into_iter()
        .find(|r| r.id == id)
        .ok_or_else(|| AppError::NotFound("Reading not found".to_string()))?;

    Ok(Json(ApiResponse::ok(reading)))
}

/// Dashboard health metrics
pub async fn metrics() -> AppResult<Json<ApiResponse<HealthMetrics>>> {
    let readings = mock::generate_readings(MOCK_BATCH);

    let safe = readings.iter().filter(|r| r.status == SensorStatus::Safe).count();
    let caution = readings.iter().filter(|r| r.status == SensorStatus::Caution).count();
    let danger = readings.iter().filter(|r| r.status == SensorStatus::Danger).count();

    let metrics = HealthMetrics {
        total_sensors: MOCK_BATCH,
        active_sensors: readings.len(),
        safe_sources: safe,
        contaminated_sources: caution + danger,
        // Mock health case data until the case registry is wired in
        total_cases: 179,
        active_cases: 23,
        resolved_cases: 156,
        new_cases_today: 3,
        active_alerts: danger,
        high_risk_areas: (danger / 2).max(1),
        last_updated: chrono::Utc::now(),
    };

    Ok(Json(ApiResponse::ok(metrics)))
}

/// Static state -> districts map
pub async fn districts() -> Json<ApiResponse<BTreeMap<&'static str, Vec<&'static str>>>> {
    let map = mock::DISTRICTS
        .iter()
        .map(|(state, districts)| (*state, districts.to_vec()))
        .collect();

    Json(ApiResponse::ok(map))
}
