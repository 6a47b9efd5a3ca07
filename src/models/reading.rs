//! Sensor reading and dashboard metric models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Source status derived from ad-hoc safety thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorStatus {
    Safe,
    Caution,
    Danger,
}

/// One synthetic sensor record.
///
/// Readings are generated per request and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorReading {
    pub id: String,
    pub station_code: String,
    pub location_name: String,
    pub state: String,
    pub district: String,
    /// [latitude, longitude]
    pub coordinates: [f64; 2],
    pub parameters: BTreeMap<String, f64>,
    pub status: SensorStatus,
    pub reading_date: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    pub data_source: String,
}

/// Dashboard health metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthMetrics {
    pub total_sensors: usize,
    pub active_sensors: usize,
    pub safe_sources: usize,
    pub contaminated_sources: usize,
    pub total_cases: u32,
    pub active_cases: u32,
    pub resolved_cases: u32,
    pub new_cases_today: u32,
    pub active_alerts: usize,
    pub high_risk_areas: usize,
    pub last_updated: DateTime<Utc>,
}
