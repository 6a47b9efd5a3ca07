//! Mock sensor store
//!
//! Stand-in for a real sensor database: synthetic readings are generated
//! per request and never persisted. Replace with real queries when the
//! ingestion pipeline lands.

use chrono::{Duration, Utc};
use rand::Rng;
use std::collections::BTreeMap;

use crate::models::{SensorReading, SensorStatus};

/// Districts with monitoring coverage, grouped by state
pub const DISTRICTS: &[(&str, &[&str])] = &[
    ("Assam", &["Kamrup", "Kamrup Metro", "Dibrugarh", "Jorhat", "Sivasagar", "Cachar", "Nagaon", "Sonitpur"]),
    ("Meghalaya", &["East Khasi Hills", "West Garo Hills", "West Jaintia Hills", "Ri Bhoi"]),
    ("Manipur", &["Imphal West", "Imphal East", "Churachandpur", "Thoubal", "Bishnupur"]),
    ("Tripura", &["West Tripura", "Gomati", "Sepahijala", "South Tripura"]),
    ("Mizoram", &["Aizawl", "Lunglei", "Champhai", "Serchhip"]),
    ("Nagaland", &["Kohima", "Dimapur", "Mon", "Tuensang"]),
    ("Arunachal Pradesh", &["Papum Pare", "Changlang", "Tirap", "East Siang"]),
    ("Sikkim", &["East Sikkim", "West Sikkim", "North Sikkim", "South Sikkim"]),
];

/// Derive the source status from the same parameters the generator sets.
pub fn derive_status(coliform_fecal: f64, ph: f64, turbidity: f64) -> SensorStatus {
    if coliform_fecal > 0.0 || ph < 6.5 || ph > 8.5 || turbidity > 10.0 {
        if coliform_fecal > 5.0 || turbidity > 12.0 {
            SensorStatus::Danger
        } else {
            SensorStatus::Caution
        }
    } else {
        SensorStatus::Safe
    }
}

/// Generate synthetic sensor readings for Northeast India.
pub fn generate_readings(count: usize) -> Vec<SensorReading> {
    let mut rng = rand::thread_rng();
    let now = Utc::now();
    let mut readings = Vec::with_capacity(count);

    for i in 0..count {
        let (state, districts) = DISTRICTS[rng.gen_range(0..DISTRICTS.len())];
        let district = districts[rng.gen_range(0..districts.len())];

        // Coordinates within the Northeast India bounding box
        let lat = rng.gen_range(23.5..28.5);
        let lon = rng.gen_range(88.0..97.0);

        let ph = round2(rng.gen_range(6.0..8.5));
        let turbidity = round2(rng.gen_range(0.5..15.0));
        let coliform_total = rng.gen_range(0..=100) as f64;
        let coliform_fecal = rng.gen_range(0..=(coliform_total as u32 / 3).max(1)) as f64;

        let status = derive_status(coliform_fecal, ph, turbidity);

        let mut parameters = BTreeMap::new();
        parameters.insert("pH".to_string(), ph);
        parameters.insert("turbidity".to_string(), turbidity);
        parameters.insert("temperature".to_string(), round1(rng.gen_range(20.0..35.0)));
        parameters.insert("conductivity".to_string(), round1(rng.gen_range(200.0..800.0)));
        parameters.insert("TDS".to_string(), round1(rng.gen_range(100.0..500.0)));
        parameters.insert("coliform_total".to_string(), coliform_total);
        parameters.insert("coliform_fecal".to_string(), coliform_fecal);
        parameters.insert("dissolved_oxygen".to_string(), round2(rng.gen_range(4.0..10.0)));
        parameters.insert("nitrate".to_string(), round2(rng.gen_range(0.0..50.0)));
        parameters.insert("iron".to_string(), round3(rng.gen_range(0.0..2.0)));

        readings.push(SensorReading {
            id: format!("reading_{:03}", i + 1),
            station_code: format!("{}{:03}", &state[..2].to_uppercase(), i + 1),
            location_name: format!("{} Water Point {}", district, i + 1),
            state: state.to_string(),
            district: district.to_string(),
            coordinates: [lat, lon],
            parameters,
            status,
            reading_date: now - Duration::hours(rng.gen_range(0..=72)),
            last_updated: now - Duration::minutes(rng.gen_range(0..=120)),
            data_source: "iot_sensor".to_string(),
        });
    }

    readings
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_thresholds() {
        assert_eq!(derive_status(0.0, 7.0, 1.0), SensorStatus::Safe);
        // Inclusive pH boundaries stay safe
        assert_eq!(derive_status(0.0, 6.5, 1.0), SensorStatus::Safe);
        assert_eq!(derive_status(0.0, 8.5, 1.0), SensorStatus::Safe);

        // Any contamination signal is at least caution
        assert_eq!(derive_status(1.0, 7.0, 1.0), SensorStatus::Caution);
        assert_eq!(derive_status(0.0, 6.0, 1.0), SensorStatus::Caution);
        assert_eq!(derive_status(0.0, 7.0, 11.0), SensorStatus::Caution);

        // Heavy contamination is danger
        assert_eq!(derive_status(6.0, 7.0, 1.0), SensorStatus::Danger);
        assert_eq!(derive_status(0.0, 6.0, 13.0), SensorStatus::Danger);
    }

    #[test]
    fn test_generated_readings_shape() {
        let readings = generate_readings(25);
        assert_eq!(readings.len(), 25);

        assert_eq!(readings[0].id, "reading_001");
        assert_eq!(readings[24].id, "reading_025");

        for reading in &readings {
            assert!(reading.coordinates[0] >= 23.5 && reading.coordinates[0] <= 28.5);
            assert!(reading.coordinates[1] >= 88.0 && reading.coordinates[1] <= 97.0);
            assert!(reading.parameters.contains_key("pH"));
            assert!(reading.parameters.contains_key("coliform_fecal"));
            assert_eq!(reading.data_source, "iot_sensor");

            // Status must agree with the generated parameters
            let expected = derive_status(
                reading.parameters["coliform_fecal"],
                reading.parameters["pH"],
                reading.parameters["turbidity"],
            );
            assert_eq!(reading.status, expected);
        }
    }

    #[test]
    fn test_districts_belong_to_their_state() {
        let readings = generate_readings(50);
        for reading in &readings {
            let entry = DISTRICTS
                .iter()
                .find(|(state, _)| *state == reading.state)
                .expect("unknown state");
            assert!(entry.1.contains(&reading.district.as_str()));
        }
    }
}
