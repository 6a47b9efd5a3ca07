//! Feature encoding for classifier input
//!
//! Fixed-order numeric vector matching the training layout: the three
//! categorical fields first, then the sixteen measurements in request
//! field order. Changing this order breaks compatibility with every
//! trained artifact.

use crate::models::PredictionRequest;

/// Number of input features the classifier expects
pub const FEATURE_COUNT: usize = 19;

/// Bucket count for the district hashing trick
pub const DISTRICT_BUCKETS: u32 = 1000;

/// Stable numeric code for a free-text district name.
///
/// crc32 keeps the encoding identical across runs and builds, which a
/// std hasher would not.
pub fn district_bucket(district: &str) -> f32 {
    let normalized = district.trim().to_lowercase();
    (crc32fast::hash(normalized.as_bytes()) % DISTRICT_BUCKETS) as f32
}

/// Encode a validated request into the classifier input vector.
pub fn encode(req: &PredictionRequest) -> [f32; FEATURE_COUNT] {
    [
        req.state.index() as f32,
        district_bucket(&req.district),
        req.season.index() as f32,
        req.temperature as f32,
        req.ph as f32,
        req.conductivity as f32,
        req.tds as f32,
        req.turbidity as f32,
        req.alkalinity as f32,
        req.hardness as f32,
        req.chloride as f32,
        req.fluoride as f32,
        req.nitrate as f32,
        req.sulphate as f32,
        req.iron as f32,
        req.arsenic as f32,
        req.bod as f32,
        req.dissolved_oxygen as f32,
        req.coliform_fecal as f32,
    ]
}
