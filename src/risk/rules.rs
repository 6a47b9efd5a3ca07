//! Risk Scoring Rules & Thresholds
//!
//! Weights and parameter limits for the rule-based scorer.
//! No scoring logic here - constants only.

// ============================================================================
// RULE WEIGHTS (sum is exactly 1.0)
// ============================================================================

/// Weight when fecal coliform is detected at all
pub const FECAL_COLIFORM_WEIGHT: f64 = 0.40;

/// Weight when pH falls outside the safe range
pub const PH_WEIGHT: f64 = 0.20;

/// Weight when turbidity exceeds its limit
pub const TURBIDITY_WEIGHT: f64 = 0.15;

/// Weight when nitrate exceeds its limit
pub const NITRATE_WEIGHT: f64 = 0.10;

/// Weight when iron exceeds its limit
pub const IRON_WEIGHT: f64 = 0.05;

/// Weight when arsenic exceeds its limit
pub const ARSENIC_WEIGHT: f64 = 0.10;

// ============================================================================
// PARAMETER LIMITS
// ============================================================================

/// Safe pH range (BIS drinking-water standard)
pub const PH_SAFE_MIN: f64 = 6.5;
pub const PH_SAFE_MAX: f64 = 8.5;

/// Turbidity limit in NTU
pub const TURBIDITY_LIMIT: f64 = 5.0;

/// Nitrate limit in mg/L
pub const NITRATE_LIMIT: f64 = 50.0;

/// Iron limit in mg/L
pub const IRON_LIMIT: f64 = 0.3;

/// Arsenic limit in mg/L
pub const ARSENIC_LIMIT: f64 = 0.01;

// ============================================================================
// DECISION THRESHOLDS
// ============================================================================

/// Probability above which (strictly) the binary outbreak flag is raised
pub const OUTBREAK_THRESHOLD: f64 = 0.5;

/// Probability above which the emergency recommendation is added
pub const EMERGENCY_THRESHOLD: f64 = 0.8;

/// Fixed confidence reported for rule-based predictions
pub const RULE_CONFIDENCE: f64 = 0.75;
