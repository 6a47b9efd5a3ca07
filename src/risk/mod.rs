//! Rule-based outbreak risk scoring
//!
//! `rules` holds the weights and thresholds, `scorer` holds the logic.

pub mod rules;
pub mod scorer;
