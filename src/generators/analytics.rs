//! Usage analytics summary.

use rand::Rng;
use serde::Serialize;

use super::round_to;

/// Six independently sampled usage metrics.
///
/// No cross-field consistency is enforced: `min_usage` and `peak_usage`
/// come from disjoint ranges but are drawn separately.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsSummary {
    /// Average daily usage (kWh) in `[50, 80]`.
    pub average_daily_usage: f64,
    /// Peak hourly usage (kWh) in `[4, 6]`.
    pub peak_usage: f64,
    /// Minimum hourly usage (kWh) in `[1, 2]`.
    pub min_usage: f64,
    /// Number of peak hours in `[4, 8]`.
    pub peak_hours_count: u32,
    /// Efficiency score in `[70, 90]`, one decimal.
    pub efficiency_score: f64,
    /// Model confidence in `[0.8, 0.95]`.
    pub prediction_confidence: f64,
}

/// Draws a fresh analytics summary.
pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> AnalyticsSummary {
    AnalyticsSummary {
        average_daily_usage: round_to(rng.random_range(50.0..=80.0), 2),
        peak_usage: round_to(rng.random_range(4.0..=6.0), 2),
        min_usage: round_to(rng.random_range(1.0..=2.0), 2),
        peak_hours_count: rng.random_range(4..=8),
        efficiency_score: round_to(rng.random_range(70.0..=90.0), 1),
        prediction_confidence: round_to(rng.random_range(0.8..=0.95), 2),
    }
}
