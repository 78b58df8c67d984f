//! Hourly energy-usage predictions.

use chrono::{NaiveDateTime, TimeDelta};
use rand::Rng;
use serde::Serialize;

use super::{format_timestamp, round_to};

/// Number of hourly points in one prediction set.
pub const HORIZON_HOURS: usize = 24;
/// Centre of the usage draw (kWh).
const BASE_USAGE_KWH: f64 = 2.5;
/// Half-width of the usage draw (kWh).
const USAGE_SPREAD_KWH: f64 = 0.5;
/// Centre of the confidence draw.
const BASE_CONFIDENCE: f64 = 0.85;
/// Half-width of the confidence draw.
const CONFIDENCE_SPREAD: f64 = 0.05;

/// One hourly usage point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    /// Start of the hour, ISO-8601 local time.
    pub timestamp: String,
    /// Predicted usage (kWh), two decimals.
    pub predicted_usage: f64,
    /// Confidence in `[0.80, 0.90]`, two decimals.
    pub confidence: f64,
}

/// A full prediction horizon plus its aggregates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionSet {
    pub predictions: Vec<Prediction>,
    /// Sum of the rounded `predicted_usage` values, two decimals.
    pub total_predicted_usage: f64,
    /// Mean of the rounded `confidence` values, two decimals.
    pub average_confidence: f64,
}

/// Draws [`HORIZON_HOURS`] hourly predictions starting at `start`.
///
/// Each call redraws every point independently; nothing is remembered
/// between calls.
///
/// # Arguments
///
/// * `rng` - Random source for the uniform draws
/// * `start` - Timestamp of the first point
///
/// # Returns
///
/// A `PredictionSet` with exactly [`HORIZON_HOURS`] points.
pub fn generate<R: Rng + ?Sized>(rng: &mut R, start: NaiveDateTime) -> PredictionSet {
    let predictions: Vec<Prediction> = (0..HORIZON_HOURS)
        .map(|hour| {
            let usage = BASE_USAGE_KWH + rng.random_range(-USAGE_SPREAD_KWH..=USAGE_SPREAD_KWH);
            let confidence =
                BASE_CONFIDENCE + rng.random_range(-CONFIDENCE_SPREAD..=CONFIDENCE_SPREAD);
            Prediction {
                timestamp: format_timestamp(start + TimeDelta::hours(hour as i64)),
                predicted_usage: round_to(usage, 2),
                confidence: round_to(confidence, 2),
            }
        })
        .collect();

    let total: f64 = predictions.iter().map(|p| p.predicted_usage).sum();
    let confidence_sum: f64 = predictions.iter().map(|p| p.confidence).sum();

    PredictionSet {
        total_predicted_usage: round_to(total, 2),
        average_confidence: round_to(confidence_sum / HORIZON_HOURS as f64, 2),
        predictions,
    }
}
