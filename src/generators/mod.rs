//! Synthetic response data: predictions, analytics and recommendations.
//!
//! Every generator is a pure function of an injected random source (and,
//! for predictions, a start time), so a fixed seed reproduces its output.

pub mod analytics;
pub mod predictions;
pub mod recommendations;

use chrono::{Local, NaiveDateTime};

pub use analytics::AnalyticsSummary;
pub use predictions::{Prediction, PredictionSet};
pub use recommendations::{OptimizationReport, Priority, Recommendation};

/// Rounds `value` to `places` decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    (value * factor).round() / factor
}

/// Current local wall-clock time.
pub fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

/// ISO-8601 local timestamp with microsecond precision and no offset.
pub fn format_timestamp(t: NaiveDateTime) -> String {
    t.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}
