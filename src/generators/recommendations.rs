//! Per-device optimization recommendations.
//!
//! Recommendations are drawn from a fixed action table and address devices
//! by the synthetic id `{type}_001`. The live registry is not consulted, so a
//! recommendation may name a device that does not exist (the seed appliance
//! is `appliance_001`, not `appliances_001`) and client-added device types
//! never receive one.

use rand::Rng;
use serde::Serialize;

use super::round_to;

/// Device type → candidate actions.
pub const ACTION_TABLE: &[(&str, &[&str])] = &[
    (
        "thermostat",
        &["lower_temp", "schedule_optimization", "eco_mode"],
    ),
    ("lighting", &["dim_lights", "motion_sensors", "led_upgrade"]),
    ("hvac", &["zone_control", "maintenance", "smart_scheduling"]),
    (
        "appliances",
        &["delay_operation", "eco_mode", "power_management"],
    ),
];

/// Baseline household usage the savings percentage is measured against (kWh).
pub const BASELINE_USAGE_KWH: f64 = 3.0;
/// Savings strictly above this are `high` priority (kWh).
pub const HIGH_PRIORITY_THRESHOLD_KWH: f64 = 0.3;
const MIN_SAVINGS_KWH: f64 = 0.1;
const MAX_SAVINGS_KWH: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
}

impl Priority {
    /// Classifies a (rounded) savings value.
    pub fn for_savings(savings_kwh: f64) -> Self {
        if savings_kwh > HIGH_PRIORITY_THRESHOLD_KWH {
            Self::High
        } else {
            Self::Medium
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub device_id: String,
    pub recommended_action: String,
    /// Expected savings (kWh), two decimals, in `[0.1, 0.5]`.
    pub expected_savings: f64,
    pub priority: Priority,
}

/// All recommendations plus aggregate savings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationReport {
    pub recommendations: Vec<Recommendation>,
    /// Sum of `expected_savings`, two decimals.
    pub total_potential_savings: f64,
    /// Total savings as a percentage of [`BASELINE_USAGE_KWH`], one decimal.
    pub savings_percentage: f64,
    pub current_usage: f64,
}

/// Emits one recommendation per (type, action) pair in [`ACTION_TABLE`].
pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> OptimizationReport {
    let mut recommendations = Vec::new();
    for (device_type, actions) in ACTION_TABLE {
        for action in *actions {
            let savings = round_to(rng.random_range(MIN_SAVINGS_KWH..=MAX_SAVINGS_KWH), 2);
            recommendations.push(Recommendation {
                device_id: format!("{device_type}_001"),
                recommended_action: (*action).to_string(),
                expected_savings: savings,
                priority: Priority::for_savings(savings),
            });
        }
    }

    let total: f64 = recommendations.iter().map(|r| r.expected_savings).sum();
    OptimizationReport {
        recommendations,
        total_potential_savings: round_to(total, 2),
        savings_percentage: round_to(total / BASELINE_USAGE_KWH * 100.0, 1),
        current_usage: BASELINE_USAGE_KWH,
    }
}
