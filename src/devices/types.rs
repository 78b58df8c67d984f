//! Device records and the parameters used to create them.

use serde::{Deserialize, Serialize};

/// Default display name for a device created without one.
pub const DEFAULT_DEVICE_NAME: &str = "New Device";
/// Identifier base used when no name was supplied.
pub const DEFAULT_ID_BASE: &str = "new_device";
/// Default `device_type` for created devices.
pub const DEFAULT_DEVICE_TYPE: &str = "other";
/// Default power rating (kW).
pub const DEFAULT_POWER_KW: f64 = 1.0;
/// Default location for created devices.
pub const DEFAULT_LOCATION: &str = "unknown";

/// A controllable or monitored appliance held by the registry.
///
/// Serialized field names are part of the public API contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    /// Unique identifier; never changes once assigned.
    pub device_id: String,
    /// Display name.
    pub device_name: String,
    /// Open enumeration: `thermostat`, `lighting`, `hvac`, `appliances`, ...
    pub device_type: String,
    /// Current power draw (kW, non-negative by convention).
    pub current_power: f64,
    /// Free-text location.
    pub location: String,
    /// Whether the device is switched on.
    pub is_active: bool,
}

impl Device {
    fn seed(id: &str, name: &str, device_type: &str, power_kw: f64, location: &str) -> Self {
        Self {
            device_id: id.to_string(),
            device_name: name.to_string(),
            device_type: device_type.to_string(),
            current_power: power_kw,
            location: location.to_string(),
            is_active: true,
        }
    }
}

/// The four devices every fresh registry starts with.
pub fn seed_devices() -> Vec<Device> {
    vec![
        Device::seed(
            "thermostat_001",
            "Living Room Thermostat",
            "thermostat",
            2.5,
            "living_room",
        ),
        Device::seed(
            "lighting_001",
            "Kitchen Lighting",
            "lighting",
            0.8,
            "kitchen",
        ),
        Device::seed("hvac_001", "HVAC System", "hvac", 4.2, "basement"),
        Device::seed(
            "appliance_001",
            "Kitchen Appliance",
            "appliances",
            1.5,
            "kitchen",
        ),
    ]
}

/// Parameters for [`DeviceRegistry::add`](super::DeviceRegistry::add).
///
/// Every field is optional; missing values resolve to the `DEFAULT_*`
/// constants in this module.
#[derive(Debug, Clone, Default)]
pub struct NewDevice {
    pub name: Option<String>,
    pub device_type: Option<String>,
    pub power_kw: Option<f64>,
    pub location: Option<String>,
    pub is_active: Option<bool>,
}

/// Normalizes a display name into an identifier base.
///
/// Lowercases, maps every non-alphanumeric ASCII character to `_`, collapses
/// runs of `_` and trims them from both ends. Returns `"device"` when nothing
/// survives.
///
/// # Examples
///
/// ```
/// use energy_optimizer::devices::normalize_id_base;
///
/// assert_eq!(normalize_id_base("Garage  Heater!"), "garage_heater");
/// assert_eq!(normalize_id_base("__TV__"), "tv");
/// assert_eq!(normalize_id_base("???"), "device");
/// ```
pub fn normalize_id_base(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }

    let trimmed = out.trim_matches('_');
    if trimmed.is_empty() {
        "device".to_string()
    } else {
        trimmed.to_string()
    }
}
