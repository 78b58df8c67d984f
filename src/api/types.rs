//! API request and response bodies.
//!
//! Request fields are read leniently: a field with the wrong JSON type is
//! treated as absent and falls back to its default instead of failing the
//! request.

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::devices::{Device, NewDevice};

/// `GET /` banner.
#[derive(Debug, Serialize)]
pub struct BannerResponse {
    pub message: &'static str,
    pub status: &'static str,
    pub timestamp: String,
}

/// `GET /health` body.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}

/// `GET /devices/sample` body.
#[derive(Debug, Serialize)]
pub struct DevicesResponse {
    pub devices: Vec<Device>,
}

/// `POST /devices/add` body.
#[derive(Debug, Serialize)]
pub struct AddDeviceResponse {
    pub success: bool,
    pub message: &'static str,
    pub device: Device,
}

/// Outcome of a delete or toggle.
#[derive(Debug, Serialize)]
pub struct DeviceActionResponse {
    pub success: bool,
    pub message: &'static str,
}

/// Error response body for 4xx-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

/// `POST /devices/add` request.
#[derive(Debug, Default, Deserialize)]
pub struct AddDeviceRequest {
    #[serde(default, deserialize_with = "lenient")]
    pub device_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub device_type: Option<String>,
    /// Accepts a JSON number or a numeric string.
    #[serde(default, deserialize_with = "lenient_number")]
    pub power_rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub is_active: Option<bool>,
}

impl From<AddDeviceRequest> for NewDevice {
    fn from(req: AddDeviceRequest) -> Self {
        Self {
            name: req.device_name,
            device_type: req.device_type,
            power_kw: req.power_rating,
            location: req.location,
            is_active: req.is_active,
        }
    }
}

/// `POST /devices/delete` and `POST /devices/toggle` request.
#[derive(Debug, Default, Deserialize)]
pub struct DeviceIdRequest {
    #[serde(default, deserialize_with = "lenient")]
    pub device_id: Option<String>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(number.filter(|n| n.is_finite()))
}
