//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::AppState;
use super::error::ApiError;
use super::types::{
    AddDeviceRequest, AddDeviceResponse, BannerResponse, DeviceActionResponse, DeviceIdRequest,
    DevicesResponse, HealthResponse,
};
use crate::generators::{
    AnalyticsSummary, OptimizationReport, PredictionSet, analytics, format_timestamp, now_local,
    predictions, recommendations,
};

/// Body served when the frontend asset cannot be read.
pub const FRONTEND_MISSING: &str = "Frontend file not found";

/// `GET /` → service banner.
#[tracing::instrument]
pub async fn banner() -> Json<BannerResponse> {
    Json(BannerResponse {
        message: "AI Energy Optimizer API",
        status: "running",
        timestamp: format_timestamp(now_local()),
    })
}

/// `GET /health`
#[tracing::instrument]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: format_timestamp(now_local()),
    })
}

/// `GET /predictions` → 24 hourly points starting now.
#[tracing::instrument(skip(state))]
pub async fn get_predictions(State(state): State<Arc<AppState>>) -> Json<PredictionSet> {
    let start = now_local();
    let set = state.with_rng(|rng| predictions::generate(rng, start));
    tracing::debug!(total = set.total_predicted_usage, "generated predictions");
    Json(set)
}

/// `GET /devices/sample` → every registry record in insertion order.
#[tracing::instrument(skip(state))]
pub async fn list_devices(State(state): State<Arc<AppState>>) -> Json<DevicesResponse> {
    Json(DevicesResponse {
        devices: state.registry.list(),
    })
}

/// `GET /analytics/summary`
#[tracing::instrument(skip(state))]
pub async fn get_analytics(State(state): State<Arc<AppState>>) -> Json<AnalyticsSummary> {
    Json(state.with_rng(|rng| analytics::generate(rng)))
}

/// `POST /optimize` → recommendations for the fixed action table.
///
/// The request body is accepted but does not influence the output.
#[tracing::instrument(skip(state, _body))]
pub async fn optimize(State(state): State<Arc<AppState>>, _body: Bytes) -> Json<OptimizationReport> {
    let report = state.with_rng(|rng| recommendations::generate(rng));
    tracing::debug!(
        total = report.total_potential_savings,
        "generated recommendations"
    );
    Json(report)
}

/// `POST /devices/add`
///
/// `200` + `AddDeviceResponse` for any JSON object, `400` otherwise.
#[tracing::instrument(skip(state, body))]
pub async fn add_device(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<AddDeviceResponse>, ApiError> {
    let req: AddDeviceRequest = parse_object(&body)?;
    let device = state.registry.add(req.into());
    Ok(Json(AddDeviceResponse {
        success: true,
        message: "Device added successfully",
        device,
    }))
}

/// `POST /devices/delete`
///
/// Reports `success: false` when no record matched.
#[tracing::instrument(skip(state, body))]
pub async fn delete_device(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<DeviceActionResponse>, ApiError> {
    let req: DeviceIdRequest = parse_object(&body)?;
    let removed = req
        .device_id
        .as_deref()
        .is_some_and(|id| state.registry.delete(id));

    Ok(Json(if removed {
        DeviceActionResponse {
            success: true,
            message: "Device deleted successfully",
        }
    } else {
        DeviceActionResponse {
            success: false,
            message: "Device not found",
        }
    }))
}

/// `POST /devices/toggle`
///
/// Always reports success; whether a record matched is only logged.
#[tracing::instrument(skip(state, body))]
pub async fn toggle_device(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<DeviceActionResponse>, ApiError> {
    let req: DeviceIdRequest = parse_object(&body)?;
    if let Some(id) = req.device_id.as_deref() {
        state.registry.toggle(id);
    }
    Ok(Json(DeviceActionResponse {
        success: true,
        message: "Device toggled successfully",
    }))
}

/// `GET /frontend/index.html` from the configured frontend directory.
#[tracing::instrument(skip(state))]
pub async fn frontend_index(State(state): State<Arc<AppState>>) -> Response {
    let path = state.frontend_dir.join("index.html");
    match tokio::fs::read_to_string(&path).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "frontend asset unavailable");
            Html(FRONTEND_MISSING).into_response()
        }
    }
}

/// Fallback for unknown paths and unsupported methods.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Parses a request body that must be a JSON object.
fn parse_object<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    let value: Value = serde_json::from_slice(body)?;
    if !value.is_object() {
        return Err(ApiError::NotAnObject);
    }
    Ok(serde_json::from_value(value)?)
}
