// HTTP request handlers
use crate::application::error::AqiError;
use crate::domain::advisory::Audience;
use crate::domain::series::HourlyEntry;
use crate::infrastructure::chunked_json::stream_from_receiver;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::infrastructure::json_mapper::{
    hourly_to_json, pollutants_to_json, result_to_json, summary_to_json, SeriesBody,
};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct AssessRequest {
    #[serde(default)]
    pub readings: HashMap<String, f64>,
    #[serde(default)]
    pub audience: Audience,
}

#[derive(Debug, Deserialize)]
pub struct SeriesRequest {
    pub entries: Vec<HourlyEntry>,
}

impl IntoResponse for AqiError {
    fn into_response(self) -> Response {
        tracing::warn!("Rejected request: {}", self);
        (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}

impl From<JsonRejection> for AqiError {
    fn from(rejection: JsonRejection) -> Self {
        AqiError::InvalidRequest(rejection.body_text())
    }
}

fn wants_compression(state: &AppState, headers: &HeaderMap) -> bool {
    state.compression && accepts_brotli(headers)
}

fn into_response(result: Result<Response, StatusCode>) -> Response {
    match result {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Recognized pollutants with their units and breakpoint tables
pub async fn list_pollutants(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let compress = wants_compression(&state, &headers);
    into_response(json_response(&pollutants_to_json(), compress).await)
}

/// AQI and health advisory for one set of readings
pub async fn assess(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AssessRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => return AqiError::from(rejection).into_response(),
    };
    let compress = wants_compression(&state, &headers);
    let service = &state.aqi_service;

    let (result, advisory) = service.assess(&request.readings, request.audience);
    let body = result_to_json(result, Some(advisory), service.locale());

    into_response(json_response(&body, compress).await)
}

/// Hourly AQI plus summary for a whole series
pub async fn assess_series(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SeriesRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => return AqiError::from(rejection).into_response(),
    };
    let compress = wants_compression(&state, &headers);
    let service = &state.aqi_service;

    let (hourly, summary) = match service.assess_series(&request.entries) {
        Ok(assessed) => assessed,
        Err(e) => return e.into_response(),
    };

    let locale = service.locale();
    let body = SeriesBody {
        hourly: hourly
            .into_iter()
            .map(|h| hourly_to_json(h, locale))
            .collect(),
        summary: summary_to_json(summary, locale),
    };

    into_response(json_response(&body, compress).await)
}

/// Stream the series assessment progressively, one NDJSON line per hour
pub async fn stream_series(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SeriesRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => return AqiError::from(rejection).into_response(),
    };
    match state.aqi_service.stream_series(request.entries) {
        Ok(rx) => stream_from_receiver(rx).into_response(),
        Err(e) => e.into_response(),
    }
}
