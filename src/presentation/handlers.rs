// HTTP request handlers
use crate::application::telemetry_service::DEFAULT_WINDOW_HOURS;
use crate::domain::calibration::{CalibrationKey, CalibrationMap};
use crate::domain::dashboard::Dashboard;
use crate::domain::reading::{Channel, Reading};
use crate::domain::views::{
    SortDirection, SortKey, channel_csv, paginate, sort_readings, table_rows,
};
use crate::presentation::app_state::AppState;
use crate::presentation::error::ApiError;
use axum::Json;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeRequest {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRequest {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub sort_key: Option<SortKey>,
    pub sort_direction: Option<SortDirection>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub channel: Channel,
}

#[derive(Debug, Deserialize)]
pub struct CalibrationUpdate {
    pub key: CalibrationKey,
    pub value: f64,
}

#[derive(Debug, Serialize)]
pub struct TableResponse {
    pub rows: Vec<crate::domain::views::TableRow>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct CalibrationResponse {
    pub message: &'static str,
    pub data: CalibrationMap,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Last 12 hours of readings for the chart view.
pub async fn chart_history(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Reading>>, ApiError> {
    let readings = state.telemetry_service.query_recent_window().await?;
    Ok(Json(readings))
}

/// Readings for a caller-supplied range; a missing bound defaults to the
/// matching edge of the 12-hour window.
pub async fn chart_range(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DateRangeRequest>,
) -> Result<Json<Vec<Reading>>, ApiError> {
    let (start, end) = resolve_range(request.start_date.as_deref(), request.end_date.as_deref())?;
    let readings = state.telemetry_service.query_range(start, end).await?;
    Ok(Json(readings))
}

/// Last-12h dashboard payload: range result plus per-channel panels.
pub async fn dashboard(State(state): State<Arc<AppState>>) -> Result<Json<Dashboard>, ApiError> {
    let dashboard = state.dashboard_service.build().await?;
    Ok(Json(dashboard))
}

/// Table rows with display-formatted times; sorting happens on the stored
/// instants before the rows are formatted.
pub async fn table(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TableRequest>,
) -> Result<Json<TableResponse>, ApiError> {
    let (start, end) = resolve_range(request.start_date.as_deref(), request.end_date.as_deref())?;
    let mut readings = state.telemetry_service.query_range(start, end).await?;

    if let Some(key) = request.sort_key {
        let direction = request.sort_direction.unwrap_or(SortDirection::Asc);
        sort_readings(&mut readings, key, direction);
    }

    let total = readings.len();
    let rows = match (request.page, request.page_size) {
        (Some(page), Some(page_size)) => table_rows(paginate(&readings, page, page_size)),
        _ => table_rows(&readings),
    };

    Ok(Json(TableResponse { rows, total }))
}

/// CSV export of one channel over a range.
pub async fn table_export(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ExportRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (start, end) = resolve_range(request.start_date.as_deref(), request.end_date.as_deref())?;
    let readings = state.telemetry_service.query_range(start, end).await?;
    let csv = channel_csv(&readings, request.channel);

    Ok((
        [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
        csv,
    ))
}

/// Full calibration mapping.
pub async fn get_calibration(State(state): State<Arc<AppState>>) -> Json<CalibrationMap> {
    Json(state.calibration_service.snapshot())
}

/// Upsert one calibration adjustment. Missing fields and unknown keys are
/// rejected with a 400 before any state changes.
pub async fn update_calibration(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<serde_json::Value>,
) -> Result<Json<CalibrationResponse>, ApiError> {
    let update: CalibrationUpdate = serde_json::from_value(payload)
        .map_err(|e| ApiError::bad_request(format!("invalid calibration update: {e}")))?;
    if !update.value.is_finite() {
        return Err(ApiError::bad_request("calibration value must be finite"));
    }

    let data = state.calibration_service.set(update.key, update.value);
    Ok(Json(CalibrationResponse {
        message: "calibration updated",
        data,
    }))
}

fn resolve_range(
    start: Option<&str>,
    end: Option<&str>,
) -> Result<(DateTime<Utc>, DateTime<Utc>), ApiError> {
    let now = Utc::now();
    let start = match start {
        Some(s) => parse_instant(s)?,
        None => now - Duration::hours(DEFAULT_WINDOW_HOURS),
    };
    let end = match end {
        Some(s) => parse_instant(s)?,
        None => now,
    };
    Ok((start, end))
}

fn parse_instant(value: &str) -> Result<DateTime<Utc>, ApiError> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| ApiError::bad_request(format!("invalid timestamp: {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_instant_accepts_utc_and_offsets() {
        let z = parse_instant("2024-03-10T01:00:00Z").unwrap();
        let offset = parse_instant("2024-03-10T10:00:00+09:00").unwrap();
        assert_eq!(z, offset);
    }

    #[test]
    fn test_parse_instant_rejects_bare_dates() {
        assert!(parse_instant("2024-03-10").is_err());
        assert!(parse_instant("noon").is_err());
    }

    #[test]
    fn test_resolve_range_defaults_to_twelve_hours() {
        let (start, end) = resolve_range(None, None).unwrap();
        assert_eq!(end - start, Duration::hours(12));
    }

    #[test]
    fn test_table_request_accepts_camel_case_fields() {
        let request: TableRequest = serde_json::from_str(
            r#"{"startDate":"2024-03-10T00:00:00Z","sortKey":"temperature","sortDirection":"desc","page":2,"pageSize":10}"#,
        )
        .unwrap();
        assert_eq!(request.sort_key, Some(SortKey::Temperature));
        assert_eq!(request.sort_direction, Some(SortDirection::Desc));
        assert_eq!(request.page, Some(2));
    }

    #[test]
    fn test_calibration_update_rejects_unknown_key() {
        let payload = serde_json::json!({"key": "voltage", "value": 1.0});
        let parsed: Result<CalibrationUpdate, _> = serde_json::from_value(payload);
        assert!(parsed.is_err());
    }
}
