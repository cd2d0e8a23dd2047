// Application state for HTTP handlers
use crate::application::calibration_service::CalibrationService;
use crate::application::dashboard_service::DashboardService;
use crate::application::telemetry_service::TelemetryService;

#[derive(Clone)]
pub struct AppState {
    pub telemetry_service: TelemetryService,
    pub dashboard_service: DashboardService,
    pub calibration_service: CalibrationService,
}
