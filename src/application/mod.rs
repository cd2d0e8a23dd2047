// Application layer - Use cases over the reading repository
pub mod calibration_service;
pub mod dashboard_service;
pub mod reading_repository;
pub mod telemetry_service;
