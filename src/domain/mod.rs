// Domain layer - Models and pure computations
pub mod calibration;
pub mod dashboard;
pub mod dates;
pub mod generator;
pub mod reading;
pub mod views;
