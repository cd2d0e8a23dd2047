// Dashboard domain model
use crate::domain::reading::{Channel, Reading};
use crate::domain::views::Bounds;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub time: DateTime<Utc>,
    pub value: f64,
}

/// Everything one sensor card needs: latest value, gauge scaling, raw
/// min/max labels and the trailing trend points.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelPanel {
    pub channel: Channel,
    pub title: &'static str,
    pub unit: &'static str,
    pub current: f64,
    pub gauge: Bounds,
    pub display: Bounds,
    pub trend: Vec<TrendPoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub readings: Vec<Reading>,
    pub panels: Vec<ChannelPanel>,
}
