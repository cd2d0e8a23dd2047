// Dashboard service - Use case for building the sensor card dashboard
use crate::application::telemetry_service::{QueryError, TelemetryService};
use crate::domain::dashboard::{ChannelPanel, Dashboard, TrendPoint};
use crate::domain::reading::Channel;
use crate::domain::views::{TREND_POINTS, display_bounds, gauge_bounds, trend_window};

#[derive(Clone)]
pub struct DashboardService {
    telemetry: TelemetryService,
}

impl DashboardService {
    pub fn new(telemetry: TelemetryService) -> Self {
        Self { telemetry }
    }

    /// Assemble the last-12h dashboard: the raw range result plus one panel
    /// per channel with the latest value, gauge scaling and trend window.
    pub async fn build(&self) -> Result<Dashboard, QueryError> {
        let readings = self.telemetry.query_recent_window().await?;
        let latest = match readings.last() {
            Some(reading) => reading.clone(),
            None => return Err(QueryError::NoData),
        };

        let panels = Channel::ALL
            .into_iter()
            .map(|channel| {
                let trend = trend_window(&readings, TREND_POINTS)
                    .iter()
                    .map(|reading| TrendPoint {
                        time: reading.time,
                        value: channel.value_of(reading),
                    })
                    .collect();
                ChannelPanel {
                    channel,
                    title: channel.title(),
                    unit: channel.unit(),
                    current: channel.value_of(&latest),
                    gauge: gauge_bounds(&readings, channel),
                    display: display_bounds(&readings, channel),
                    trend,
                }
            })
            .collect();

        Ok(Dashboard { readings, panels })
    }
}
