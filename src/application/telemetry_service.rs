// Telemetry service - Date-range queries over the reading store
use crate::application::reading_repository::ReadingRepository;
use crate::domain::dates::{DateError, korean_day_range};
use crate::domain::reading::Reading;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Window served when a caller supplies no range.
pub const DEFAULT_WINDOW_HOURS: i64 = 12;

#[derive(Debug, Error)]
pub enum QueryError {
    /// A normal empty state, distinct from an I/O failure, so callers can
    /// present "no data" instead of an error.
    #[error("no readings recorded for the requested range")]
    NoData,
    #[error(transparent)]
    Date(#[from] DateError),
    #[error(transparent)]
    Repository(#[from] anyhow::Error),
}

/// Ordered subset of `readings` whose time lies in `[start, end]`, both
/// bounds inclusive, preserving store order.
pub fn filter_range(readings: &[Reading], start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<Reading> {
    readings
        .iter()
        .filter(|reading| start <= reading.time && reading.time <= end)
        .cloned()
        .collect()
}

#[derive(Clone)]
pub struct TelemetryService {
    repository: Arc<dyn ReadingRepository>,
}

impl TelemetryService {
    pub fn new(repository: Arc<dyn ReadingRepository>) -> Self {
        Self { repository }
    }

    pub async fn query_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Reading>, QueryError> {
        let all = self.repository.read_all().await?;
        let hits = filter_range(&all, start, end);
        if hits.is_empty() {
            return Err(QueryError::NoData);
        }
        Ok(hits)
    }

    /// Default range: the last twelve hours.
    pub async fn query_recent_window(&self) -> Result<Vec<Reading>, QueryError> {
        let end = Utc::now();
        let start = end - Duration::hours(DEFAULT_WINDOW_HOURS);
        self.query_range(start, end).await
    }

    /// Query one `YYYY-MM-DD` calendar day interpreted in UTC+9.
    pub async fn query_korean_day(&self, date: &str) -> Result<Vec<Reading>, QueryError> {
        let (start, end) = korean_day_range(date)?;
        self.query_range(start, end).await
    }
}
