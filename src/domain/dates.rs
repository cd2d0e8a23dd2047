// Korean time zone (UTC+9) date conversions
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, TimeZone, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DateError {
    #[error("invalid calendar date: {0}")]
    InvalidDate(String),
}

/// Fixed UTC+9 offset; there is no DST in Korea.
fn kst() -> FixedOffset {
    FixedOffset::east_opt(9 * 3600).expect("+09:00 is a valid offset")
}

/// Convert a `YYYY-MM-DD` calendar day in UTC+9 into the equivalent absolute
/// interval: `[prev-day 15:00:00Z, day 14:59:59Z]`.
pub fn korean_day_range(date: &str) -> Result<(DateTime<Utc>, DateTime<Utc>), DateError> {
    let day = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| DateError::InvalidDate(date.to_string()))?;

    let start = kst()
        .with_ymd_and_hms(day.year(), day.month(), day.day(), 0, 0, 0)
        .single()
        .ok_or_else(|| DateError::InvalidDate(date.to_string()))?;
    let end = kst()
        .with_ymd_and_hms(day.year(), day.month(), day.day(), 23, 59, 59)
        .single()
        .ok_or_else(|| DateError::InvalidDate(date.to_string()))?;

    Ok((start.with_timezone(&Utc), end.with_timezone(&Utc)))
}

/// Render an instant as a UTC+9 wall-clock string for table and chart
/// display. The stored instant is untouched.
pub fn format_korean_time(time: DateTime<Utc>, include_date: bool) -> String {
    let local = time.with_timezone(&kst());
    if include_date {
        local.format("%Y-%m-%d %H:%M:%S").to_string()
    } else {
        local.format("%H:%M:%S").to_string()
    }
}
