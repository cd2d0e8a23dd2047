// Derived view builders - pure transforms over a range query result
use crate::domain::dates::format_korean_time;
use crate::domain::reading::{Channel, Reading};
use serde::{Deserialize, Serialize};

/// Gauge bounds are widened by this fraction of the observed range so the
/// needle never pins to an edge.
pub const GAUGE_PADDING: f64 = 0.1;

/// Bounds shown when a range holds no usable values.
pub const DEFAULT_BOUNDS: Bounds = Bounds {
    min: 0.0,
    max: 100.0,
};

/// Number of trailing points shown in a dashboard trend sparkline.
pub const TREND_POINTS: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Sortable table columns. Time sorts on the stored instant, never on the
/// display-formatted string, which is lossy across midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Time,
    Temperature,
    Humidity,
    Ec,
    Ph,
    N,
    P,
    K,
}

impl SortKey {
    fn channel(self) -> Option<Channel> {
        match self {
            SortKey::Time => None,
            SortKey::Temperature => Some(Channel::Temperature),
            SortKey::Humidity => Some(Channel::Humidity),
            SortKey::Ec => Some(Channel::Ec),
            SortKey::Ph => Some(Channel::Ph),
            SortKey::N => Some(Channel::N),
            SortKey::P => Some(Channel::P),
            SortKey::K => Some(Channel::K),
        }
    }
}

/// Stable sort by one column.
pub fn sort_readings(readings: &mut [Reading], key: SortKey, direction: SortDirection) {
    readings.sort_by(|a, b| {
        let ordering = match key.channel() {
            None => a.time.cmp(&b.time),
            Some(channel) => channel.value_of(a).total_cmp(&channel.value_of(b)),
        };
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

/// Slice out one 1-based page. Out-of-range pages (and zero page or page
/// size) yield an empty slice, never an error.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = (start + page_size).min(items.len());
    &items[start..end]
}

pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        0
    } else {
        total.div_ceil(page_size)
    }
}

/// Min/max pair for gauge scaling and display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

/// Raw min/max of one channel, ignoring non-finite values. `None` when the
/// range holds no usable value.
pub fn channel_bounds(readings: &[Reading], channel: Channel) -> Option<Bounds> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut seen = false;
    for reading in readings {
        let value = channel.value_of(reading);
        if value.is_finite() {
            seen = true;
            min = min.min(value);
            max = max.max(value);
        }
    }
    seen.then_some(Bounds { min, max })
}

/// Raw bounds for the max/min labels next to a sparkline.
pub fn display_bounds(readings: &[Reading], channel: Channel) -> Bounds {
    channel_bounds(readings, channel).unwrap_or(DEFAULT_BOUNDS)
}

/// Padded bounds for sizing a gauge; the lower bound is floor-clamped at 0.
pub fn gauge_bounds(readings: &[Reading], channel: Channel) -> Bounds {
    match channel_bounds(readings, channel) {
        None => DEFAULT_BOUNDS,
        Some(bounds) => {
            let padding = (bounds.max - bounds.min) * GAUGE_PADDING;
            Bounds {
                min: (bounds.min - padding).max(0.0),
                max: bounds.max + padding,
            }
        }
    }
}

/// Suffix window of the most recent `n` readings. Decimation by suffix, not
/// statistical resampling.
pub fn trend_window(readings: &[Reading], n: usize) -> &[Reading] {
    let skip = readings.len().saturating_sub(n);
    &readings[skip..]
}

/// One table row: the reading with its time rendered as a UTC+9 wall-clock
/// string. Built only after any sorting on the instants has happened.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub time: String,
    pub temperature: f64,
    pub humidity: f64,
    pub ec: f64,
    pub ph: f64,
    pub n: f64,
    pub p: f64,
    pub k: f64,
}

pub fn table_rows(readings: &[Reading]) -> Vec<TableRow> {
    readings
        .iter()
        .map(|reading| TableRow {
            time: format_korean_time(reading.time, false),
            temperature: reading.temperature,
            humidity: reading.humidity,
            ec: reading.ec,
            ph: reading.ph,
            n: reading.n,
            p: reading.p,
            k: reading.k,
        })
        .collect()
}

/// CSV export of one channel. Prefixed with a UTF-8 byte-order mark so
/// spreadsheet tools expecting a locale-specific encoding open it correctly.
pub fn channel_csv(readings: &[Reading], channel: Channel) -> String {
    let mut lines = Vec::with_capacity(readings.len() + 1);
    lines.push(format!("time,{}({})", channel.key(), channel.unit()));
    for reading in readings {
        lines.push(format!(
            "{},{:.1}",
            format_korean_time(reading.time, false),
            channel.value_of(reading)
        ));
    }
    format!("\u{feff}{}", lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn reading(minute: u32, temperature: f64) -> Reading {
        Reading {
            time: Utc.with_ymd_and_hms(2024, 3, 10, 1, minute, 0).unwrap(),
            temperature,
            humidity: 60.0,
            ec: 1.2,
            ph: 6.5,
            n: 0.5,
            p: 0.3,
            k: 0.4,
        }
    }

    #[test]
    fn test_sort_ascending_then_descending_reverses() {
        let mut asc = vec![reading(0, 26.0), reading(1, 24.1), reading(2, 25.6)];
        let mut desc = asc.clone();
        sort_readings(&mut asc, SortKey::Temperature, SortDirection::Asc);
        sort_readings(&mut desc, SortKey::Temperature, SortDirection::Desc);
        let reversed: Vec<_> = asc.iter().rev().cloned().collect();
        assert_eq!(desc, reversed);
        assert_eq!(asc[0].temperature, 24.1);
    }

    #[test]
    fn test_sort_by_time_uses_instants() {
        let mut rows = vec![reading(2, 1.0), reading(0, 2.0), reading(1, 3.0)];
        sort_readings(&mut rows, SortKey::Time, SortDirection::Asc);
        let minutes: Vec<_> = rows.iter().map(|r| r.time.format("%M").to_string()).collect();
        assert_eq!(minutes, ["00", "01", "02"]);
    }

    #[test]
    fn test_pagination_reconstructs_sequence() {
        let items: Vec<u32> = (0..23).collect();
        let page_size = 5;
        let pages = page_count(items.len(), page_size);
        assert_eq!(pages, 5);

        let mut rebuilt = Vec::new();
        for page in 1..=pages {
            rebuilt.extend_from_slice(paginate(&items, page, page_size));
        }
        assert_eq!(rebuilt, items);
        assert_eq!(paginate(&items, pages, page_size).len(), 3);
    }

    #[test]
    fn test_pagination_out_of_range_is_empty() {
        let items: Vec<u32> = (0..3).collect();
        assert!(paginate(&items, 5, 10).is_empty());
        assert!(paginate(&items, 0, 10).is_empty());
        assert!(paginate(&items, 1, 0).is_empty());
    }

    #[test]
    fn test_gauge_bounds_pad_by_ten_percent() {
        let readings = vec![reading(0, 20.0), reading(1, 30.0)];
        let bounds = gauge_bounds(&readings, Channel::Temperature);
        assert!((bounds.min - 19.0).abs() < 1e-9);
        assert!((bounds.max - 31.0).abs() < 1e-9);
    }

    #[test]
    fn test_gauge_lower_bound_clamps_at_zero() {
        let readings = vec![reading(0, 0.2), reading(1, 40.0)];
        let bounds = gauge_bounds(&readings, Channel::Temperature);
        assert_eq!(bounds.min, 0.0);
    }

    #[test]
    fn test_bounds_fall_back_when_empty() {
        assert_eq!(gauge_bounds(&[], Channel::Ph), DEFAULT_BOUNDS);
        assert_eq!(display_bounds(&[], Channel::Ph), DEFAULT_BOUNDS);
    }

    #[test]
    fn test_display_bounds_are_raw() {
        let readings = vec![reading(0, 20.0), reading(1, 30.0)];
        let bounds = display_bounds(&readings, Channel::Temperature);
        assert_eq!(bounds.min, 20.0);
        assert_eq!(bounds.max, 30.0);
    }

    #[test]
    fn test_trend_window_takes_suffix() {
        let readings: Vec<_> = (0..30).map(|m| reading(m, m as f64)).collect();
        let window = trend_window(&readings, TREND_POINTS);
        assert_eq!(window.len(), 24);
        assert_eq!(window[0].temperature, 6.0);
        assert_eq!(trend_window(&readings[..3], TREND_POINTS).len(), 3);
    }

    #[test]
    fn test_table_rows_format_korean_time() {
        let rows = table_rows(&[reading(5, 24.1)]);
        assert_eq!(rows[0].time, "10:05:00");
        assert_eq!(rows[0].temperature, 24.1);
    }

    #[test]
    fn test_csv_has_bom_header_and_one_decimal() {
        let csv = channel_csv(&[reading(0, 24.1), reading(1, 25.0)], Channel::Temperature);
        assert!(csv.starts_with('\u{feff}'));
        let mut lines = csv.trim_start_matches('\u{feff}').lines();
        assert_eq!(lines.next(), Some("time,temperature(°C)"));
        assert_eq!(lines.next(), Some("10:00:00,24.1"));
        assert_eq!(lines.next(), Some("10:01:00,25.0"));
        assert!(!csv.ends_with('\n'));
    }
}
