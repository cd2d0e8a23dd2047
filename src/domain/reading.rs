// Sensor reading domain model
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One timestamped set of the seven sensor channel values.
///
/// Readings are immutable once created; every channel is rounded to one
/// decimal digit at generation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub time: DateTime<Utc>,
    pub temperature: f64,
    pub humidity: f64,
    pub ec: f64,
    pub ph: f64,
    pub n: f64,
    pub p: f64,
    pub k: f64,
}

/// The seven sensor channels carried by every reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Temperature,
    Humidity,
    Ec,
    Ph,
    N,
    P,
    K,
}

impl Channel {
    pub const ALL: [Channel; 7] = [
        Channel::Temperature,
        Channel::Humidity,
        Channel::Ec,
        Channel::Ph,
        Channel::N,
        Channel::P,
        Channel::K,
    ];

    /// JSON field name of this channel on a reading.
    pub fn key(self) -> &'static str {
        match self {
            Channel::Temperature => "temperature",
            Channel::Humidity => "humidity",
            Channel::Ec => "ec",
            Channel::Ph => "ph",
            Channel::N => "n",
            Channel::P => "p",
            Channel::K => "k",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Channel::Temperature => "Temperature",
            Channel::Humidity => "Humidity",
            Channel::Ec => "EC",
            Channel::Ph => "pH",
            Channel::N => "Nitrogen",
            Channel::P => "Phosphorus",
            Channel::K => "Potassium",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Channel::Temperature => "°C",
            Channel::Humidity => "%",
            Channel::Ec => "us/cm",
            Channel::Ph => "",
            Channel::N | Channel::P | Channel::K => "ppm",
        }
    }

    pub fn value_of(self, reading: &Reading) -> f64 {
        match self {
            Channel::Temperature => reading.temperature,
            Channel::Humidity => reading.humidity,
            Channel::Ec => reading.ec,
            Channel::Ph => reading.ph,
            Channel::N => reading.n,
            Channel::P => reading.p,
            Channel::K => reading.k,
        }
    }
}

/// Round to one decimal digit, the stored precision of every channel.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Reading {
        Reading {
            time: Utc.with_ymd_and_hms(2024, 3, 10, 1, 0, 0).unwrap(),
            temperature: 24.1,
            humidity: 61.2,
            ec: 1.3,
            ph: 6.4,
            n: 0.5,
            p: 0.3,
            k: 0.4,
        }
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(24.14), 24.1);
        assert_eq!(round1(24.15), 24.2);
        assert_eq!(round1(-0.04), -0.0);
    }

    #[test]
    fn test_channel_accessors() {
        let reading = sample();
        assert_eq!(Channel::Temperature.value_of(&reading), 24.1);
        assert_eq!(Channel::K.value_of(&reading), 0.4);
        assert_eq!(Channel::Ph.unit(), "");
        assert_eq!(Channel::N.unit(), "ppm");
    }

    #[test]
    fn test_reading_serde_round_trip() {
        let reading = sample();
        let json = serde_json::to_string(&reading).unwrap();
        assert!(json.contains("\"temperature\":24.1"));
        let back: Reading = serde_json::from_str(&json).unwrap();
        assert_eq!(back, reading);
    }

    #[test]
    fn test_channel_serde_uses_field_names() {
        let json = serde_json::to_string(&Channel::Temperature).unwrap();
        assert_eq!(json, "\"temperature\"");
        let channel: Channel = serde_json::from_str("\"ec\"").unwrap();
        assert_eq!(channel, Channel::Ec);
    }
}
