//! Align an instantaneous observation with an hourly series.
//!
//! Timestamps are parsed into `NaiveDateTime` and truncated with chrono rather
//! than sliced as text, so `2025-07-08T17:32:10Z` and `2025-07-08T17:00` meet
//! on the same hour key. Matching is exact: there is no nearest-hour fallback.

use chrono::{DateTime, NaiveDateTime, Timelike};
use serde_json::Value;

const MINUTE_FORMAT: &str = "%Y-%m-%dT%H:%M";
const SECOND_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const FRACTION_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Parses an upstream timestamp. Offset-qualified values keep the wall-clock
/// time of their own offset.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    [MINUTE_FORMAT, SECOND_FORMAT, FRACTION_FORMAT]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|value| value.naive_local())
        })
}

/// Start of the hour containing `at`.
pub fn hour_key(at: NaiveDateTime) -> NaiveDateTime {
    at.with_minute(0)
        .and_then(|value| value.with_second(0))
        .and_then(|value| value.with_nanosecond(0))
        .unwrap_or(at)
}

/// Parallel `time` / humidity arrays as delivered by the forecast service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HourlySeries {
    times: Vec<Option<NaiveDateTime>>,
    humidity: Option<Vec<Option<f64>>>,
}

impl HourlySeries {
    /// Reads the `hourly` block leniently: a missing or malformed block yields
    /// an empty series instead of an error.
    pub fn from_json(hourly: Option<&Value>) -> Self {
        let Some(hourly) = hourly else {
            return Self::default();
        };

        let times = hourly
            .get("time")
            .and_then(Value::as_array)
            .map(|values| {
                values
                    .iter()
                    .map(|value| value.as_str().and_then(parse_timestamp))
                    .collect()
            })
            .unwrap_or_default();

        let humidity = ["relativehumidity_2m", "relative_humidity_2m"]
            .iter()
            .find_map(|key| hourly.get(*key))
            .and_then(Value::as_array)
            .map(|values| values.iter().map(Value::as_f64).collect());

        Self { times, humidity }
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Humidity sample for the hour containing `observed_at`, if any.
    pub fn humidity_at(&self, observed_at: NaiveDateTime) -> Option<u8> {
        let key = hour_key(observed_at);
        let index = self.times.iter().position(|time| *time == Some(key))?;
        let value = self.humidity.as_ref()?.get(index).copied().flatten()?;
        clamp_percentage(value)
    }
}

fn clamp_percentage(value: f64) -> Option<u8> {
    if !value.is_finite() {
        return None;
    }
    Some(value.clamp(0.0, 100.0).round() as u8)
}
