//! Forecast point models: raw points, beach-enriched points and time buckets

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use super::Beach;
use crate::{Result, SurfcastError};

fn parse_time(time: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(time)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// A single forecast point as delivered by a point source.
///
/// Only `time` is typed; every other field is kept verbatim so metrics the
/// source adds later pass through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub time: String,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl ForecastPoint {
    #[must_use]
    pub fn new(time: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            fields: Map::new(),
        }
    }

    /// Set a field, returning the previous value.
    ///
    /// `time` is routed to the typed field and must be a string.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Result<Option<Value>> {
        let key = key.into();
        if key == "time" {
            return match value {
                Value::String(time) => {
                    let previous = std::mem::replace(&mut self.time, time);
                    Ok(Some(Value::String(previous)))
                }
                other => Err(SurfcastError::validation(format!(
                    "forecast point time must be a string (got {other})"
                ))),
            };
        }
        Ok(self.fields.insert(key, value))
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Metric fields, excluding `time`
    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// `time` parsed as RFC 3339, if it is one
    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        parse_time(&self.time)
    }
}

impl TryFrom<Value> for ForecastPoint {
    type Error = SurfcastError;

    fn try_from(value: Value) -> Result<Self> {
        serde_json::from_value(value)
            .map_err(|e| SurfcastError::validation(format!("invalid forecast point: {e}")))
    }
}

/// A forecast point merged with the attributes of the beach it belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedForecastPoint {
    pub time: String,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

fn finite_number(value: f64, field: &str) -> Result<Value> {
    Number::from_f64(value).map(Value::Number).ok_or_else(|| {
        SurfcastError::validation(format!("{field} must be a finite number (got {value})"))
    })
}

impl EnrichedForecastPoint {
    /// Merge a raw point onto the beach defaults.
    ///
    /// The raw fields are taken as-is; beach attributes and `rating` only
    /// fill keys the point does not carry, so the point wins on any
    /// collision. A non-finite default is an error only when it is used.
    pub fn enrich(beach: &Beach, point: ForecastPoint, rating: f64) -> Result<Self> {
        let ForecastPoint { time, mut fields } = point;

        if !fields.contains_key("lat") {
            fields.insert("lat".to_string(), finite_number(beach.lat, "lat")?);
        }
        if !fields.contains_key("lng") {
            fields.insert("lng".to_string(), finite_number(beach.lng, "lng")?);
        }
        fields
            .entry("name")
            .or_insert_with(|| Value::String(beach.name.clone()));
        fields
            .entry("position")
            .or_insert_with(|| Value::String(beach.position.as_str().to_string()));
        if !fields.contains_key("rating") {
            fields.insert("rating".to_string(), finite_number(rating, "rating")?);
        }

        Ok(Self { time, fields })
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.get("name").and_then(Value::as_str)
    }

    #[must_use]
    pub fn position(&self) -> Option<&str> {
        self.get("position").and_then(Value::as_str)
    }

    #[must_use]
    pub fn rating(&self) -> Option<f64> {
        self.get("rating").and_then(Value::as_f64)
    }

    #[must_use]
    pub fn lat(&self) -> Option<f64> {
        self.get("lat").and_then(Value::as_f64)
    }

    #[must_use]
    pub fn lng(&self) -> Option<f64> {
        self.get("lng").and_then(Value::as_f64)
    }

    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        parse_time(&self.time)
    }
}

/// All enriched points sharing one timestamp, across beaches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeForecast {
    pub time: String,
    /// Points in the order they were encountered
    pub forecast: Vec<EnrichedForecastPoint>,
}

impl TimeForecast {
    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        parse_time(&self.time)
    }
}
