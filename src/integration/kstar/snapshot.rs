//! Station snapshot.
//! One point-in-time read of all metrics reported for a station.
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Raw metrics of a station keyed by the portal field name (e.g. `realPower`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Snapshot(HashMap<String, Value>);

impl Snapshot {
    /// Get a metric, parsed as a number when possible.
    pub fn get(&self, key: &str) -> Option<MetricValue> {
        self.0.get(key).and_then(MetricValue::from_json)
    }

    /// Get a metric as returned by the portal.
    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Value)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Snapshot(iter.into_iter().collect())
    }
}

/// A metric value. The portal sends numbers both as JSON numbers and as strings.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

impl MetricValue {
    /// Parse a string as a number, or keep it as text.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(number) if number.is_finite() => MetricValue::Number(number),
            _ => MetricValue::Text(raw.to_string()),
        }
    }

    /// Convert a JSON value. `null` is treated as a missing metric.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Number(number) => Some(
                number
                    .as_f64()
                    .map(MetricValue::Number)
                    .unwrap_or_else(|| MetricValue::Text(number.to_string())),
            ),
            Value::String(text) => Some(Self::parse(text)),
            other => Some(MetricValue::Text(other.to_string())),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetricValue::Number(number) => Some(*number),
            MetricValue::Text(_) => None,
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Number(number) => write!(f, "{number}"),
            MetricValue::Text(text) => f.write_str(text),
        }
    }
}
