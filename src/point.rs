use std::fmt::Write as _;

use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;

/// One time-series record: a measurement name, its tags and its fields.
///
/// Generators always attach at least one field before a point is handed to a
/// sink.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub measurement: String,

    pub tags: IndexMap<String, String>,

    pub fields: IndexMap<String, f64>,

    pub recorded_at: DateTime<FixedOffset>,
}

impl Point {
    pub fn new(measurement: impl Into<String>, recorded_at: DateTime<FixedOffset>) -> Self {
        Self {
            measurement: measurement.into(),
            tags: IndexMap::new(),
            fields: IndexMap::new(),
            recorded_at,
        }
    }

    pub fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn field(mut self, key: impl Into<String>, value: f64) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    /// Encodes the point as a single InfluxDB line-protocol line with a
    /// nanosecond timestamp.
    pub fn to_line_protocol(&self) -> String {
        let mut line = escape(&self.measurement, &[',', ' ']);

        for (key, value) in &self.tags {
            let _ = write!(
                line,
                ",{}={}",
                escape(key, &[',', '=', ' ']),
                escape(value, &[',', '=', ' '])
            );
        }

        for (i, (key, value)) in self.fields.iter().enumerate() {
            let separator = if i == 0 { ' ' } else { ',' };
            let _ = write!(line, "{separator}{}={value}", escape(key, &[',', '=', ' ']));
        }

        if let Some(nanos) = self.recorded_at.timestamp_nanos_opt() {
            let _ = write!(line, " {nanos}");
        }

        line
    }
}

fn escape(value: &str, special: &[char]) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if special.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
