//! Open-ended metadata values for entities
//!
//! Fields the algorithms depend on are typed on [`super::NodeMetadata`];
//! everything else an ingestion source attaches lands in a [`PropertyMap`].

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Metadata value as it arrives from ingestion (JSON-shaped)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Array(Vec<PropertyValue>),
    Map(IndexMap<String, PropertyValue>),
    Null,
}

impl PropertyValue {
    pub fn as_string(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric reading of the value: integers, floats and numeric strings
    /// (ingested statements often carry amounts as text).
    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropertyValue::Integer(i) => Some(*i as f64),
            PropertyValue::Float(f) => Some(*f),
            PropertyValue::String(s) => s.trim().replace(',', "").parse().ok(),
            _ => None,
        }
    }

    /// Timestamp reading of the value: a date string (see [`parse_datetime`])
    /// or an integer of Unix milliseconds.
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            PropertyValue::String(s) => parse_datetime(s),
            PropertyValue::Integer(ms) => DateTime::from_timestamp_millis(*ms).map(|dt| dt.naive_utc()),
            _ => None,
        }
    }
}

/// Parse the date formats seen in case data: RFC 3339, `YYYY-MM-DD HH:MM:SS`,
/// `YYYY-MM-DDTHH:MM:SS`, `YYYY-MM-DD` and `DD/MM/YYYY`.
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    for fmt in ["%Y-%m-%d", "%d/%m/%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

// Convenience conversions
impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::String(s)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::String(s.to_string())
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        PropertyValue::Integer(i)
    }
}

impl From<f64> for PropertyValue {
    fn from(f: f64) -> Self {
        PropertyValue::Float(f)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Boolean(b)
    }
}

/// Insertion-ordered property map for entity metadata
pub type PropertyMap = IndexMap<String, PropertyValue>;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_untagged_json() {
        let map: PropertyMap =
            serde_json::from_str(r#"{"a": 5, "b": 2.5, "c": "x", "d": true, "e": null, "f": [1]}"#).unwrap();

        assert_eq!(map["a"], PropertyValue::Integer(5));
        assert_eq!(map["b"].as_number(), Some(2.5));
        assert_eq!(map["c"].as_string(), Some("x"));
        assert_eq!(map["d"], PropertyValue::Boolean(true));
        assert_eq!(map["e"], PropertyValue::Null);
        assert!(matches!(map["f"], PropertyValue::Array(_)));
        assert_eq!(map.keys().next().map(String::as_str), Some("a"));
    }

    #[test]
    fn test_as_number_from_text() {
        assert_eq!(PropertyValue::from("1,25,000.50").as_number(), Some(125000.5));
        assert_eq!(PropertyValue::from("n/a").as_number(), None);
        assert_eq!(PropertyValue::Boolean(true).as_number(), None);
    }

    #[test]
    fn test_parse_datetime_formats() {
        let d = parse_datetime("2024-03-15").unwrap();
        assert_eq!((d.year(), d.month(), d.day()), (2024, 3, 15));

        let dt = parse_datetime("2024-03-15T10:30:00Z").unwrap();
        assert_eq!(dt.date(), d.date());

        let dmy = parse_datetime("15/03/2024").unwrap();
        assert_eq!(dmy, d);

        assert!(parse_datetime("2024-03-15 08:00:00").is_some());
        assert!(parse_datetime("yesterday").is_none());
        assert!(parse_datetime("  ").is_none());
    }

    #[test]
    fn test_datetime_from_millis() {
        let v = PropertyValue::Integer(0);
        assert_eq!(v.as_datetime().unwrap().year(), 1970);
    }
}
