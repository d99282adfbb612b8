// Metric domain model
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

pub type MetricId = i64;

/// A single stored sensor reading. The payload is kept as the raw text blob
/// it was recorded with and may be absent or not valid JSON at all.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub id: MetricId,
    pub metric_type: String,
    pub name: String,
    pub payload: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Metric {
    pub fn new(
        id: MetricId,
        metric_type: impl Into<String>,
        name: impl Into<String>,
        payload: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            metric_type: metric_type.into(),
            name: name.into(),
            payload,
            created_at,
        }
    }

    /// Decode the payload as a JSON object. Anything that is not an object
    /// (missing, malformed, array, scalar) decodes to an empty map.
    pub fn payload_object(&self) -> Map<String, Value> {
        decode_payload_object(self.payload.as_deref())
    }
}

pub fn decode_payload_object(blob: Option<&str>) -> Map<String, Value> {
    let Some(blob) = blob.map(str::trim).filter(|b| !b.is_empty()) else {
        return Map::new();
    };

    match serde_json::from_str::<Value>(blob) {
        Ok(Value::Object(map)) => map,
        Ok(_) => Map::new(),
        Err(e) => {
            tracing::trace!("Ignoring undecodable payload: {}", e);
            Map::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn metric_with(payload: Option<&str>) -> Metric {
        Metric::new(
            1,
            "temperature",
            "kitchen",
            payload.map(str::to_string),
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_payload_object_decodes_objects() {
        let metric = metric_with(Some(r#"{"celsius": 21.5, "unit": "C"}"#));
        let payload = metric.payload_object();
        assert_eq!(payload.len(), 2);
        assert_eq!(payload["celsius"], Value::from(21.5));
    }

    #[test]
    fn test_payload_object_degrades_to_empty() {
        assert!(metric_with(None).payload_object().is_empty());
        assert!(metric_with(Some("")).payload_object().is_empty());
        assert!(metric_with(Some("{oops")).payload_object().is_empty());
        assert!(metric_with(Some("[1, 2, 3]")).payload_object().is_empty());
        assert!(metric_with(Some("42")).payload_object().is_empty());
    }
}
