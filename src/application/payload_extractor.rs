// Numeric field extraction from schema-less payloads
use crate::domain::metric::decode_payload_object;
use serde_json::Value;
use std::collections::HashMap;

/// Extract every top-level payload field that can be read as a number.
///
/// Numbers pass through, booleans become 1.0/0.0, strings are parsed as
/// floats. Objects, arrays, nulls and unparsable strings are dropped, as is
/// anything that would not be a finite value. A payload that is missing or
/// not a JSON object yields an empty map.
pub fn extract_numerics(payload: Option<&str>) -> HashMap<String, f64> {
    decode_payload_object(payload)
        .into_iter()
        .filter_map(|(key, value)| coerce_numeric(&value).map(|n| (key, n)))
        .collect()
}

fn coerce_numeric(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(true) => Some(1.0),
        Value::Bool(false) => Some(0.0),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }?;

    number.is_finite().then_some(number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_invalid_payloads() {
        assert!(extract_numerics(None).is_empty());
        assert!(extract_numerics(Some("")).is_empty());
        assert!(extract_numerics(Some("   ")).is_empty());
        assert!(extract_numerics(Some("{bad json")).is_empty());
        assert!(extract_numerics(Some("null")).is_empty());
        assert!(extract_numerics(Some("[1, 2]")).is_empty());
        assert!(extract_numerics(Some("\"3.5\"")).is_empty());
    }

    #[test]
    fn test_mixed_value_kinds() {
        let result =
            extract_numerics(Some(r#"{"a":"3.5","b":true,"c":false,"d":[1,2],"e":7}"#));

        let expected: HashMap<String, f64> = [("a", 3.5), ("b", 1.0), ("c", 0.0), ("e", 7.0)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        assert_eq!(result, expected);
    }

    #[test]
    fn test_drops_non_numeric_values() {
        let result = extract_numerics(Some(
            r#"{"label":"hall","nested":{"x":1},"missing":null,"watts":"  12.25 ","pi":"NaN","big":"inf"}"#,
        ));
        assert_eq!(result.len(), 1);
        assert_eq!(result["watts"], 12.25);
    }

    #[test]
    fn test_only_returns_existing_keys() {
        let payload = r#"{"x": 1, "y": "2", "z": "two"}"#;
        let result = extract_numerics(Some(payload));
        assert!(result.keys().all(|k| ["x", "y"].contains(&k.as_str())));
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_negative_and_exponent_values() {
        let result = extract_numerics(Some(r#"{"t": -4.5, "s": "1e3", "i": -12}"#));
        assert_eq!(result["t"], -4.5);
        assert_eq!(result["s"], 1000.0);
        assert_eq!(result["i"], -12.0);
    }
}
