//! Tolerant serde helpers for payloads produced by other services
//!
//! Use with `#[serde(default, deserialize_with = "...")]`. A value of the wrong
//! JSON type is treated as absent instead of failing the whole payload.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize a value, falling back to `T::default()` if it has the wrong shape
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Deserialize an array element by element, dropping elements with the wrong shape.
///
/// Anything other than an array becomes an empty list.
pub fn seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// Like [`seq`], but elements with the wrong shape become `T::default()` so
/// positions are preserved.
pub fn seq_or_default<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).unwrap_or_default())
            .collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "or_default")]
        name: Option<String>,
        #[serde(default, deserialize_with = "seq")]
        tags: Vec<String>,
        #[serde(default, deserialize_with = "seq_or_default")]
        slots: Vec<u32>,
    }

    #[test]
    fn test_wrong_scalar_becomes_default() {
        let sample: Sample = serde_json::from_value(json!({ "name": 42 })).unwrap();
        assert_eq!(sample.name, None);
    }

    #[test]
    fn test_seq_drops_bad_elements() {
        let sample: Sample = serde_json::from_value(json!({ "tags": ["a", 1, "b"] })).unwrap();
        assert_eq!(sample.tags, vec!["a".to_string(), "b".to_string()]);

        let sample: Sample = serde_json::from_value(json!({ "tags": "a" })).unwrap();
        assert!(sample.tags.is_empty());
    }

    #[test]
    fn test_seq_or_default_keeps_positions() {
        let sample: Sample = serde_json::from_value(json!({ "slots": ["x", 2, null] })).unwrap();
        assert_eq!(sample.slots, vec![0, 2, 0]);
    }
}
