//! Server identifiers.
//!
//! The backend emits primary keys as JSON numbers on some endpoints and as
//! strings on others; the client keeps them as opaque strings.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub type RemoteId = String;

fn value_to_id(value: Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub fn deserialize_id<'de, D>(deserializer: D) -> Result<RemoteId, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    value_to_id(value).ok_or_else(|| serde::de::Error::custom("expected a string or numeric id"))
}

pub fn deserialize_opt_id<'de, D>(deserializer: D) -> Result<Option<RemoteId>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(value_to_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Row {
        #[serde(deserialize_with = "deserialize_id")]
        id: RemoteId,
        #[serde(default, deserialize_with = "deserialize_opt_id")]
        assessment_id: Option<RemoteId>,
    }

    #[test]
    fn test_numeric_and_string_ids() {
        let row: Row = serde_json::from_str(r#"{"id": 42, "assessment_id": "a-1"}"#).unwrap();
        assert_eq!(row.id, "42");
        assert_eq!(row.assessment_id.as_deref(), Some("a-1"));

        let row: Row = serde_json::from_str(r#"{"id": "7", "assessment_id": null}"#).unwrap();
        assert_eq!(row.id, "7");
        assert!(row.assessment_id.is_none());

        let row: Row = serde_json::from_str(r#"{"id": "7"}"#).unwrap();
        assert!(row.assessment_id.is_none());
    }
}
