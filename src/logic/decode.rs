//! Envelope decoding.
//!
//! The store wraps every payload in `{ "data": ..., "total", "size", "from" }`.
//! Bulk-by-id endpoints nest a whole envelope per id inside the outer
//! `data`, so those are decoded in two steps: the outer id map first, then
//! each inner envelope on its own. An inner envelope that is unreadable,
//! carries an error, or has no data is skipped; the rest of the batch is
//! still returned.

use log::{debug, warn};
use serde_json::Value;
use std::collections::HashMap;

use crate::model::{DataShape, Decoded, Envelope, InstanceId, Kind, Page, Record};

/// The outer body does not have any shape the store is known to send
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct MalformedEnvelope(pub String);

/// Decode `body` as the given shape
pub fn decode(body: &str, shape: DataShape) -> Result<Decoded, MalformedEnvelope> {
    match shape {
        DataShape::Single => decode_single(body).map(Decoded::Single),
        DataShape::MapOfIds => decode_record_map(body).map(Decoded::MapOfIds),
        DataShape::Sequence => decode_sequence(body).map(Decoded::Sequence),
    }
}

/// `data` holds one record. No body, a `null` body or `null` data decode to `None`.
pub fn decode_single(body: &str) -> Result<Option<Record>, MalformedEnvelope> {
    let Some(envelope) = outer_envelope(body)? else {
        return Ok(None);
    };
    match envelope.data {
        None => Ok(None),
        Some(Value::Object(record)) => Ok(Some(record)),
        Some(other) => Err(unexpected("data", Kind::Record, &other)),
    }
}

/// `data` holds a list of records plus paging metadata
pub fn decode_sequence(body: &str) -> Result<Page<Record>, MalformedEnvelope> {
    let Some(envelope) = outer_envelope(body)? else {
        return Ok(Page::default());
    };
    let items = match envelope.data {
        None => Vec::new(),
        Some(Value::Array(items)) => items,
        Some(other) => return Err(unexpected("data", Kind::Sequence, &other)),
    };
    let data = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(record) => Ok(record),
            other => Err(unexpected(&format!("data[{}]", index), Kind::Record, &other)),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Page {
        data,
        total: envelope.total,
        size: envelope.size,
        from: envelope.from,
    })
}

/// `data` maps ids to inner envelopes whose `data` is a record
pub fn decode_record_map(body: &str) -> Result<HashMap<InstanceId, Record>, MalformedEnvelope> {
    let entries = decode_id_map(body)?;
    Ok(entries
        .into_iter()
        .filter_map(|(id, data)| match data {
            Value::Object(record) => Some((id, record)),
            other => {
                warn!("skipping {}: inner data is a {}, not a record", id, Kind::of(&other));
                None
            }
        })
        .collect())
}

/// Two-level decode of a bulk response, returning each id's inner `data`
/// whatever its kind
pub fn decode_id_map(body: &str) -> Result<HashMap<InstanceId, Value>, MalformedEnvelope> {
    let Some(envelope) = outer_envelope(body)? else {
        return Ok(HashMap::new());
    };
    let entries = match envelope.data {
        None => return Ok(HashMap::new()),
        Some(Value::Object(entries)) => entries,
        Some(other) => return Err(unexpected("data", Kind::Record, &other)),
    };

    Ok(entries
        .into_iter()
        .filter_map(|(id, inner)| inner_data(&id, inner).map(|data| (id, data)))
        .collect())
}

/// A bare JSON object with no envelope around it
pub fn decode_ungrouped(body: &str) -> Result<Record, MalformedEnvelope> {
    match parse_body(body)? {
        None | Some(Value::Null) => Ok(Record::new()),
        Some(Value::Object(map)) => Ok(map),
        Some(other) => Err(unexpected("body", Kind::Record, &other)),
    }
}

fn inner_data(id: &str, inner: Value) -> Option<Value> {
    let envelope: Envelope = match serde_json::from_value(inner) {
        Ok(envelope) => envelope,
        Err(e) => {
            warn!("skipping {}: inner envelope unreadable: {}", id, e);
            return None;
        }
    };
    if let Some(error) = envelope.error {
        debug!(
            "skipping {}: store reported error {:?}: {}",
            id,
            error.code,
            error.message.unwrap_or_default()
        );
        return None;
    }
    match envelope.data {
        None | Some(Value::Null) => {
            debug!("skipping {}: no data", id);
            None
        }
        Some(data) => Some(data),
    }
}

fn parse_body(body: &str) -> Result<Option<Value>, MalformedEnvelope> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(body)
        .map(Some)
        .map_err(|e| MalformedEnvelope(format!("body is not JSON: {}", e)))
}

fn outer_envelope(body: &str) -> Result<Option<Envelope>, MalformedEnvelope> {
    match parse_body(body)? {
        None | Some(Value::Null) => Ok(None),
        Some(value @ Value::Object(_)) => serde_json::from_value(value)
            .map(Some)
            .map_err(|e| MalformedEnvelope(format!("unreadable envelope: {}", e))),
        Some(other) => Err(unexpected("body", Kind::Record, &other)),
    }
}

fn unexpected(location: &str, expected: Kind, actual: &Value) -> MalformedEnvelope {
    MalformedEnvelope(format!(
        "expected {} in {}, found {}",
        expected,
        location,
        Kind::of(actual)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_record() {
        let body = json!({"data": {"@id": "a", "name": "Neuron A"}}).to_string();
        let record = decode_single(&body).unwrap().unwrap();
        assert_eq!(record["name"], "Neuron A");
    }

    #[test]
    fn test_absent_bodies_are_empty() {
        assert_eq!(decode_single("").unwrap(), None);
        assert_eq!(decode_single("null").unwrap(), None);
        assert_eq!(decode_single(r#"{"data": null}"#).unwrap(), None);
        assert_eq!(decode_single("{}").unwrap(), None);
        assert!(decode_record_map("").unwrap().is_empty());
        assert!(decode_record_map(r#"{"data": null}"#).unwrap().is_empty());
        assert!(decode_sequence("  ").unwrap().is_empty());
    }

    #[test]
    fn test_scalar_outer_is_malformed() {
        let err = decode_single("42").unwrap_err();
        assert_eq!(err.0, "expected record in body, found integer");

        assert!(decode_record_map("[1, 2]").is_err());
        assert!(decode_sequence(r#""text""#).is_err());
        assert!(decode_single("{not json").is_err());
    }

    #[test]
    fn test_wrong_data_kind_is_malformed() {
        let err = decode_single(r#"{"data": [1]}"#).unwrap_err();
        assert_eq!(err.0, "expected record in data, found sequence");

        let err = decode_sequence(r#"{"data": {"a": 1}}"#).unwrap_err();
        assert_eq!(err.0, "expected sequence in data, found record");

        let err = decode_sequence(r#"{"data": [{"a": 1}, 3]}"#).unwrap_err();
        assert_eq!(err.0, "expected record in data[1], found integer");
    }

    #[test]
    fn test_bad_paging_field_is_malformed() {
        assert!(decode_sequence(r#"{"data": [], "total": "many"}"#).is_err());
    }

    #[test]
    fn test_sequence_keeps_paging() {
        let body = json!({
            "data": [{"@id": "a"}, {"@id": "b"}],
            "total": 40, "size": 2, "from": 10
        })
        .to_string();
        let page = decode_sequence(&body).unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page.total, Some(40));
        assert_eq!(page.size, Some(2));
        assert_eq!(page.from, Some(10));
    }

    #[test]
    fn test_map_of_ids_unwraps_inner_envelopes() {
        let body = json!({
            "data": {
                "id1": {"data": {"name": "Neuron A"}},
                "id2": {"data": {"name": "Neuron B"}}
            }
        })
        .to_string();
        let map = decode_record_map(&body).unwrap();
        assert_eq!(map.len(), 2);
        // the inner record, not the inner envelope
        assert_eq!(map["id1"].get("name"), Some(&json!("Neuron A")));
        assert!(map["id1"].get("data").is_none());
    }

    #[test]
    fn test_map_of_ids_skips_failed_entries() {
        let body = json!({
            "data": {
                "A": {"data": {"name": "a"}},
                "B": {"error": {"code": 404, "message": "not found"}},
                "C": {"data": {"name": "c"}},
                "D": "garbage",
                "E": {"data": null},
                "F": {"data": "RELEASED"}
            }
        })
        .to_string();
        let map = decode_record_map(&body).unwrap();
        let mut keys: Vec<_> = map.keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, vec!["A", "C"]);

        let raw = decode_id_map(&body).unwrap();
        assert_eq!(raw.get("F"), Some(&json!("RELEASED")));
        assert_eq!(raw.len(), 3);
    }

    #[test]
    fn test_decode_dispatches_on_shape() {
        let body = r#"{"data": [{"a": 1}]}"#;
        match decode(body, DataShape::Sequence).unwrap() {
            Decoded::Sequence(page) => assert_eq!(page.len(), 1),
            other => panic!("unexpected {:?}", other),
        }
        assert!(decode(body, DataShape::Single).is_err());
        assert!(decode(body, DataShape::MapOfIds).is_err());
    }

    #[test]
    fn test_field_order_is_preserved() {
        let body = r#"{"data": {"zeta": 1, "alpha": 2, "mid": 3}}"#;
        let record = decode_single(body).unwrap().unwrap();
        let keys: Vec<_> = record.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_ungrouped_map() {
        let body = r#"{"u1": "data:image/png;base64,AAA", "u2": null}"#;
        let record = decode_ungrouped(body).unwrap();
        assert_eq!(record.len(), 2);
        assert!(decode_ungrouped("").unwrap().is_empty());
        assert!(decode_ungrouped("[]").is_err());
    }
}
