use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::model::{InstanceId, Record};

/// Which shape of `data` a caller expects back from an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataShape {
    /// `data` is one record
    Single,
    /// `data` maps each requested id to its own nested envelope
    MapOfIds,
    /// `data` is a list of records with paging metadata alongside
    Sequence,
}

/// The generic wrapper the remote store puts around every response body.
///
/// Paging fields are only filled in for list-shaped responses. `error`
/// shows up on the per-id inner envelopes of bulk responses when one id
/// could not be resolved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope<D = Value> {
    #[serde(default)]
    pub data: Option<D>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<EnvelopeError>,
}

/// Error block the store attaches to an inner envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeError {
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default)]
    pub message: Option<String>,
}

/// A window of a larger result list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<u64>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            total: None,
            size: None,
            from: None,
        }
    }
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Convert every item while keeping the paging metadata
    pub fn try_map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<Page<U>, E> {
        Ok(Page {
            data: self.data.into_iter().map(f).collect::<Result<Vec<_>, E>>()?,
            total: self.total,
            size: self.size,
            from: self.from,
        })
    }
}

/// Decoder output, one variant per [`DataShape`]
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    Single(Option<Record>),
    MapOfIds(HashMap<InstanceId, Record>),
    Sequence(Page<Record>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_paging_fields_optional() {
        let env: Envelope = serde_json::from_value(json!({"data": {"a": 1}})).unwrap();
        assert_eq!(env.data, Some(json!({"a": 1})));
        assert!(env.total.is_none());
        assert!(env.error.is_none());

        let env: Envelope = serde_json::from_value(json!({
            "data": [], "total": 12, "size": 0, "from": 10
        }))
        .unwrap();
        assert_eq!(env.total, Some(12));
        assert_eq!(env.from, Some(10));
    }

    #[test]
    fn test_inner_error_block() {
        let env: Envelope = serde_json::from_value(json!({
            "error": {"code": 404, "message": "Instance not found"}
        }))
        .unwrap();
        assert!(env.data.is_none());
        assert_eq!(env.error.unwrap().code, Some(404));
    }

    #[test]
    fn test_page_try_map_keeps_window() {
        let page = Page {
            data: vec![1, 2, 3],
            total: Some(30),
            size: Some(3),
            from: Some(6),
        };
        let mapped: Page<String> = page.try_map(|n| Ok::<_, ()>(n.to_string())).unwrap();
        assert_eq!(mapped.data, vec!["1", "2", "3"]);
        assert_eq!(mapped.total, Some(30));
        assert_eq!(mapped.from, Some(6));
    }
}
