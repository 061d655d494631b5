use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Exactly what the remote store returned for one entity, field order included.
pub type Record = serde_json::Map<String, Value>;

/// Opaque identifier of an instance in the remote store
pub type InstanceId = String;

/// The value kinds the projector knows how to coerce between
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    String,
    Integer,
    /// A whole number above `i64::MAX`
    UnsignedOverflow,
    Float,
    Boolean,
    Record,
    Sequence,
    Null,
    /// The field is not present at all
    Absent,
}

impl Kind {
    /// Classify a JSON value. Numbers that fit an `i64` are integers, larger
    /// whole numbers are `UnsignedOverflow`, every other number is a float.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Boolean,
            Value::Number(n) if n.is_i64() => Kind::Integer,
            Value::Number(n) if n.is_u64() => Kind::UnsignedOverflow,
            Value::Number(_) => Kind::Float,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Sequence,
            Value::Object(_) => Kind::Record,
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Kind::String => "string",
            Kind::Integer => "integer",
            Kind::UnsignedOverflow => "integer above the signed 64-bit range",
            Kind::Float => "float",
            Kind::Boolean => "boolean",
            Kind::Record => "record",
            Kind::Sequence => "sequence",
            Kind::Null => "null",
            Kind::Absent => "absent",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_classification() {
        assert_eq!(Kind::of(&json!(null)), Kind::Null);
        assert_eq!(Kind::of(&json!(true)), Kind::Boolean);
        assert_eq!(Kind::of(&json!(42)), Kind::Integer);
        assert_eq!(Kind::of(&json!(-7)), Kind::Integer);
        assert_eq!(Kind::of(&json!(i64::MAX)), Kind::Integer);
        assert_eq!(Kind::of(&json!(u64::MAX)), Kind::UnsignedOverflow);
        assert_eq!(Kind::of(&json!(1.5)), Kind::Float);
        assert_eq!(Kind::of(&json!("x")), Kind::String);
        assert_eq!(Kind::of(&json!([1, 2])), Kind::Sequence);
        assert_eq!(Kind::of(&json!({"a": 1})), Kind::Record);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(Kind::Integer.to_string(), "integer");
        assert_eq!(Kind::Absent.to_string(), "absent");
    }
}
