//! Typed projection of untyped records.
//!
//! Every target shape declares its own field table by implementing [`Shape`]:
//! `project` reads the fields it knows through a [`Fields`] reader and
//! `to_record` writes the same fields back. Fields the shape does not name
//! are ignored, absent or `null` fields become `None`/empty, and a field
//! holding the wrong kind of value fails with a [`ProjectionError`] naming
//! it. Nothing is guessed or truncated.

use serde_json::Value;

use crate::model::{Kind, Record};

/// A field could not be coerced into the kind its shape declares
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("field '{field}': expected {expected}, found {actual}")]
pub struct ProjectionError {
    /// Dotted path of the field, e.g. `suggestions.data[2].label`
    pub field: String,
    pub expected: Kind,
    pub actual: Kind,
}

/// A destination shape with an explicit field-mapping table
pub trait Shape: Sized {
    fn project(fields: &Fields<'_>) -> Result<Self, ProjectionError>;

    /// Write the declared fields back into record form
    fn to_record(&self) -> Record;
}

/// Project `record` onto shape `T`
pub fn project<T: Shape>(record: &Record) -> Result<T, ProjectionError> {
    T::project(&Fields::new(record))
}

/// Read-only view over a record's fields with coercion helpers
pub struct Fields<'a> {
    record: &'a Record,
    path: String,
}

impl<'a> Fields<'a> {
    pub fn new(record: &'a Record) -> Self {
        Self {
            record,
            path: String::new(),
        }
    }

    fn nested(record: &'a Record, path: String) -> Self {
        Self { record, path }
    }

    fn path_of(&self, name: &str) -> String {
        if self.path.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.path, name)
        }
    }

    fn mismatch(&self, name: &str, expected: Kind, actual: &Value) -> ProjectionError {
        ProjectionError {
            field: self.path_of(name),
            expected,
            actual: Kind::of(actual),
        }
    }

    /// The field's value, treating `null` like an absent field
    fn present(&self, name: &str) -> Option<&'a Value> {
        match self.record.get(name) {
            None | Some(Value::Null) => None,
            Some(value) => Some(value),
        }
    }

    pub fn string(&self, name: &str) -> Result<Option<String>, ProjectionError> {
        match self.present(name) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(self.mismatch(name, Kind::String, other)),
        }
    }

    pub fn required_string(&self, name: &str) -> Result<String, ProjectionError> {
        self.string(name)?.ok_or_else(|| ProjectionError {
            field: self.path_of(name),
            expected: Kind::String,
            actual: self.record.get(name).map(Kind::of).unwrap_or(Kind::Absent),
        })
    }

    pub fn integer(&self, name: &str) -> Result<Option<i64>, ProjectionError> {
        match self.present(name) {
            None => Ok(None),
            Some(value @ Value::Number(n)) => n
                .as_i64()
                .map(Some)
                .ok_or_else(|| self.mismatch(name, Kind::Integer, value)),
            Some(other) => Err(self.mismatch(name, Kind::Integer, other)),
        }
    }

    /// Integers widen to floats; nothing else does
    pub fn float(&self, name: &str) -> Result<Option<f64>, ProjectionError> {
        match self.present(name) {
            None => Ok(None),
            Some(value @ Value::Number(n)) => n
                .as_f64()
                .map(Some)
                .ok_or_else(|| self.mismatch(name, Kind::Float, value)),
            Some(other) => Err(self.mismatch(name, Kind::Float, other)),
        }
    }

    pub fn boolean(&self, name: &str) -> Result<Option<bool>, ProjectionError> {
        match self.present(name) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(self.mismatch(name, Kind::Boolean, other)),
        }
    }

    /// A nested record kept as-is, without projecting it
    pub fn raw_record(&self, name: &str) -> Result<Option<Record>, ProjectionError> {
        match self.present(name) {
            None => Ok(None),
            Some(Value::Object(map)) => Ok(Some(map.clone())),
            Some(other) => Err(self.mismatch(name, Kind::Record, other)),
        }
    }

    /// A nested record projected with the same rules
    pub fn record<T: Shape>(&self, name: &str) -> Result<Option<T>, ProjectionError> {
        match self.present(name) {
            None => Ok(None),
            Some(Value::Object(map)) => {
                T::project(&Fields::nested(map, self.path_of(name))).map(Some)
            }
            Some(other) => Err(self.mismatch(name, Kind::Record, other)),
        }
    }

    /// A sequence of records, each projected onto `T`
    pub fn records<T: Shape>(&self, name: &str) -> Result<Vec<T>, ProjectionError> {
        let items = match self.present(name) {
            None => return Ok(Vec::new()),
            Some(Value::Array(items)) => items,
            Some(other) => return Err(self.mismatch(name, Kind::Sequence, other)),
        };
        let path = self.path_of(name);
        items
            .iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(map) => {
                    T::project(&Fields::nested(map, format!("{}[{}]", path, index)))
                }
                other => Err(ProjectionError {
                    field: format!("{}[{}]", path, index),
                    expected: Kind::Record,
                    actual: Kind::of(other),
                }),
            })
            .collect()
    }

    /// A sequence of strings
    pub fn strings(&self, name: &str) -> Result<Vec<String>, ProjectionError> {
        let items = match self.present(name) {
            None => return Ok(Vec::new()),
            Some(Value::Array(items)) => items,
            Some(other) => return Err(self.mismatch(name, Kind::Sequence, other)),
        };
        let path = self.path_of(name);
        items
            .iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(ProjectionError {
                    field: format!("{}[{}]", path, index),
                    expected: Kind::String,
                    actual: Kind::of(other),
                }),
            })
            .collect()
    }
}

/// Builder for the reverse mapping in [`Shape::to_record`].
/// `None` values and empty sequences are left out.
#[derive(Debug, Default)]
pub struct RecordWriter {
    record: Record,
}

impl RecordWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.record.insert(name.to_string(), value.into());
        self
    }

    pub fn opt<V: Into<Value>>(self, name: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.field(name, value),
            None => self,
        }
    }

    pub fn strings(self, name: &str, values: &[String]) -> Self {
        if values.is_empty() {
            return self;
        }
        self.field(name, values.to_vec())
    }

    pub fn shape<T: Shape>(self, name: &str, value: Option<&T>) -> Self {
        self.opt(name, value.map(|v| Value::Object(v.to_record())))
    }

    pub fn shapes<T: Shape>(self, name: &str, values: &[T]) -> Self {
        if values.is_empty() {
            return self;
        }
        let items: Vec<Value> = values.iter().map(|v| Value::Object(v.to_record())).collect();
        self.field(name, items)
    }

    pub fn finish(self) -> Record {
        self.record
    }
}
