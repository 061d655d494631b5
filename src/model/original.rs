use serde::Serialize;

use crate::logic::projection::{project, ProjectionError, Shape};
use crate::model::Record;

/// A typed view paired with the exact record it was projected from.
///
/// The record may carry store metadata the typed shape does not model; the
/// editor diffs its edited form against `original` so those fields survive a
/// partial update. The pair is only ever built whole, and `original` cannot
/// be modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OriginalPreserving<T> {
    original: Record,
    typed: T,
}

impl<T: Shape> OriginalPreserving<T> {
    /// Project `record` onto `T` and keep both. Fails without producing
    /// anything if the projection fails.
    pub fn wrap(record: Record) -> Result<Self, ProjectionError> {
        let typed = project::<T>(&record)?;
        Ok(Self {
            original: record,
            typed,
        })
    }
}

impl<T> OriginalPreserving<T> {
    pub fn original(&self) -> &Record {
        &self.original
    }

    pub fn typed(&self) -> &T {
        &self.typed
    }

    pub fn into_parts(self) -> (Record, T) {
        (self.original, self.typed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::projection::{Fields, RecordWriter};
    use serde_json::json;

    #[derive(Debug, PartialEq)]
    struct Named {
        name: String,
    }

    impl Shape for Named {
        fn project(fields: &Fields<'_>) -> Result<Self, ProjectionError> {
            Ok(Self {
                name: fields.required_string("name")?,
            })
        }

        fn to_record(&self) -> Record {
            RecordWriter::new().field("name", self.name.clone()).finish()
        }
    }

    fn fixture() -> Record {
        json!({
            "name": "Neuron A",
            "https://core.kg.ebrains.eu/vocab/meta/revision": "_rev42",
            "nested": {"b": 2, "a": 1}
        })
        .as_object()
        .cloned()
        .unwrap()
    }

    #[test]
    fn test_original_is_untouched_by_projection() {
        let input = fixture();
        let before = serde_json::to_string(&input).unwrap();

        let result = OriginalPreserving::<Named>::wrap(input.clone()).unwrap();

        assert_eq!(result.original(), &input);
        assert_eq!(serde_json::to_string(result.original()).unwrap(), before);
        assert_eq!(result.typed().name, "Neuron A");
    }

    #[test]
    fn test_wrap_fails_atomically() {
        let mut input = fixture();
        input.insert("name".to_string(), json!(7));
        let err = OriginalPreserving::<Named>::wrap(input).unwrap_err();
        assert_eq!(err.field, "name");
    }

    #[test]
    fn test_serializes_both_halves() {
        #[derive(Debug, Serialize)]
        struct Label {
            name: String,
        }
        let pair = OriginalPreserving {
            original: fixture(),
            typed: Label {
                name: "Neuron A".to_string(),
            },
        };
        let value = serde_json::to_value(&pair).unwrap();
        assert_eq!(value["typed"]["name"], "Neuron A");
        assert_eq!(value["original"]["nested"]["b"], 2);
    }
}
