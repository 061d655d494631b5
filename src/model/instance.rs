use serde::{Deserialize, Serialize};

use crate::logic::projection::{Fields, ProjectionError, RecordWriter, Shape};
use crate::model::{vocab, InstanceId, Record};

/// Full editable view of an instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceFull {
    pub id: InstanceId,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub permissions: Vec<String>,
    /// Alternative values per property, as the store sends them
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternatives: Option<Record>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub embedded: Vec<InstanceSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified_at: Option<String>,
}

impl Shape for InstanceFull {
    fn project(fields: &Fields<'_>) -> Result<Self, ProjectionError> {
        Ok(Self {
            id: fields.required_string(vocab::ID)?,
            types: fields.strings(vocab::TYPE)?,
            space: fields.string(vocab::META_SPACE)?,
            name: fields.string(vocab::SCHEMA_NAME)?,
            permissions: fields.strings(vocab::META_PERMISSIONS)?,
            alternatives: fields.raw_record(vocab::META_ALTERNATIVE)?,
            embedded: fields.records(vocab::META_EMBEDDED)?,
            created_at: fields.string(vocab::META_CREATED_AT)?,
            last_modified_at: fields.string(vocab::META_LAST_MODIFIED_AT)?,
        })
    }

    fn to_record(&self) -> Record {
        RecordWriter::new()
            .field(vocab::ID, self.id.clone())
            .strings(vocab::TYPE, &self.types)
            .opt(vocab::META_SPACE, self.space.clone())
            .opt(vocab::SCHEMA_NAME, self.name.clone())
            .strings(vocab::META_PERMISSIONS, &self.permissions)
            .opt(vocab::META_ALTERNATIVE, self.alternatives.clone())
            .shapes(vocab::META_EMBEDDED, &self.embedded)
            .opt(vocab::META_CREATED_AT, self.created_at.clone())
            .opt(vocab::META_LAST_MODIFIED_AT, self.last_modified_at.clone())
            .finish()
    }
}

/// List entry for an instance; read-only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceSummary {
    pub id: InstanceId,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub permissions: Vec<String>,
}

impl Shape for InstanceSummary {
    fn project(fields: &Fields<'_>) -> Result<Self, ProjectionError> {
        Ok(Self {
            id: fields.required_string(vocab::ID)?,
            types: fields.strings(vocab::TYPE)?,
            space: fields.string(vocab::META_SPACE)?,
            name: fields.string(vocab::SCHEMA_NAME)?,
            permissions: fields.strings(vocab::META_PERMISSIONS)?,
        })
    }

    fn to_record(&self) -> Record {
        RecordWriter::new()
            .field(vocab::ID, self.id.clone())
            .strings(vocab::TYPE, &self.types)
            .opt(vocab::META_SPACE, self.space.clone())
            .opt(vocab::SCHEMA_NAME, self.name.clone())
            .strings(vocab::META_PERMISSIONS, &self.permissions)
            .finish()
    }
}

/// Smallest view of an instance: enough to render a link to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceLabel {
    pub id: InstanceId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space: Option<String>,
}

impl Shape for InstanceLabel {
    fn project(fields: &Fields<'_>) -> Result<Self, ProjectionError> {
        Ok(Self {
            id: fields.required_string(vocab::ID)?,
            name: fields.string(vocab::SCHEMA_NAME)?,
            space: fields.string(vocab::META_SPACE)?,
        })
    }

    fn to_record(&self) -> Record {
        RecordWriter::new()
            .field(vocab::ID, self.id.clone())
            .opt(vocab::SCHEMA_NAME, self.name.clone())
            .opt(vocab::META_SPACE, self.space.clone())
            .finish()
    }
}

/// An instance pointing at the one being edited through some property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomingLink {
    pub id: InstanceId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space: Option<String>,
}

impl IncomingLink {
    /// Label to show, falling back to the id
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }
}

impl Shape for IncomingLink {
    fn project(fields: &Fields<'_>) -> Result<Self, ProjectionError> {
        Ok(Self {
            id: fields.required_string("id")?,
            label: fields.string("label")?,
            space: fields.string("space")?,
        })
    }

    fn to_record(&self) -> Record {
        RecordWriter::new()
            .field("id", self.id.clone())
            .opt("label", self.label.clone())
            .opt("space", self.space.clone())
            .finish()
    }
}

/// Candidate link target offered while editing a property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: InstanceId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Vec::is_empty", default)]
    pub types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space: Option<String>,
}

impl Shape for Suggestion {
    fn project(fields: &Fields<'_>) -> Result<Self, ProjectionError> {
        Ok(Self {
            id: fields.required_string("id")?,
            label: fields.string("label")?,
            types: fields.strings("type")?,
            space: fields.string("space")?,
        })
    }

    fn to_record(&self) -> Record {
        RecordWriter::new()
            .field("id", self.id.clone())
            .opt("label", self.label.clone())
            .strings("type", &self.types)
            .opt("space", self.space.clone())
            .finish()
    }
}

/// One page of link suggestions
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SuggestionPage {
    pub data: Vec<Suggestion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
}

impl Shape for SuggestionPage {
    fn project(fields: &Fields<'_>) -> Result<Self, ProjectionError> {
        Ok(Self {
            data: fields.records("data")?,
            total: fields.integer("total")?,
            from: fields.integer("from")?,
            size: fields.integer("size")?,
        })
    }

    fn to_record(&self) -> Record {
        RecordWriter::new()
            .shapes("data", &self.data)
            .opt("total", self.total)
            .opt("from", self.from)
            .opt("size", self.size)
            .finish()
    }
}

/// Result of a suggested-links lookup
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SuggestionStructure {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<SuggestionPage>,
    /// Type descriptions keyed by type name, passed through untouched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<Record>,
}

impl Shape for SuggestionStructure {
    fn project(fields: &Fields<'_>) -> Result<Self, ProjectionError> {
        Ok(Self {
            suggestions: fields.record("suggestions")?,
            types: fields.raw_record("types")?,
        })
    }

    fn to_record(&self) -> Record {
        RecordWriter::new()
            .shape("suggestions", self.suggestions.as_ref())
            .opt("types", self.types.clone())
            .finish()
    }
}
