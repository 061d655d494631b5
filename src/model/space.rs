use serde::{Deserialize, Serialize};

use crate::logic::projection::{Fields, ProjectionError, RecordWriter, Shape};
use crate::model::{vocab, Record};

/// A space the user can browse or write to. The flags stay `None` when the
/// store leaves them out; read them with [`Workspace::is_auto_release`] and
/// [`Workspace::is_client_space`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub permissions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_release: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_space: Option<bool>,
}

impl Shape for Workspace {
    fn project(fields: &Fields<'_>) -> Result<Self, ProjectionError> {
        Ok(Self {
            name: fields.required_string(vocab::SCHEMA_NAME)?,
            identifier: fields.string(vocab::SCHEMA_IDENTIFIER)?,
            permissions: fields.strings(vocab::META_PERMISSIONS)?,
            auto_release: fields.boolean(vocab::META_AUTORELEASE)?,
            client_space: fields.boolean(vocab::META_CLIENT_SPACE)?,
        })
    }

    fn to_record(&self) -> Record {
        RecordWriter::new()
            .field(vocab::SCHEMA_NAME, self.name.clone())
            .opt(vocab::SCHEMA_IDENTIFIER, self.identifier.clone())
            .strings(vocab::META_PERMISSIONS, &self.permissions)
            .opt(vocab::META_AUTORELEASE, self.auto_release)
            .opt(vocab::META_CLIENT_SPACE, self.client_space)
            .finish()
    }
}

impl Workspace {
    pub fn is_auto_release(&self) -> bool {
        self.auto_release.unwrap_or(false)
    }

    pub fn is_client_space(&self) -> bool {
        self.client_space.unwrap_or(false)
    }
}

/// Entry of the type catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeInfo {
    /// Fully qualified type name
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_property: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occurrences: Option<i64>,
}

impl Shape for TypeInfo {
    fn project(fields: &Fields<'_>) -> Result<Self, ProjectionError> {
        Ok(Self {
            name: fields.required_string(vocab::SCHEMA_IDENTIFIER)?,
            label: fields.string(vocab::SCHEMA_NAME)?,
            color: fields.string(vocab::META_TYPE_COLOR)?,
            description: fields.string(vocab::SCHEMA_DESCRIPTION)?,
            label_property: fields.string(vocab::META_TYPE_LABEL_PROPERTY)?,
            occurrences: fields.integer(vocab::META_OCCURRENCES)?,
        })
    }

    fn to_record(&self) -> Record {
        RecordWriter::new()
            .field(vocab::SCHEMA_IDENTIFIER, self.name.clone())
            .opt(vocab::SCHEMA_NAME, self.label.clone())
            .opt(vocab::META_TYPE_COLOR, self.color.clone())
            .opt(vocab::SCHEMA_DESCRIPTION, self.description.clone())
            .opt(vocab::META_TYPE_LABEL_PROPERTY, self.label_property.clone())
            .opt(vocab::META_OCCURRENCES, self.occurrences)
            .finish()
    }
}
