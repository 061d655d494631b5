use serde::{Deserialize, Serialize};

use crate::logic::projection::{Fields, ProjectionError, RecordWriter, Shape};
use crate::model::{vocab, Record};

/// Profile of the user the request is authorized as
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

impl Shape for UserProfile {
    fn project(fields: &Fields<'_>) -> Result<Self, ProjectionError> {
        Ok(Self {
            id: fields.required_string(vocab::ID)?,
            username: fields.string(vocab::SCHEMA_ALTERNATE_NAME)?,
            name: fields.string(vocab::SCHEMA_NAME)?,
            given_name: fields.string(vocab::SCHEMA_GIVEN_NAME)?,
            family_name: fields.string(vocab::SCHEMA_FAMILY_NAME)?,
            email: fields.string(vocab::SCHEMA_EMAIL)?,
            picture: fields.string(vocab::META_PICTURE)?,
        })
    }

    fn to_record(&self) -> Record {
        RecordWriter::new()
            .field(vocab::ID, self.id.clone())
            .opt(vocab::SCHEMA_ALTERNATE_NAME, self.username.clone())
            .opt(vocab::SCHEMA_NAME, self.name.clone())
            .opt(vocab::SCHEMA_GIVEN_NAME, self.given_name.clone())
            .opt(vocab::SCHEMA_FAMILY_NAME, self.family_name.clone())
            .opt(vocab::SCHEMA_EMAIL, self.email.clone())
            .opt(vocab::META_PICTURE, self.picture.clone())
            .finish()
    }
}

/// Another user, as listed for invitations and reviews
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

impl Shape for UserSummary {
    fn project(fields: &Fields<'_>) -> Result<Self, ProjectionError> {
        Ok(Self {
            id: fields.required_string(vocab::ID)?,
            username: fields.string(vocab::SCHEMA_ALTERNATE_NAME)?,
            name: fields.string(vocab::SCHEMA_NAME)?,
            picture: fields.string(vocab::META_PICTURE)?,
        })
    }

    fn to_record(&self) -> Record {
        RecordWriter::new()
            .field(vocab::ID, self.id.clone())
            .opt(vocab::SCHEMA_ALTERNATE_NAME, self.username.clone())
            .opt(vocab::SCHEMA_NAME, self.name.clone())
            .opt(vocab::META_PICTURE, self.picture.clone())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::projection::project;
    use serde_json::json;

    #[test]
    fn test_user_profile_projection() {
        let source = json!({
            "@id": "https://kg.ebrains.eu/api/users/42",
            "http://schema.org/alternateName": "jdoe",
            "http://schema.org/name": "Jane Doe",
            "http://schema.org/givenName": "Jane",
            "http://schema.org/familyName": "Doe",
            "http://schema.org/email": "jane@example.org",
            "https://core.kg.ebrains.eu/vocab/meta/roles": ["curator"]
        });
        let profile: UserProfile = project(source.as_object().unwrap()).unwrap();
        assert_eq!(profile.username.as_deref(), Some("jdoe"));
        assert_eq!(profile.email.as_deref(), Some("jane@example.org"));
        assert!(profile.picture.is_none());

        let back = profile.to_record();
        assert_eq!(back.len(), 6);
        assert_eq!(back["http://schema.org/givenName"], "Jane");
    }

    #[test]
    fn test_user_summary_needs_id() {
        let source = json!({"http://schema.org/name": "Jane Doe"});
        let err = project::<UserSummary>(source.as_object().unwrap()).unwrap_err();
        assert_eq!(err.field, "@id");
    }
}
