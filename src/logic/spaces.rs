use serde_json::json;
use std::collections::HashMap;

use crate::error::{ClientError, Result};
use crate::logic::decode::{decode_record_map, decode_sequence};
use crate::logic::projection::{project, Shape};
use crate::logic::query::Query;
use crate::logic::remote::{call, malformed};
use crate::model::{AuthContext, Record, Stage, TypeInfo, Workspace};
use crate::store::{Request, Transport};

/// Reads the spaces a user can see and the type catalog
pub struct WorkspaceResolver<T> {
    transport: T,
}

impl<T: Transport> WorkspaceResolver<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub async fn workspaces(&self, auth: &AuthContext) -> Result<Vec<Workspace>> {
        const OP: &str = "workspaces";
        let request = Request::get("spaces").query(
            Query::new()
                .stage(Stage::InProgress)
                .flag("permissions", true),
        );
        let body = call(&self.transport, auth, OP, request).await?;
        let page = decode_sequence(&body).map_err(malformed(OP))?;
        project_all(OP, page.data)
    }

    pub async fn workspace_types(&self, auth: &AuthContext, space: &str) -> Result<Vec<TypeInfo>> {
        const OP: &str = "workspace_types";
        let request = Request::get("types").query(
            Query::new()
                .stage(Stage::InProgress)
                .param("space", space)
                .flag("withProperties", true),
        );
        let body = call(&self.transport, auth, OP, request).await?;
        let page = decode_sequence(&body).map_err(malformed(OP))?;
        project_all(OP, page.data)
    }

    /// Type descriptions keyed by type name; unknown names are left out
    pub async fn types_by_name(
        &self,
        auth: &AuthContext,
        names: &[String],
        with_properties: bool,
    ) -> Result<HashMap<String, TypeInfo>> {
        const OP: &str = "types_by_name";
        if names.is_empty() {
            return Ok(HashMap::new());
        }
        let request = Request::post("typesByName")
            .query(
                Query::new()
                    .stage(Stage::InProgress)
                    .flag("withProperties", with_properties),
            )
            .body(json!(names));
        let body = call(&self.transport, auth, OP, request).await?;
        decode_record_map(&body)
            .map_err(malformed(OP))?
            .into_iter()
            .map(|(name, record)| {
                project(&record)
                    .map(|info| (name.clone(), info))
                    .map_err(|e| ClientError::projection(OP, Some(&name), e))
            })
            .collect()
    }
}

fn project_all<S: Shape>(operation: &'static str, records: Vec<Record>) -> Result<Vec<S>> {
    records
        .iter()
        .map(|record| project(record).map_err(|e| ClientError::projection(operation, None, e)))
        .collect()
}
