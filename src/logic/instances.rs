use log::{debug, info};
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::error::{ClientError, Result};
use crate::logic::decode::{decode_id_map, decode_record_map, decode_sequence, decode_single};
use crate::logic::projection::{project, Shape};
use crate::logic::query::{
    incoming_links_query, instances_query, search_query, suggestion_query, InstanceFlags, Query,
};
use crate::logic::remote::{call, malformed, project_page, round_trip, success_body, NOT_FOUND};
use crate::logic::users::user_list;
use crate::model::{
    AuthContext, InstanceId, InstanceLabel, InstanceSummary, OriginalPreserving, Page, Record,
    ReleaseStatus, ReleaseTreeScope, Stage, SuggestionStructure, UserSummary,
};
use crate::store::{Request, Transport};

/// Narrowing for a suggested-links lookup
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionRequest<'a> {
    pub property: &'a str,
    pub type_name: Option<&'a str>,
    pub search: Option<&'a str>,
    pub from: u64,
    pub size: u64,
}

impl<'a> SuggestionRequest<'a> {
    pub fn new(property: &'a str, from: u64, size: u64) -> Self {
        Self {
            property,
            type_name: None,
            search: None,
            from,
            size,
        }
    }
}

/// Reads and writes instances in the remote store.
///
/// Every operation is one round trip. Reads that find nothing return an
/// empty result instead of an error.
pub struct InstanceResolver<T> {
    transport: T,
}

impl<T: Transport> InstanceResolver<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub async fn get_by_id<S: Shape>(
        &self,
        auth: &AuthContext,
        id: &str,
        flags: InstanceFlags,
    ) -> Result<Option<OriginalPreserving<S>>> {
        const OP: &str = "get_by_id";
        let request = Request::get(format!("instances/{}", id))
            .query(instances_query(Stage::InProgress, flags));

        let response = round_trip(&self.transport, auth, OP, request).await?;
        if response.status == NOT_FOUND {
            debug!("{}: {} not found", OP, id);
            return Ok(None);
        }
        let body = success_body(OP, response)?;
        match decode_single(&body).map_err(malformed(OP))? {
            Some(record) => wrap(OP, id, record).map(Some),
            None => Ok(None),
        }
    }

    /// Bulk read in one request. Ids the store could not resolve are left
    /// out of the returned map.
    pub async fn get_by_ids<S: Shape>(
        &self,
        auth: &AuthContext,
        ids: &[InstanceId],
        stage: Stage,
        flags: InstanceFlags,
    ) -> Result<HashMap<InstanceId, OriginalPreserving<S>>> {
        const OP: &str = "get_by_ids";
        let records = self.fetch_by_ids(OP, auth, ids, stage, flags).await?;
        records
            .into_iter()
            .map(|(id, record)| wrap(OP, &id, record).map(|result| (id, result)))
            .collect()
    }

    /// Bulk read of list entries; only the typed view is kept
    pub async fn summaries_by_ids(
        &self,
        auth: &AuthContext,
        ids: &[InstanceId],
        stage: Stage,
    ) -> Result<HashMap<InstanceId, InstanceSummary>> {
        const OP: &str = "summaries_by_ids";
        let records = self
            .fetch_by_ids(OP, auth, ids, stage, InstanceFlags::for_summary())
            .await?;
        project_map(OP, records)
    }

    /// Bulk read of display labels, e.g. for the targets of link fields
    pub async fn labels_by_ids(
        &self,
        auth: &AuthContext,
        ids: &[InstanceId],
        stage: Stage,
    ) -> Result<HashMap<InstanceId, InstanceLabel>> {
        const OP: &str = "labels_by_ids";
        let records = self
            .fetch_by_ids(OP, auth, ids, stage, InstanceFlags::default())
            .await?;
        project_map(OP, records)
    }

    async fn fetch_by_ids(
        &self,
        operation: &'static str,
        auth: &AuthContext,
        ids: &[InstanceId],
        stage: Stage,
        flags: InstanceFlags,
    ) -> Result<HashMap<InstanceId, Record>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let request = Request::post("instancesByIds")
            .query(instances_query(stage, flags))
            .body(json!(ids));

        let body = call(&self.transport, auth, operation, request).await?;
        let records = decode_record_map(&body).map_err(malformed(operation))?;
        if records.len() < ids.len() {
            debug!("{}: {} of {} ids resolved", operation, records.len(), ids.len());
        }
        Ok(records)
    }

    /// Paged listing of a space. List items are summaries, so only the
    /// typed view is kept.
    pub async fn search<S: Shape>(
        &self,
        auth: &AuthContext,
        space: &str,
        type_name: Option<&str>,
        search_by_label: Option<&str>,
        from: Option<u64>,
        size: Option<u64>,
    ) -> Result<Page<S>> {
        const OP: &str = "search";
        let query = search_query(space, type_name, search_by_label, from, size);
        let request = Request::get("instances").query(query);

        let body = call(&self.transport, auth, OP, request).await?;
        let page = decode_sequence(&body).map_err(malformed(OP))?;
        project_page(OP, page)
    }

    /// Next page of instances of `type_name` linking to `id` through
    /// `property`
    pub async fn incoming_links<S: Shape>(
        &self,
        auth: &AuthContext,
        id: &str,
        property: &str,
        type_name: &str,
        from: u64,
        size: u64,
    ) -> Result<Page<S>> {
        const OP: &str = "incoming_links";
        let request = Request::get(format!("instances/{}/incomingLinks", id))
            .query(incoming_links_query(property, type_name, from, size));

        let body = call(&self.transport, auth, OP, request).await?;
        let page = decode_sequence(&body).map_err(malformed(OP))?;
        project_page(OP, page)
    }

    /// Create an instance in `space`. A fresh UUID is used when `id` is `None`.
    pub async fn create<S: Shape>(
        &self,
        auth: &AuthContext,
        space: &str,
        id: Option<&str>,
        body: &Record,
    ) -> Result<OriginalPreserving<S>> {
        const OP: &str = "create";
        let id = id
            .map(str::to_string)
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let request = Request::post(format!("instances/{}", id))
            .query(
                Query::new()
                    .flag("returnPermissions", true)
                    .param("space", space)
                    .flag("returnAlternatives", true),
            )
            .body(Value::Object(body.clone()));

        let response_body = call(&self.transport, auth, OP, request).await?;
        let result = refreshed(OP, &id, &response_body)?;
        info!("{}: created {} in {}", OP, id, space);
        Ok(result)
    }

    /// Submit a partial record for `id`; returns the store's refreshed view
    pub async fn update<S: Shape>(
        &self,
        auth: &AuthContext,
        id: &str,
        body: &Record,
    ) -> Result<OriginalPreserving<S>> {
        const OP: &str = "update";
        let request = Request::patch(format!("instances/{}", id))
            .query(
                Query::new()
                    .flag("returnPermissions", true)
                    .flag("returnAlternatives", true),
            )
            .body(Value::Object(body.clone()));

        let response_body = call(&self.transport, auth, OP, request).await?;
        refreshed(OP, id, &response_body)
    }

    pub async fn delete(&self, auth: &AuthContext, id: &str) -> Result<()> {
        call(&self.transport, auth, "delete", Request::delete(format!("instances/{}", id))).await?;
        info!("delete: removed {}", id);
        Ok(())
    }

    /// Parent/child tree around an instance, untyped
    pub async fn scope(&self, auth: &AuthContext, id: &str) -> Result<Option<Record>> {
        const OP: &str = "scope";
        let request = Request::get(format!("instances/{}/scope", id)).query(
            Query::new()
                .stage(Stage::InProgress)
                .flag("returnPermissions", true),
        );
        let body = call(&self.transport, auth, OP, request).await?;
        decode_single(&body).map_err(malformed(OP))
    }

    /// Incoming and outgoing links of an instance, untyped
    pub async fn neighbors(&self, auth: &AuthContext, id: &str) -> Result<Option<Record>> {
        const OP: &str = "neighbors";
        let request = Request::get(format!("instances/{}/neighbors", id))
            .query(Query::new().stage(Stage::InProgress));
        let body = call(&self.transport, auth, OP, request).await?;
        decode_single(&body).map_err(malformed(OP))
    }

    /// Candidate link targets for one property. `payload` is the instance
    /// as currently edited.
    pub async fn suggest_links(
        &self,
        auth: &AuthContext,
        id: &str,
        suggestion: &SuggestionRequest<'_>,
        payload: &Record,
    ) -> Result<Option<SuggestionStructure>> {
        const OP: &str = "suggest_links";
        let request = Request::post(format!("instances/{}/suggestedLinksForProperty", id))
            .query(suggestion_query(
                suggestion.property,
                suggestion.type_name,
                suggestion.search,
                suggestion.from,
                suggestion.size,
            ))
            .body(Value::Object(payload.clone()));

        let body = call(&self.transport, auth, OP, request).await?;
        match decode_single(&body).map_err(malformed(OP))? {
            Some(record) => project(&record)
                .map(Some)
                .map_err(|e| ClientError::projection(OP, Some(id), e)),
            None => Ok(None),
        }
    }

    /// Release state per id; ids without a readable status are left out
    pub async fn release_status(
        &self,
        auth: &AuthContext,
        ids: &[InstanceId],
        scope: ReleaseTreeScope,
    ) -> Result<HashMap<InstanceId, ReleaseStatus>> {
        const OP: &str = "release_status";
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let request = Request::post("releases/status")
            .query(Query::new().param("releaseTreeScope", scope))
            .body(json!(ids));

        let body = call(&self.transport, auth, OP, request).await?;
        let entries = decode_id_map(&body).map_err(malformed(OP))?;
        Ok(entries
            .into_iter()
            .filter_map(|(id, data)| {
                let status = data.as_str().and_then(ReleaseStatus::parse);
                if status.is_none() {
                    debug!("{}: unrecognised status for {}: {}", OP, id, data);
                }
                status.map(|s| (id, s))
            })
            .collect())
    }

    pub async fn release(&self, auth: &AuthContext, id: &str) -> Result<()> {
        let request = Request::put(format!("instances/{}/release", id));
        call(&self.transport, auth, "release", request).await?;
        Ok(())
    }

    pub async fn unrelease(&self, auth: &AuthContext, id: &str) -> Result<()> {
        let request = Request::delete(format!("instances/{}/release", id));
        call(&self.transport, auth, "unrelease", request).await?;
        Ok(())
    }

    pub async fn move_to_space(&self, auth: &AuthContext, id: &str, space: &str) -> Result<()> {
        let request = Request::put(format!("instances/{}/spaces/{}", id, space));
        call(&self.transport, auth, "move_to_space", request).await?;
        info!("move_to_space: moved {} to {}", id, space);
        Ok(())
    }

    /// Users invited to review an instance
    pub async fn invited_users(&self, auth: &AuthContext, id: &str) -> Result<Vec<UserSummary>> {
        const OP: &str = "invited_users";
        let request = Request::get(format!("instances/{}/invitedUsers", id));
        let body = call(&self.transport, auth, OP, request).await?;
        user_list(OP, &body)
    }

    /// Invite `user_id` to review `id`; returns the invitation list afterwards
    pub async fn invite_user(
        &self,
        auth: &AuthContext,
        id: &str,
        user_id: &str,
    ) -> Result<Vec<UserSummary>> {
        const OP: &str = "invite_user";
        let request = Request::put(format!("instances/{}/invitedUsers/{}", id, user_id));
        let body = call(&self.transport, auth, OP, request).await?;
        info!("{}: invited {} to {}", OP, user_id, id);
        user_list(OP, &body)
    }

    /// Withdraw an invitation; returns the invitation list afterwards
    pub async fn remove_invitation(
        &self,
        auth: &AuthContext,
        id: &str,
        user_id: &str,
    ) -> Result<Vec<UserSummary>> {
        const OP: &str = "remove_invitation";
        let request = Request::delete(format!("instances/{}/invitedUsers/{}", id, user_id));
        let body = call(&self.transport, auth, OP, request).await?;
        info!("{}: removed invitation of {} to {}", OP, user_id, id);
        user_list(OP, &body)
    }
}

fn wrap<S: Shape>(
    operation: &'static str,
    id: &str,
    record: Record,
) -> Result<OriginalPreserving<S>> {
    OriginalPreserving::wrap(record).map_err(|e| ClientError::projection(operation, Some(id), e))
}

fn project_map<S: Shape>(
    operation: &'static str,
    records: HashMap<InstanceId, Record>,
) -> Result<HashMap<InstanceId, S>> {
    records
        .into_iter()
        .map(|(id, record)| match project::<S>(&record) {
            Ok(typed) => Ok((id, typed)),
            Err(e) => Err(ClientError::projection(operation, Some(&id), e)),
        })
        .collect()
}

/// Create and update must hand back the stored record
fn refreshed<S: Shape>(
    operation: &'static str,
    id: &str,
    body: &str,
) -> Result<OriginalPreserving<S>> {
    let record = decode_single(body)
        .map_err(malformed(operation))?
        .ok_or_else(|| ClientError::MalformedEnvelope {
            operation,
            reason: format!("no record returned for {}", id),
        })?;
    wrap(operation, id, record)
}
