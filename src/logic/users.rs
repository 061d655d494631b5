use log::debug;
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::error::{ClientError, Result};
use crate::logic::decode::{decode_sequence, decode_single, decode_ungrouped};
use crate::logic::projection::project;
use crate::logic::query::Query;
use crate::logic::remote::{call, malformed, project_page};
use crate::model::{AuthContext, UserProfile, UserSummary};
use crate::store::{Request, Transport};

/// Reads about users: the caller's own profile and user pictures
pub struct ProfileResolver<T> {
    transport: T,
}

impl<T: Transport> ProfileResolver<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub async fn profile(&self, auth: &AuthContext) -> Result<Option<UserProfile>> {
        const OP: &str = "profile";
        let body = call(&self.transport, auth, OP, Request::get("users/me")).await?;
        match decode_single(&body).map_err(malformed(OP))? {
            Some(record) => project(&record)
                .map(Some)
                .map_err(|e| ClientError::projection(OP, None, e)),
            None => Ok(None),
        }
    }

    /// Picture per user id. The store answers with a plain id → picture
    /// map; users without a picture are left out.
    pub async fn pictures(
        &self,
        auth: &AuthContext,
        user_ids: &[String],
    ) -> Result<HashMap<String, String>> {
        const OP: &str = "pictures";
        if user_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let request = Request::post("users/pictures").body(json!(user_ids));
        let body = call(&self.transport, auth, OP, request).await?;
        let map = decode_ungrouped(&body).map_err(malformed(OP))?;

        Ok(map
            .into_iter()
            .filter_map(|(id, picture)| match picture {
                Value::String(picture) => Some((id, picture)),
                _ => {
                    debug!("{}: no picture for {}", OP, id);
                    None
                }
            })
            .collect())
    }

    /// Users matching `search` that can be invited to review an instance
    pub async fn users_for_review(
        &self,
        auth: &AuthContext,
        search: &str,
    ) -> Result<Vec<UserSummary>> {
        const OP: &str = "users_for_review";
        let request = Request::get("users/review").query(Query::new().param("search", search));
        let body = call(&self.transport, auth, OP, request).await?;
        user_list(OP, &body)
    }
}

/// A sequence envelope of users; paging metadata is dropped
pub(crate) fn user_list(operation: &'static str, body: &str) -> Result<Vec<UserSummary>> {
    let page = decode_sequence(body).map_err(malformed(operation))?;
    Ok(project_page(operation, page)?.data)
}
