use log::debug;
use serde_json::Value;

use crate::error::{ClientError, Result};
use crate::logic::decode::MalformedEnvelope;
use crate::logic::projection::{project, Shape};
use crate::model::{vocab, AuthContext, Page, Record};
use crate::store::{RawResponse, Request, Transport};

pub(crate) const NOT_FOUND: u16 = 404;

/// One round trip; the status is not checked yet
pub(crate) async fn round_trip<T: Transport + ?Sized>(
    transport: &T,
    auth: &AuthContext,
    operation: &'static str,
    request: Request,
) -> Result<RawResponse> {
    debug!("{}: {}", operation, request);
    let response = transport
        .execute(&request, auth)
        .await
        .map_err(|e| ClientError::transport(operation, e))?;
    debug!("{}: status {}, {} bytes", operation, response.status, response.body.len());
    Ok(response)
}

/// Body of a successful response, anything else becomes `RemoteRejected`
pub(crate) fn success_body(operation: &'static str, response: RawResponse) -> Result<String> {
    if response.is_success() {
        Ok(response.body)
    } else {
        Err(ClientError::RemoteRejected {
            operation,
            status: response.status,
            body: response.body,
        })
    }
}

/// Round trip that must succeed
pub(crate) async fn call<T: Transport + ?Sized>(
    transport: &T,
    auth: &AuthContext,
    operation: &'static str,
    request: Request,
) -> Result<String> {
    let response = round_trip(transport, auth, operation, request).await?;
    success_body(operation, response)
}

pub(crate) fn malformed(operation: &'static str) -> impl Fn(MalformedEnvelope) -> ClientError {
    move |e| ClientError::MalformedEnvelope {
        operation,
        reason: e.0,
    }
}

/// Project every record of a page. A failure names the record's `@id`
/// when it has one.
pub(crate) fn project_page<S: Shape>(
    operation: &'static str,
    page: Page<Record>,
) -> Result<Page<S>> {
    page.try_map(|record| {
        project::<S>(&record)
            .map_err(|e| ClientError::projection(operation, record_id(&record), e))
    })
}

pub(crate) fn record_id(record: &Record) -> Option<&str> {
    record.get(vocab::ID).and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_lookup() {
        let record = serde_json::json!({"@id": "abc", "name": "x"});
        assert_eq!(record_id(record.as_object().unwrap()), Some("abc"));
        let record = serde_json::json!({"@id": 5});
        assert_eq!(record_id(record.as_object().unwrap()), None);
    }
}
