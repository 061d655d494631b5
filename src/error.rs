use crate::logic::projection::ProjectionError;
use crate::model::InstanceId;
use crate::store::TransportError;

pub type Result<T, E = ClientError> = std::result::Result<T, E>;

/// Failures surfaced by the resolvers. Each carries the operation it came
/// from so it can be logged or shown without re-deriving context.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The store was never reached, or never answered
    #[error("{operation}: remote store unavailable: {reason}")]
    RemoteUnavailable {
        operation: &'static str,
        reason: String,
    },

    /// The request was never sent because it could not be built
    #[error("{operation}: invalid request: {reason}")]
    InvalidRequest {
        operation: &'static str,
        reason: String,
    },

    /// The store answered with a non-success status
    #[error("{operation}: remote store rejected the request with status {status}: {body}")]
    RemoteRejected {
        operation: &'static str,
        status: u16,
        body: String,
    },

    /// The body did not match any recognised envelope shape
    #[error("{operation}: malformed envelope: {reason}")]
    MalformedEnvelope {
        operation: &'static str,
        reason: String,
    },

    #[error("{operation}: cannot project {}: {source}", .id.as_deref().unwrap_or("record"))]
    Projection {
        operation: &'static str,
        id: Option<InstanceId>,
        #[source]
        source: ProjectionError,
    },
}

impl ClientError {
    pub fn operation(&self) -> &'static str {
        match self {
            ClientError::RemoteUnavailable { operation, .. }
            | ClientError::InvalidRequest { operation, .. }
            | ClientError::RemoteRejected { operation, .. }
            | ClientError::MalformedEnvelope { operation, .. }
            | ClientError::Projection { operation, .. } => operation,
        }
    }

    pub(crate) fn transport(operation: &'static str, err: TransportError) -> Self {
        match err {
            TransportError::Unavailable(reason) => {
                ClientError::RemoteUnavailable { operation, reason }
            }
            TransportError::InvalidRequest(reason) => {
                ClientError::InvalidRequest { operation, reason }
            }
        }
    }

    pub(crate) fn projection(
        operation: &'static str,
        id: Option<&str>,
        source: ProjectionError,
    ) -> Self {
        ClientError::Projection {
            operation,
            id: id.map(str::to_string),
            source,
        }
    }
}
