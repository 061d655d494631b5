pub mod api;
pub mod config;
pub mod error;
pub mod logic;
pub mod model;
pub mod store;

pub use error::{ClientError, Result};

// Export logic types
pub use logic::{
    project, Fields, InstanceFlags, InstanceResolver, MalformedEnvelope, ProfileResolver,
    ProjectionError, Query, RecordWriter, Shape, SuggestionRequest, WorkspaceResolver,
};

// Export all model types
pub use model::*;

// Export store types
pub use store::{HttpTransport, Method, RawResponse, Request, Transport, TransportError};
