pub mod decode;
pub mod instances;
pub mod projection;
pub mod query;
pub(crate) mod remote;
pub mod spaces;
pub mod users;

pub use decode::{decode, MalformedEnvelope};
pub use instances::{InstanceResolver, SuggestionRequest};
pub use projection::{project, Fields, ProjectionError, RecordWriter, Shape};
pub use query::{InstanceFlags, Query};
pub use spaces::WorkspaceResolver;
pub use users::ProfileResolver;
