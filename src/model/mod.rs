pub mod auth_context;
pub mod envelope;
pub mod instance;
pub mod original;
pub mod record;
pub mod space;
pub mod stage;
pub mod user;
pub mod vocab;

pub use auth_context::*;
pub use envelope::*;
pub use instance::*;
pub use original::*;
pub use record::*;
pub use space::*;
pub use stage::*;
pub use user::*;
