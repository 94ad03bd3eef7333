pub mod config;
pub mod error;
pub mod types;

pub use config::{Config, ConfigError};
pub use error::{CopilotError, HostError, HostResult};
pub use types::{InteractionMode, KindCounts, ObjectId, ObjectKind, ObjectRef, SelectionSnapshot};
