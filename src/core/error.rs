use thiserror::Error;

use crate::command::validator::{ExpectedCount, KindRequirement};
use crate::core::config::ConfigError;
use crate::core::types::{InteractionMode, ObjectId};
use crate::feedback::catalog;

/// Everything that can stop a dispatch
///
/// The first eight variants are detected before any scene mutation. Display
/// output is the exact user-facing catalog text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CopilotError {
    #[error("{}", catalog::invalid_config(.0))]
    InvalidConfig(#[from] ConfigError),

    #[error("{}", catalog::COMMAND_EMPTY)]
    CommandEmptyOrTooShort,

    #[error("{}", catalog::COMMAND_NOT_UNDERSTOOD)]
    CommandUnrecognized,

    #[error("{}", catalog::NO_SELECTION)]
    SelectionEmpty,

    #[error("{}", catalog::wrong_mode(.current))]
    ModeMismatch { current: InteractionMode },

    #[error("{}", catalog::wrong_object_count(.expected, .actual))]
    SelectionCountMismatch { expected: ExpectedCount, actual: usize },

    #[error("{}", KindRequirement::message(.expected))]
    SelectionKindMismatch { expected: KindRequirement },

    #[error("{}", catalog::NO_ACTIVE_OBJECT)]
    ActiveObjectMissing,

    #[error("{}", catalog::object_identification_failed(.expected))]
    RoleResolutionFailure { expected: &'static str },

    #[error("{}", catalog::workflow_failed(.workflow, .detail))]
    WorkflowInternalFailure {
        workflow: &'static str,
        detail: String,
    },
}

impl CopilotError {
    /// True for failures detected before the scene was touched
    pub fn is_precondition(&self) -> bool {
        !matches!(
            self,
            CopilotError::RoleResolutionFailure { .. }
                | CopilotError::WorkflowInternalFailure { .. }
        )
    }
}

/// Failure of a host scene-graph primitive
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HostError {
    #[error("Object not found: {0}")]
    ObjectNotFound(ObjectId),

    #[error("{operation} failed: {reason}")]
    OperationFailed {
        operation: &'static str,
        reason: String,
    },

    #[error("{operation} requires {required} mode (currently in {current})")]
    InvalidMode {
        operation: &'static str,
        required: InteractionMode,
        current: InteractionMode,
    },

    #[error("Collection not found: {0}")]
    CollectionNotFound(String),
}

pub type Result<T> = std::result::Result<T, CopilotError>;

pub type HostResult<T> = std::result::Result<T, HostError>;
