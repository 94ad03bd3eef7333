//! Workflow execution: the six editing procedures and their transaction log
//!
//! Every executor records its scene mutations in a `Transaction`. A
//! successful run commits exactly one undo unit; any host failure rolls the
//! log back before the failure is reported.

pub mod executors;
pub mod mode_guard;
pub mod modifier;
pub mod transaction;

use serde::{Deserialize, Serialize};

use crate::core::error::CopilotError;

pub use executors::execute;
pub use mode_guard::EditModeGuard;
pub use modifier::{ArrayOffset, Axis, BevelLimit, Modifier, WrapMethod};
pub use transaction::{Mutation, Transaction, UndoUnit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkflowStatus {
    Success,
    Failure,
}

/// Outcome of one dispatch, always carrying a user-facing message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowResult {
    pub status: WorkflowStatus,
    pub message: String,
}

impl WorkflowResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: WorkflowStatus::Success,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: WorkflowStatus::Failure,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == WorkflowStatus::Success
    }
}

impl From<CopilotError> for WorkflowResult {
    fn from(err: CopilotError) -> Self {
        Self::failure(err.to_string())
    }
}
