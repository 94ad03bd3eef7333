//! Command pipeline
//!
//! Free text -> Intent -> validated selection -> RoleAssignment -> workflow:
//! classifier -> validator -> resolver -> dispatcher

pub mod classifier;
pub mod dispatcher;
pub mod resolver;
pub mod validator;

pub use classifier::{classify, CommandPatternTable, Intent, COMMAND_PATTERNS};
pub use dispatcher::{dispatch, prepare, Dispatcher};
pub use resolver::{pair_by_kind, resolve_roles, RoleAssignment};
pub use validator::{rule_for, validate, ExpectedCount, KindRequirement, ValidationResult, ValidationRule};
