//! User-facing feedback: centralized templates and formatting

pub mod catalog;

pub use catalog::{command_help, format_message};
