//! Scene Copilot - text commands to multi-step modeling workflows

pub mod command;
pub mod core;
pub mod feedback;
pub mod lighting;
pub mod scene;
pub mod workflow;
