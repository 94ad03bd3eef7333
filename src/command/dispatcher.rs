//! Single entry point: text in, `WorkflowResult` out
//!
//! Check config -> classify -> validate -> resolve roles -> execute. Every
//! rejection happens before the scene is touched, and no path returns
//! anything but a `WorkflowResult`.

use std::time::{Duration, Instant};

use crate::command::classifier::{classify, is_too_short, Intent};
use crate::command::resolver::{resolve_roles, RoleAssignment};
use crate::command::validator::validate;
use crate::core::config::Config;
use crate::core::error::{CopilotError, Result};
use crate::core::types::SelectionSnapshot;
use crate::scene::SceneHost;
use crate::workflow::{execute, WorkflowResult};

/// Run every precondition check without touching the scene
pub fn prepare(text: &str, snapshot: &SelectionSnapshot) -> Result<(Intent, RoleAssignment)> {
    if is_too_short(text) {
        return Err(CopilotError::CommandEmptyOrTooShort);
    }

    let intent = classify(text);
    tracing::debug!("Classified {:?} as {}", text, intent);
    if !intent.is_known() {
        return Err(CopilotError::CommandUnrecognized);
    }

    validate(intent, snapshot)?;
    tracing::debug!("Selection valid for {}", intent);

    let roles = resolve_roles(intent, snapshot)?;
    Ok((intent, roles))
}

/// Dispatch one command against a selection snapshot
pub fn dispatch<H: SceneHost + ?Sized>(
    host: &mut H,
    text: &str,
    snapshot: &SelectionSnapshot,
    config: &Config,
) -> WorkflowResult {
    let started = Instant::now();

    let prepared = config
        .validate()
        .map_err(CopilotError::from)
        .and_then(|()| prepare(text, snapshot));
    let (intent, roles) = match prepared {
        Ok(prepared) => prepared,
        Err(e) => {
            tracing::warn!("Rejected {:?}: {}", text, e);
            return e.into();
        }
    };
    let prepared = started.elapsed();

    let result = execute(host, intent, &roles, config);

    if config.log_timings {
        log_timings(intent, prepared, started.elapsed().saturating_sub(prepared));
    }
    result
}

fn log_timings(intent: Intent, prepare: Duration, execute: Duration) {
    tracing::info!(
        "{} timings: prepare {}us, execute {}us",
        intent,
        prepare.as_micros(),
        execute.as_micros()
    );
}

/// Dispatcher bound to one configuration
///
/// Captures a fresh selection snapshot from the host on every run.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    config: Config,
}

impl Dispatcher {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn run<H: SceneHost + ?Sized>(&self, host: &mut H, text: &str) -> WorkflowResult {
        let snapshot = host.selection();
        dispatch(host, text, &snapshot, &self.config)
    }
}
