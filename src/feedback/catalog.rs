//! Message templates and formatting
//!
//! Every user-facing string the pipeline produces lives here. Error texts are
//! exact contracts: callers and regression tests compare them verbatim.

use std::fmt::Display;
use std::sync::OnceLock;

use handlebars::Handlebars;
use serde_json::{Map, Value};

// === COMMAND RECOGNITION ===

pub const COMMAND_EMPTY: &str = "Please enter a command";

pub const COMMAND_NOT_UNDERSTOOD: &str = "Command not understood. Try: 'make array', \
'hard-surface', 'mirror', 'solidify', 'curve deform', or 'shrinkwrap'";

// === SELECTION VALIDATION ===

pub const NO_SELECTION: &str = "Please select an object first";

pub const WRONG_MODE: &str = "This command must be run in Object Mode (currently in {{current_mode}})";

pub const WRONG_OBJECT_COUNT: &str =
    "This command requires {{expected}} selected object(s), but {{actual}} are selected";

pub const WRONG_KIND_MESH: &str = "This command requires a mesh object to be selected";

pub const WRONG_KIND_TWO_MESHES: &str = "This command requires two mesh objects to be selected";

pub const WRONG_KIND_MESH_EMPTY: &str =
    "This command requires two selected objects: a mesh and an empty";

pub const WRONG_KIND_MESH_CURVE: &str =
    "This command requires two selected objects: a mesh and a curve";

pub const NO_ACTIVE_OBJECT: &str = "Please ensure one of the selected objects is active";

// === EXECUTION ===

pub const INVALID_CONFIG: &str = "Invalid configuration: {{detail}}";

pub const OBJECT_IDENTIFICATION_FAILED: &str = "Could not identify {{expected_types}} objects";

pub const WORKFLOW_FAILED: &str = "Failed to apply {{workflow}}: {{detail}}";

pub const WORKFLOW_NOT_IMPLEMENTED: &str = "Workflow not implemented: {{workflow_type}}";

// === SUCCESS ===

pub const ARRAY_SINGLE: &str = "Array modifier added with {{count}} copies on X-axis (offset {{offset}})";

pub const ARRAY_CONTROLLED: &str =
    "Array modifier added with {{count}} copies and empty object control ({{controller}})";

pub const HARD_SURFACE: &str =
    "Hard-surface setup applied (Bevel {{segments}} segments + Subdivision level {{levels}} + Smooth)";

pub const SYMMETRIZE: &str = "Symmetrize applied on X-axis (scale applied, positive X deleted)";

pub const CURVE_DEFORM: &str = "Curve deform applied (scales applied, origins aligned to {{curve}})";

pub const SOLIDIFY: &str = "Solidify modifier added (thickness: {{thickness}}m, even offset enabled)";

pub const SHRINKWRAP: &str = "Shrinkwrap modifier added (target: {{target_name}})";

/// Recognized command phrasing, one line per workflow
pub const COMMAND_HELP: [&str; 6] = [
    "\"array\" / \"make 5 copies\" -> Smart Array",
    "\"hard-surface\" / \"subd\" -> Hard-Surface",
    "\"mirror\" / \"symmetrize\" -> Symmetrize",
    "\"curve deform\" / \"bend\" -> Curve Deform",
    "\"solidify\" / \"add thickness\" -> Solidify",
    "\"shrinkwrap\" / \"wrap\" -> Shrinkwrap",
];

/// Render a `{{name}}` template with the given arguments
///
/// Values are inserted verbatim. A template that fails to render, including
/// one that names an argument that was not supplied, is returned unchanged.
pub fn format_message(template: &str, args: &[(&str, String)]) -> String {
    let data: Map<String, Value> = args
        .iter()
        .map(|(name, value)| (name.to_string(), Value::String(value.clone())))
        .collect();

    match registry().render_template(template, &data) {
        Ok(message) => message,
        Err(e) => {
            tracing::warn!("Could not render {:?}: {}", template, e);
            template.to_string()
        }
    }
}

fn registry() -> &'static Handlebars<'static> {
    static REGISTRY: OnceLock<Handlebars<'static>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.set_strict_mode(true);
        handlebars
    })
}

/// Multi-line help text listing recognized commands
pub fn command_help() -> String {
    let mut text = String::from("Recognized commands:");
    for line in COMMAND_HELP {
        text.push_str("\n  ");
        text.push_str(line);
    }
    text
}

pub fn wrong_mode(current_mode: impl Display) -> String {
    format_message(WRONG_MODE, &[("current_mode", current_mode.to_string())])
}

pub fn wrong_object_count(expected: impl Display, actual: impl Display) -> String {
    format_message(
        WRONG_OBJECT_COUNT,
        &[
            ("expected", expected.to_string()),
            ("actual", actual.to_string()),
        ],
    )
}

pub fn object_identification_failed(expected_types: &str) -> String {
    format_message(
        OBJECT_IDENTIFICATION_FAILED,
        &[("expected_types", expected_types.to_string())],
    )
}

pub fn invalid_config(detail: impl Display) -> String {
    format_message(INVALID_CONFIG, &[("detail", detail.to_string())])
}

pub fn workflow_failed(workflow: &str, detail: impl Display) -> String {
    format_message(
        WORKFLOW_FAILED,
        &[("workflow", workflow.to_string()), ("detail", detail.to_string())],
    )
}

pub fn workflow_not_implemented(workflow_type: impl Display) -> String {
    format_message(
        WORKFLOW_NOT_IMPLEMENTED,
        &[("workflow_type", workflow_type.to_string())],
    )
}

pub fn array_single(count: u32, offset: f32) -> String {
    format_message(
        ARRAY_SINGLE,
        &[("count", count.to_string()), ("offset", format!("{offset:?}"))],
    )
}

pub fn array_controlled(count: u32, controller: &str) -> String {
    format_message(
        ARRAY_CONTROLLED,
        &[
            ("count", count.to_string()),
            ("controller", controller.to_string()),
        ],
    )
}

pub fn hard_surface(segments: u32, levels: u32) -> String {
    format_message(
        HARD_SURFACE,
        &[
            ("segments", segments.to_string()),
            ("levels", levels.to_string()),
        ],
    )
}

pub fn curve_deform(curve: &str) -> String {
    format_message(CURVE_DEFORM, &[("curve", curve.to_string())])
}

pub fn solidify(thickness: f32) -> String {
    format_message(SOLIDIFY, &[("thickness", format!("{thickness:.4}"))])
}

pub fn shrinkwrap(target_name: &str) -> String {
    format_message(SHRINKWRAP, &[("target_name", target_name.to_string())])
}
