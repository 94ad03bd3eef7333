//! The six editing workflows
//!
//! Each executor runs its steps through a `Transaction` and returns the
//! success message. `execute` is the only boundary: it commits on success
//! and rolls back and converts the host error on failure.

use glam::Vec3;

use crate::command::classifier::Intent;
use crate::command::resolver::RoleAssignment;
use crate::core::config::Config;
use crate::core::error::{CopilotError, HostResult};
use crate::core::types::ObjectRef;
use crate::feedback::catalog;
use crate::scene::SceneHost;
use crate::workflow::mode_guard::EditModeGuard;
use crate::workflow::modifier::{ArrayOffset, Axis, BevelLimit, Modifier, WrapMethod};
use crate::workflow::transaction::Transaction;
use crate::workflow::WorkflowResult;

/// Run the workflow for `intent` as one atomic unit
pub fn execute<H: SceneHost + ?Sized>(
    host: &mut H,
    intent: Intent,
    roles: &RoleAssignment,
    config: &Config,
) -> WorkflowResult {
    let mut tx = Transaction::begin(intent.display_name());

    let outcome = match (intent, roles) {
        (Intent::SmartArray, RoleAssignment::Single { mesh }) => {
            smart_array_single(host, &mut tx, mesh, config)
        }
        (Intent::SmartArray, RoleAssignment::MeshController { mesh, controller }) => {
            smart_array_controlled(host, &mut tx, mesh, controller, config)
        }
        (Intent::HardSurface, RoleAssignment::Single { mesh }) => {
            hard_surface(host, &mut tx, mesh, config)
        }
        (Intent::Symmetrize, RoleAssignment::Single { mesh }) => symmetrize(host, &mut tx, mesh),
        (Intent::CurveDeform, RoleAssignment::MeshCurve { mesh, curve }) => {
            curve_deform(host, &mut tx, mesh, curve)
        }
        (Intent::Solidify, RoleAssignment::Single { mesh }) => {
            solidify(host, &mut tx, mesh, config)
        }
        (Intent::Shrinkwrap, RoleAssignment::SourceTarget { source, target }) => {
            shrinkwrap(host, &mut tx, source, target)
        }
        _ => {
            tracing::warn!("No workflow for {} with roles {:?}", intent, roles);
            return WorkflowResult::failure(catalog::workflow_not_implemented(intent));
        }
    };

    match outcome {
        Ok(message) => {
            tx.commit(host);
            tracing::info!("{}: {}", intent, message);
            WorkflowResult::success(message)
        }
        Err(e) => {
            tracing::error!("{} failed: {}", intent, e);
            tx.rollback(host);
            CopilotError::WorkflowInternalFailure {
                workflow: intent.workflow_label(),
                detail: e.to_string(),
            }
            .into()
        }
    }
}

// === SMART ARRAY ===

fn smart_array_single<H: SceneHost + ?Sized>(
    host: &mut H,
    tx: &mut Transaction,
    mesh: &ObjectRef,
    config: &Config,
) -> HostResult<String> {
    tx.add_modifier(
        host,
        mesh.id,
        Modifier::Array {
            count: config.array_count,
            offset: ArrayOffset::Relative(Vec3::new(config.array_offset_x, 0.0, 0.0)),
        },
    )?;
    Ok(catalog::array_single(config.array_count, config.array_offset_x))
}

/// The controller only lends its transform; it gets no stack entry
fn smart_array_controlled<H: SceneHost + ?Sized>(
    host: &mut H,
    tx: &mut Transaction,
    mesh: &ObjectRef,
    controller: &ObjectRef,
    config: &Config,
) -> HostResult<String> {
    tx.add_modifier(
        host,
        mesh.id,
        Modifier::Array {
            count: config.array_count,
            offset: ArrayOffset::Object(controller.id),
        },
    )?;
    Ok(catalog::array_controlled(
        config.array_count,
        &controller.name,
    ))
}

// === HARD SURFACE ===

/// Bevel must sit below subdivision in the stack
fn hard_surface<H: SceneHost + ?Sized>(
    host: &mut H,
    tx: &mut Transaction,
    mesh: &ObjectRef,
    config: &Config,
) -> HostResult<String> {
    tx.add_modifier(
        host,
        mesh.id,
        Modifier::Bevel {
            segments: config.bevel_segments,
            limit: BevelLimit::default(),
        },
    )?;
    tx.add_modifier(
        host,
        mesh.id,
        Modifier::Subdivision {
            levels: config.subdivision_levels,
        },
    )?;
    tx.set_smooth_shading(host, mesh.id, true)?;
    Ok(catalog::hard_surface(
        config.bevel_segments,
        config.subdivision_levels,
    ))
}

// === SYMMETRIZE ===

fn symmetrize<H: SceneHost + ?Sized>(
    host: &mut H,
    tx: &mut Transaction,
    mesh: &ObjectRef,
) -> HostResult<String> {
    tx.apply_scale(host, mesh.id)?;
    tx.add_modifier(
        host,
        mesh.id,
        Modifier::Mirror {
            axis: Axis::X,
            bisect: true,
            clip: true,
        },
    )?;

    // The guard puts the host back in its previous mode on every early return
    let mut guard = EditModeGuard::enter(host, mesh.id)?;
    let selected = tx.select_vertices(guard.host(), mesh.id, &|v: Vec3| v.x > 0.0)?;
    let removed = tx.delete_selected_vertices(guard.host(), mesh.id)?;
    guard.exit()?;

    tracing::debug!(
        "Symmetrize on {}: {} selected, {} removed",
        mesh.name,
        selected,
        removed
    );
    Ok(catalog::SYMMETRIZE.to_string())
}

// === CURVE DEFORM ===

fn curve_deform<H: SceneHost + ?Sized>(
    host: &mut H,
    tx: &mut Transaction,
    mesh: &ObjectRef,
    curve: &ObjectRef,
) -> HostResult<String> {
    tx.apply_scale(host, mesh.id)?;
    tx.apply_scale(host, curve.id)?;

    let origin = host.location(curve.id)?;
    tx.set_location(host, mesh.id, origin)?;

    tx.add_modifier(host, mesh.id, Modifier::CurveDeform { curve: curve.id })?;
    Ok(catalog::curve_deform(&curve.name))
}

// === SOLIDIFY ===

fn solidify<H: SceneHost + ?Sized>(
    host: &mut H,
    tx: &mut Transaction,
    mesh: &ObjectRef,
    config: &Config,
) -> HostResult<String> {
    tx.add_modifier(
        host,
        mesh.id,
        Modifier::Solidify {
            thickness: config.solidify_thickness,
            even_offset: true,
        },
    )?;
    Ok(catalog::solidify(config.solidify_thickness))
}

// === SHRINKWRAP ===

fn shrinkwrap<H: SceneHost + ?Sized>(
    host: &mut H,
    tx: &mut Transaction,
    source: &ObjectRef,
    target: &ObjectRef,
) -> HostResult<String> {
    tx.add_modifier(
        host,
        source.id,
        Modifier::Shrinkwrap {
            target: target.id,
            wrap_method: WrapMethod::NearestSurfacePoint,
        },
    )?;
    Ok(catalog::shrinkwrap(&target.name))
}
