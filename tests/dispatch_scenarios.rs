//! End-to-end dispatch against the in-memory scene

use glam::Vec3;
use scene_copilot::command::Dispatcher;
use scene_copilot::core::config::Config;
use scene_copilot::core::types::{InteractionMode, ObjectId};
use scene_copilot::feedback::catalog;
use scene_copilot::scene::{HostOp, MemoryScene, SceneHost};
use scene_copilot::workflow::{ArrayOffset, Axis, Modifier, WorkflowStatus};

fn one_mesh() -> (MemoryScene, ObjectId) {
    let mut scene = MemoryScene::new();
    let cube = scene.add_mesh("Cube");
    scene.select(&[cube]);
    scene.set_active(Some(cube));
    (scene, cube)
}

#[test]
fn test_array_on_single_mesh() {
    let (mut scene, cube) = one_mesh();

    let result = Dispatcher::default().run(&mut scene, "create an array");
    assert_eq!(result.status, WorkflowStatus::Success);
    assert!(result.message.contains("5 copies"), "{}", result.message);
    assert_eq!(
        scene.modifiers(cube).unwrap(),
        &[Modifier::Array {
            count: 5,
            offset: ArrayOffset::Relative(Vec3::new(1.0, 0.0, 0.0)),
        }]
    );
}

#[test]
fn test_mirror_rejects_two_meshes() {
    let mut scene = MemoryScene::new();
    let a = scene.add_mesh("A");
    let b = scene.add_mesh("B");
    scene.select(&[a, b]);

    let result = Dispatcher::default().run(&mut scene, "mirror");
    assert_eq!(result.status, WorkflowStatus::Failure);
    assert_eq!(
        result.message,
        "This command requires 1 selected object(s), but 2 are selected"
    );
    assert!(scene.modifiers(a).unwrap().is_empty());
    assert!(scene.modifiers(b).unwrap().is_empty());
}

#[test]
fn test_shrinkwrap_targets_the_inactive_mesh() {
    let mut scene = MemoryScene::new();
    let a = scene.add_mesh("A");
    let b = scene.add_mesh("B");
    scene.select(&[a, b]);
    scene.set_active(Some(a));

    let result = Dispatcher::default().run(&mut scene, "shrinkwrap");
    assert!(result.is_success(), "{}", result.message);
    assert_eq!(result.message, "Shrinkwrap modifier added (target: B)");

    let stack = scene.modifiers(a).unwrap();
    assert_eq!(stack.len(), 1);
    assert_eq!(stack[0].referenced_object(), Some(b));
    assert!(scene.modifiers(b).unwrap().is_empty());
}

#[test]
fn test_shrinkwrap_follows_active_when_reversed() {
    let mut scene = MemoryScene::new();
    let a = scene.add_mesh("A");
    let b = scene.add_mesh("B");
    scene.select(&[a, b]);
    scene.set_active(Some(b));

    assert!(Dispatcher::default().run(&mut scene, "wrap it").is_success());
    assert!(scene.modifiers(a).unwrap().is_empty());
    assert_eq!(scene.modifiers(b).unwrap()[0].referenced_object(), Some(a));
}

#[test]
fn test_hard_surface_stack_order_and_shading() {
    let (mut scene, cube) = one_mesh();

    let result = Dispatcher::default().run(&mut scene, "hard-surface");
    assert!(result.is_success(), "{}", result.message);

    let kinds: Vec<&str> = scene
        .modifiers(cube)
        .unwrap()
        .iter()
        .map(Modifier::kind_name)
        .collect();
    assert_eq!(kinds, ["Bevel", "Subdivision"]);
    assert!(matches!(
        scene.modifiers(cube).unwrap()[0],
        Modifier::Bevel { segments: 3, .. }
    ));
    assert_eq!(
        scene.modifiers(cube).unwrap()[1],
        Modifier::Subdivision { levels: 2 }
    );
    assert!(scene.object(cube).unwrap().mesh.as_ref().unwrap().all_smooth());
}

#[test]
fn test_unknown_text_ignores_selection_and_mode() {
    let mut scene = MemoryScene::new();
    scene.set_mode(InteractionMode::Other);

    let result = Dispatcher::default().run(&mut scene, "xyz");
    assert_eq!(result.status, WorkflowStatus::Failure);
    assert_eq!(result.message, catalog::COMMAND_NOT_UNDERSTOOD);

    let (mut scene, _) = one_mesh();
    let result = Dispatcher::default().run(&mut scene, "xyz");
    assert_eq!(result.message, catalog::COMMAND_NOT_UNDERSTOOD);
}

#[test]
fn test_repeated_command_appends_twice() {
    let (mut scene, cube) = one_mesh();
    let dispatcher = Dispatcher::default();

    assert!(dispatcher.run(&mut scene, "solidify").is_success());
    assert!(dispatcher.run(&mut scene, "solidify").is_success());

    let stack = scene.modifiers(cube).unwrap();
    assert_eq!(stack.len(), 2);
    assert_eq!(stack[0], stack[1]);
    assert_eq!(scene.undo_depth(), 2);
}

#[test]
fn test_config_values_reach_the_stack() {
    let (mut scene, cube) = one_mesh();
    let config = Config {
        array_count: 12,
        array_offset_x: 2.5,
        ..Config::default()
    };

    let result = Dispatcher::new(config).run(&mut scene, "array");
    assert!(result.message.contains("12 copies"), "{}", result.message);
    assert_eq!(
        scene.modifiers(cube).unwrap()[0],
        Modifier::Array {
            count: 12,
            offset: ArrayOffset::Relative(Vec3::new(2.5, 0.0, 0.0)),
        }
    );
}

#[test]
fn test_controlled_array_uses_empty_as_offset() {
    let mut scene = MemoryScene::new();
    let cube = scene.add_mesh("Cube");
    let empty = scene.add_empty("Controller");
    scene.select(&[empty, cube]);

    let result = Dispatcher::default().run(&mut scene, "duplicate");
    assert_eq!(
        result.message,
        "Array modifier added with 5 copies and empty object control (Controller)"
    );
    assert_eq!(
        scene.modifiers(cube).unwrap()[0],
        Modifier::Array {
            count: 5,
            offset: ArrayOffset::Object(empty),
        }
    );
    assert!(scene.modifiers(empty).unwrap().is_empty());
}

#[test]
fn test_symmetrize_deletes_positive_half() {
    let (mut scene, cube) = one_mesh();
    scene.set_scale(cube, Vec3::splat(2.0)).unwrap();

    let result = Dispatcher::default().run(&mut scene, "symmetrize");
    assert!(result.is_success(), "{}", result.message);
    assert_eq!(scene.interaction_mode(), InteractionMode::Object);

    let object = scene.object(cube).unwrap();
    assert_eq!(object.scale, Vec3::ONE);
    assert_eq!(
        object.modifiers,
        [Modifier::Mirror {
            axis: Axis::X,
            bisect: true,
            clip: true,
        }]
    );

    let mesh = object.mesh.as_ref().unwrap();
    assert_eq!(mesh.vertex_count(), 4);
    assert!(mesh.vertices.iter().all(|v| v.x <= 0.0));
    // scale was baked before the cut
    assert!(mesh.vertices.iter().all(|v| v.x == -2.0));
}

#[test]
fn test_curve_deform_aligns_mesh_to_curve() {
    let mut scene = MemoryScene::new();
    let cube = scene.add_mesh("Cube");
    let path = scene.add_curve("Path");
    scene.set_location(path, Vec3::new(3.0, 1.0, 0.0)).unwrap();
    scene.select(&[cube, path]);

    let result = Dispatcher::default().run(&mut scene, "curve deform");
    assert_eq!(
        result.message,
        "Curve deform applied (scales applied, origins aligned to Path)"
    );
    assert_eq!(scene.location(cube).unwrap(), Vec3::new(3.0, 1.0, 0.0));
    assert_eq!(
        scene.modifiers(cube).unwrap(),
        &[Modifier::CurveDeform { curve: path }]
    );
}

#[test]
fn test_kind_and_mode_rejections() {
    let mut scene = MemoryScene::new();
    let cube = scene.add_mesh("Cube");
    let path = scene.add_curve("Path");
    let dispatcher = Dispatcher::default();

    scene.select(&[cube, path]);
    assert_eq!(
        dispatcher.run(&mut scene, "array").message,
        catalog::WRONG_KIND_MESH_EMPTY
    );

    scene.select(&[path]);
    assert_eq!(
        dispatcher.run(&mut scene, "solidify").message,
        catalog::WRONG_KIND_MESH
    );

    scene.select(&[cube]);
    scene.set_mode(InteractionMode::Edit);
    assert_eq!(
        dispatcher.run(&mut scene, "solidify").message,
        "This command must be run in Object Mode (currently in EDIT)"
    );

    scene.set_mode(InteractionMode::Object);
    scene.select(&[]);
    assert_eq!(
        dispatcher.run(&mut scene, "solidify").message,
        catalog::NO_SELECTION
    );
}

#[test]
fn test_shrinkwrap_needs_active_in_selection() {
    let mut scene = MemoryScene::new();
    let a = scene.add_mesh("A");
    let b = scene.add_mesh("B");
    let c = scene.add_mesh("C");
    scene.select(&[a, b]);
    scene.set_active(Some(c));

    let result = Dispatcher::default().run(&mut scene, "shrinkwrap");
    assert_eq!(result.message, catalog::NO_ACTIVE_OBJECT);
}

#[test]
fn test_mid_workflow_failure_rolls_back() {
    let (mut scene, cube) = one_mesh();
    scene.fail_after(HostOp::AddModifier, 1);

    let result = Dispatcher::default().run(&mut scene, "subd");
    assert_eq!(result.status, WorkflowStatus::Failure);
    assert_eq!(
        result.message,
        "Failed to apply hard-surface setup: Add modifier failed: injected failure"
    );
    assert!(scene.modifiers(cube).unwrap().is_empty());
    assert!(!scene.object(cube).unwrap().mesh.as_ref().unwrap().all_smooth());
    assert_eq!(scene.undo_depth(), 0);
}

#[test]
fn test_failed_symmetrize_returns_to_object_mode() {
    let (mut scene, cube) = one_mesh();
    scene.fail_next(HostOp::DeleteSelectedVertices);

    let result = Dispatcher::default().run(&mut scene, "mirror");
    assert_eq!(result.status, WorkflowStatus::Failure);
    assert_eq!(scene.interaction_mode(), InteractionMode::Object);

    let object = scene.object(cube).unwrap();
    assert!(object.modifiers.is_empty());
    assert_eq!(object.mesh.as_ref().unwrap().vertex_count(), 8);
}
