//! A committed workflow is one undo step

use glam::Vec3;
use scene_copilot::command::Dispatcher;
use scene_copilot::core::error::HostError;
use scene_copilot::lighting::RigHost;
use scene_copilot::scene::{MemoryScene, SceneHost};
use scene_copilot::workflow::Modifier;

#[test]
fn test_symmetrize_undo_restores_scale_and_geometry() {
    let mut scene = MemoryScene::new();
    let cube = scene.add_mesh("Cube");
    scene.set_scale(cube, Vec3::new(2.0, 1.0, 1.0)).unwrap();
    scene.select(&[cube]);
    let before = scene.capture(cube).unwrap();

    assert!(Dispatcher::default().run(&mut scene, "mirror").is_success());
    let after = scene.capture(cube).unwrap();
    assert_ne!(before, after);

    assert_eq!(scene.undo().unwrap(), "Symmetrize");
    assert_eq!(scene.capture(cube).unwrap(), before);
    assert_eq!(scene.redo_depth(), 1);

    assert_eq!(scene.redo().unwrap(), "Symmetrize");
    assert_eq!(scene.capture(cube).unwrap(), after);
    assert_eq!(scene.undo_depth(), 1);
}

#[test]
fn test_curve_deform_undo_restores_both_objects() {
    let mut scene = MemoryScene::new();
    let cube = scene.add_mesh("Cube");
    let path = scene.add_curve("Path");
    scene.set_scale(path, Vec3::splat(3.0)).unwrap();
    scene.set_location(path, Vec3::new(0.0, 4.0, 0.0)).unwrap();
    scene.select(&[cube, path]);

    assert!(Dispatcher::default().run(&mut scene, "bend along path").is_success());
    assert_eq!(scene.location(cube).unwrap(), Vec3::new(0.0, 4.0, 0.0));
    assert_eq!(scene.object(path).unwrap().scale, Vec3::ONE);

    scene.undo().unwrap();
    assert_eq!(scene.location(cube).unwrap(), Vec3::ZERO);
    assert!(scene.modifiers(cube).unwrap().is_empty());
    assert_eq!(scene.object(path).unwrap().scale, Vec3::splat(3.0));
}

#[test]
fn test_undo_steps_back_one_workflow_at_a_time() {
    let mut scene = MemoryScene::new();
    let cube = scene.add_mesh("Cube");
    scene.select(&[cube]);
    let dispatcher = Dispatcher::default();

    assert!(dispatcher.run(&mut scene, "add thickness").is_success());
    assert!(dispatcher.run(&mut scene, "hard surface").is_success());
    assert_eq!(scene.modifiers(cube).unwrap().len(), 3);

    assert_eq!(scene.undo().unwrap(), "Hard-Surface");
    let stack = scene.modifiers(cube).unwrap();
    assert_eq!(stack.len(), 1);
    assert!(matches!(stack[0], Modifier::Solidify { .. }));

    assert_eq!(scene.undo().unwrap(), "Solidify");
    assert!(scene.modifiers(cube).unwrap().is_empty());
    assert_eq!(
        scene.undo().unwrap_err().to_string(),
        "Undo failed: Nothing to undo"
    );
}

#[test]
fn test_new_workflow_clears_redo() {
    let mut scene = MemoryScene::new();
    let cube = scene.add_mesh("Cube");
    scene.select(&[cube]);
    let dispatcher = Dispatcher::default();

    dispatcher.run(&mut scene, "solidify");
    scene.undo().unwrap();
    assert_eq!(scene.redo_depth(), 1);

    dispatcher.run(&mut scene, "array");
    assert_eq!(scene.redo_depth(), 0);
    assert!(scene.redo().is_err());
}

#[test]
fn test_rejected_command_records_nothing() {
    let mut scene = MemoryScene::new();
    let cube = scene.add_mesh("Cube");
    scene.select(&[cube]);

    let result = Dispatcher::default().run(&mut scene, "shrinkwrap");
    assert!(!result.is_success());
    assert_eq!(scene.undo_depth(), 0);
}

#[test]
fn test_undo_fails_cleanly_when_an_object_was_deleted() {
    let mut scene = MemoryScene::new();
    let cube = scene.add_mesh("Cube");
    let path = scene.add_curve("Path");
    scene.select(&[cube, path]);
    assert!(Dispatcher::default().run(&mut scene, "curve deform").is_success());

    scene.remove_object(path).unwrap();
    assert_eq!(scene.undo(), Err(HostError::ObjectNotFound(path)));

    assert_eq!(scene.undo_depth(), 1);
    assert_eq!(scene.redo_depth(), 0);
    assert!(matches!(
        scene.modifiers(cube).unwrap(),
        [Modifier::CurveDeform { .. }]
    ));
}
