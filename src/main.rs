//! Scene Copilot - Entry Point
//!
//! Interactive shell over an in-memory scene. Scene-building commands set up
//! objects and selection; any other line is dispatched as an editing command.

use scene_copilot::command::Dispatcher;
use scene_copilot::core::config::Config;
use scene_copilot::core::types::{InteractionMode, ObjectId};
use scene_copilot::feedback::catalog;
use scene_copilot::lighting::{create_lighting_rig, RigOptions};
use scene_copilot::scene::{MemoryScene, SceneHost};

use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;

/// Command-driven geometry editing over an in-memory scene
#[derive(Parser, Debug)]
#[command(name = "scene-copilot")]
#[command(about = "Turn short text commands into multi-step modeling workflows")]
struct Args {
    /// TOML file with workflow defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Start with a cube, an empty and a curve in the scene
    #[arg(long)]
    demo: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scene_copilot=info".into()),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    tracing::info!("Scene Copilot starting...");

    let dispatcher = Dispatcher::new(config);
    let mut scene = MemoryScene::new();
    if args.demo {
        populate_demo(&mut scene);
    }

    println!("\n=== SCENE COPILOT ===");
    println!("Type a modeling command, or 'help' for the full list.");
    if dispatcher.config().show_command_help {
        println!();
        println!("{}", catalog::command_help());
    }
    println!();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        let mut words = input.split_whitespace();
        let Some(head) = words.next() else {
            continue;
        };
        let rest: Vec<&str> = words.collect();

        match head {
            "quit" | "q" => break,
            "help" => print_help(),
            "status" | "s" => print_status(&scene),
            "add" => handle_add(&mut scene, &rest),
            "select" => handle_select(&mut scene, &rest),
            "active" => handle_active(&mut scene, &rest),
            "mode" => handle_mode(&mut scene, &rest),
            "stack" => handle_stack(&scene, &rest),
            "undo" => match scene.undo() {
                Ok(label) => println!("Undid {}", label),
                Err(e) => println!("{}", e),
            },
            "redo" => match scene.redo() {
                Ok(label) => println!("Redid {}", label),
                Err(e) => println!("{}", e),
            },
            "history" => match scene.last_undo() {
                Some(unit) => println!("{}", serde_json::to_string_pretty(unit)?),
                None => println!("History is empty"),
            },
            "light" => {
                let target = scene.selection().active.map(|a| a.id);
                match create_lighting_rig(&mut scene, target, &RigOptions::default()) {
                    Ok(rig) => println!("[OK] {}", rig.message),
                    Err(e) => println!("[FAILED] {}", e),
                }
            }
            _ => {
                let result = dispatcher.run(&mut scene, input);
                let tag = if result.is_success() { "OK" } else { "FAILED" };
                println!("[{}] {}", tag, result.message);
                if dispatcher.config().show_selection_info {
                    println!("{}", scene.selection().summary());
                }
            }
        }
    }

    println!("Goodbye.");
    Ok(())
}

fn populate_demo(scene: &mut MemoryScene) {
    let cube = scene.add_mesh("Cube");
    scene.add_empty("Empty");
    scene.add_curve("Path");
    scene.select(&[cube]);
    scene.set_active(Some(cube));
    tracing::info!("Demo scene ready with {} objects", scene.object_count());
}

fn print_help() {
    println!("Scene:");
    println!("  add mesh|empty|curve|other <name>  - Add an object");
    println!("  select <name..>                    - Replace the selection");
    println!("  active <name>|none                 - Set the active object");
    println!("  mode object|edit|other             - Switch interaction mode");
    println!("  status / s                         - Show selection info");
    println!("  stack <name>                       - Show an object's modifiers");
    println!("  undo / redo                        - Step through history");
    println!("  history                            - Show the newest undo step as JSON");
    println!("  light                              - Light the active object");
    println!("  quit / q                           - Exit");
    println!();
    println!("{}", catalog::command_help());
}

fn print_status(scene: &MemoryScene) {
    println!("{}", scene.selection().summary());
    println!(
        "Objects: {}, undo: {}, redo: {}",
        scene.object_count(),
        scene.undo_depth(),
        scene.redo_depth()
    );
}

fn handle_add(scene: &mut MemoryScene, args: &[&str]) {
    let [kind, name] = args else {
        println!("Usage: add mesh|empty|curve|other <name>");
        return;
    };
    let id = match *kind {
        "mesh" => scene.add_mesh(name),
        "empty" => scene.add_empty(name),
        "curve" => scene.add_curve(name),
        "other" => scene.add_other(name),
        _ => {
            println!("Unknown kind '{}'", kind);
            return;
        }
    };
    if let Some(object) = scene.object(id) {
        println!("Added {} ({})", object.name, object.kind);
    }
}

fn lookup(scene: &MemoryScene, name: &str) -> Option<ObjectId> {
    let id = scene.find(name);
    if id.is_none() {
        println!("No object named '{}'", name);
    }
    id
}

fn handle_select(scene: &mut MemoryScene, names: &[&str]) {
    let ids: Option<Vec<ObjectId>> = names.iter().map(|name| lookup(scene, name)).collect();
    if let Some(ids) = ids {
        scene.select(&ids);
        println!("{}", scene.selection().summary());
    }
}

fn handle_active(scene: &mut MemoryScene, args: &[&str]) {
    match args {
        ["none"] => scene.set_active(None),
        [name] => {
            if let Some(id) = lookup(scene, name) {
                scene.set_active(Some(id));
            }
        }
        _ => println!("Usage: active <name>|none"),
    }
}

fn handle_mode(scene: &mut MemoryScene, args: &[&str]) {
    let mode = match args {
        ["object"] => InteractionMode::Object,
        ["edit"] => InteractionMode::Edit,
        ["other"] => InteractionMode::Other,
        _ => {
            println!("Usage: mode object|edit|other");
            return;
        }
    };
    scene.set_mode(mode);
    println!("Mode: {}", mode);
}

fn handle_stack(scene: &MemoryScene, args: &[&str]) {
    let [name] = args else {
        println!("Usage: stack <name>");
        return;
    };
    let Some(id) = lookup(scene, name) else {
        return;
    };
    match scene.modifiers(id) {
        Ok([]) => println!("{} has no modifiers", name),
        Ok(modifiers) => {
            for (i, modifier) in modifiers.iter().enumerate() {
                println!("  {}. {:?}", i, modifier);
            }
        }
        Err(e) => println!("{}", e),
    }
}
