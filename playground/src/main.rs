//! Character controller playground.
//!
//! One kinematic and one rigid-body first-person controller in a small scene.
//! WASD moves, Space jumps (rigid body), mouse looks, Tab switches controller,
//! Escape frees the cursor and a left click grabs it again.

mod camera;
mod config;
mod contacts;
mod input;
mod player;
mod world;

use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy_rapier3d::prelude::*;

use config::{asset_dir, load_motion_config, PlaygroundConfig, CONFIG_FILE};

fn main() {
    let asset_path = asset_dir();

    let mut app = App::new();

    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Motion Playground".to_string(),
                    resolution: WindowResolution::new(1280, 720),
                    ..default()
                }),
                ..default()
            })
            .set(AssetPlugin {
                file_path: asset_path.to_string_lossy().to_string(),
                ..default()
            }),
    );

    // Loaded after DefaultPlugins so LogPlugin captures the outcome.
    let motion_config = load_motion_config(&asset_path.join(CONFIG_FILE));

    // Rapier steps in FixedUpdate; MotorTickPlugin orders the motors ahead of it.
    app.add_plugins(RapierPhysicsPlugin::<NoUserData>::default().in_fixed_schedule());
    app.add_plugins(player::MotorTickPlugin);

    app.insert_resource(PlaygroundConfig(motion_config));
    app.init_resource::<input::MouseLook>();

    app.add_systems(
        Startup,
        (
            world::spawn_world,
            player::spawn_controllers,
            input::lock_cursor_on_start,
        ),
    );

    // Frame: runs after any fixed ticks of this frame. Camera last.
    app.add_systems(
        Update,
        (
            input::toggle_cursor_grab,
            player::cycle_possession,
            input::latch_jump,
            input::gather_mouse_motion,
            camera::update_camera,
        )
            .chain(),
    );

    info!("Starting motion playground");
    app.run();
}
