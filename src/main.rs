//! Swarm Survivor - Entry Point
//!
//! Survive the swarm until the match clock runs out.
//!
//! Controls:
//! - WASD / arrows: Move
//! - Escape: Pause/Unpause

use std::path::PathBuf;

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use clap::Parser;

use swarm_survivor::core::DataDirectory;
use swarm_survivor::director::SpawnRng;
use swarm_survivor::enemies::DetectionBridgePlugin;
use swarm_survivor::player::Player;

/// Camera height above the player, in world units.
const CAMERA_HEIGHT: f32 = 2200.0;
const CAMERA_TRAIL: f32 = 900.0;

#[derive(Parser, Debug)]
#[command(name = "swarm-survivor", about = "Top-down survival against endless enemies")]
struct Args {
    /// Directory holding enemies/, spawn.ron, game_mode.ron and arena.ron
    #[arg(long, default_value = "assets/data")]
    data_dir: PathBuf,

    /// Seed for spawn decisions; random if omitted
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    let args = Args::parse();

    let mut app = App::new();
    app
        // Bevy default plugins
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Swarm Survivor".to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))

        // Physics; colliders double as the visuals
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
        .add_plugins(RapierDebugRenderPlugin::default())

        .insert_resource(DataDirectory(args.data_dir));

    if let Some(seed) = args.seed {
        app.insert_resource(SpawnRng::seeded(seed));
    }

    app
        // Our game plugin
        .add_plugins(swarm_survivor::SwarmSurvivorPlugin)
        .add_plugins(DetectionBridgePlugin)

        .add_systems(Startup, spawn_camera)
        .add_systems(Update, follow_player)
        .run();
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, CAMERA_HEIGHT, CAMERA_TRAIL).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        DirectionalLight {
            illuminance: 8000.0,
            ..default()
        },
        Transform::from_xyz(0.0, 1.0, 0.5).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn follow_player(
    player: Query<&Transform, With<Player>>,
    mut camera: Query<&mut Transform, (With<Camera3d>, Without<Player>)>,
) {
    let (Ok(player), Ok(mut camera)) = (player.get_single(), camera.get_single_mut()) else {
        return;
    };
    let focus = player.translation;
    camera.translation = focus + Vec3::new(0.0, CAMERA_HEIGHT, CAMERA_TRAIL);
    camera.look_at(focus, Vec3::Y);
}
