//! World plugin - arena loading, navigation and setup.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::data::ArenaDefinition;
use super::navigation::{ArenaNavigation, Navigation};
use crate::core::{apply_locomotion, load_or_default, DataDirectory, GameState, SimulationSet};
use crate::player::{spawn_player, Player, PlayerConfig};

/// Marker for static arena entities (floor, obstacles).
#[derive(Component)]
pub struct ArenaGeometry;

/// World plugin - handles the arena and the navigation collaborator.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ArenaDefinition>()
            .init_resource::<Navigation>()
            .add_systems(OnEnter(GameState::Loading), load_arena)
            .add_systems(OnEnter(GameState::InGame), setup_arena)
            .add_systems(
                Update,
                confine_players
                    .after(apply_locomotion)
                    .in_set(SimulationSet::Movement),
            );
    }
}

/// Load `arena.ron` and derive the navigation surface from it.
fn load_arena(data_dir: Res<DataDirectory>, mut commands: Commands) {
    let arena: ArenaDefinition = load_or_default(&data_dir.file("arena.ron"));
    commands.insert_resource(Navigation(Box::new(ArenaNavigation::from(&arena))));
    commands.insert_resource(arena);
}

/// Build the arena and spawn the player.
///
/// Also runs when resuming from pause, so it does nothing if a player
/// already exists.
pub fn setup_arena(
    mut commands: Commands,
    arena: Res<ArenaDefinition>,
    config: Res<PlayerConfig>,
    players: Query<(), With<Player>>,
) {
    if !players.is_empty() {
        return;
    }

    info!(
        "Building arena {}x{} with {} obstacles",
        arena.half_extents.0 * 2.0,
        arena.half_extents.1 * 2.0,
        arena.obstacles.len()
    );

    commands.spawn((
        ArenaGeometry,
        Transform::from_xyz(0.0, arena.floor_height - 10.0, 0.0),
        RigidBody::Fixed,
        Collider::cuboid(arena.half_extents.0, 10.0, arena.half_extents.1),
    ));

    for obstacle in &arena.obstacles {
        commands.spawn((
            ArenaGeometry,
            Transform::from_xyz(obstacle.center.0, arena.floor_height + 100.0, obstacle.center.1),
            RigidBody::Fixed,
            Collider::cylinder(100.0, obstacle.radius),
        ));
    }

    spawn_player(&mut commands, arena.player_spawn_point(), &config);
}

/// Keep the player on the arena floor.
fn confine_players(arena: Res<ArenaDefinition>, mut players: Query<&mut Transform, With<Player>>) {
    for mut transform in players.iter_mut() {
        let confined = arena.confine(transform.translation);
        if confined != transform.translation {
            transform.translation = confined;
        }
    }
}
