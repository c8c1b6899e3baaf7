//! Director plugin - population control around the player.

use bevy::prelude::*;

use super::components::{DirectorCommand, SpawnRng};
use super::spawner::SpawnDirector;
use super::systems;
use crate::core::GameState;

/// Director plugin - spawns enemies while a match runs.
///
/// Insert a seeded `SpawnRng` before adding the plugin for reproducible runs.
pub struct DirectorPlugin;

impl Plugin for DirectorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SpawnDirector>()
            .init_resource::<SpawnRng>()
            .add_event::<DirectorCommand>()
            .add_systems(OnEnter(GameState::Loading), systems::load_spawn_settings);

        systems::setup_director_systems(app);
    }
}
