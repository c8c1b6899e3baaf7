//! Enemy plugin - registers all enemy systems.

use bevy::prelude::*;

use super::ai;
use super::data::{load_enemy_definitions, EnemyRegistry};
use super::detection::{handle_detection_events, DetectionEvent};
use crate::core::{GameState, SimulationSet};

/// Enemy plugin - handles enemy data, AI and death cleanup.
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app
            .init_resource::<EnemyRegistry>()
            .add_event::<DetectionEvent>()
            .add_systems(OnEnter(GameState::Loading), load_enemy_definitions)
            // Sensor overrides first, then the polling state machine
            .add_systems(
                Update,
                (handle_detection_events, ai::update_enemy_ai)
                    .chain()
                    .in_set(SimulationSet::Ai),
            )
            .add_systems(
                Update,
                ai::despawn_dead_enemies.in_set(SimulationSet::Cleanup),
            );
    }
}
