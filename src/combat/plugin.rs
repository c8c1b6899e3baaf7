//! Combat plugin - damage and death handling.

use bevy::prelude::*;

use super::systems;

/// Combat plugin - handles all damage systems.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        systems::setup_combat_systems(app);
    }
}
