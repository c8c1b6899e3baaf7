//! Player plugin - input and player-related systems.

use bevy::prelude::*;

use super::movement;

/// Player plugin - handles player input and configuration.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        movement::setup_movement_systems(app);
    }
}
