//! Player-related components.

use bevy::prelude::*;

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// Configuration for the player character.
#[derive(Resource, Clone, Debug)]
pub struct PlayerConfig {
    /// Movement speed in units per second
    pub move_speed: f32,
    pub max_health: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            move_speed: 600.0,
            max_health: 100.0,
        }
    }
}
