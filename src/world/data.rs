//! Arena description loaded from `arena.ron`.

use bevy::prelude::*;
use serde::Deserialize;

/// A round obstacle on the arena floor.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ObstacleDef {
    pub center: (f32, f32),
    pub radius: f32,
}

/// The play area: a flat floor centred on the origin.
#[derive(Resource, Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ArenaDefinition {
    /// Half width (x) and half depth (z) of the floor
    pub half_extents: (f32, f32),
    pub floor_height: f32,
    /// Where the player appears, on the XZ plane
    pub player_spawn: (f32, f32),
    pub obstacles: Vec<ObstacleDef>,
}

impl Default for ArenaDefinition {
    fn default() -> Self {
        Self {
            half_extents: (5000.0, 5000.0),
            floor_height: 0.0,
            player_spawn: (0.0, 0.0),
            obstacles: Vec::new(),
        }
    }
}

impl ArenaDefinition {
    pub fn player_spawn_point(&self) -> Vec3 {
        Vec3::new(self.player_spawn.0, self.floor_height, self.player_spawn.1)
    }

    /// Clamp a position onto the floor rectangle.
    pub fn confine(&self, position: Vec3) -> Vec3 {
        Vec3::new(
            position.x.clamp(-self.half_extents.0, self.half_extents.0),
            position.y,
            position.z.clamp(-self.half_extents.1, self.half_extents.1),
        )
    }
}
