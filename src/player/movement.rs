//! Top-down player movement.
//!
//! Input only produces a movement intent on the player's `Locomotion`; the
//! shared locomotion system does the actual moving.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::*;
use crate::combat::Health;
use crate::core::{Locomotion, SimulationSet};

/// Set up player movement systems.
pub fn setup_movement_systems(app: &mut App) {
    app.init_resource::<PlayerConfig>().add_systems(
        Update,
        read_movement_input
            .run_if(resource_exists::<ButtonInput<KeyCode>>)
            .in_set(SimulationSet::Input),
    );
}

/// Planar intent from a set of held directions (up = -Z on screen).
pub fn intent_from_keys(up: bool, down: bool, left: bool, right: bool) -> Vec3 {
    let mut direction = Vec3::ZERO;
    if up {
        direction.z -= 1.0;
    }
    if down {
        direction.z += 1.0;
    }
    if left {
        direction.x -= 1.0;
    }
    if right {
        direction.x += 1.0;
    }
    // Normalize to prevent faster diagonal movement
    direction.normalize_or_zero()
}

/// Handle WASD / arrow key movement.
pub fn read_movement_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut player_query: Query<&mut Locomotion, With<Player>>,
) {
    let Ok(mut locomotion) = player_query.get_single_mut() else {
        return;
    };

    let held = |keys: [KeyCode; 2]| keyboard.any_pressed(keys);
    let direction = intent_from_keys(
        held([KeyCode::KeyW, KeyCode::ArrowUp]),
        held([KeyCode::KeyS, KeyCode::ArrowDown]),
        held([KeyCode::KeyA, KeyCode::ArrowLeft]),
        held([KeyCode::KeyD, KeyCode::ArrowRight]),
    );

    if direction == Vec3::ZERO {
        locomotion.stop();
    } else {
        locomotion.steer(direction);
    }
}

/// Spawn the player entity.
pub fn spawn_player(commands: &mut Commands, position: Vec3, config: &PlayerConfig) -> Entity {
    commands
        .spawn((
            Player,
            Name::new("Player"),
            Health::new(config.max_health),
            Locomotion::new(config.move_speed),
            Transform::from_translation(position),
            // Rapier physics components
            RigidBody::KinematicPositionBased,
            Collider::capsule_y(50.0, 40.0),
            ActiveCollisionTypes::default() | ActiveCollisionTypes::KINEMATIC_KINEMATIC,
        ))
        .id()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn diagonal_input_is_normalized() {
        let intent = intent_from_keys(true, false, false, true);
        assert_relative_eq!(intent.length(), 1.0);
        assert!(intent.x > 0.0 && intent.z < 0.0);
    }

    #[test]
    fn opposite_keys_cancel() {
        assert_eq!(intent_from_keys(true, true, false, false), Vec3::ZERO);
    }
}
