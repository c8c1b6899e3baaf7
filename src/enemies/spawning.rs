//! Enemy entity construction.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::{AiState, AttackClock, Enemy, EnemyType, Target};
use super::data::EnemyDefinition;
use crate::combat::Health;
use crate::core::Locomotion;

/// Spawn one enemy of the given archetype at `location`.
///
/// The enemy starts Idle at full health. Its collider is the detection
/// volume: a ball sensor of `detection_radius` that reports overlaps with
/// the player.
pub fn spawn_enemy(
    commands: &mut Commands,
    archetype: &str,
    definition: &EnemyDefinition,
    location: Vec3,
) -> Entity {
    let stats = definition.to_stats();

    commands
        .spawn((
            (
                Enemy,
                EnemyType(archetype.to_string()),
                Name::new(definition.name.clone()),
            ),
            (
                AiState::default(),
                Health::new(stats.max_health),
                Target::default(),
                AttackClock::default(),
                Locomotion::new(stats.chase_speed),
            ),
            Transform::from_translation(location),
            (
                RigidBody::KinematicPositionBased,
                Collider::ball(stats.detection_radius),
                Sensor,
                ActiveEvents::COLLISION_EVENTS,
                ActiveCollisionTypes::default() | ActiveCollisionTypes::KINEMATIC_KINEMATIC,
            ),
            stats,
        ))
        .id()
}
