//! Global events used for cross-system communication.
//!
//! Enemy attacks and any external damage source send `DamageEvent`s; the
//! combat systems resolve them against `Health` and announce deaths with
//! `DeathEvent`. This keeps the AI, the spawn director and the game mode
//! independent of each other.

use bevy::prelude::*;

/// Sent to apply damage to an entity.
///
/// Resolution clamps health at zero and kills the target within the same
/// resolution pass. Damage sent to an entity that is already dead is ignored.
#[derive(Event, Debug, Clone, Copy)]
pub struct DamageEvent {
    /// Entity receiving damage
    pub target: Entity,
    /// Entity that caused the damage, if any
    pub source: Option<Entity>,
    /// Damage amount; negative values are treated as zero
    pub amount: f32,
}

/// Sent when an entity dies (health reaches 0).
#[derive(Event, Debug, Clone, Copy)]
pub struct DeathEvent {
    /// Entity that died
    pub entity: Entity,
    /// Entity that killed them (if any)
    pub killed_by: Option<Entity>,
}
