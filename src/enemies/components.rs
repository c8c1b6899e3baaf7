//! Enemy-related components.

use bevy::prelude::*;

/// Chasing enemies give up once the target is this many detection radii away.
/// Keeping it above 1.0 stops enemies flickering between Idle and Chasing at
/// the edge of their detection radius.
pub const CHASE_EXIT_FACTOR: f32 = 1.2;

/// Seconds a dead enemy lingers before it is despawned.
pub const DEATH_GRACE_SECS: f32 = 2.0;

/// Marker component for all enemies.
#[derive(Component)]
pub struct Enemy;

/// Archetype identifier (matches the RON file name).
#[derive(Component, Clone, Debug, PartialEq, Eq)]
pub struct EnemyType(pub String);

/// AI state machine for enemy behavior.
#[derive(Component, Default, PartialEq, Eq, Clone, Copy, Debug)]
pub enum AiState {
    /// Standing still, waiting for the player to enter detection range.
    #[default]
    Idle,
    /// Moving toward the player.
    Chasing,
    /// In attack range, striking whenever the cooldown allows.
    Attacking,
    /// Terminal. Waiting out the grace period before despawn.
    Dead,
}

impl AiState {
    pub fn is_alive(&self) -> bool {
        *self != AiState::Dead
    }
}

/// Enemy stats loaded from RON data files.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct EnemyStats {
    pub max_health: f32,
    pub attack_damage: f32,
    pub attack_range: f32,
    pub chase_speed: f32,
    pub detection_radius: f32,
    pub attack_cooldown: f32,
}

impl Default for EnemyStats {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            attack_damage: 20.0,
            attack_range: 100.0,
            chase_speed: 300.0,
            detection_radius: 800.0,
            attack_cooldown: 1.0,
        }
    }
}

impl EnemyStats {
    /// Distance beyond which a chasing enemy drops its target.
    pub fn chase_exit_distance(&self) -> f32 {
        self.detection_radius * CHASE_EXIT_FACTOR
    }
}

/// The entity this enemy is after.
///
/// Only a lookup handle: the enemy never owns the player, and a handle whose
/// entity has been despawned is treated as no target at all.
#[derive(Component, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Target(pub Option<Entity>);

/// Match time of the last attack, gating the next one.
#[derive(Component, Default, Clone, Copy, Debug, PartialEq)]
pub struct AttackClock {
    pub last_attack_time: Option<f32>,
}

impl AttackClock {
    /// Whether an attack at `now` respects `cooldown`.
    pub fn ready(&self, now: f32, cooldown: f32) -> bool {
        self.last_attack_time
            .map_or(true, |last| now >= last + cooldown)
    }

    pub fn record(&mut self, now: f32) {
        self.last_attack_time = Some(now);
    }
}

/// Timer for the grace period before despawn.
#[derive(Component)]
pub struct DeathTimer(pub Timer);

impl Default for DeathTimer {
    fn default() -> Self {
        Self(Timer::from_seconds(DEATH_GRACE_SECS, TimerMode::Once))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_threshold_is_above_entry_threshold() {
        let stats = EnemyStats::default();
        assert!(stats.chase_exit_distance() > stats.detection_radius);
        assert_eq!(stats.chase_exit_distance(), 960.0);
    }

    #[test]
    fn attack_clock_is_ready_before_first_attack() {
        let mut clock = AttackClock::default();
        assert!(clock.ready(0.0, 1.0));
        clock.record(5.0);
        assert!(!clock.ready(5.5, 1.0));
        assert!(clock.ready(6.0, 1.0));
    }
}
