//! Combat-related components.

use bevy::prelude::*;

// Re-export from core to avoid duplication
pub use crate::core::{DamageEvent, DeathEvent};

/// Result of applying damage to a `Health` pool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageOutcome {
    /// Target was already dead; nothing changed.
    Ignored,
    /// Health went down but the target survives.
    Wounded { dealt: f32 },
    /// This hit brought health to exactly zero.
    Killed { dealt: f32 },
}

/// Component for entities that can take damage.
///
/// `current` always stays within `[0, maximum]`.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Health {
    pub current: f32,
    pub maximum: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        let max = max.max(0.0);
        Self {
            current: max,
            maximum: max,
        }
    }

    /// Subtract `amount`, clamping at zero. Dead entities ignore damage and
    /// negative amounts never heal.
    pub fn apply_damage(&mut self, amount: f32) -> DamageOutcome {
        if self.is_dead() {
            return DamageOutcome::Ignored;
        }

        let dealt = amount.max(0.0).min(self.current);
        self.current -= dealt;

        if self.current <= 0.0 {
            self.current = 0.0;
            DamageOutcome::Killed { dealt }
        } else {
            DamageOutcome::Wounded { dealt }
        }
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }

    pub fn percentage(&self) -> f32 {
        if self.maximum > 0.0 {
            self.current / self.maximum
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn overkill_clamps_to_zero() {
        let mut health = Health::new(100.0);
        assert_eq!(health.apply_damage(30.0), DamageOutcome::Wounded { dealt: 30.0 });
        assert_eq!(health.apply_damage(80.0), DamageOutcome::Killed { dealt: 70.0 });
        assert_eq!(health.current, 0.0);
        assert!(health.is_dead());
    }

    #[test]
    fn dead_health_ignores_further_damage() {
        let mut health = Health::new(10.0);
        health.apply_damage(10.0);
        assert_eq!(health.apply_damage(5.0), DamageOutcome::Ignored);
        assert_eq!(health.current, 0.0);
    }

    #[test]
    fn negative_damage_does_not_heal() {
        let mut health = Health::new(50.0);
        health.apply_damage(20.0);
        assert_eq!(health.apply_damage(-40.0), DamageOutcome::Wounded { dealt: 0.0 });
        assert_eq!(health.current, 30.0);
    }

    #[rstest]
    #[case(&[10.0, 10.0, 10.0])]
    #[case(&[99.9, 0.2])]
    #[case(&[0.0, 250.0, 3.0])]
    #[case(&[-5.0, 1e9])]
    fn health_stays_in_bounds(#[case] hits: &[f32]) {
        let mut health = Health::new(100.0);
        for &hit in hits {
            let was_dead = health.is_dead();
            health.apply_damage(hit);
            assert!(health.current >= 0.0 && health.current <= health.maximum);
            if was_dead {
                assert!(health.is_dead(), "death must be irreversible");
            }
        }
    }

    #[test]
    fn percentage_handles_zero_maximum() {
        assert_eq!(Health::new(0.0).percentage(), 0.0);
        assert_eq!(Health::new(40.0).percentage(), 1.0);
    }
}
