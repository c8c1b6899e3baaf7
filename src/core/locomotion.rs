//! Planar movement shared by the player and enemies.
//!
//! Controllers (keyboard input, enemy AI) only write a movement intent;
//! `apply_locomotion` turns intents into translation once per frame.

use bevy::prelude::*;

/// Movement intent and speed for an entity moving on the XZ plane.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Locomotion {
    /// Normalized planar direction, or zero when standing still
    pub intent: Vec3,
    /// Speed in world units per second
    pub speed: f32,
    /// Disabled entities never move, whatever their intent
    pub enabled: bool,
}

impl Locomotion {
    pub fn new(speed: f32) -> Self {
        Self {
            intent: Vec3::ZERO,
            speed,
            enabled: true,
        }
    }

    /// Steer along `direction`, flattened onto the ground plane.
    pub fn steer(&mut self, direction: Vec3) {
        self.intent = Vec3::new(direction.x, 0.0, direction.z).normalize_or_zero();
    }

    /// Stop immediately, dropping any residual motion.
    pub fn stop(&mut self) {
        self.intent = Vec3::ZERO;
    }

    /// Stop and refuse further movement.
    pub fn disable(&mut self) {
        self.stop();
        self.enabled = false;
    }

    /// Translation for a frame of `delta` seconds.
    pub fn displacement(&self, delta: f32) -> Vec3 {
        if !self.enabled {
            return Vec3::ZERO;
        }
        self.intent * self.speed * delta
    }
}

/// Distance between two positions ignoring height.
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    Vec2::new(b.x - a.x, b.z - a.z).length()
}

/// Normalized ground-plane direction from `from` to `to` (zero if coincident).
pub fn planar_direction(from: Vec3, to: Vec3) -> Vec3 {
    Vec3::new(to.x - from.x, 0.0, to.z - from.z).normalize_or_zero()
}

/// Move every entity by its locomotion intent and face it along its motion.
pub fn apply_locomotion(time: Res<Time>, mut query: Query<(&mut Transform, &Locomotion)>) {
    let dt = time.delta_secs();

    for (mut transform, locomotion) in query.iter_mut() {
        let movement = locomotion.displacement(dt);
        if movement == Vec3::ZERO {
            continue;
        }

        transform.translation += movement;
        let facing = transform.translation + locomotion.intent;
        transform.look_at(facing, Vec3::Y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn steer_flattens_and_normalizes() {
        let mut locomotion = Locomotion::new(300.0);
        locomotion.steer(Vec3::new(3.0, 10.0, 4.0));
        assert_relative_eq!(locomotion.intent.x, 0.6);
        assert_relative_eq!(locomotion.intent.y, 0.0);
        assert_relative_eq!(locomotion.intent.z, 0.8);
    }

    #[test]
    fn disabled_locomotion_never_moves() {
        let mut locomotion = Locomotion::new(300.0);
        locomotion.steer(Vec3::X);
        locomotion.disable();
        locomotion.intent = Vec3::X;
        assert_eq!(locomotion.displacement(1.0), Vec3::ZERO);
    }

    #[test]
    fn displacement_scales_with_speed_and_time() {
        let mut locomotion = Locomotion::new(300.0);
        locomotion.steer(Vec3::Z);
        assert_relative_eq!(locomotion.displacement(0.5).z, 150.0);
    }

    #[test]
    fn planar_distance_ignores_height() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(300.0, 900.0, 400.0);
        assert_relative_eq!(planar_distance(a, b), 500.0);
        assert_eq!(planar_direction(a, a), Vec3::ZERO);
    }
}
