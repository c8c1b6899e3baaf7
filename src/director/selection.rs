//! Where and what to spawn.

use bevy::prelude::*;
use rand::Rng;

use super::components::{RosterEntry, SpawnSettings};
use crate::world::NavigationSurface;

/// A chosen spawn point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub location: Vec3,
    /// False when every attempt failed and `location` was never projected
    pub validated: bool,
}

/// Pick a spawn point on the ring around `center`.
///
/// Each attempt draws a uniform angle and a uniform distance between
/// `min_spawn_distance` and `spawn_radius`, then asks the navigation surface
/// to project it. The first point that projects wins. If none does, the last
/// raw candidate is returned unvalidated.
pub fn sample_spawn_location<R: Rng + ?Sized>(
    rng: &mut R,
    center: Vec3,
    settings: &SpawnSettings,
    navigation: &dyn NavigationSurface,
) -> Placement {
    let tolerance = settings.tolerance();
    let (near, far) = ring_bounds(settings);
    let mut candidate = center;

    for _ in 0..settings.max_placement_attempts.max(1) {
        let angle = rng.gen_range(0.0..360.0_f32).to_radians();
        let distance = if near < far {
            rng.gen_range(near..=far)
        } else {
            near
        };
        candidate = center + Vec3::new(angle.cos(), 0.0, angle.sin()) * distance;

        if let Some(location) = navigation.project(candidate, tolerance) {
            return Placement {
                location,
                validated: true,
            };
        }
    }

    Placement {
        location: candidate,
        validated: false,
    }
}

/// Inner and outer ring radius, ordered, finite and non-negative.
fn ring_bounds(settings: &SpawnSettings) -> (f32, f32) {
    let clean = |radius: f32| if radius.is_finite() { radius.max(0.0) } else { 0.0 };
    let (a, b) = (
        clean(settings.min_spawn_distance),
        clean(settings.spawn_radius),
    );
    (a.min(b), a.max(b))
}

/// Roulette-wheel choice among unlocked roster entries.
///
/// Entries qualify when `unlock_time <= elapsed` and `is_known` accepts the
/// archetype. A draw in `[0, total weight]` picks the first entry whose
/// running weight reaches it, so ties go to the earlier entry. Returns
/// `None` if nothing qualifies. Weights are summed in `f64`; if the total is
/// still unusable (zero or infinite) the first qualifying entry wins.
pub fn select_archetype<'a, R: Rng + ?Sized>(
    rng: &mut R,
    roster: &'a [RosterEntry],
    elapsed: f32,
    is_known: impl Fn(&str) -> bool,
) -> Option<&'a str> {
    let qualifying: Vec<&RosterEntry> = roster
        .iter()
        .filter(|entry| entry.unlock_time <= elapsed && is_known(&entry.archetype))
        .collect();

    let first = qualifying.first()?;
    let total: f64 = qualifying.iter().map(|entry| f64::from(entry.weight)).sum();
    if !total.is_finite() || total <= 0.0 {
        if !total.is_finite() {
            warn!("Roster weights sum to {}, picking '{}'", total, first.archetype);
        }
        return Some(first.archetype.as_str());
    }
    let draw = rng.gen_range(0.0..=total);

    let mut running = 0.0;
    for entry in &qualifying {
        running += f64::from(entry.weight);
        if draw <= running {
            return Some(entry.archetype.as_str());
        }
    }

    // Rounding can leave the last running total a hair under the draw
    Some(first.archetype.as_str())
}
