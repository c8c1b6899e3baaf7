//! Spawn director state and configuration.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;

use crate::enemies::DEFAULT_ARCHETYPE;

/// One spawnable archetype in the roster.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct RosterEntry {
    /// Archetype id (enemy definition file stem)
    pub archetype: String,
    /// Relative spawn weight; higher is more likely
    #[serde(default = "default_weight")]
    pub weight: f32,
    /// Match time before this archetype can spawn
    #[serde(default)]
    pub unlock_time: f32,
}

fn default_weight() -> f32 {
    1.0
}

impl RosterEntry {
    pub fn new(archetype: impl Into<String>, weight: f32, unlock_time: f32) -> Self {
        Self {
            archetype: archetype.into(),
            weight,
            unlock_time,
        }
    }
}

/// Tunables from `spawn.ron`.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SpawnSettings {
    /// Minimum seconds between automatic spawns
    pub spawn_interval: f32,
    /// Outer radius of the spawn ring around the player
    pub spawn_radius: f32,
    /// Inner radius of the spawn ring around the player
    pub min_spawn_distance: f32,
    /// Population cap checked before each automatic spawn
    pub max_enemies: usize,
    pub auto_spawn: bool,
    /// Candidate points tried before falling back to an unchecked one
    pub max_placement_attempts: u32,
    /// Half size of the box a candidate may move when projected (x, y, z)
    pub placement_tolerance: (f32, f32, f32),
    /// Archetype used when no roster entry is unlocked
    pub default_archetype: String,
}

impl Default for SpawnSettings {
    fn default() -> Self {
        Self {
            spawn_interval: 2.0,
            spawn_radius: 1500.0,
            min_spawn_distance: 800.0,
            max_enemies: 50,
            auto_spawn: true,
            max_placement_attempts: 10,
            placement_tolerance: (200.0, 500.0, 200.0),
            default_archetype: DEFAULT_ARCHETYPE.to_string(),
        }
    }
}

impl SpawnSettings {
    pub fn tolerance(&self) -> Vec3 {
        Vec3::new(
            self.placement_tolerance.0,
            self.placement_tolerance.1,
            self.placement_tolerance.2,
        )
    }
}

/// Contents of `spawn.ron`.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SpawnFile {
    pub settings: SpawnSettings,
    pub roster: Vec<RosterEntry>,
}

impl Default for SpawnFile {
    fn default() -> Self {
        Self {
            settings: SpawnSettings::default(),
            roster: vec![RosterEntry::new(DEFAULT_ARCHETYPE, 1.0, 0.0)],
        }
    }
}

impl SpawnFile {
    /// Repair values the director cannot use, returning what was changed.
    pub fn sanitize(&mut self) -> Vec<String> {
        let mut fixes = Vec::new();
        let settings = &mut self.settings;

        if settings.min_spawn_distance > settings.spawn_radius {
            std::mem::swap(&mut settings.min_spawn_distance, &mut settings.spawn_radius);
            fixes.push("min_spawn_distance was larger than spawn_radius; swapped".to_string());
        }
        if settings.min_spawn_distance < 0.0 {
            settings.min_spawn_distance = 0.0;
            fixes.push("negative min_spawn_distance clamped to 0".to_string());
        }
        if settings.spawn_interval < 0.0 {
            settings.spawn_interval = 0.0;
            fixes.push("negative spawn_interval clamped to 0".to_string());
        }

        for entry in &mut self.roster {
            if !entry.weight.is_finite() || entry.weight < 0.0 {
                fixes.push(format!("weight of '{}' clamped to 0", entry.archetype));
                entry.weight = 0.0;
            }
            if entry.unlock_time.is_nan() || entry.unlock_time < 0.0 {
                fixes.push(format!("unlock_time of '{}' clamped to 0", entry.archetype));
                entry.unlock_time = 0.0;
            }
        }

        fixes
    }
}

/// Random source for spawn decisions.
#[derive(Resource)]
pub struct SpawnRng(pub StdRng);

impl Default for SpawnRng {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}

impl SpawnRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

/// External control of the director.
#[derive(Event, Debug, Clone, PartialEq)]
pub enum DirectorCommand {
    SetAutoSpawn(bool),
    SpawnNow { archetype: String, location: Vec3 },
    ClearAll,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::load_ron;
    use std::path::Path;

    #[test]
    fn sanitize_repairs_reversed_ring_and_bad_weights() {
        let mut file = SpawnFile {
            settings: SpawnSettings {
                spawn_radius: 500.0,
                min_spawn_distance: 900.0,
                ..default()
            },
            roster: vec![
                RosterEntry::new("grunt", -2.0, 0.0),
                RosterEntry::new("runner", f32::NAN, -5.0),
                RosterEntry::new("brute", f32::INFINITY, 10.0),
            ],
        };

        let fixes = file.sanitize();

        assert_eq!(fixes.len(), 5);
        assert_eq!(file.settings.min_spawn_distance, 500.0);
        assert_eq!(file.settings.spawn_radius, 900.0);
        assert_eq!(file.roster[0].weight, 0.0);
        assert_eq!(file.roster[1].weight, 0.0);
        assert_eq!(file.roster[1].unlock_time, 0.0);
        assert_eq!(file.roster[2].weight, 0.0);
        assert_eq!(file.roster[2].unlock_time, 10.0);
    }

    #[test]
    fn clean_file_needs_no_fixes() {
        assert!(SpawnFile::default().sanitize().is_empty());
    }

    #[test]
    fn roster_entries_default_weight_and_unlock() {
        let entry: RosterEntry = ron::from_str("(archetype: \"grunt\")").unwrap();
        assert_eq!(entry, RosterEntry::new("grunt", 1.0, 0.0));
    }

    #[test]
    fn shipped_spawn_file_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/data/spawn.ron");
        let mut file: SpawnFile = load_ron(&path).unwrap();
        assert!(file.sanitize().is_empty());
        assert_eq!(file.settings.max_placement_attempts, 10);
        assert!(file.roster.iter().any(|entry| entry.unlock_time > 0.0));
    }
}
