//! Enemy archetype data loading from RON files.
//!
//! Archetypes are data, not types: each file under `enemies/` in the data
//! directory describes one stat bundle, keyed by its file stem.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::components::EnemyStats;
use crate::core::{load_ron, DataDirectory, DataLoadError};

/// Archetype used when nothing else qualifies. Always present in the registry.
pub const DEFAULT_ARCHETYPE: &str = "grunt";

/// Enemy definition loaded from RON file.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct EnemyDefinition {
    pub name: String,
    pub max_health: f32,
    pub attack_damage: f32,
    pub attack_range: f32,
    pub chase_speed: f32,
    pub detection_radius: f32,
    pub attack_cooldown: f32,
}

impl Default for EnemyDefinition {
    fn default() -> Self {
        let stats = EnemyStats::default();
        Self {
            name: "Grunt".to_string(),
            max_health: stats.max_health,
            attack_damage: stats.attack_damage,
            attack_range: stats.attack_range,
            chase_speed: stats.chase_speed,
            detection_radius: stats.detection_radius,
            attack_cooldown: stats.attack_cooldown,
        }
    }
}

impl EnemyDefinition {
    /// Convert to EnemyStats component.
    pub fn to_stats(&self) -> EnemyStats {
        EnemyStats {
            max_health: self.max_health,
            attack_damage: self.attack_damage,
            attack_range: self.attack_range,
            chase_speed: self.chase_speed,
            detection_radius: self.detection_radius,
            attack_cooldown: self.attack_cooldown,
        }
    }

    /// Reject stat bundles the AI cannot work with.
    pub fn validate(&self, path: &Path) -> Result<(), DataLoadError> {
        let problem = if self.max_health <= 0.0 {
            Some("max_health must be positive")
        } else if self.attack_range < 0.0 || self.detection_radius < 0.0 {
            Some("ranges must not be negative")
        } else if self.chase_speed < 0.0 || self.attack_cooldown < 0.0 {
            Some("chase_speed and attack_cooldown must not be negative")
        } else {
            None
        };

        match problem {
            Some(details) => Err(DataLoadError::Invalid {
                path: path.display().to_string(),
                details: details.to_string(),
            }),
            None => Ok(()),
        }
    }
}

/// Resource holding all loaded enemy definitions.
#[derive(Resource)]
pub struct EnemyRegistry {
    pub definitions: HashMap<String, EnemyDefinition>,
}

impl Default for EnemyRegistry {
    fn default() -> Self {
        let mut definitions = HashMap::new();
        definitions.insert(DEFAULT_ARCHETYPE.to_string(), EnemyDefinition::default());
        Self { definitions }
    }
}

impl EnemyRegistry {
    /// Get an enemy definition by archetype id.
    pub fn get(&self, archetype: &str) -> Option<&EnemyDefinition> {
        self.definitions.get(archetype)
    }

    pub fn contains(&self, archetype: &str) -> bool {
        self.definitions.contains_key(archetype)
    }

    /// Add or replace an archetype.
    pub fn insert(&mut self, archetype: impl Into<String>, definition: EnemyDefinition) {
        self.definitions.insert(archetype.into(), definition);
    }
}

/// Read one definition file and check it.
pub fn load_enemy_definition(path: &Path) -> Result<EnemyDefinition, DataLoadError> {
    let definition: EnemyDefinition = load_ron(path)?;
    definition.validate(path)?;
    Ok(definition)
}

/// Load all enemy definitions from the `enemies/` data directory.
pub fn load_enemy_definitions(data_dir: Res<DataDirectory>, mut registry: ResMut<EnemyRegistry>) {
    let enemies_dir = data_dir.file("enemies");

    if !enemies_dir.exists() {
        warn!("Enemy definitions directory not found: {:?}", enemies_dir);
        return;
    }

    let Ok(entries) = fs::read_dir(&enemies_dir) else {
        warn!("Failed to read enemy definitions directory");
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();

        if path.extension().is_some_and(|ext| ext == "ron") {
            let Some(archetype) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            match load_enemy_definition(&path) {
                Ok(definition) => {
                    info!("Loaded enemy definition: {} ({})", definition.name, archetype);
                    registry.insert(archetype, definition);
                }
                Err(e) => error!("Skipping enemy definition: {}", e),
            }
        }
    }

    info!("Loaded {} enemy definitions", registry.definitions.len());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_always_knows_default_archetype() {
        let registry = EnemyRegistry::default();
        assert!(registry.contains(DEFAULT_ARCHETYPE));
        assert_eq!(
            registry.get(DEFAULT_ARCHETYPE).map(EnemyDefinition::to_stats),
            Some(EnemyStats::default())
        );
    }

    #[test]
    fn partial_definitions_fill_in_defaults() {
        let definition: EnemyDefinition =
            ron::from_str("(name: \"Runner\", chase_speed: 450.0)").unwrap();
        assert_eq!(definition.chase_speed, 450.0);
        assert_eq!(definition.detection_radius, 800.0);
    }

    #[test]
    fn non_positive_health_is_rejected() {
        let definition = EnemyDefinition {
            max_health: 0.0,
            ..default()
        };
        let result = definition.validate(Path::new("enemies/zero.ron"));
        assert!(matches!(result, Err(DataLoadError::Invalid { .. })));
    }

    #[test]
    fn shipped_definitions_are_valid() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/data/enemies");
        let mut count = 0;
        for entry in fs::read_dir(dir).unwrap().flatten() {
            load_enemy_definition(&entry.path()).unwrap();
            count += 1;
        }
        assert!(count >= 3);
    }
}
