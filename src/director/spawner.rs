//! The spawn director resource.

use bevy::prelude::*;
use rand::Rng;

use super::components::{RosterEntry, SpawnFile, SpawnSettings};
use super::selection::{sample_spawn_location, select_archetype};
use crate::enemies::{spawn_enemy, AiState, Enemy, EnemyRegistry};
use crate::world::NavigationSurface;

/// Keeps a population of enemies around the player.
///
/// `active` follows the match lifecycle; `settings.auto_spawn` is the user
/// toggle. Automatic spawning needs both.
#[derive(Resource, Debug)]
pub struct SpawnDirector {
    pub settings: SpawnSettings,
    pub roster: Vec<RosterEntry>,
    live: Vec<Entity>,
    since_last_spawn: f32,
    active: bool,
}

impl Default for SpawnDirector {
    fn default() -> Self {
        Self::new(SpawnFile::default())
    }
}

impl SpawnDirector {
    pub fn new(file: SpawnFile) -> Self {
        Self {
            settings: file.settings,
            roster: file.roster,
            live: Vec::new(),
            since_last_spawn: 0.0,
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Begin directing; the first automatic spawn waits one full interval.
    pub fn activate(&mut self) {
        if !self.active {
            self.active = true;
            self.since_last_spawn = 0.0;
        }
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn set_auto_spawn(&mut self, enabled: bool) {
        if self.settings.auto_spawn != enabled {
            info!("Auto spawn {}", if enabled { "enabled" } else { "disabled" });
        }
        self.settings.auto_spawn = enabled;
    }

    pub fn start_auto_spawn(&mut self) {
        self.set_auto_spawn(true);
    }

    pub fn stop_auto_spawn(&mut self) {
        self.set_auto_spawn(false);
    }

    /// Entities spawned by the director that have not been pruned yet.
    pub fn live(&self) -> &[Entity] {
        &self.live
    }

    /// Drop entries that are gone or dead.
    pub fn prune(&mut self, is_alive: impl Fn(Entity) -> bool) {
        self.live.retain(|&entity| is_alive(entity));
    }

    /// Count live entries that still exist and are not dead.
    pub fn alive_count_by(&self, is_alive: impl Fn(Entity) -> bool) -> usize {
        self.live.iter().filter(|&&entity| is_alive(entity)).count()
    }

    pub fn alive_count(&self, enemies: &Query<&AiState, With<Enemy>>) -> usize {
        self.alive_count_by(|entity| enemies.get(entity).is_ok_and(|state| state.is_alive()))
    }

    pub fn can_spawn_more_enemies(&self, alive: usize) -> bool {
        alive < self.settings.max_enemies
    }

    /// Advance the interval clock. Returns true when a spawn is due.
    ///
    /// The clock only runs while the director is active.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.active {
            return false;
        }
        self.since_last_spawn += dt;
        self.settings.auto_spawn && self.since_last_spawn >= self.settings.spawn_interval
    }

    pub fn reset_interval(&mut self) {
        self.since_last_spawn = 0.0;
    }

    /// Spawn one enemy of `archetype` at `location` and track it.
    ///
    /// Unknown archetypes are logged and skipped.
    pub fn spawn_now(
        &mut self,
        commands: &mut Commands,
        registry: &EnemyRegistry,
        archetype: &str,
        location: Vec3,
    ) -> Option<Entity> {
        let Some(definition) = registry.get(archetype) else {
            error!("Cannot spawn unknown enemy archetype '{}'", archetype);
            return None;
        };

        let entity = spawn_enemy(commands, archetype, definition, location);
        self.live.push(entity);
        info!("Spawned {} ({}) at {:.0}", definition.name, entity, location);
        Some(entity)
    }

    /// Pick an unlocked archetype and a point on the ring around the player,
    /// then spawn there.
    pub fn spawn_near_player<R: Rng + ?Sized>(
        &mut self,
        commands: &mut Commands,
        registry: &EnemyRegistry,
        rng: &mut R,
        navigation: &dyn NavigationSurface,
        player_position: Vec3,
        elapsed: f32,
    ) -> Option<Entity> {
        let archetype = select_archetype(rng, &self.roster, elapsed, |id| registry.contains(id))
            .unwrap_or(self.settings.default_archetype.as_str())
            .to_string();

        let placement = sample_spawn_location(rng, player_position, &self.settings, navigation);
        if !placement.validated {
            warn!(
                "No navigable spawn point found near {:.0}, using fallback {:.0}",
                player_position, placement.location
            );
        }

        self.spawn_now(commands, registry, &archetype, placement.location)
    }

    /// Despawn every tracked enemy and forget them.
    pub fn clear_all_spawned(&mut self, commands: &mut Commands) {
        let count = self.live.len();
        for entity in self.live.drain(..) {
            if let Some(entity_commands) = commands.get_entity(entity) {
                entity_commands.despawn_recursive();
            }
        }
        info!("Cleared {} spawned enemies", count);
    }
}
