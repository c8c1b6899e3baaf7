//! Director module - spawns and retires enemies around the player.

mod components;
mod plugin;
mod selection;
mod spawner;
mod systems;

pub use components::{DirectorCommand, RosterEntry, SpawnFile, SpawnRng, SpawnSettings};
pub use plugin::DirectorPlugin;
pub use selection::{sample_spawn_location, select_archetype, Placement};
pub use spawner::SpawnDirector;
