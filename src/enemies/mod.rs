//! Enemies module - enemy entities, archetype data and AI.

mod ai;
mod components;
pub mod data;
mod detection;
mod plugin;
mod spawning;

pub use ai::{decide, enter_state, AiCommand, Decision};
pub use components::*;
pub use data::{EnemyDefinition, EnemyRegistry, DEFAULT_ARCHETYPE};
pub use detection::{DetectionBridgePlugin, DetectionEvent};
pub use plugin::EnemyPlugin;
pub use spawning::spawn_enemy;
