//! Swarm Survivor - a top-down survival game core in Bevy.
//!
//! Enemies spawn in a ring around the player, chase and attack, and the
//! player tries to last until the match clock runs out.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, frame ordering, shared events, data loading, locomotion
//! - **Player**: Input to movement intent, player spawning
//! - **Combat**: Health and damage resolution
//! - **Enemies**: Archetype data, the AI state machine, detection sensors
//! - **Director**: Spawning and retiring enemies around the player
//! - **Game mode**: The match timer and win/lose flow
//! - **World**: The arena and its navigable surface
//!
//! The simulation needs no window or renderer. Add
//! [`enemies::DetectionBridgePlugin`] alongside Rapier to get sensor-driven
//! detection on top of the polling AI.

pub mod combat;
pub mod core;
pub mod director;
pub mod enemies;
pub mod game_mode;
pub mod player;
pub mod world;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct SwarmSurvivorPlugin;

impl Plugin for SwarmSurvivorPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Player systems
            .add_plugins(player::PlayerPlugin)

            // Combat systems
            .add_plugins(combat::CombatPlugin)

            // Enemy systems
            .add_plugins(enemies::EnemyPlugin)

            // Spawn director
            .add_plugins(director::DirectorPlugin)

            // Match flow
            .add_plugins(game_mode::GameModePlugin)

            // Arena and navigation
            .add_plugins(world::WorldPlugin);
    }
}
