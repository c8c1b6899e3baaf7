//! Player module - player entity and movement intent.

mod components;
mod movement;
mod plugin;

pub use components::*;
pub use movement::{intent_from_keys, spawn_player};
pub use plugin::PlayerPlugin;
