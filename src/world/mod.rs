//! World module - the arena and its navigable surface.

mod data;
mod navigation;
mod plugin;

pub use data::{ArenaDefinition, ObstacleDef};
pub use navigation::{ArenaNavigation, Blocker, Navigation, NavigationSurface};
pub use plugin::{setup_arena, ArenaGeometry, WorldPlugin};
