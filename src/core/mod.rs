//! Core game module - states, events, frame ordering and shared helpers.
//!
//! This module provides the foundation that all other game systems build upon.

mod data;
mod error;
mod events;
mod locomotion;
mod plugin;
mod states;

pub use data::{load_or_default, load_ron, DataDirectory};
pub use error::DataLoadError;
pub use events::*;
pub use locomotion::*;
pub use plugin::{CorePlugin, SimulationSet};
pub use states::*;
