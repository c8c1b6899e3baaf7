//! Game mode module - match timer and win/lose flow.

mod plugin;
mod timer;

pub use plugin::{GameModePlugin, MatchEnded, MatchRequest, MatchStarted};
pub use timer::{MatchOutcome, MatchSettings, MatchTimer, MatchTransition};
