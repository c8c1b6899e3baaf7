//! Game state definitions that control the overall flow of the game.
//!
//! States determine which systems run at any given time. The whole
//! simulation (match timer, spawn director, enemy AI) only runs in
//! `InGame`; pausing or finishing a match freezes it in place.

use bevy::prelude::*;

/// Main game states - controls overall game flow.
///
/// - Start in `Loading` to read data files
/// - Enter `InGame` once data is loaded (the match itself starts after a
///   short warm-up, see [`crate::game_mode::MatchTimer`])
/// - `Paused` freezes gameplay but keeps the world visible
/// - `GameOver` when the match has ended, won or lost
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state - loading data files
    #[default]
    Loading,
    /// Active gameplay
    InGame,
    /// Game is paused (overlay on gameplay)
    Paused,
    /// Match has ended
    GameOver,
}
