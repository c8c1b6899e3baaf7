//! Core plugin that sets up game states, events, and frame ordering.

use bevy::prelude::*;

use super::data::DataDirectory;
use super::events::*;
use super::locomotion::apply_locomotion;
use super::states::*;

/// Per-frame ordering of the simulation.
///
/// Match timer first, then the spawn director (cleanup before spawning),
/// then enemy decisions, movement, damage resolution and finally despawning
/// of expired corpses. The director's cleanup therefore sees deaths from the
/// previous frame, never half-resolved ones.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Input,
    Match,
    Spawn,
    Ai,
    Movement,
    Damage,
    Cleanup,
}

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, InGame, Paused, GameOver)
/// - Global events (DamageEvent, DeathEvent)
/// - The simulation system sets and locomotion
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Initialize game states
            .init_state::<GameState>()
            .init_resource::<DataDirectory>()

            // Register global events
            .add_event::<DamageEvent>()
            .add_event::<DeathEvent>()

            // System ordering
            .configure_sets(
                Update,
                (
                    SimulationSet::Input,
                    SimulationSet::Match,
                    SimulationSet::Spawn,
                    SimulationSet::Ai,
                    SimulationSet::Movement,
                    SimulationSet::Damage,
                    SimulationSet::Cleanup,
                )
                    .chain()
                    .run_if(in_state(GameState::InGame)),
            )

            // Data loaders of every plugin run on entering Loading; the
            // transition itself lands on the next frame.
            .add_systems(OnEnter(GameState::Loading), finish_loading)

            // Pause/unpause with Escape key
            .add_systems(
                Update,
                handle_pause_input
                    .run_if(resource_exists::<ButtonInput<KeyCode>>)
                    .run_if(in_state(GameState::InGame).or(in_state(GameState::Paused))),
            )

            .add_systems(Update, apply_locomotion.in_set(SimulationSet::Movement));
    }
}

/// Leave Loading once the data loaders have run.
fn finish_loading(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::InGame);
}

/// Handle Escape key to pause/unpause the game.
fn handle_pause_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    current_state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        match current_state.get() {
            GameState::InGame => next_state.set(GameState::Paused),
            GameState::Paused => next_state.set(GameState::InGame),
            _ => {}
        }
    }
}
