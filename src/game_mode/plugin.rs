//! Game mode plugin - match lifecycle and win/lose conditions.

use bevy::prelude::*;

use super::timer::{MatchSettings, MatchTimer, MatchTransition};
use crate::core::{load_or_default, DataDirectory, DeathEvent, GameState, SimulationSet};
use crate::enemies::Enemy;
use crate::player::Player;

/// External requests to start or end the match.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRequest {
    Start,
    End { player_won: bool },
}

/// Sent once when the match starts.
#[derive(Event, Debug, Clone, Copy)]
pub struct MatchStarted;

/// Sent once when the match ends.
#[derive(Event, Debug, Clone, Copy)]
pub struct MatchEnded {
    pub player_won: bool,
    pub game_time: f32,
    pub kills: u32,
}

/// Game mode plugin - owns the match timer.
pub struct GameModePlugin;

impl Plugin for GameModePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MatchTimer>()
            .add_event::<MatchRequest>()
            .add_event::<MatchStarted>()
            .add_event::<MatchEnded>()
            .add_systems(OnEnter(GameState::Loading), load_match_settings)
            .add_systems(
                Update,
                (
                    handle_match_requests,
                    track_deaths,
                    tick_match_timer,
                    enter_game_over,
                )
                    .chain()
                    .in_set(SimulationSet::Match),
            );
    }
}

/// Load `game_mode.ron` into a fresh match timer.
fn load_match_settings(data_dir: Res<DataDirectory>, mut commands: Commands) {
    let settings: MatchSettings = load_or_default(&data_dir.file("game_mode.ron"));
    commands.insert_resource(MatchTimer::new(&settings));
}

fn announce(
    transition: MatchTransition,
    started: &mut EventWriter<MatchStarted>,
    ended: &mut EventWriter<MatchEnded>,
) {
    match transition {
        MatchTransition::Started => {
            info!("Game Started!");
            started.send(MatchStarted);
        }
        MatchTransition::Ended(outcome) => {
            if outcome.player_won {
                info!(
                    "Player Won! Game Time: {:.2}, enemies slain: {}",
                    outcome.game_time, outcome.kills
                );
            } else {
                info!(
                    "Player Lost! Game Time: {:.2}, enemies slain: {}",
                    outcome.game_time, outcome.kills
                );
            }
            ended.send(MatchEnded {
                player_won: outcome.player_won,
                game_time: outcome.game_time,
                kills: outcome.kills,
            });
        }
    }
}

/// Apply start/end requests. Repeated requests are no-ops.
fn handle_match_requests(
    mut requests: EventReader<MatchRequest>,
    mut timer: ResMut<MatchTimer>,
    mut started: EventWriter<MatchStarted>,
    mut ended: EventWriter<MatchEnded>,
) {
    for request in requests.read() {
        let transition = match *request {
            MatchRequest::Start => timer.start().then_some(MatchTransition::Started),
            MatchRequest::End { player_won } => timer.end(player_won).map(MatchTransition::Ended),
        };

        match transition {
            Some(transition) => announce(transition, &mut started, &mut ended),
            None => debug!("Ignoring {:?}, match already past that point", request),
        }
    }
}

/// Count kills and end the match when the player dies.
fn track_deaths(
    mut death_events: EventReader<DeathEvent>,
    enemies: Query<(), With<Enemy>>,
    players: Query<(), With<Player>>,
    mut timer: ResMut<MatchTimer>,
    mut started: EventWriter<MatchStarted>,
    mut ended: EventWriter<MatchEnded>,
) {
    for event in death_events.read() {
        if enemies.contains(event.entity) && timer.is_running() {
            timer.kills += 1;
        } else if players.contains(event.entity) {
            if let Some(outcome) = timer.end(false) {
                announce(MatchTransition::Ended(outcome), &mut started, &mut ended);
            }
        }
    }
}

/// Advance the warm-up delay or the match clock.
fn tick_match_timer(
    time: Res<Time>,
    mut timer: ResMut<MatchTimer>,
    mut started: EventWriter<MatchStarted>,
    mut ended: EventWriter<MatchEnded>,
) {
    if let Some(transition) = timer.tick(time.delta()) {
        announce(transition, &mut started, &mut ended);
    }
}

/// Freeze the world once the match is over.
fn enter_game_over(
    mut ended: EventReader<MatchEnded>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if !ended.is_empty() {
        ended.clear();
        next_state.set(GameState::GameOver);
    }
}
