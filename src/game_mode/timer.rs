//! Match timer: a one-way `NotStarted -> Started -> Ended` latch.

use bevy::prelude::*;
use serde::Deserialize;
use std::time::Duration;

/// Tunables from `game_mode.ron`.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct MatchSettings {
    /// Seconds the player has to survive to win
    pub max_game_time: f32,
    /// Warm-up between entering play and the match starting
    pub start_delay: f32,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            max_game_time: 900.0,
            start_delay: 1.0,
        }
    }
}

/// How a match finished.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchOutcome {
    pub player_won: bool,
    pub game_time: f32,
    pub kills: u32,
}

/// A latch transition produced by [`MatchTimer::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchTransition {
    Started,
    Ended(MatchOutcome),
}

/// Match clock and lifecycle.
///
/// `game_time` only advances while the match is started and not ended, and
/// is the clock every gameplay timer (attack cooldowns, archetype unlocks)
/// reads.
#[derive(Resource, Debug, Clone)]
pub struct MatchTimer {
    pub game_time: f32,
    pub max_game_time: f32,
    pub kills: u32,
    started: bool,
    ended: bool,
    start_delay: Timer,
}

impl Default for MatchTimer {
    fn default() -> Self {
        Self::new(&MatchSettings::default())
    }
}

impl MatchTimer {
    pub fn new(settings: &MatchSettings) -> Self {
        Self {
            game_time: 0.0,
            max_game_time: settings.max_game_time,
            kills: 0,
            started: false,
            ended: false,
            start_delay: Timer::from_seconds(settings.start_delay.max(0.0), TimerMode::Once),
        }
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn is_running(&self) -> bool {
        self.started && !self.ended
    }

    /// Start the match. Returns false if it had already started.
    pub fn start(&mut self) -> bool {
        if self.started {
            return false;
        }
        self.started = true;
        true
    }

    /// End the match. Only the first call on a started match has an effect.
    pub fn end(&mut self, player_won: bool) -> Option<MatchOutcome> {
        if !self.started || self.ended {
            return None;
        }
        self.ended = true;
        Some(self.outcome(player_won))
    }

    /// Advance by one frame.
    ///
    /// Before the start the warm-up delay runs down and fires the start once.
    /// While running, game time accumulates and reaching `max_game_time` ends
    /// the match as a win.
    pub fn tick(&mut self, delta: Duration) -> Option<MatchTransition> {
        if !self.started {
            self.start_delay.tick(delta);
            if self.start_delay.finished() && self.start() {
                return Some(MatchTransition::Started);
            }
            return None;
        }

        if self.ended {
            return None;
        }

        self.game_time += delta.as_secs_f32();
        if self.game_time >= self.max_game_time {
            return self.end(true).map(MatchTransition::Ended);
        }
        None
    }

    fn outcome(&self, player_won: bool) -> MatchOutcome {
        MatchOutcome {
            player_won,
            game_time: self.game_time,
            kills: self.kills,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: f32) -> Duration {
        Duration::from_secs_f32(s)
    }

    fn started(max_game_time: f32) -> MatchTimer {
        let mut timer = MatchTimer::new(&MatchSettings {
            max_game_time,
            start_delay: 0.0,
        });
        assert_eq!(timer.tick(Duration::ZERO), Some(MatchTransition::Started));
        timer
    }

    #[test]
    fn start_waits_for_delay() {
        let mut timer = MatchTimer::default();
        assert_eq!(timer.tick(secs(0.5)), None);
        assert!(!timer.is_started());
        assert_eq!(timer.game_time, 0.0);

        assert_eq!(timer.tick(secs(0.5)), Some(MatchTransition::Started));
        assert!(timer.is_running());
        assert_eq!(timer.tick(secs(0.5)), None);
        assert_eq!(timer.game_time, 0.5);
    }

    #[test]
    fn start_is_one_shot() {
        let mut timer = MatchTimer::default();
        assert!(timer.start());
        assert!(!timer.start());
        assert_eq!(timer.tick(secs(5.0)), None);
    }

    #[test]
    fn reaching_max_time_wins_exactly_once() {
        let mut timer = started(900.0);
        let transition = timer.tick(secs(900.0));
        assert_eq!(
            transition,
            Some(MatchTransition::Ended(MatchOutcome {
                player_won: true,
                game_time: 900.0,
                kills: 0,
            }))
        );

        for _ in 0..10 {
            assert_eq!(timer.tick(secs(1.0)), None);
        }
        assert_eq!(timer.game_time, 900.0);
        assert!(timer.is_ended());
    }

    #[test]
    fn accumulated_frames_end_on_the_boundary() {
        let mut timer = started(10.0);
        let mut endings = 0;
        for _ in 0..40 {
            if let Some(MatchTransition::Ended(outcome)) = timer.tick(secs(0.5)) {
                assert!(outcome.player_won);
                assert_eq!(outcome.game_time, 10.0);
                endings += 1;
            }
        }
        assert_eq!(endings, 1);
    }

    #[test]
    fn defeat_latches() {
        let mut timer = started(900.0);
        timer.tick(secs(12.0));
        timer.kills = 3;

        let outcome = timer.end(false).unwrap();
        assert!(!outcome.player_won);
        assert_eq!(outcome.kills, 3);
        assert_eq!(timer.end(true), None);
        assert_eq!(timer.tick(secs(1000.0)), None);
    }

    #[test]
    fn cannot_end_before_start() {
        let mut timer = MatchTimer::default();
        assert_eq!(timer.end(false), None);
        assert!(!timer.is_ended());
    }
}
