//! Enemy AI behavior: a per-tick state machine.
//!
//! `decide` is the pure transition function; the systems below gather its
//! inputs from the world and apply its result. Entry actions live in
//! `enter_state` so the polling path, the detection sensor and damage
//! resolution all change state the same way.

use bevy::prelude::*;

use super::components::{AiState, AttackClock, DeathTimer, Enemy, EnemyStats, Target};
use crate::core::{planar_direction, planar_distance, DamageEvent, Locomotion};
use crate::game_mode::MatchTimer;
use crate::player::Player;

/// What an enemy does this tick besides changing state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AiCommand {
    /// Keep whatever motion the current state set up.
    Hold,
    /// Move along this planar direction at chase speed.
    Steer(Vec3),
    /// Hit the target for `attack_damage`.
    Strike,
}

/// Outcome of one AI evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub next_state: AiState,
    pub drop_target: bool,
    pub command: AiCommand,
}

impl Decision {
    fn to(state: AiState) -> Self {
        Self {
            next_state: state,
            drop_target: false,
            command: AiCommand::Hold,
        }
    }

    fn give_up() -> Self {
        Self {
            next_state: AiState::Idle,
            drop_target: true,
            command: AiCommand::Hold,
        }
    }
}

/// Evaluate one tick of the state machine.
///
/// `target` is the target's position if the enemy has a live target. `now`
/// is the match clock used for attack cooldowns.
///
/// Chasing or Attacking without a target does not hold its state: the enemy
/// drops back to Idle, so the next poll or sensor hit can reacquire.
pub fn decide(
    state: AiState,
    stats: &EnemyStats,
    position: Vec3,
    target: Option<Vec3>,
    clock: &AttackClock,
    now: f32,
) -> Decision {
    match state {
        AiState::Dead => Decision::to(AiState::Dead),

        AiState::Idle => match target {
            Some(target_pos) if planar_distance(position, target_pos) <= stats.detection_radius => {
                Decision::to(AiState::Chasing)
            }
            _ => Decision::to(AiState::Idle),
        },

        AiState::Chasing => {
            let Some(target_pos) = target else {
                return Decision::give_up();
            };
            let distance = planar_distance(position, target_pos);

            if distance <= stats.attack_range {
                Decision::to(AiState::Attacking)
            } else if distance > stats.chase_exit_distance() {
                Decision::give_up()
            } else {
                Decision {
                    command: AiCommand::Steer(planar_direction(position, target_pos)),
                    ..Decision::to(AiState::Chasing)
                }
            }
        }

        AiState::Attacking => {
            let Some(target_pos) = target else {
                return Decision::give_up();
            };

            if planar_distance(position, target_pos) > stats.attack_range {
                Decision::to(AiState::Chasing)
            } else if clock.ready(now, stats.attack_cooldown) {
                Decision {
                    command: AiCommand::Strike,
                    ..Decision::to(AiState::Attacking)
                }
            } else {
                Decision::to(AiState::Attacking)
            }
        }
    }
}

/// Switch to `next` and run its entry action.
///
/// Returns false when nothing changed: same state, or the enemy is already
/// dead (there is no way out of `Dead`).
pub fn enter_state(
    state: &mut AiState,
    next: AiState,
    locomotion: &mut Locomotion,
    stats: &EnemyStats,
) -> bool {
    if *state == next || *state == AiState::Dead {
        return false;
    }

    *state = next;
    match next {
        AiState::Idle | AiState::Attacking => locomotion.stop(),
        AiState::Chasing => locomotion.speed = stats.chase_speed,
        AiState::Dead => locomotion.disable(),
    }
    true
}

/// Run the state machine for every living enemy.
///
/// Enemies spawned this frame are skipped; their first evaluation happens on
/// the next frame.
#[allow(clippy::type_complexity)]
pub fn update_enemy_ai(
    match_timer: Res<MatchTimer>,
    player_query: Query<(Entity, &Transform), (With<Player>, Without<Enemy>)>,
    mut enemy_query: Query<
        (
            Entity,
            Ref<Enemy>,
            &Transform,
            &EnemyStats,
            &mut AiState,
            &mut Target,
            &mut AttackClock,
            &mut Locomotion,
        ),
        Without<Player>,
    >,
    mut damage_events: EventWriter<DamageEvent>,
) {
    let now = match_timer.game_time;
    let player = player_query.get_single().ok();

    for (entity, enemy, transform, stats, mut ai_state, mut target, mut clock, mut locomotion) in
        enemy_query.iter_mut()
    {
        if enemy.is_added() || !ai_state.is_alive() {
            continue;
        }

        // Forget targets that no longer exist
        let mut target_pos = None;
        if let Some(target_entity) = target.0 {
            match player_query.get(target_entity) {
                Ok((_, target_transform)) => target_pos = Some(target_transform.translation),
                Err(_) => target.0 = None,
            }
        }

        // Idle enemies look for the player, keeping it only once they chase
        let mut candidate = None;
        if *ai_state == AiState::Idle && target.0.is_none() {
            if let Some((player_entity, player_transform)) = player {
                candidate = Some(player_entity);
                target_pos = Some(player_transform.translation);
            }
        }

        let decision = decide(
            *ai_state,
            stats,
            transform.translation,
            target_pos,
            &clock,
            now,
        );

        if decision.drop_target {
            target.0 = None;
        } else if decision.next_state == AiState::Chasing && candidate.is_some() {
            target.0 = candidate;
        }

        let previous = *ai_state;
        if enter_state(&mut ai_state, decision.next_state, &mut locomotion, stats) {
            debug!("{} state changed {:?} -> {:?}", entity, previous, decision.next_state);
        }

        match decision.command {
            AiCommand::Hold => {}
            AiCommand::Steer(direction) => locomotion.steer(direction),
            AiCommand::Strike => {
                let Some(victim) = target.0 else {
                    continue;
                };
                clock.record(now);
                damage_events.send(DamageEvent {
                    target: victim,
                    source: Some(entity),
                    amount: stats.attack_damage,
                });
                info!("{} attacks player for {:.1} damage!", entity, stats.attack_damage);
            }
        }
    }
}

/// Despawn enemies after their death grace period.
pub fn despawn_dead_enemies(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut DeathTimer)>,
) {
    for (entity, mut death_timer) in query.iter_mut() {
        death_timer.0.tick(time.delta());

        if death_timer.0.finished() {
            commands.entity(entity).despawn_recursive();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn stats() -> EnemyStats {
        EnemyStats {
            detection_radius: 800.0,
            attack_range: 100.0,
            attack_cooldown: 1.0,
            ..default()
        }
    }

    fn at(x: f32) -> Option<Vec3> {
        Some(Vec3::new(x, 0.0, 0.0))
    }

    fn tick(state: AiState, target: Option<Vec3>) -> Decision {
        decide(state, &stats(), Vec3::ZERO, target, &AttackClock::default(), 0.0)
    }

    #[test]
    fn idle_notices_player_inside_detection_radius() {
        assert_eq!(tick(AiState::Idle, at(700.0)).next_state, AiState::Chasing);
        assert_eq!(tick(AiState::Idle, at(800.0)).next_state, AiState::Chasing);
        assert_eq!(tick(AiState::Idle, at(801.0)).next_state, AiState::Idle);
        assert_eq!(tick(AiState::Idle, None).next_state, AiState::Idle);
    }

    #[test]
    fn chase_gives_up_only_past_hysteresis_band() {
        // Inside the band: keep chasing toward the target
        let inside = tick(AiState::Chasing, at(950.0));
        assert_eq!(inside.next_state, AiState::Chasing);
        assert_eq!(inside.command, AiCommand::Steer(Vec3::X));

        let outside = tick(AiState::Chasing, at(970.0));
        assert_eq!(outside.next_state, AiState::Idle);
        assert!(outside.drop_target);
    }

    #[test]
    fn detection_scenario_with_hysteresis() {
        // 700 away: notice, then keep chasing while the player retreats to 900
        let mut state = AiState::Idle;
        state = tick(state, at(700.0)).next_state;
        assert_eq!(state, AiState::Chasing);
        state = tick(state, at(900.0)).next_state;
        assert_eq!(state, AiState::Chasing);
        let decision = tick(state, at(970.0));
        assert_eq!(decision.next_state, AiState::Idle);
        assert!(decision.drop_target);
    }

    #[test]
    fn chase_steers_toward_target() {
        let decision = decide(
            AiState::Chasing,
            &stats(),
            Vec3::new(100.0, 0.0, 100.0),
            Some(Vec3::new(100.0, 50.0, 500.0)),
            &AttackClock::default(),
            0.0,
        );
        assert_eq!(decision.command, AiCommand::Steer(Vec3::Z));
    }

    #[test]
    fn chase_switches_to_attack_in_range() {
        assert_eq!(tick(AiState::Chasing, at(100.0)).next_state, AiState::Attacking);
        assert_eq!(tick(AiState::Attacking, at(101.0)).next_state, AiState::Chasing);
    }

    #[test]
    fn lost_target_returns_to_idle() {
        assert_eq!(tick(AiState::Chasing, None), Decision::give_up());
        assert_eq!(tick(AiState::Attacking, None), Decision::give_up());
    }

    #[rstest]
    #[case(None)]
    #[case(at(0.0))]
    #[case(at(50.0))]
    #[case(at(700.0))]
    #[case(at(5000.0))]
    fn dead_never_transitions(#[case] target: Option<Vec3>) {
        assert_eq!(tick(AiState::Dead, target), Decision::to(AiState::Dead));

        let mut state = AiState::Dead;
        let mut locomotion = Locomotion::new(0.0);
        for next in [AiState::Idle, AiState::Chasing, AiState::Attacking] {
            assert!(!enter_state(&mut state, next, &mut locomotion, &stats()));
            assert_eq!(state, AiState::Dead);
        }
    }

    #[test]
    fn attacks_respect_cooldown() {
        let stats = stats();
        let mut clock = AttackClock::default();
        let mut attack_times = Vec::new();

        // 60 fps for five seconds, always in range
        for frame in 0..300 {
            let now = frame as f32 / 60.0;
            let decision = decide(AiState::Attacking, &stats, Vec3::ZERO, at(50.0), &clock, now);
            if decision.command == AiCommand::Strike {
                clock.record(now);
                attack_times.push(now);
            }
        }

        assert_eq!(attack_times.first(), Some(&0.0));
        assert!(attack_times.len() >= 4);
        for pair in attack_times.windows(2) {
            assert!(pair[1] - pair[0] >= stats.attack_cooldown);
        }
    }

    #[test]
    fn entry_actions() {
        let stats = stats();
        let mut locomotion = Locomotion::new(0.0);
        let mut state = AiState::Idle;

        assert!(enter_state(&mut state, AiState::Chasing, &mut locomotion, &stats));
        assert_eq!(locomotion.speed, stats.chase_speed);

        locomotion.steer(Vec3::X);
        assert!(enter_state(&mut state, AiState::Attacking, &mut locomotion, &stats));
        assert_eq!(locomotion.intent, Vec3::ZERO);

        assert!(!enter_state(&mut state, AiState::Attacking, &mut locomotion, &stats));

        assert!(enter_state(&mut state, AiState::Dead, &mut locomotion, &stats));
        assert!(!locomotion.enabled);
    }
}
