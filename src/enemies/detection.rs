//! Detection volume events.
//!
//! Every enemy carries a sensor the size of its detection radius. When the
//! player walks into it the enemy acquires the player and starts chasing at
//! once instead of waiting for its next poll. The polling AI and this
//! override converge on the same state: one target slot, and nothing ever
//! leaves `Dead`.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::ai::enter_state;
use super::components::{AiState, Enemy, EnemyStats, Target};
use crate::core::{Locomotion, SimulationSet};
use crate::player::Player;

/// Overlap of an enemy's detection volume with another entity.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionEvent {
    Entered { sensor: Entity, other: Entity },
    Exited { sensor: Entity, other: Entity },
}

/// Apply detection overlaps to enemy state.
pub fn handle_detection_events(
    mut events: EventReader<DetectionEvent>,
    players: Query<(), With<Player>>,
    mut enemies: Query<(&EnemyStats, &mut AiState, &mut Target, &mut Locomotion), With<Enemy>>,
) {
    for event in events.read() {
        match *event {
            DetectionEvent::Entered { sensor, other } => {
                if !players.contains(other) {
                    continue;
                }
                let Ok((stats, mut ai_state, mut target, mut locomotion)) = enemies.get_mut(sensor)
                else {
                    continue;
                };
                if !ai_state.is_alive() {
                    continue;
                }

                target.0 = Some(other);
                if *ai_state == AiState::Idle {
                    enter_state(&mut ai_state, AiState::Chasing, &mut locomotion, stats);
                }
                debug!("{} detected player", sensor);
            }
            DetectionEvent::Exited { sensor, other } => {
                // Losing the target is left to the hysteresis band in the AI
                if players.contains(other) {
                    debug!("{} lost player from detection volume", sensor);
                }
            }
        }
    }
}

/// Translate Rapier sensor contacts into detection events.
pub fn forward_collision_events(
    mut collisions: EventReader<CollisionEvent>,
    enemies: Query<(), With<Enemy>>,
    mut detections: EventWriter<DetectionEvent>,
) {
    for collision in collisions.read() {
        let (a, b, entered) = match *collision {
            CollisionEvent::Started(a, b, _) => (a, b, true),
            CollisionEvent::Stopped(a, b, _) => (a, b, false),
        };

        for (sensor, other) in [(a, b), (b, a)] {
            if !enemies.contains(sensor) {
                continue;
            }
            detections.send(if entered {
                DetectionEvent::Entered { sensor, other }
            } else {
                DetectionEvent::Exited { sensor, other }
            });
        }
    }
}

/// Feeds Rapier collision events into the enemy AI.
///
/// Requires `RapierPhysicsPlugin`; headless simulations leave it out and
/// rely on polling alone.
pub struct DetectionBridgePlugin;

impl Plugin for DetectionBridgePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            forward_collision_events.in_set(SimulationSet::Input),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Scene {
        app: App,
        player: Entity,
        enemy: Entity,
        bystander: Entity,
    }

    fn scene() -> Scene {
        let mut app = App::new();
        app.add_event::<DetectionEvent>()
            .add_systems(Update, handle_detection_events);

        let world = app.world_mut();
        let player = world.spawn(Player).id();
        let enemy = world
            .spawn((
                Enemy,
                EnemyStats::default(),
                AiState::default(),
                Target::default(),
                Locomotion::new(0.0),
            ))
            .id();
        let bystander = world.spawn_empty().id();

        Scene {
            app,
            player,
            enemy,
            bystander,
        }
    }

    impl Scene {
        fn send(&mut self, event: DetectionEvent) {
            self.app.world_mut().send_event(event);
            self.app.update();
        }

        fn entered(&mut self, other: Entity) {
            let sensor = self.enemy;
            self.send(DetectionEvent::Entered { sensor, other });
        }

        fn state(&self) -> (AiState, Target) {
            let world = self.app.world();
            (
                *world.get::<AiState>(self.enemy).unwrap(),
                *world.get::<Target>(self.enemy).unwrap(),
            )
        }
    }

    #[test]
    fn player_entering_wakes_an_idle_enemy() {
        let mut scene = scene();
        let player = scene.player;

        scene.entered(player);

        assert_eq!(scene.state(), (AiState::Chasing, Target(Some(player))));
        let speed = scene.app.world().get::<Locomotion>(scene.enemy).unwrap().speed;
        assert_eq!(speed, EnemyStats::default().chase_speed);
    }

    #[test]
    fn repeated_entries_keep_one_target() {
        let mut scene = scene();
        let player = scene.player;

        scene.entered(player);
        scene.entered(player);

        assert_eq!(scene.state(), (AiState::Chasing, Target(Some(player))));
    }

    #[test]
    fn dead_enemies_ignore_the_sensor() {
        let mut scene = scene();
        let (enemy, player) = (scene.enemy, scene.player);
        *scene.app.world_mut().get_mut::<AiState>(enemy).unwrap() = AiState::Dead;

        scene.entered(player);

        assert_eq!(scene.state(), (AiState::Dead, Target(None)));
    }

    #[test]
    fn only_the_player_triggers_detection() {
        let mut scene = scene();
        let bystander = scene.bystander;

        scene.entered(bystander);

        assert_eq!(scene.state(), (AiState::Idle, Target(None)));
    }

    #[test]
    fn leaving_the_volume_keeps_the_target() {
        let mut scene = scene();
        let (enemy, player) = (scene.enemy, scene.player);

        scene.entered(player);
        scene.send(DetectionEvent::Exited {
            sensor: enemy,
            other: player,
        });

        assert_eq!(scene.state(), (AiState::Chasing, Target(Some(player))));
    }
}
