//! Combat systems - damage resolution and death handling.

use bevy::prelude::*;
use bevy_rapier3d::prelude::ColliderDisabled;

use super::components::*;
use crate::core::{Locomotion, SimulationSet};
use crate::enemies::{enter_state, AiState, DeathTimer, EnemyStats};

/// Configure combat systems.
pub fn setup_combat_systems(app: &mut App) {
    app.add_systems(Update, apply_damage.in_set(SimulationSet::Damage));
}

/// Apply damage events to health.
///
/// A hit that empties an enemy's health kills it right here: its AI state
/// becomes `Dead`, movement and collision are switched off and the despawn
/// grace timer starts. Later hits in the same frame find it dead and are
/// ignored.
#[allow(clippy::type_complexity)]
pub fn apply_damage(
    mut commands: Commands,
    mut damage_events: EventReader<DamageEvent>,
    mut health_query: Query<(
        &mut Health,
        Option<(&mut AiState, &mut Locomotion, &EnemyStats)>,
        Option<&Name>,
    )>,
    mut death_events: EventWriter<DeathEvent>,
) {
    for event in damage_events.read() {
        let Ok((mut health, ai, name)) = health_query.get_mut(event.target) else {
            debug!("Damage target {} no longer exists", event.target);
            continue;
        };

        let outcome = match &ai {
            Some((ai_state, _, _)) if !ai_state.is_alive() => DamageOutcome::Ignored,
            _ => health.apply_damage(event.amount),
        };

        let label = name.map_or_else(
            || event.target.to_string(),
            |n| format!("{} ({})", n, event.target),
        );

        match outcome {
            DamageOutcome::Ignored => {}
            DamageOutcome::Wounded { dealt } => {
                info!(
                    "{} took {:.1} damage, Health: {:.1} / {:.1} ({:.0}%)",
                    label,
                    dealt,
                    health.current,
                    health.maximum,
                    health.percentage() * 100.0
                );
            }
            DamageOutcome::Killed { dealt } => {
                info!("{} took {:.1} damage and died!", label, dealt);

                if let Some((mut ai_state, mut locomotion, stats)) = ai {
                    enter_state(&mut ai_state, AiState::Dead, &mut locomotion, stats);
                    commands
                        .entity(event.target)
                        .insert((DeathTimer::default(), ColliderDisabled));
                }

                death_events.send(DeathEvent {
                    entity: event.target,
                    killed_by: event.source,
                });
            }
        }
    }
}
