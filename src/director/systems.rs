//! Spawn director systems.

use bevy::prelude::*;

use super::components::{DirectorCommand, SpawnFile, SpawnRng};
use super::spawner::SpawnDirector;
use crate::core::{load_or_default, DataDirectory, SimulationSet};
use crate::enemies::{AiState, Enemy, EnemyRegistry};
use crate::game_mode::{MatchEnded, MatchStarted, MatchTimer};
use crate::player::Player;
use crate::world::Navigation;

/// Configure director systems. Cleanup runs before the spawn check so the
/// cap sees last frame's deaths.
pub fn setup_director_systems(app: &mut App) {
    app.add_systems(
        Update,
        (
            follow_match_lifecycle,
            handle_director_commands,
            prune_live_set,
            auto_spawn,
        )
            .chain()
            .in_set(SimulationSet::Spawn),
    );
}

/// Load `spawn.ron`, repairing values the director cannot use.
pub fn load_spawn_settings(data_dir: Res<DataDirectory>, mut commands: Commands) {
    let path = data_dir.file("spawn.ron");
    let mut file: SpawnFile = load_or_default(&path);

    for fix in file.sanitize() {
        warn!("{}: {}", path.display(), fix);
    }

    info!(
        "Spawn director: every {:.1}s, ring {:.0}..{:.0}, cap {}, {} roster entries",
        file.settings.spawn_interval,
        file.settings.min_spawn_distance,
        file.settings.spawn_radius,
        file.settings.max_enemies,
        file.roster.len()
    );
    commands.insert_resource(SpawnDirector::new(file));
}

/// Start directing when the match starts, stop when it ends.
fn follow_match_lifecycle(
    mut started: EventReader<MatchStarted>,
    mut ended: EventReader<MatchEnded>,
    mut director: ResMut<SpawnDirector>,
) {
    if started.read().count() > 0 {
        director.activate();
        info!(
            "Spawn director active, auto spawn {}",
            if director.settings.auto_spawn { "enabled" } else { "disabled" }
        );
    }
    if ended.read().count() > 0 {
        director.deactivate();
        info!("Spawn director stopped");
    }
}

fn handle_director_commands(
    mut commands: Commands,
    mut requests: EventReader<DirectorCommand>,
    mut director: ResMut<SpawnDirector>,
    registry: Res<EnemyRegistry>,
) {
    for request in requests.read() {
        match request {
            DirectorCommand::SetAutoSpawn(enabled) => director.set_auto_spawn(*enabled),
            DirectorCommand::SpawnNow { archetype, location } => {
                director.spawn_now(&mut commands, &registry, archetype, *location);
            }
            DirectorCommand::ClearAll => director.clear_all_spawned(&mut commands),
        }
    }
}

/// Forget enemies that were despawned elsewhere or have died.
fn prune_live_set(mut director: ResMut<SpawnDirector>, enemies: Query<&AiState, With<Enemy>>) {
    director.prune(|entity| enemies.get(entity).is_ok_and(|state| state.is_alive()));
}

/// Spawn one enemy near the player each interval while under the cap.
#[allow(clippy::too_many_arguments)]
fn auto_spawn(
    mut commands: Commands,
    time: Res<Time>,
    mut director: ResMut<SpawnDirector>,
    mut rng: ResMut<SpawnRng>,
    registry: Res<EnemyRegistry>,
    navigation: Res<Navigation>,
    match_timer: Res<MatchTimer>,
    enemies: Query<&AiState, With<Enemy>>,
    player_query: Query<&Transform, With<Player>>,
) {
    if !director.tick(time.delta_secs()) {
        return;
    }

    let alive = director.alive_count(&enemies);
    if !director.can_spawn_more_enemies(alive) {
        return;
    }
    director.reset_interval();

    let Ok(player) = player_query.get_single() else {
        error!("No player found for spawning");
        return;
    };

    director.spawn_near_player(
        &mut commands,
        &registry,
        &mut rng.0,
        &*navigation.0,
        player.translation,
        match_timer.game_time,
    );
}
