//! Session: scoring, game over, restart and pause.
//!
//! ```text
//!   FixedPostUpdate / Bookkeeping
//!     tally_kills        ActorKilled → score, or GameOver when the ship dies
//!   Update (after input)
//!     session_controls   pause toggle, restart key, shoot-to-restart on game over
//!     restart_session    RestartGame → clean slate, back to InGame
//! ```
//!
//! Restart never goes through the death path: enemies and asteroids are despawned
//! silently, so they pay no score and fire no listeners.

use bevy::prelude::*;

use crate::common::layers::ActorClass;
use crate::common::schedule::ResolveSet;
use crate::common::state::GameState;
use crate::plugins::archetypes::ArchetypeTable;
use crate::plugins::combat::ActorKilled;
use crate::plugins::player::{input, InputState, Ship};
use crate::plugins::projectiles::components::Projectile;
use crate::plugins::projectiles::lifetime::retire;
use crate::plugins::spawner::{SpawnTimers, Spawner};

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Scoreboard {
    pub score: u32,
}

/// Ask for a fresh session.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct RestartGame;

pub fn plugin(app: &mut App) {
    app.init_resource::<Scoreboard>()
        .add_message::<RestartGame>()
        .add_systems(
            FixedPostUpdate,
            tally_kills.in_set(ResolveSet::Bookkeeping),
        )
        .add_systems(OnEnter(GameState::GameOver), on_game_over)
        .add_systems(
            Update,
            (session_controls, restart_session)
                .chain()
                .after(input::gather_input),
        );
}

pub fn tally_kills(
    mut kills: MessageReader<ActorKilled>,
    mut scoreboard: ResMut<Scoreboard>,
    mut next: ResMut<NextState<GameState>>,
) {
    for ActorKilled(notice) in kills.read() {
        match notice.class {
            ActorClass::Ship => {
                info!("ship destroyed, final score {}", scoreboard.score);
                next.set(GameState::GameOver);
            }
            ActorClass::Enemy | ActorClass::Asteroid => {
                scoreboard.score += notice.score;
                debug!("+{} → {}", notice.score, scoreboard.score);
            }
        }
    }
}

fn on_game_over(mut input: ResMut<InputState>) {
    input.clear_latches();
}

pub fn session_controls(
    state: Res<State<GameState>>,
    mut input: ResMut<InputState>,
    mut time: ResMut<Time<Virtual>>,
    mut restart: MessageWriter<RestartGame>,
) {
    if std::mem::take(&mut input.just.pause) {
        if time.is_paused() {
            time.unpause();
            info!("resumed");
        } else {
            time.pause();
            info!("paused");
        }
    }

    let shoot_to_restart =
        *state.get() == GameState::GameOver && std::mem::take(&mut input.just.shoot);
    if std::mem::take(&mut input.just.restart) || shoot_to_restart {
        restart.write(RestartGame);
    }
}

pub fn restart_session(
    mut requests: MessageReader<RestartGame>,
    mut commands: Commands,
    fixed: Res<Time<Fixed>>,
    table: Res<ArchetypeTable>,
    mut scoreboard: ResMut<Scoreboard>,
    mut timers: ResMut<SpawnTimers>,
    mut input: ResMut<InputState>,
    mut virtual_time: ResMut<Time<Virtual>>,
    mut next: ResMut<NextState<GameState>>,
    mut bullets: Query<(Entity, &mut Projectile)>,
    q_ship: Query<Entity, With<Ship>>,
    mut spawner: Spawner,
) {
    if requests.is_empty() {
        return;
    }
    requests.clear();

    scoreboard.score = 0;
    let cleared =
        spawner.despawn_class(ActorClass::Enemy) + spawner.despawn_class(ActorClass::Asteroid);

    for (e, mut projectile) in &mut bullets {
        if projectile.is_active() {
            retire(&mut commands, e, &mut projectile);
        }
    }

    match q_ship.single() {
        Ok(ship) => {
            spawner.respawn(ship);
        }
        Err(_) => {
            spawner.spawn_or_recycle(table.first_of(ActorClass::Ship));
        }
    }

    timers.reset(fixed.elapsed());
    input.clear_latches();
    virtual_time.unpause();
    next.set(GameState::InGame);
    info!("session restarted, {cleared} actors cleared");
}
