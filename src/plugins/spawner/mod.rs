//! Spawning: cadence timers on game time, and the recycle-or-create factory.
//!
//! ```text
//!   FixedUpdate / Spawning
//!     every asteroid cadence: weighted random asteroid archetype
//!     every enemy cadence:    one enemy
//!   Startup
//!     the ship, at the arena centre
//! ```

pub mod placement;
pub mod recycle;

use std::time::Duration;

use bevy::prelude::*;

use crate::common::layers::ActorClass;
use crate::common::schedule::FrameSet;
use crate::common::tunables::Tunables;
use crate::plugins::archetypes::ArchetypeTable;

pub use placement::Placement;
pub use recycle::{Asteroid, Spawner};

/// Game time of the last timed spawn, per cadence.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SpawnTimers {
    pub last_asteroid: Duration,
    pub last_enemy: Duration,
}

impl SpawnTimers {
    pub fn reset(&mut self, now: Duration) {
        self.last_asteroid = now;
        self.last_enemy = now;
    }
}

/// Strictly more than `cooldown` has passed since `last`.
#[inline]
pub fn due(last: Duration, now: Duration, cooldown: Duration) -> bool {
    now > last + cooldown
}

pub fn plugin(app: &mut App) {
    app.init_resource::<SpawnTimers>()
        .add_systems(Startup, spawn_ship)
        .add_systems(
            FixedUpdate,
            (spawn_asteroids, spawn_enemies).in_set(FrameSet::Spawning),
        );
}

fn spawn_ship(table: Res<ArchetypeTable>, mut spawner: Spawner) {
    let ship = spawner.spawn_or_recycle(table.first_of(ActorClass::Ship));
    info!("ship ready {ship:?}");
}

pub fn spawn_asteroids(
    time: Res<Time>,
    tunables: Res<Tunables>,
    mut timers: ResMut<SpawnTimers>,
    mut spawner: Spawner,
) {
    let now = time.elapsed();
    if !due(timers.last_asteroid, now, tunables.asteroid_spawn_cooldown) {
        return;
    }
    timers.last_asteroid = now;
    spawner.spawn_random(ActorClass::Asteroid);
}

pub fn spawn_enemies(
    time: Res<Time>,
    tunables: Res<Tunables>,
    mut timers: ResMut<SpawnTimers>,
    mut spawner: Spawner,
) {
    let now = time.elapsed();
    if !due(timers.last_enemy, now, tunables.enemy_spawn_cooldown) {
        return;
    }
    timers.last_enemy = now;
    spawner.spawn_random(ActorClass::Enemy);
}

#[cfg(test)]
mod tests;
