//! Enemies plugin: per-tick AI layered on top of the shared combat actor.
//!
//! ```text
//!   FixedUpdate / Enemies, for every live enemy:
//!     p(wander)  nudge velocity on a random heading, clamp per axis to max speed
//!     telegraph  running? tick it; on completion release one shot at the ship
//!     p(fire)    cooldown ∧ ship alive ∧ in range ∧ pool has a bullet → telegraph
//!   Update
//!     pulse_telegraphs   scale tell while a telegraph runs
//! ```
//!
//! The cooldown is stamped when the shot is released, not when the decision is
//! made. A decision that finds the pool empty leaves no trace, so the enemy tries
//! again on a later tick instead of sitting out a full cooldown.
//!
//! Availability is checked twice: when the telegraph starts and again at release.
//! Releases within one tick draw on a shared count of free enemy shots, so a
//! request is written (and the cooldown stamped) only when the allocator is sure
//! to find a bullet for it. A release that finds the pool empty is dropped and
//! the enemy keeps its cooldown.

use std::time::Duration;

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::AmmoClass;
use crate::common::rng::GameRng;
use crate::common::schedule::FrameSet;
use crate::common::tunables::Tunables;
use crate::plugins::archetypes::{Archetype, ArchetypeTable};
use crate::plugins::combat::Combatant;
use crate::plugins::player::Ship;
use crate::plugins::projectiles::components::Projectile;
use crate::plugins::projectiles::messages::FireRequest;
use crate::plugins::projectiles::pool::BulletPools;

/// Peak extra scale of the fire tell.
const PULSE_SCALE: f32 = 0.25;

// -----------------------------------------------------------------------------
// Components
// -----------------------------------------------------------------------------

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Enemy;

#[derive(Debug, Clone)]
struct Telegraph {
    timer: Timer,
    target: Entity,
}

/// Firing memory of one enemy. Replaced wholesale when the enemy is recycled.
#[derive(Component, Debug, Clone, Default)]
pub struct EnemyBrain {
    last_fire: Option<Duration>,
    telegraph: Option<Telegraph>,
}

impl EnemyBrain {
    /// A brain that counts its first cooldown from `now`.
    pub fn armed(now: Duration) -> Self {
        Self {
            last_fire: Some(now),
            telegraph: None,
        }
    }

    pub fn ready(&self, now: Duration, cooldown: Duration) -> bool {
        self.last_fire.is_none_or(|t| now >= t + cooldown)
    }

    pub fn stamp(&mut self, now: Duration) {
        self.last_fire = Some(now);
    }

    #[inline]
    pub fn is_telegraphing(&self) -> bool {
        self.telegraph.is_some()
    }

    pub fn target(&self) -> Option<Entity> {
        self.telegraph.as_ref().map(|t| t.target)
    }

    pub fn begin_telegraph(&mut self, target: Entity, duration: Duration) {
        self.telegraph = Some(Telegraph {
            timer: Timer::new(duration, TimerMode::Once),
            target,
        });
    }

    /// Advance a running telegraph. Returns the locked target on the tick it completes.
    pub fn tick_telegraph(&mut self, delta: Duration) -> Option<Entity> {
        let telegraph = self.telegraph.as_mut()?;
        if !telegraph.timer.tick(delta).is_finished() {
            return None;
        }
        self.telegraph.take().map(|t| t.target)
    }

    /// Drop a pending shot. Returns `true` if one was running.
    pub fn cancel(&mut self) -> bool {
        self.telegraph.take().is_some()
    }

    /// 0 → 1 over the telegraph, `None` when idle.
    pub fn telegraph_progress(&self) -> Option<f32> {
        self.telegraph.as_ref().map(|t| t.timer.fraction())
    }
}

// -----------------------------------------------------------------------------
// Plugin
// -----------------------------------------------------------------------------

pub fn plugin(app: &mut App) {
    app.add_systems(FixedUpdate, enemy_think.in_set(FrameSet::Enemies))
        .add_systems(Update, pulse_telegraphs);
}

/// Add a random push to `velocity` and clamp each axis to `±max`.
pub fn wander(velocity: Vec2, heading: f32, speed: f32, max: f32) -> Vec2 {
    (velocity + Vec2::from_angle(heading) * speed).clamp(Vec2::splat(-max), Vec2::splat(max))
}

// -----------------------------------------------------------------------------
// Systems
// -----------------------------------------------------------------------------

pub fn enemy_think(
    time: Res<Time>,
    tunables: Res<Tunables>,
    table: Res<ArchetypeTable>,
    pools: Res<BulletPools>,
    mut rng: ResMut<GameRng>,
    bullets: Query<&Projectile>,
    mut fire: MessageWriter<FireRequest>,
    q_ship: Query<(Entity, &Combatant, &Transform), (With<Ship>, Without<Enemy>)>,
    mut q_enemies: Query<
        (&Combatant, &Archetype, &Transform, &mut LinearVelocity, &mut EnemyBrain),
        (With<Enemy>, Without<Ship>),
    >,
) {
    let now = time.elapsed();
    let dt = time.delta();
    let range = tunables.enemy_fire_range();
    let mut free_shots = pools.available(AmmoClass::EnemyShot, &bullets);

    let live_ship = |e: Entity| {
        q_ship
            .get(e)
            .ok()
            .filter(|(_, combatant, _)| !combatant.is_dead())
            .map(|(_, _, tf)| tf.translation.truncate())
    };
    let target = q_ship
        .single()
        .ok()
        .and_then(|(e, ..)| live_ship(e).map(|pos| (e, pos)));

    for (combatant, archetype, tf, mut vel, mut brain) in &mut q_enemies {
        if combatant.is_dead() {
            brain.cancel();
            continue;
        }
        let config = table.get(archetype.0);
        let pos = tf.translation.truncate();

        if rng.chance(tunables.enemy_wander_chance) {
            let heading = rng.heading();
            let speed = rng.between(config.speed_min, config.speed_max);
            vel.0 = wander(vel.0, heading, speed, config.speed_max);
        }

        if brain.is_telegraphing() {
            let Some(locked) = brain.tick_telegraph(dt) else {
                continue;
            };
            // The ship died or was reset while the tell played: no shot, no cooldown.
            let Some(ship_pos) = live_ship(locked) else {
                continue;
            };
            if free_shots == 0 {
                debug!("enemy shot pool drained during the tell, release dropped");
                continue;
            }
            free_shots -= 1;
            let dir = (ship_pos - pos).normalize_or(Vec2::X);
            fire.write(FireRequest {
                class: AmmoClass::EnemyShot,
                origin: pos + dir * config.width * 0.25,
                angle: dir.to_angle(),
            });
            brain.stamp(now);
            continue;
        }

        let Some((ship, ship_pos)) = target else {
            continue;
        };
        if !rng.chance(tunables.enemy_fire_chance) {
            continue;
        }
        if !brain.ready(now, tunables.enemy_fire_cooldown)
            || pos.distance(ship_pos) > range
            || free_shots == 0
        {
            continue;
        }

        brain.begin_telegraph(ship, tunables.enemy_telegraph);
    }
}

fn pulse_telegraphs(mut q: Query<(&EnemyBrain, &mut Transform), With<Enemy>>) {
    for (brain, mut tf) in &mut q {
        let s = match brain.telegraph_progress() {
            Some(f) => 1.0 + PULSE_SCALE * (1.0 - (2.0 * f - 1.0).abs()),
            None => 1.0,
        };
        if tf.scale.x != s {
            tf.scale = Vec3::new(s, s, 1.0);
        }
    }
}
