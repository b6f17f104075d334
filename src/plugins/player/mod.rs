//! Player plugin.
//!
//! Pipeline:
//! - Update: sample the keyboard into `InputState`
//! - FixedUpdate (Ship set): steer, thrust, and request shots from the pools

pub mod input;

use std::time::Duration;

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::AmmoClass;
use crate::common::schedule::FrameSet;
use crate::common::tunables::Tunables;
use crate::plugins::archetypes::{Archetype, ArchetypeTable};
use crate::plugins::combat::Combatant;
use crate::plugins::projectiles::components::Projectile;
use crate::plugins::projectiles::messages::FireRequest;
use crate::plugins::projectiles::pool::BulletPools;

pub use input::{InputState, Intents};

/// The player ship. Shots and bombs share one cooldown.
#[derive(Component, Debug, Default)]
pub struct Ship {
    last_fire: Option<Duration>,
}

impl Ship {
    pub fn ready(&self, now: Duration, cooldown: Duration) -> bool {
        self.last_fire.is_none_or(|t| now >= t + cooldown)
    }

    pub fn stamp(&mut self, now: Duration) {
        self.last_fire = Some(now);
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<InputState>()
        .add_systems(
            Update,
            input::gather_input.run_if(resource_exists::<ButtonInput<KeyCode>>),
        )
        .add_systems(FixedUpdate, ship_control.in_set(FrameSet::Ship));
}

/// Angular velocity for the held turn keys; left wins a tie.
pub fn steer(intents: &Intents, rotation_speed: f32) -> f32 {
    if intents.left {
        rotation_speed
    } else if intents.right {
        -rotation_speed
    } else {
        0.0
    }
}

/// Velocity after one step of thrust along `facing`, clamped to the max speed.
pub fn thrust(velocity: Vec2, facing: Vec2, intents: &Intents, tunables: &Tunables, dt: f32) -> Vec2 {
    let mut accel = tunables.ship_thrust;
    if intents.boost {
        accel *= tunables.ship_boost_factor;
    }

    let push = if intents.forward {
        facing * accel
    } else if intents.backward {
        -facing * accel
    } else {
        return velocity;
    };

    (velocity + push * dt).clamp_length_max(tunables.ship_max_speed)
}

pub fn ship_control(
    time: Res<Time>,
    tunables: Res<Tunables>,
    table: Res<ArchetypeTable>,
    pools: Res<BulletPools>,
    mut input: ResMut<InputState>,
    bullets: Query<&Projectile>,
    mut fire: MessageWriter<FireRequest>,
    mut q_ship: Query<(
        &mut Ship,
        &Combatant,
        &Archetype,
        &Transform,
        &mut LinearVelocity,
        &mut AngularVelocity,
    )>,
) {
    let bomb = std::mem::take(&mut input.just.bomb);

    let Ok((mut ship, combatant, archetype, tf, mut vel, mut spin)) = q_ship.single_mut() else {
        return;
    };
    if combatant.is_dead() {
        return;
    }

    let intents = input.down;
    let facing = (tf.rotation * Vec3::X).truncate();
    spin.0 = steer(&intents, tunables.ship_rotation_speed);
    vel.0 = thrust(vel.0, facing, &intents, &tunables, time.delta_secs());

    let class = if intents.shoot {
        AmmoClass::ShipShot
    } else if bomb {
        AmmoClass::Bomb
    } else {
        return;
    };

    let now = time.elapsed();
    if !ship.ready(now, tunables.ship_fire_cooldown) || !pools.has_available(class, &bullets) {
        return;
    }

    let muzzle = table.get(archetype.0).width * 0.5;
    fire.write(FireRequest {
        class,
        origin: tf.translation.truncate() + facing * muzzle,
        angle: facing.to_angle(),
    });
    ship.stamp(now);
}
