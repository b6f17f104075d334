//! Physics world setup and body presence.
//!
//! The rigid-body solver is avian's. This module owns the two operations the game
//! needs on top of it: taking a body out of the simulation and putting it back.
//! Both are idempotent, so calling `withdraw` on an already withdrawn body is safe.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::{schedule::FrameSet, tunables::Tunables};

pub fn plugin(app: &mut App) {
    let ppm = app.world().resource::<Tunables>().pixels_per_meter;
    app.add_plugins(PhysicsPlugins::default().with_length_unit(ppm));
    app.insert_resource(Gravity(Vec2::ZERO));
    app.add_systems(FixedUpdate, wrap_around_arena.in_set(FrameSet::Lifecycle));
}

/// Take a body out of the simulation and hide it.
pub fn withdraw(commands: &mut Commands, entity: Entity) {
    commands
        .entity(entity)
        .insert((RigidBodyDisabled, ColliderDisabled, Visibility::Hidden));
}

/// Put a body back into the simulation and show it.
pub fn admit(commands: &mut Commands, entity: Entity) {
    commands
        .entity(entity)
        .remove::<(RigidBodyDisabled, ColliderDisabled)>()
        .insert(Visibility::Visible);
}

/// Wrap `p` to the opposite side once it is more than `margin` past an edge.
pub fn wrap_position(p: Vec2, half: Vec2, margin: f32) -> Vec2 {
    let wrap = |v: f32, h: f32| {
        let limit = h + margin;
        if v > limit {
            v - 2.0 * limit
        } else if v < -limit {
            v + 2.0 * limit
        } else {
            v
        }
    };
    Vec2::new(wrap(p.x, half.x), wrap(p.y, half.y))
}

fn wrap_around_arena(
    tunables: Res<Tunables>,
    mut q: Query<&mut Transform, (With<RigidBody>, Without<RigidBodyDisabled>)>,
) {
    let half = tunables.half_arena();
    for mut tf in &mut q {
        let p = tf.translation.truncate();
        let wrapped = wrap_position(p, half, tunables.wrap_margin);
        if wrapped != p {
            tf.translation.x = wrapped.x;
            tf.translation.y = wrapped.y;
        }
    }
}

#[cfg(test)]
mod tests;
