//! Fire-request consumer: activate bullets from their pool.
//!
//! A pool member must carry the pooled bullet components; a miss is an invariant
//! violation and fails loudly. An exhausted pool is a capacity decision and the
//! request is dropped.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::plugins::archetypes::AmmoTable;
use crate::plugins::physics;

use super::components::Projectile;
use super::messages::FireRequest;
use super::pool::BulletPools;

pub fn allocate_fire_requests(
    mut commands: Commands,
    pools: Res<BulletPools>,
    ammo: Res<AmmoTable>,
    mut reader: MessageReader<FireRequest>,
    mut q: Query<(&mut Projectile, &mut Transform, &mut LinearVelocity)>,
) {
    for req in reader.read() {
        let free = pools.find_free(req.class, |e| {
            q.get(e)
                .expect("BulletPools member missing pooled bullet components")
                .0
                .is_active()
        });
        let Some(e) = free else {
            debug!("{:?} pool exhausted, shot dropped", req.class);
            continue;
        };

        let (mut projectile, mut tf, mut vel) = q
            .get_mut(e)
            .expect("BulletPools member missing pooled bullet components");

        projectile.activate();
        tf.translation = req.origin.extend(2.0);
        tf.rotation = Quat::from_rotation_z(req.angle);
        vel.0 = Vec2::from_angle(req.angle) * ammo.get(req.class).speed;

        physics::admit(&mut commands, e);
    }
}
