//! Lifespan countdown and the shared "return to pool" path.

use bevy::prelude::*;

use crate::plugins::physics;

use super::components::Projectile;

/// Deactivate `projectile` and pull its body out of the world.
///
/// Safe to call on an inactive bullet.
pub fn retire(commands: &mut Commands, entity: Entity, projectile: &mut Projectile) {
    projectile.deactivate();
    physics::withdraw(commands, entity);
}

pub fn tick_lifespans(
    mut commands: Commands,
    time: Res<Time>,
    mut q: Query<(Entity, &mut Projectile)>,
) {
    let dt = time.delta();
    for (e, mut projectile) in &mut q {
        if !projectile.is_active() {
            continue;
        }
        if projectile.tick(dt) {
            physics::withdraw(&mut commands, e);
        }
    }
}
