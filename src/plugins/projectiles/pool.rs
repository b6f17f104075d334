//! Fixed-capacity bullet pools.
//!
//! Pools are created once at startup, one per ammunition class. Membership never
//! changes; a member is free exactly when its `Projectile` is inactive, so there is
//! no free list to keep in sync.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::AmmoClass;
use crate::plugins::archetypes::AmmoTable;

use super::components::Projectile;

#[derive(Resource, Debug, Default)]
pub struct BulletPools {
    ship_shots: Vec<Entity>,
    bombs: Vec<Entity>,
    enemy_shots: Vec<Entity>,
}

impl BulletPools {
    pub fn members(&self, class: AmmoClass) -> &[Entity] {
        match class {
            AmmoClass::ShipShot => &self.ship_shots,
            AmmoClass::Bomb => &self.bombs,
            AmmoClass::EnemyShot => &self.enemy_shots,
        }
    }

    fn members_mut(&mut self, class: AmmoClass) -> &mut Vec<Entity> {
        match class {
            AmmoClass::ShipShot => &mut self.ship_shots,
            AmmoClass::Bomb => &mut self.bombs,
            AmmoClass::EnemyShot => &mut self.enemy_shots,
        }
    }

    pub fn capacity(&self, class: AmmoClass) -> usize {
        self.members(class).len()
    }

    pub fn all(&self) -> impl Iterator<Item = Entity> + '_ {
        AmmoClass::ALL
            .into_iter()
            .flat_map(|class| self.members(class).iter().copied())
    }

    /// First member of `class` for which `is_active` is false.
    ///
    /// `None` means the pool is exhausted; callers drop the shot.
    pub fn find_free(
        &self,
        class: AmmoClass,
        is_active: impl Fn(Entity) -> bool,
    ) -> Option<Entity> {
        self.members(class).iter().copied().find(|&e| !is_active(e))
    }

    /// Read-only availability check for fire gates.
    pub fn has_available(&self, class: AmmoClass, bullets: &Query<&Projectile>) -> bool {
        self.find_free(class, |e| member(bullets, e).is_active()).is_some()
    }

    /// Number of inactive members of `class`.
    pub fn available(&self, class: AmmoClass, bullets: &Query<&Projectile>) -> usize {
        self.members(class)
            .iter()
            .filter(|&&e| !member(bullets, e).is_active())
            .count()
    }
}

fn member<'a>(bullets: &'a Query<&Projectile>, e: Entity) -> &'a Projectile {
    bullets.get(e).expect("BulletPools member missing Projectile")
}

/// Pre-spawn every pool (inactive, out of the physics world).
pub fn init_bullet_pools(
    mut commands: Commands,
    ammo: Res<AmmoTable>,
    mut pools: ResMut<BulletPools>,
) {
    for config in ammo.iter() {
        let members = pools.members_mut(config.class);
        members.clear();
        members.reserve(config.capacity);

        for _ in 0..config.capacity {
            let e = commands
                .spawn((
                    Name::new(format!("Bullet({})", config.name)),
                    Projectile::new(config),
                    Sprite {
                        color: Color::srgb(0.6, 0.6, 0.6),
                        custom_size: Some(Vec2::new(config.width, config.height)),
                        ..default()
                    },
                    Transform::from_xyz(0.0, 0.0, 2.0),
                    Visibility::Hidden,
                    RigidBody::Dynamic,
                    Collider::rectangle(config.width, config.height),
                    config.class.collision_layers(),
                    LockedAxes::ROTATION_LOCKED,
                    LinearVelocity::ZERO,
                    CollisionEventsEnabled,
                    RigidBodyDisabled,
                    ColliderDisabled,
                ))
                .id();
            members.push(e);
        }
    }
    debug!(
        "bullet pools ready: {} shots, {} bombs, {} enemy shots",
        pools.capacity(AmmoClass::ShipShot),
        pools.capacity(AmmoClass::Bomb),
        pools.capacity(AmmoClass::EnemyShot),
    );
}
