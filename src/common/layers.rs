//! Collision layers.
//!
//! Every actor class owns one membership bit and a fixed filter mask. Both are
//! written once when the body is created and never change afterwards; leaving the
//! simulation is done by disabling the body, not by rewriting its layers.

use avian2d::prelude::*;

#[derive(PhysicsLayer, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    #[default]
    Default,
    Ship,
    ShipBullet,
    Enemy,
    EnemyBullet,
    Asteroid,
}

/// Combat actor classes that carry lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Deserialize)]
pub enum ActorClass {
    Ship,
    Enemy,
    Asteroid,
}

impl ActorClass {
    pub fn collision_layers(self) -> CollisionLayers {
        match self {
            Self::Ship => CollisionLayers::new(
                Layer::Ship,
                [Layer::Enemy, Layer::EnemyBullet, Layer::Asteroid],
            ),
            Self::Enemy => CollisionLayers::new(
                Layer::Enemy,
                [Layer::Ship, Layer::ShipBullet, Layer::Asteroid, Layer::Enemy],
            ),
            Self::Asteroid => CollisionLayers::new(
                Layer::Asteroid,
                [Layer::Ship, Layer::ShipBullet, Layer::Asteroid, Layer::Enemy],
            ),
        }
    }
}

/// Ammunition classes, one bullet pool each.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Deserialize)]
pub enum AmmoClass {
    ShipShot,
    Bomb,
    EnemyShot,
}

impl AmmoClass {
    pub const ALL: [AmmoClass; 3] = [Self::ShipShot, Self::Bomb, Self::EnemyShot];

    pub fn collision_layers(self) -> CollisionLayers {
        match self {
            Self::ShipShot | Self::Bomb => {
                CollisionLayers::new(Layer::ShipBullet, [Layer::Enemy, Layer::Asteroid])
            }
            Self::EnemyShot => CollisionLayers::new(Layer::EnemyBullet, [Layer::Ship]),
        }
    }
}

/// Pair filter: either side accepts the other's membership.
#[inline]
pub fn can_interact(a: &CollisionLayers, b: &CollisionLayers) -> bool {
    (a.memberships.0 & b.filters.0) != 0 || (b.memberships.0 & a.filters.0) != 0
}

/// Whether a damage dealer's filter mask covers the target's membership.
#[inline]
pub fn reaches(dealer: &CollisionLayers, target: &CollisionLayers) -> bool {
    (dealer.filters.0 & target.memberships.0) != 0
}
