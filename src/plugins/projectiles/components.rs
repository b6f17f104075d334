use std::time::Duration;

use bevy::prelude::*;

use crate::common::layers::AmmoClass;
use crate::plugins::archetypes::AmmoConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectileState {
    /// Parked in its pool, out of the physics world.
    #[default]
    Inactive,
    Active,
}

/// A pooled bullet. Owned by exactly one pool for its whole life.
#[derive(Component, Debug, Clone)]
pub struct Projectile {
    pub class: AmmoClass,
    pub damage: i32,
    lifespan: Duration,
    remaining: Duration,
    state: ProjectileState,
}

impl Projectile {
    pub fn new(config: &AmmoConfig) -> Self {
        Self {
            class: config.class,
            damage: config.damage,
            lifespan: Duration::from_millis(config.lifespan_ms),
            remaining: Duration::ZERO,
            state: ProjectileState::Inactive,
        }
    }

    #[inline]
    pub fn state(&self) -> ProjectileState {
        self.state
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.state == ProjectileState::Active
    }

    #[inline]
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Mark active and restart the lifespan countdown.
    #[inline]
    pub fn activate(&mut self) {
        self.state = ProjectileState::Active;
        self.remaining = self.lifespan;
    }

    /// Returns `true` if the bullet was active.
    #[inline]
    pub fn deactivate(&mut self) -> bool {
        let was_active = self.is_active();
        self.state = ProjectileState::Inactive;
        self.remaining = Duration::ZERO;
        was_active
    }

    /// Count down the lifespan. Returns `true` on the tick that expires it.
    pub fn tick(&mut self, delta: Duration) -> bool {
        if !self.is_active() {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(delta);
        if self.remaining.is_zero() {
            self.deactivate();
            true
        } else {
            false
        }
    }
}
