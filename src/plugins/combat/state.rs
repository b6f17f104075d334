//! The combat actor state machine shared by the ship, enemies and asteroids.
//!
//! ```text
//!   Dead ──spawn──▶ Idle ──handle_hit (lives left)──▶ Hit ──window elapsed──▶ Idle
//!    ▲               │
//!    └───────────────┴──handle_hit (no lives left) / handle_death
//! ```
//!
//! The state is an enum so "hit while dead" cannot be represented. Every
//! transition that is not legal from the current state is a no-op, which keeps the
//! machine idempotent under duplicate collision events within one frame.

use std::time::Duration;

use bevy::prelude::*;

use crate::plugins::archetypes::ArchetypeConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeState {
    /// Not spawned, or killed. Out of the physics world.
    Dead,
    Idle,
    /// Reacting to a hit; further damage is ignored until `remaining` runs out.
    Hit { remaining: Duration },
}

/// Result of `Combatant::handle_hit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Dead or already reacting to a hit: nothing changed.
    Ignored,
    Wounded { lives: u32 },
    /// The hit was lethal. `score` is the death payout.
    Killed { score: u32 },
}

#[derive(Component, Debug, Clone)]
pub struct Combatant {
    lives: u32,
    max_lives: u32,
    score: u32,
    hit_window: Duration,
    state: LifeState,
}

impl Combatant {
    /// A freshly constructed actor starts dead; `spawn` brings it to life.
    pub fn new(config: &ArchetypeConfig) -> Self {
        Self {
            lives: 0,
            max_lives: config.lives,
            score: config.score,
            hit_window: Duration::from_millis(config.hit_window_ms),
            state: LifeState::Dead,
        }
    }

    #[inline]
    pub fn lives(&self) -> u32 {
        self.lives
    }

    #[inline]
    pub fn max_lives(&self) -> u32 {
        self.max_lives
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[inline]
    pub fn state(&self) -> LifeState {
        self.state
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.state == LifeState::Dead
    }

    #[inline]
    pub fn is_hit(&self) -> bool {
        matches!(self.state, LifeState::Hit { .. })
    }

    /// Reset lives and payout from `config` and enter `Idle`.
    ///
    /// Returns `true` when the actor was dead, i.e. its body has to be re-admitted
    /// to the physics world. Re-spawning a live actor only resets its counters.
    pub fn spawn(&mut self, config: &ArchetypeConfig) -> bool {
        let was_dead = self.is_dead();
        self.max_lives = config.lives;
        self.lives = config.lives;
        self.score = config.score;
        self.hit_window = Duration::from_millis(config.hit_window_ms);
        self.state = LifeState::Idle;
        was_dead
    }

    /// Apply `damage` unless dead or already inside a hit window.
    ///
    /// Non-positive damage still latches the hit window but never adds lives.
    pub fn handle_hit(&mut self, damage: i32) -> HitOutcome {
        if self.state != LifeState::Idle {
            return HitOutcome::Ignored;
        }

        let damage = u32::try_from(damage).unwrap_or(0);
        self.lives = self.lives.saturating_sub(damage);

        if self.lives == 0 {
            return match self.handle_death() {
                Some(score) => HitOutcome::Killed { score },
                None => HitOutcome::Ignored,
            };
        }

        self.state = LifeState::Hit { remaining: self.hit_window };
        HitOutcome::Wounded { lives: self.lives }
    }

    /// Advance the hit window. Returns `true` on the tick that ends it.
    ///
    /// A zero window ends on the first tick after the hit.
    pub fn tick(&mut self, delta: Duration) -> bool {
        let LifeState::Hit { remaining } = self.state else {
            return false;
        };
        let remaining = remaining.saturating_sub(delta);
        if remaining.is_zero() {
            self.state = LifeState::Idle;
            true
        } else {
            self.state = LifeState::Hit { remaining };
            false
        }
    }

    /// Kill the actor. Returns the payout exactly once per spawn cycle.
    pub fn handle_death(&mut self) -> Option<u32> {
        if self.is_dead() {
            return None;
        }
        self.lives = 0;
        self.state = LifeState::Dead;
        Some(self.score)
    }

    /// Remove the actor without a payout (session reset).
    /// Returns `true` if it was alive.
    pub fn despawn(&mut self) -> bool {
        let was_alive = !self.is_dead();
        self.lives = 0;
        self.state = LifeState::Dead;
        was_alive
    }
}
