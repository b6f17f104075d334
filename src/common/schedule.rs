//! Per-frame ordering of the fixed update.
//!
//! ```text
//! FixedUpdate:      Lifecycle → Ship → Enemies → Spawning → Projectiles
//! FixedPostUpdate:  avian physics step → collision events → Resolve → Bookkeeping
//! ```
//!
//! Everything that mutates actors or pools happens before the physics step;
//! collision results become visible to the next fixed update.

use bevy::prelude::*;

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameSet {
    /// Hit windows, screen wrap.
    Lifecycle,
    Ship,
    Enemies,
    Spawning,
    /// Lifespans, then fire-request allocation.
    Projectiles,
}

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolveSet {
    Collisions,
    Bookkeeping,
}
