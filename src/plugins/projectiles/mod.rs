//! Projectiles: fixed bullet pools fed by a message-based fire pipeline.
//!
//! ```text
//!   FixedUpdate
//!   ┌──────────────────────────────────────────────────────────────┐
//!   │ Ship / Enemies sets: producers write FireRequest             │
//!   │ Projectiles set:                                             │
//!   │   tick_lifespans          expired bullets → Inactive, withdrawn
//!   │   allocate_fire_requests  first Inactive member → Active, admitted
//!   └──────────────────────────────────────────────────────────────┘
//!   FixedPostUpdate
//!   ┌──────────────────────────────────────────────────────────────┐
//!   │ combat::resolve_collisions: a bullet that strikes a target    │
//!   │ is retired (Inactive, withdrawn) on the spot                  │
//!   └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Producers never touch `BulletPools` mutably; the allocator is the only writer
//! that activates bullets. The one branch that is not an invariant is capacity: an
//! exhausted pool drops the request.

pub mod allocator;
pub mod components;
pub mod lifetime;
pub mod messages;
pub mod pool;

use bevy::prelude::*;

use crate::common::schedule::FrameSet;

pub struct ProjectilesPlugin;

impl Plugin for ProjectilesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<pool::BulletPools>()
            .add_message::<messages::FireRequest>()
            .add_systems(Startup, pool::init_bullet_pools);

        app.add_systems(
            FixedUpdate,
            (lifetime::tick_lifespans, allocator::allocate_fire_requests)
                .chain()
                .in_set(FrameSet::Projectiles),
        );
    }
}
