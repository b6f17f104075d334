//! Combat: the actor state machine, hit/death notification, collision routing.
//!
//! Facts live in `Combatant` (lives, payout, life state). Rules mutate them in two
//! places only: `resolve_collisions` after the physics step, and `tick_hit_windows`
//! at the head of the next fixed update. Presentation (`tint_hit_actors`) is derived
//! from the facts and never feeds back.

pub mod listeners;
pub mod messages;
pub mod router;
pub mod state;

use avian2d::collision::narrow_phase::CollisionEventSystems;
use bevy::prelude::*;

use crate::common::schedule::{FrameSet, ResolveSet};

pub use listeners::{CombatListeners, CombatNotice};
pub use messages::{ActorHit, ActorKilled};
pub use state::{Combatant, HitOutcome, LifeState};

pub const IDLE_TINT: Color = Color::srgb(0.6, 0.6, 0.6);
pub const HIT_TINT: Color = Color::srgb(0.87, 0.87, 0.87);

pub fn plugin(app: &mut App) {
    app.add_message::<ActorHit>().add_message::<ActorKilled>();

    app.configure_sets(
        FixedPostUpdate,
        (
            ResolveSet::Collisions.after(CollisionEventSystems),
            ResolveSet::Bookkeeping.after(ResolveSet::Collisions),
        ),
    );

    app.add_systems(FixedUpdate, tick_hit_windows.in_set(FrameSet::Lifecycle))
        .add_systems(
            FixedPostUpdate,
            router::resolve_collisions.in_set(ResolveSet::Collisions),
        )
        .add_systems(Update, tint_hit_actors);
}

/// Close hit windows. A zero-length window closes on the first tick after the hit.
pub fn tick_hit_windows(time: Res<Time>, mut q: Query<&mut Combatant>) {
    let dt = time.delta();
    for mut combatant in &mut q {
        if combatant.is_hit() {
            combatant.tick(dt);
        }
    }
}

fn tint_hit_actors(mut q: Query<(&Combatant, &mut Sprite), Changed<Combatant>>) {
    for (combatant, mut sprite) in &mut q {
        sprite.color = if combatant.is_hit() { HIT_TINT } else { IDLE_TINT };
    }
}
