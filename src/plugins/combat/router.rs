//! Collision routing: turn raw contact pairs into hits.
//!
//! ```text
//!   bullet ↔ actor   bullet retired on the spot, actor.handle_hit(bullet.damage)
//!   actor  ↔ actor   handle_hit(1) on both sides (different classes only)
//!   bullet ↔ bullet  ignored
//! ```
//!
//! Pairs are handled in report order. A bullet retired earlier in the same pass is
//! skipped, and the actor's hit latch absorbs any further damage in that frame.
//! Body removal is deferred, so pairs reported in the same step can still name an
//! actor killed by an earlier pair; those pairs are dropped whole.

use avian2d::prelude::*;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::common::layers::{can_interact, reaches};
use crate::plugins::archetypes::{Archetype, ArchetypeTable};
use crate::plugins::physics;
use crate::plugins::projectiles::components::Projectile;
use crate::plugins::projectiles::lifetime::retire;

use super::listeners::{CombatListeners, CombatNotice};
use super::messages::{ActorHit, ActorKilled};
use super::state::{Combatant, HitOutcome};

/// Damage applied to both sides when two actors ram each other.
pub const CONTACT_DAMAGE: i32 = 1;

pub type ActorQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static mut Combatant,
        &'static Archetype,
        &'static CollisionLayers,
        &'static Transform,
        Option<&'static CombatListeners>,
    ),
>;

type BulletQuery<'w, 's> = Query<'w, 's, (&'static mut Projectile, &'static CollisionLayers)>;

/// Outbound side of a resolved hit: listeners, messages, physics removal.
#[derive(SystemParam)]
pub struct CombatFeed<'w, 's> {
    commands: Commands<'w, 's>,
    hits: MessageWriter<'w, ActorHit>,
    kills: MessageWriter<'w, ActorKilled>,
}

impl<'w, 's> CombatFeed<'w, 's> {
    /// Publish `outcome`: on-hit first, then on-death and body removal if lethal.
    pub fn publish(
        &mut self,
        outcome: HitOutcome,
        notice: CombatNotice,
        listeners: Option<&CombatListeners>,
    ) {
        let notice = match outcome {
            HitOutcome::Ignored => return,
            HitOutcome::Wounded { lives } => CombatNotice { lives, ..notice },
            HitOutcome::Killed { score } => CombatNotice { lives: 0, score, ..notice },
        };

        if let Some(l) = listeners {
            l.notify_hit(&notice);
        }
        self.hits.write(ActorHit(notice));

        if let HitOutcome::Killed { .. } = outcome {
            if let Some(l) = listeners {
                l.notify_death(&notice);
            }
            self.kills.write(ActorKilled(notice));
            physics::withdraw(&mut self.commands, notice.entity);
        }
    }

    pub fn commands(&mut self) -> &mut Commands<'w, 's> {
        &mut self.commands
    }
}

#[inline]
fn gameplay_owner(collider: Entity, body: Option<Entity>) -> Entity {
    body.unwrap_or(collider)
}

/// Apply `damage` to `target` and publish the result.
fn strike(
    target: Entity,
    damage: i32,
    actors: &mut ActorQuery,
    table: &ArchetypeTable,
    feed: &mut CombatFeed,
) {
    let Ok((mut combatant, archetype, _, tf, listeners)) = actors.get_mut(target) else {
        return;
    };
    let outcome = combatant.handle_hit(damage);
    let notice = CombatNotice {
        entity: target,
        archetype: archetype.0,
        class: table.get(archetype.0).class,
        lives: combatant.lives(),
        score: combatant.score(),
        position: tf.translation.truncate(),
    };
    feed.publish(outcome, notice, listeners);
}

fn bullet_impact(
    bullet: Entity,
    target: Entity,
    bullets: &mut BulletQuery,
    actors: &mut ActorQuery,
    table: &ArchetypeTable,
    feed: &mut CombatFeed,
) {
    let Ok((combatant, _, target_layers, ..)) = actors.get(target) else {
        return;
    };
    if combatant.is_dead() {
        return;
    }
    let target_layers = *target_layers;

    let Ok((mut projectile, bullet_layers)) = bullets.get_mut(bullet) else {
        return;
    };
    // Already retired earlier in this pass.
    if !projectile.is_active() || !reaches(bullet_layers, &target_layers) {
        return;
    }

    let damage = projectile.damage;
    retire(feed.commands(), bullet, &mut projectile);
    strike(target, damage, actors, table, feed);
}

fn ram(a: Entity, b: Entity, actors: &mut ActorQuery, table: &ArchetypeTable, feed: &mut CombatFeed) {
    let (Ok((life_a, arch_a, layers_a, ..)), Ok((life_b, arch_b, layers_b, ..))) =
        (actors.get(a), actors.get(b))
    else {
        return;
    };
    if life_a.is_dead() || life_b.is_dead() {
        return;
    }
    // Same-class contacts (asteroid on asteroid) only bounce.
    if table.get(arch_a.0).class == table.get(arch_b.0).class || !can_interact(layers_a, layers_b) {
        return;
    }

    strike(a, CONTACT_DAMAGE, actors, table, feed);
    strike(b, CONTACT_DAMAGE, actors, table, feed);
}

pub fn resolve_collisions(
    mut started: MessageReader<CollisionStart>,
    table: Res<ArchetypeTable>,
    mut bullets: BulletQuery,
    mut actors: ActorQuery,
    mut feed: CombatFeed,
) {
    for ev in started.read() {
        let a = gameplay_owner(ev.collider1, ev.body1);
        let b = gameplay_owner(ev.collider2, ev.body2);

        match (bullets.contains(a), bullets.contains(b)) {
            (true, true) => {}
            (true, false) => bullet_impact(a, b, &mut bullets, &mut actors, &table, &mut feed),
            (false, true) => bullet_impact(b, a, &mut bullets, &mut actors, &table, &mut feed),
            (false, false) => ram(a, b, &mut actors, &table, &mut feed),
        }
    }
}
