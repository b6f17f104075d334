//! `Spawner`: revive a dead actor of the requested archetype, or build a new one.
//!
//! Actor entities are never despawned. Killing one only withdraws its body, so the
//! population of each archetype is bounded by the most that were ever alive at once.
//!
//! Spawning also resets per-life memory: the ship's fire cooldown is cleared, and an
//! enemy's first shot waits a full cooldown from the moment it appears.

use std::time::Duration;

use avian2d::prelude::*;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::common::layers::ActorClass;
use crate::common::rng::GameRng;
use crate::common::tunables::Tunables;
use crate::plugins::archetypes::{Archetype, ArchetypeConfig, ArchetypeId, ArchetypeTable};
use crate::plugins::combat::{self, CombatListeners, Combatant};
use crate::plugins::enemies::{Enemy, EnemyBrain};
use crate::plugins::physics;
use crate::plugins::player::Ship;

use super::placement::Placement;

/// Marker for asteroid actors.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Asteroid;

type ActorRows<'w, 's> =
    Query<'w, 's, (Entity, &'static Archetype, &'static mut Combatant)>;

#[derive(SystemParam)]
pub struct Spawner<'w, 's> {
    commands: Commands<'w, 's>,
    time: Res<'w, Time>,
    table: Res<'w, ArchetypeTable>,
    tunables: Res<'w, Tunables>,
    rng: ResMut<'w, GameRng>,
    actors: ActorRows<'w, 's>,
}

impl Spawner<'_, '_> {
    /// Recycle the first dead actor of `id`, else create one. Returns the actor.
    pub fn spawn_or_recycle(&mut self, id: ArchetypeId) -> Entity {
        let now = self.time.elapsed();
        let config = self.table.get(id);
        let placement = Placement::for_class(config, self.tunables.half_arena(), &mut self.rng);

        let dead = self
            .actors
            .iter_mut()
            .find(|(_, archetype, combatant)| archetype.0 == id && combatant.is_dead());

        if let Some((e, _, mut combatant)) = dead {
            revive(&mut self.commands, e, &mut combatant, config, placement, now);
            debug!("recycled {} {:?}", config.name, e);
            return e;
        }

        let e = build(&mut self.commands, id, config, placement, &self.tunables, now);
        debug!("spawned new {} {:?}", config.name, e);
        e
    }

    /// Weighted random archetype of `class`, then `spawn_or_recycle`.
    pub fn spawn_random(&mut self, class: ActorClass) -> Entity {
        let id = self.table.pick_weighted(class, &mut **self.rng);
        self.spawn_or_recycle(id)
    }

    /// Spawn a specific actor again, dead or alive (lives reset, placed anew).
    pub fn respawn(&mut self, e: Entity) -> bool {
        let Ok((_, archetype, mut combatant)) = self.actors.get_mut(e) else {
            return false;
        };
        let now = self.time.elapsed();
        let config = self.table.get(archetype.0);
        let placement = Placement::for_class(config, self.tunables.half_arena(), &mut self.rng);
        revive(&mut self.commands, e, &mut combatant, config, placement, now);
        true
    }

    /// Silently remove every live actor of `class`. No payout, no listeners.
    pub fn despawn_class(&mut self, class: ActorClass) -> usize {
        let mut removed = 0;
        for (e, archetype, mut combatant) in &mut self.actors {
            if self.table.get(archetype.0).class != class {
                continue;
            }
            if combatant.despawn() {
                physics::withdraw(&mut self.commands, e);
                removed += 1;
            }
        }
        removed
    }
}

fn revive(
    commands: &mut Commands,
    e: Entity,
    combatant: &mut Combatant,
    config: &ArchetypeConfig,
    placement: Placement,
    now: Duration,
) {
    if combatant.spawn(config) {
        physics::admit(commands, e);
    }
    let mut entity = commands.entity(e);
    entity.insert(placement.components());
    match config.class {
        ActorClass::Ship => {
            entity.insert(Ship::default());
        }
        ActorClass::Enemy => {
            entity.insert(EnemyBrain::armed(now));
        }
        ActorClass::Asteroid => {}
    }
}

fn build(
    commands: &mut Commands,
    id: ArchetypeId,
    config: &ArchetypeConfig,
    placement: Placement,
    tunables: &Tunables,
    now: Duration,
) -> Entity {
    let mut combatant = Combatant::new(config);
    combatant.spawn(config);

    let mut entity = commands.spawn((
        Name::new(config.name.clone()),
        combatant,
        Archetype(id),
        CombatListeners::default(),
        Sprite {
            color: combat::IDLE_TINT,
            custom_size: Some(config.size()),
            ..default()
        },
        Visibility::Visible,
        RigidBody::Dynamic,
        Collider::rectangle(config.width, config.height),
        config.class.collision_layers(),
        CollisionEventsEnabled,
        placement.components(),
    ));

    match config.class {
        ActorClass::Ship => {
            entity.insert((
                Ship::default(),
                LinearDamping(tunables.ship_linear_damping),
                Restitution::new(0.5),
            ));
        }
        ActorClass::Enemy => {
            entity.insert((Enemy, EnemyBrain::armed(now)));
        }
        ActorClass::Asteroid => {
            entity.insert(Asteroid);
        }
    }
    entity.id()
}
