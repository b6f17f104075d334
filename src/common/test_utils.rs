//! Test helpers.
//!
//! Systems that use `Commands` only enqueue structural changes, so every helper that
//! runs a system flushes the world before returning.

use std::time::Duration;

use bevy::ecs::message::{Message, Messages};
use bevy::ecs::system::{IntoSystem, RunSystemOnce};
use bevy::prelude::*;

use crate::plugins::archetypes::{AmmoTable, ArchetypeTable};
use crate::plugins::projectiles::{messages::FireRequest, pool};

/// Run a system once on the given world, then flush deferred commands.
/// Returns the system output.
pub fn run_system_once<T, Out, Marker>(world: &mut World, system: T) -> Out
where
    T: IntoSystem<(), Out, Marker>,
{
    let out = world.run_system_once(system).expect("system run failed");
    world.flush();
    out
}

/// Every `M` still buffered, oldest first.
pub fn read_messages<M: Message + Clone>(world: &mut World) -> Vec<M> {
    run_system_once(world, |mut reader: MessageReader<M>| {
        reader.read().cloned().collect::<Vec<_>>()
    })
}

/// A world with default archetypes, the given ammo table and pre-spawned pools.
pub fn world_with_pools(ammo: AmmoTable) -> World {
    let mut world = World::new();
    world.init_resource::<ArchetypeTable>();
    world.insert_resource(ammo);
    world.init_resource::<pool::BulletPools>();
    world.init_resource::<Messages<FireRequest>>();
    world.insert_resource(Time::<()>::default());
    run_system_once(&mut world, pool::init_bullet_pools);
    world
}

pub fn advance(world: &mut World, dt: Duration) {
    world.resource_mut::<Time>().advance_by(dt);
}
