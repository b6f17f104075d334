use std::f32::consts::FRAC_PI_2;
use std::time::Duration;

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::ActorClass;
use crate::common::rng::GameRng;
use crate::common::test_utils::{advance, run_system_once};
use crate::common::tunables::Tunables;
use crate::plugins::archetypes::{Archetype, ArchetypeId, ArchetypeTable};
use crate::plugins::combat::Combatant;
use crate::plugins::enemies::{Enemy, EnemyBrain};
use crate::plugins::player::Ship;

use super::*;

fn spawner_world() -> World {
    let mut world = World::new();
    world.init_resource::<ArchetypeTable>();
    world.init_resource::<Tunables>();
    world.insert_resource(GameRng::seeded(11));
    world.init_resource::<SpawnTimers>();
    world.insert_resource(Time::<()>::default());
    world
}

fn id(world: &World, name: &str) -> ArchetypeId {
    world.resource::<ArchetypeTable>().id_of(name).unwrap()
}

fn spawn(world: &mut World, id: ArchetypeId) -> Entity {
    run_system_once(world, move |mut spawner: Spawner| spawner.spawn_or_recycle(id))
}

fn count<C: Component>(world: &mut World) -> usize {
    world.query_filtered::<(), With<C>>().iter(world).count()
}

#[test]
fn new_asteroid_enters_just_past_a_corner() {
    let mut world = spawner_world();
    let small = id(&world, "small");
    let e = spawn(&mut world, small);

    let combatant = world.get::<Combatant>(e).unwrap();
    assert!(!combatant.is_dead());
    assert_eq!(combatant.lives(), 1);
    assert_eq!(world.get::<Archetype>(e), Some(&Archetype(small)));
    assert!(world.get::<Asteroid>(e).is_some());

    let p = world.get::<Transform>(e).unwrap().translation;
    assert_eq!(p.x.abs(), 384.0 + 16.0);
    assert_eq!(p.y.abs(), 320.0 + 16.0);

    let speed = world.get::<LinearVelocity>(e).unwrap().0.length();
    assert!((30.0 - 1e-3..=180.0 + 1e-3).contains(&speed));
    let spin = world.get::<AngularVelocity>(e).unwrap().0;
    assert!(spin.abs() <= 3.0);
}

#[test]
fn ship_starts_centred_facing_up_at_rest() {
    let mut world = spawner_world();
    let ship_id = id(&world, "ship");
    let e = spawn(&mut world, ship_id);

    assert!(world.get::<Ship>(e).is_some());
    let tf = world.get::<Transform>(e).unwrap();
    assert_eq!(tf.translation.truncate(), Vec2::ZERO);
    let facing = (tf.rotation * Vec3::X).truncate();
    assert!((facing.to_angle() - FRAC_PI_2).abs() < 1e-5);
    assert_eq!(world.get::<LinearVelocity>(e).unwrap().0, Vec2::ZERO);
}

#[test]
fn enemies_get_a_brain() {
    let mut world = spawner_world();
    let enemy_id = id(&world, "enemy");
    let e = spawn(&mut world, enemy_id);
    assert!(world.get::<Enemy>(e).is_some());
    assert!(world.get::<EnemyBrain>(e).is_some());
}

#[test]
fn dead_instance_is_recycled_instead_of_allocating() {
    let mut world = spawner_world();
    let large = id(&world, "large");
    let first = spawn(&mut world, large);

    world.get_mut::<Combatant>(first).unwrap().handle_hit(100);
    world.entity_mut(first).insert((RigidBodyDisabled, ColliderDisabled));

    let second = spawn(&mut world, large);
    assert_eq!(second, first);
    assert_eq!(count::<Asteroid>(&mut world), 1);

    let combatant = world.get::<Combatant>(first).unwrap();
    assert!(!combatant.is_dead());
    assert_eq!(combatant.lives(), 8);
    assert!(world.get::<RigidBodyDisabled>(first).is_none());
    assert!(world.get::<ColliderDisabled>(first).is_none());
}

#[test]
fn live_instances_are_never_recycled() {
    let mut world = spawner_world();
    let large = id(&world, "large");
    let a = spawn(&mut world, large);
    let b = spawn(&mut world, large);
    assert_ne!(a, b);
    assert_eq!(count::<Asteroid>(&mut world), 2);
}

#[test]
fn recycling_matches_the_archetype() {
    let mut world = spawner_world();
    let (small, large) = (id(&world, "small"), id(&world, "large"));
    let dead_small = spawn(&mut world, small);
    world.get_mut::<Combatant>(dead_small).unwrap().handle_death();

    let e = spawn(&mut world, large);
    assert_ne!(e, dead_small);
    assert!(world.get::<Combatant>(dead_small).unwrap().is_dead());
}

#[test]
fn recycled_enemy_forgets_its_pending_shot() {
    let mut world = spawner_world();
    let enemy_id = id(&world, "enemy");
    let e = spawn(&mut world, enemy_id);

    let target = world.spawn_empty().id();
    world
        .get_mut::<EnemyBrain>(e)
        .unwrap()
        .begin_telegraph(target, Duration::from_millis(300));
    world.get_mut::<Combatant>(e).unwrap().handle_death();

    assert_eq!(spawn(&mut world, enemy_id), e);
    assert!(!world.get::<EnemyBrain>(e).unwrap().is_telegraphing());
}

#[test]
fn despawn_class_is_silent_and_leaves_other_classes() {
    let mut world = spawner_world();
    let (ship_id, small, enemy_id) = (id(&world, "ship"), id(&world, "small"), id(&world, "enemy"));
    let ship = spawn(&mut world, ship_id);
    let asteroid = spawn(&mut world, small);
    let enemy = spawn(&mut world, enemy_id);

    let removed = run_system_once(&mut world, |mut spawner: Spawner| {
        spawner.despawn_class(ActorClass::Asteroid) + spawner.despawn_class(ActorClass::Enemy)
    });

    assert_eq!(removed, 2);
    for e in [asteroid, enemy] {
        assert!(world.get::<Combatant>(e).unwrap().is_dead());
        assert!(world.get::<RigidBodyDisabled>(e).is_some());
        assert_eq!(world.get::<Visibility>(e), Some(&Visibility::Hidden));
    }
    assert!(!world.get::<Combatant>(ship).unwrap().is_dead());

    // Already gone: a second sweep finds nothing.
    let again = run_system_once(&mut world, |mut spawner: Spawner| {
        spawner.despawn_class(ActorClass::Asteroid)
    });
    assert_eq!(again, 0);
}

#[test]
fn respawn_resets_a_live_actor_in_place() {
    let mut world = spawner_world();
    let ship_id = id(&world, "ship");
    let ship = spawn(&mut world, ship_id);
    world.get_mut::<Combatant>(ship).unwrap().handle_hit(1);
    world.get_mut::<Transform>(ship).unwrap().translation = Vec3::new(50.0, 50.0, 1.0);

    assert!(run_system_once(&mut world, move |mut spawner: Spawner| spawner.respawn(ship)));

    assert_eq!(world.get::<Combatant>(ship).unwrap().lives(), 3);
    assert_eq!(world.get::<Transform>(ship).unwrap().translation.truncate(), Vec2::ZERO);
    assert_eq!(count::<Ship>(&mut world), 1);
}

#[test]
fn cadence_is_strictly_greater_than_the_cooldown() {
    let cooldown = Duration::from_millis(5000);
    assert!(!due(Duration::ZERO, Duration::from_millis(5000), cooldown));
    assert!(due(Duration::ZERO, Duration::from_millis(5001), cooldown));
    assert!(!due(Duration::from_millis(5001), Duration::from_millis(9000), cooldown));
}

#[test]
fn asteroid_timer_spawns_one_per_cadence() {
    let mut world = spawner_world();

    advance(&mut world, Duration::from_millis(4000));
    run_system_once(&mut world, spawn_asteroids);
    assert_eq!(count::<Asteroid>(&mut world), 0);

    advance(&mut world, Duration::from_millis(1001));
    run_system_once(&mut world, spawn_asteroids);
    run_system_once(&mut world, spawn_asteroids);
    assert_eq!(count::<Asteroid>(&mut world), 1);
    assert_eq!(world.resource::<SpawnTimers>().last_asteroid, Duration::from_millis(5001));
}

#[test]
fn enemy_timer_uses_its_own_cadence() {
    let mut world = spawner_world();

    advance(&mut world, Duration::from_millis(29_000));
    run_system_once(&mut world, spawn_enemies);
    assert_eq!(count::<Enemy>(&mut world), 0);

    advance(&mut world, Duration::from_millis(1001));
    run_system_once(&mut world, spawn_enemies);
    assert_eq!(count::<Enemy>(&mut world), 1);
}

#[test]
fn off_screen_placement_respects_archetype_bounds() {
    let table = ArchetypeTable::default();
    let config = table.get(table.id_of("xlarge").unwrap());
    let mut rng = GameRng::seeded(5);
    let half = Tunables::default().half_arena();

    for _ in 0..100 {
        let p = Placement::off_screen(config, half, &mut rng);
        assert_eq!(p.position.x.abs(), half.x + config.width);
        assert_eq!(p.position.y.abs(), half.y + config.height);
        let speed = p.velocity.length();
        assert!(speed >= config.speed_min - 1e-3 && speed <= config.speed_max + 1e-3);
        assert!(p.angular_velocity.abs() <= config.angular_velocity);
        assert!((Vec2::from_angle(p.rotation) - p.velocity.normalize()).length() < 1e-4);
    }
}

#[test]
fn fresh_enemy_holds_fire_for_one_cooldown() {
    let mut world = spawner_world();
    advance(&mut world, Duration::from_millis(7000));
    let enemy_id = id(&world, "enemy");
    let e = spawn(&mut world, enemy_id);

    let cooldown = world.resource::<Tunables>().enemy_fire_cooldown;
    let brain = world.get::<EnemyBrain>(e).unwrap();
    assert!(!brain.ready(Duration::from_millis(7000), cooldown));
    assert!(brain.ready(Duration::from_millis(7000) + cooldown, cooldown));

    // Recycling re-arms from the new spawn time.
    world.get_mut::<Combatant>(e).unwrap().handle_death();
    advance(&mut world, Duration::from_millis(5000));
    assert_eq!(spawn(&mut world, enemy_id), e);
    let brain = world.get::<EnemyBrain>(e).unwrap();
    assert!(!brain.ready(Duration::from_millis(12_000), cooldown));
}

#[test]
fn respawned_ship_may_fire_at_once() {
    let mut world = spawner_world();
    let ship_id = id(&world, "ship");
    let ship = spawn(&mut world, ship_id);
    world.get_mut::<Ship>(ship).unwrap().stamp(Duration::from_millis(900));

    assert!(run_system_once(&mut world, move |mut spawner: Spawner| spawner.respawn(ship)));

    let cooldown = world.resource::<Tunables>().ship_fire_cooldown;
    assert!(world.get::<Ship>(ship).unwrap().ready(Duration::from_millis(900), cooldown));
}
