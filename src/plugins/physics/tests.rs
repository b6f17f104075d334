use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::test_utils::run_system_once;
use crate::common::tunables::Tunables;

use super::*;

#[test]
fn withdraw_and_admit_are_idempotent() {
    let mut world = World::new();
    let e = world.spawn((RigidBody::Dynamic, Visibility::Visible)).id();

    for _ in 0..2 {
        run_system_once(&mut world, move |mut commands: Commands| withdraw(&mut commands, e));
    }
    assert!(world.get::<RigidBodyDisabled>(e).is_some());
    assert!(world.get::<ColliderDisabled>(e).is_some());
    assert_eq!(*world.get::<Visibility>(e).unwrap(), Visibility::Hidden);

    for _ in 0..2 {
        run_system_once(&mut world, move |mut commands: Commands| admit(&mut commands, e));
    }
    assert!(world.get::<RigidBodyDisabled>(e).is_none());
    assert!(world.get::<ColliderDisabled>(e).is_none());
    assert_eq!(*world.get::<Visibility>(e).unwrap(), Visibility::Visible);
}

#[test]
fn wrap_position_only_moves_bodies_past_the_margin() {
    let half = Vec2::new(100.0, 50.0);
    assert_eq!(wrap_position(Vec2::new(90.0, 0.0), half, 10.0), Vec2::new(90.0, 0.0));
    assert_eq!(wrap_position(Vec2::new(110.0, 0.0), half, 10.0), Vec2::new(110.0, 0.0));
    assert_eq!(wrap_position(Vec2::new(115.0, 0.0), half, 10.0), Vec2::new(-105.0, 0.0));
    assert_eq!(wrap_position(Vec2::new(0.0, -65.0), half, 10.0), Vec2::new(0.0, 55.0));
}

#[test]
fn wrap_skips_withdrawn_bodies() {
    let mut world = World::new();
    world.insert_resource(Tunables { arena: Vec2::new(200.0, 100.0), wrap_margin: 10.0, ..default() });

    let live = world.spawn((RigidBody::Dynamic, Transform::from_xyz(150.0, 0.0, 0.0))).id();
    let parked = world
        .spawn((RigidBody::Dynamic, RigidBodyDisabled, Transform::from_xyz(150.0, 0.0, 0.0)))
        .id();

    run_system_once(&mut world, wrap_around_arena);

    assert_eq!(world.get::<Transform>(live).unwrap().translation.x, -70.0);
    assert_eq!(world.get::<Transform>(parked).unwrap().translation.x, 150.0);
}
