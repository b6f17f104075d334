//! Camera plugin (render-only).
//!
//! The arena never scrolls, so the camera is fixed at the origin. A backdrop sprite
//! marks the playfield; anything past its edge is about to wrap.

use bevy::prelude::*;

use crate::common::tunables::Tunables;

#[derive(Component)]
pub struct MainCamera;

#[derive(Component)]
pub struct Backdrop;

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_camera);
}

fn spawn_camera(mut commands: Commands, tunables: Res<Tunables>) {
    commands.spawn((
        Name::new("MainCamera"),
        Camera2d,
        MainCamera,
        Transform::from_xyz(0.0, 0.0, 999.0),
    ));

    commands.spawn((
        Name::new("Backdrop"),
        Backdrop,
        Sprite {
            color: Color::srgb(0.08, 0.08, 0.1),
            custom_size: Some(tunables.arena),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, -10.0),
    ));
}
