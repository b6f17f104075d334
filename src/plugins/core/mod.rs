//! Core plugin: shared resources and global settings.

use bevy::prelude::*;

use crate::common::rng::GameRng;
use crate::common::schedule::FrameSet;
use crate::common::tunables::Tunables;

pub fn plugin(app: &mut App) {
    let seed = app
        .world_mut()
        .get_resource_or_insert_with(Tunables::default)
        .rng_seed;
    app.insert_resource(GameRng::seeded(seed));
    app.insert_resource(ClearColor(Color::srgb(0.05, 0.05, 0.07)));

    app.configure_sets(
        FixedUpdate,
        (
            FrameSet::Lifecycle,
            FrameSet::Ship,
            FrameSet::Enemies,
            FrameSet::Spawning,
            FrameSet::Projectiles,
        )
            .chain(),
    );
}
