//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime.
//! - every `update` advances the clock by one fixed `FRAME`, so fixed-step systems
//!   run deterministically.
//! - we then call `space_shooter::game::configure_headless` to install gameplay plugins.

#![allow(dead_code)]

use std::time::Duration;

use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use space_shooter::plugins::player::Ship;

pub const FRAME: Duration = Duration::from_millis(16);

pub fn app_headless() -> App {
    let mut app = App::new();

    // Add AssetPlugin + ScenePlugin so SceneSpawner exists for avian.
    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(FRAME));

    space_shooter::game::configure_headless(&mut app);
    app
}

/// Run whole frames until at least `span` of game time has passed.
pub fn run_for(app: &mut App, span: Duration) {
    let frames = span.as_millis().div_ceil(FRAME.as_millis());
    for _ in 0..frames {
        app.update();
    }
}

pub fn ship(app: &mut App) -> Entity {
    app.world_mut()
        .query_filtered::<Entity, With<Ship>>()
        .single(app.world())
        .expect("exactly one ship")
}
