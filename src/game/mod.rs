//! Game composition root.
//!
//! Provides two public configuration functions:
//! - `configure_full`: DefaultPlugins (window/render) + game plugins.
//! - `configure_headless`: minimal configuration for integration tests.

use std::io::ErrorKind;

use bevy::prelude::*;
use bevy::window::WindowResolution;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins;
use crate::plugins::archetypes::{ArchetypeTable, ConfigError};

// Only compile these imports on Windows.
#[cfg(target_os = "windows")]
use bevy::render::{
    settings::{Backends, PowerPreference, WgpuSettings},
    RenderPlugin,
};

/// Optional archetype overrides, relative to the working directory.
pub const ARCHETYPES_PATH: &str = "config/archetypes.ron";

pub fn run() {
    App::new().add_plugins(configure_full).run();
}

/// Full configuration for `cargo run`.
pub fn configure_full(app: &mut App) {
    let arena = Tunables::default().arena;
    let default_plugins = DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Space Shooter".into(),
            resolution: WindowResolution::new(arena.x as u32, arena.y as u32),
            resizable: false,
            ..default()
        }),
        ..default()
    });

    // Windows: force DX12 on the high-performance adapter.
    #[cfg(target_os = "windows")]
    let default_plugins = default_plugins.set(RenderPlugin {
        render_creation: WgpuSettings {
            backends: Some(Backends::DX12),
            power_preference: PowerPreference::HighPerformance,
            ..default()
        }
        .into(),
        ..default()
    });

    app.add_plugins(default_plugins);

    load_archetypes(app);
    configure_game(app);
    plugins::register_render(app);
}

/// Headless configuration for integration tests.
///
/// Notes:
/// - Do NOT add DefaultPlugins.
/// - Do NOT add render-only plugins (camera).
/// - Archetypes are the built-in defaults.
pub fn configure_headless(app: &mut App) {
    configure_game(app);
}

/// Configuration shared by both full and headless apps.
fn configure_game(app: &mut App) {
    app.init_state::<GameState>();
    plugins::register_gameplay(app);
}

/// Install archetype tables from `ARCHETYPES_PATH` when the file exists.
///
/// A present but invalid file is fatal.
fn load_archetypes(app: &mut App) {
    match ArchetypeTable::from_ron_file(ARCHETYPES_PATH) {
        Ok((archetypes, ammo)) => {
            info!("loaded archetypes from {ARCHETYPES_PATH}");
            app.insert_resource(archetypes).insert_resource(ammo);
        }
        Err(ConfigError::Io(e)) if e.kind() == ErrorKind::NotFound => {
            info!("{ARCHETYPES_PATH} not found, using built-in archetypes");
        }
        Err(e) => panic!("{ARCHETYPES_PATH}: {e}"),
    }
}
