//! Tunable gameplay constants.
//!
//! Speeds are in pixels per second, angles in radians, times as `Duration`.

use std::time::Duration;

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    pub pixels_per_meter: f32,
    /// Playfield size; the origin sits at its centre.
    pub arena: Vec2,
    /// Distance past the arena edge before a body wraps to the other side.
    pub wrap_margin: f32,

    pub ship_rotation_speed: f32,
    pub ship_thrust: f32,
    pub ship_boost_factor: f32,
    pub ship_max_speed: f32,
    pub ship_linear_damping: f32,
    pub ship_fire_cooldown: Duration,

    pub enemy_wander_chance: f64,
    pub enemy_fire_chance: f64,
    pub enemy_fire_cooldown: Duration,
    pub enemy_telegraph: Duration,

    pub asteroid_spawn_cooldown: Duration,
    pub enemy_spawn_cooldown: Duration,

    pub rng_seed: u64,
}

impl Tunables {
    /// Enemies only shoot at a ship closer than half the shorter arena side.
    pub fn enemy_fire_range(&self) -> f32 {
        self.arena.x.min(self.arena.y) * 0.5
    }

    pub fn half_arena(&self) -> Vec2 {
        self.arena * 0.5
    }
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            pixels_per_meter: 20.0,
            arena: Vec2::new(768.0, 640.0),
            wrap_margin: 64.0,

            ship_rotation_speed: 3.0,
            ship_thrust: 360.0,
            ship_boost_factor: 2.0,
            ship_max_speed: 420.0,
            ship_linear_damping: 1.2,
            ship_fire_cooldown: Duration::from_millis(100),

            enemy_wander_chance: 0.01,
            enemy_fire_chance: 0.01,
            enemy_fire_cooldown: Duration::from_millis(1000),
            enemy_telegraph: Duration::from_millis(300),

            asteroid_spawn_cooldown: Duration::from_millis(5000),
            enemy_spawn_cooldown: Duration::from_millis(30_000),

            rng_seed: 0x5EED_CAFE,
        }
    }
}
