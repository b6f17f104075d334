//! Where and how an actor enters the arena.

use std::f32::consts::FRAC_PI_2;

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::ActorClass;
use crate::common::rng::GameRng;
use crate::plugins::archetypes::ArchetypeConfig;

/// Actors sit above the background and below bullets.
pub const ACTOR_Z: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Vec2,
    /// Facing, radians. Local +x is "forward".
    pub rotation: f32,
    pub velocity: Vec2,
    pub angular_velocity: f32,
}

impl Placement {
    /// Arena centre, facing up, at rest.
    pub fn centre() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: FRAC_PI_2,
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
        }
    }

    /// Just past a random corner of the arena, drifting on a random heading.
    pub fn off_screen(config: &ArchetypeConfig, half_arena: Vec2, rng: &mut GameRng) -> Self {
        let sx = if rng.chance(0.5) { 1.0 } else { -1.0 };
        let sy = if rng.chance(0.5) { 1.0 } else { -1.0 };
        let heading = rng.heading();
        let speed = rng.between(config.speed_min, config.speed_max);
        let spin = rng.between(-config.angular_velocity, config.angular_velocity);

        Self {
            position: Vec2::new(
                sx * (half_arena.x + config.width),
                sy * (half_arena.y + config.height),
            ),
            rotation: heading,
            velocity: Vec2::from_angle(heading) * speed,
            angular_velocity: spin,
        }
    }

    /// Placement policy per actor class.
    pub fn for_class(config: &ArchetypeConfig, half_arena: Vec2, rng: &mut GameRng) -> Self {
        match config.class {
            ActorClass::Ship => Self::centre(),
            ActorClass::Enemy | ActorClass::Asteroid => Self::off_screen(config, half_arena, rng),
        }
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position.extend(ACTOR_Z))
            .with_rotation(Quat::from_rotation_z(self.rotation))
    }

    pub fn components(&self) -> (Transform, LinearVelocity, AngularVelocity) {
        (
            self.transform(),
            LinearVelocity(self.velocity),
            AngularVelocity(self.angular_velocity),
        )
    }
}
