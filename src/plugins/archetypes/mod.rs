//! Archetype configuration: read-only tables keyed by type name.
//!
//! `ArchetypeTable` describes combat actors (ship, enemy, asteroid sizes) and
//! `AmmoTable` describes bullet pools. Both are built once at startup, either from
//! the built-in defaults or from RON text, and never mutated afterwards.
//!
//! Lookups by name return `Result`; an unknown name is a programmer error and the
//! setup code fails fast on it. Once an `ArchetypeId` exists, `get` cannot fail.

use std::path::Path;

use bevy::prelude::*;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::Deserialize;
use thiserror::Error;

use crate::common::layers::{ActorClass, AmmoClass};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read archetype table: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse archetype table: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("archetype table is empty")]
    Empty,
    #[error("duplicate archetype name `{0}`")]
    Duplicate(String),
    #[error("unknown archetype `{0}`")]
    UnknownArchetype(String),
    #[error("no archetype of class {0:?}")]
    MissingClass(ActorClass),
    #[error("no ammunition of class {0:?}")]
    MissingAmmo(AmmoClass),
    #[error("archetype `{name}` is invalid: {reason}")]
    Invalid { name: String, reason: &'static str },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ArchetypeConfig {
    pub name: String,
    pub class: ActorClass,
    pub width: f32,
    pub height: f32,
    pub lives: u32,
    pub score: u32,
    pub speed_min: f32,
    pub speed_max: f32,
    /// Spawned angular velocity is drawn from `[-angular_velocity, angular_velocity]`.
    pub angular_velocity: f32,
    /// How long a hit keeps the actor immune. 0 latches until the next fixed update.
    #[serde(default)]
    pub hit_window_ms: u64,
    #[serde(default = "default_weight")]
    pub spawn_weight: u32,
}

fn default_weight() -> u32 {
    1
}

impl ArchetypeConfig {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason| ConfigError::Invalid { name: self.name.clone(), reason };
        if self.lives == 0 {
            return Err(invalid("lives must be at least 1"));
        }
        if self.speed_min < 0.0 || self.speed_min > self.speed_max {
            return Err(invalid("speed range is empty or negative"));
        }
        if self.angular_velocity < 0.0 {
            return Err(invalid("angular velocity bound is negative"));
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(invalid("size must be positive"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AmmoConfig {
    pub name: String,
    pub class: AmmoClass,
    pub width: f32,
    pub height: f32,
    pub damage: i32,
    pub lifespan_ms: u64,
    pub speed: f32,
    pub capacity: usize,
}

impl AmmoConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason| ConfigError::Invalid { name: self.name.clone(), reason };
        if self.damage < 1 {
            return Err(invalid("damage must be at least 1"));
        }
        if self.capacity == 0 {
            return Err(invalid("pool capacity must be at least 1"));
        }
        if self.lifespan_ms == 0 {
            return Err(invalid("lifespan must be positive"));
        }
        Ok(())
    }
}

/// Index into `ArchetypeTable`. Only the table hands these out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ArchetypeId(u16);

/// Component: which archetype an actor instance was built from.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Archetype(pub ArchetypeId);

#[derive(Deserialize)]
struct TableFile {
    archetypes: Vec<ArchetypeConfig>,
    ammo: Vec<AmmoConfig>,
}

#[derive(Resource, Debug, Clone)]
pub struct ArchetypeTable {
    entries: Vec<ArchetypeConfig>,
}

impl ArchetypeTable {
    pub fn new(entries: Vec<ArchetypeConfig>) -> Result<Self, ConfigError> {
        if entries.is_empty() {
            return Err(ConfigError::Empty);
        }
        for (i, entry) in entries.iter().enumerate() {
            entry.validate()?;
            if entries[..i].iter().any(|e| e.name == entry.name) {
                return Err(ConfigError::Duplicate(entry.name.clone()));
            }
        }
        for class in [ActorClass::Ship, ActorClass::Enemy, ActorClass::Asteroid] {
            if !entries.iter().any(|e| e.class == class) {
                return Err(ConfigError::MissingClass(class));
            }
        }
        Ok(Self { entries })
    }

    /// Parse both tables from one RON document with `archetypes` and `ammo` lists.
    pub fn from_ron_str(text: &str) -> Result<(Self, AmmoTable), ConfigError> {
        let file: TableFile = ron::from_str(text)?;
        Ok((Self::new(file.archetypes)?, AmmoTable::new(file.ammo)?))
    }

    pub fn from_ron_file(path: impl AsRef<Path>) -> Result<(Self, AmmoTable), ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ron_str(&text)
    }

    pub fn id_of(&self, name: &str) -> Result<ArchetypeId, ConfigError> {
        self.entries
            .iter()
            .position(|e| e.name == name)
            .map(|i| ArchetypeId(i as u16))
            .ok_or_else(|| ConfigError::UnknownArchetype(name.to_owned()))
    }

    pub fn get(&self, id: ArchetypeId) -> &ArchetypeConfig {
        &self.entries[usize::from(id.0)]
    }

    /// First archetype of a class; every class is guaranteed present by `new`.
    pub fn first_of(&self, class: ActorClass) -> ArchetypeId {
        let i = self
            .entries
            .iter()
            .position(|e| e.class == class)
            .expect("ArchetypeTable validated every class on construction");
        ArchetypeId(i as u16)
    }

    pub fn ids_of(&self, class: ActorClass) -> impl Iterator<Item = ArchetypeId> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter(move |(_, e)| e.class == class)
            .map(|(i, _)| ArchetypeId(i as u16))
    }

    /// Weighted random archetype of `class`. Falls back to the first entry when every
    /// weight is zero.
    pub fn pick_weighted(&self, class: ActorClass, rng: &mut impl Rng) -> ArchetypeId {
        let ids: Vec<ArchetypeId> = self.ids_of(class).collect();
        let weights = ids.iter().map(|id| self.get(*id).spawn_weight);
        match WeightedIndex::new(weights) {
            Ok(dist) => ids[dist.sample(rng)],
            Err(_) => ids[0],
        }
    }
}

fn actor(
    name: &str,
    class: ActorClass,
    size: (f32, f32),
    lives: u32,
    score: u32,
    speed: (f32, f32),
    angular_velocity: f32,
) -> ArchetypeConfig {
    ArchetypeConfig {
        name: name.to_owned(),
        class,
        width: size.0,
        height: size.1,
        lives,
        score,
        speed_min: speed.0,
        speed_max: speed.1,
        angular_velocity,
        hit_window_ms: 0,
        spawn_weight: 1,
    }
}

/// Built-in rules for headless runs and tests: every asteroid size equally likely
/// and a single-frame hit latch for everyone.
///
/// `config/archetypes.ron`, loaded by the windowed game, carries the same actors
/// with two tuning overrides: weighted asteroid sizes and a 500 ms ship hit window.
/// All other fields are identical.
impl Default for ArchetypeTable {
    fn default() -> Self {
        Self::new(vec![
            actor("ship", ActorClass::Ship, (32.0, 16.0), 3, 0, (0.0, 0.0), 0.0),
            actor("enemy", ActorClass::Enemy, (48.0, 48.0), 10, 100, (60.0, 90.0), 3.0),
            actor("xxlarge", ActorClass::Asteroid, (64.0, 64.0), 10, 80, (30.0, 30.0), 0.6),
            actor("xlarge", ActorClass::Asteroid, (64.0, 32.0), 7, 60, (30.0, 60.0), 1.2),
            actor("large", ActorClass::Asteroid, (32.0, 32.0), 8, 40, (30.0, 90.0), 1.8),
            actor("medium", ActorClass::Asteroid, (32.0, 16.0), 3, 20, (30.0, 120.0), 2.4),
            actor("small", ActorClass::Asteroid, (16.0, 16.0), 1, 10, (30.0, 180.0), 3.0),
        ])
        .expect("built-in archetype table is valid")
    }
}

#[derive(Resource, Debug, Clone)]
pub struct AmmoTable {
    entries: Vec<AmmoConfig>,
}

impl AmmoTable {
    pub fn new(entries: Vec<AmmoConfig>) -> Result<Self, ConfigError> {
        if entries.is_empty() {
            return Err(ConfigError::Empty);
        }
        for (i, entry) in entries.iter().enumerate() {
            entry.validate()?;
            if entries[..i].iter().any(|e| e.name == entry.name || e.class == entry.class) {
                return Err(ConfigError::Duplicate(entry.name.clone()));
            }
        }
        for class in AmmoClass::ALL {
            if !entries.iter().any(|e| e.class == class) {
                return Err(ConfigError::MissingAmmo(class));
            }
        }
        Ok(Self { entries })
    }

    pub fn get(&self, class: AmmoClass) -> &AmmoConfig {
        self.entries
            .iter()
            .find(|e| e.class == class)
            .expect("AmmoTable validated every class on construction")
    }

    pub fn iter(&self) -> impl Iterator<Item = &AmmoConfig> {
        self.entries.iter()
    }
}

fn ammo(
    name: &str,
    class: AmmoClass,
    size: (f32, f32),
    damage: i32,
    lifespan_ms: u64,
    speed: f32,
    capacity: usize,
) -> AmmoConfig {
    AmmoConfig {
        name: name.to_owned(),
        class,
        width: size.0,
        height: size.1,
        damage,
        lifespan_ms,
        speed,
        capacity,
    }
}

impl Default for AmmoTable {
    fn default() -> Self {
        Self::new(vec![
            ammo("small", AmmoClass::ShipShot, (8.0, 4.0), 1, 1000, 300.0, 64),
            ammo("bomb", AmmoClass::Bomb, (8.0, 8.0), 5, 5000, 120.0, 1),
            ammo("long", AmmoClass::EnemyShot, (16.0, 8.0), 1, 2000, 180.0, 5),
        ])
        .expect("built-in ammo table is valid")
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<ArchetypeTable>();
    app.init_resource::<AmmoTable>();
}

#[cfg(test)]
mod tests;
