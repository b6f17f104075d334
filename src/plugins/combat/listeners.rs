//! Single-slot hit/death listeners.
//!
//! An actor has at most one `on_hit` and one `on_death` listener. Registering a
//! new one replaces (and returns) the previous listener.

use std::fmt;

use bevy::prelude::*;

use crate::common::layers::ActorClass;
use crate::plugins::archetypes::ArchetypeId;

/// What a listener is told about the actor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombatNotice {
    pub entity: Entity,
    pub archetype: ArchetypeId,
    pub class: ActorClass,
    /// Lives left after the hit (0 on death).
    pub lives: u32,
    pub score: u32,
    /// Last known position, for explosions and popups.
    pub position: Vec2,
}

pub type Listener = Box<dyn Fn(&CombatNotice) + Send + Sync>;

#[derive(Component, Default)]
pub struct CombatListeners {
    on_hit: Option<Listener>,
    on_death: Option<Listener>,
}

impl CombatListeners {
    pub fn set_on_hit(
        &mut self,
        listener: impl Fn(&CombatNotice) + Send + Sync + 'static,
    ) -> Option<Listener> {
        self.on_hit.replace(Box::new(listener))
    }

    pub fn set_on_death(
        &mut self,
        listener: impl Fn(&CombatNotice) + Send + Sync + 'static,
    ) -> Option<Listener> {
        self.on_death.replace(Box::new(listener))
    }

    pub fn clear(&mut self) {
        self.on_hit = None;
        self.on_death = None;
    }

    pub(crate) fn notify_hit(&self, notice: &CombatNotice) {
        if let Some(listener) = &self.on_hit {
            listener(notice);
        }
    }

    pub(crate) fn notify_death(&self, notice: &CombatNotice) {
        if let Some(listener) = &self.on_death {
            listener(notice);
        }
    }
}

impl fmt::Debug for CombatListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CombatListeners")
            .field("on_hit", &self.on_hit.is_some())
            .field("on_death", &self.on_death.is_some())
            .finish()
    }
}
