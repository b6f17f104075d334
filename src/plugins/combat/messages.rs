//! Combat notifications for systems inside the app (scoring, game over).
//!
//! These mirror the single-slot listeners: one `ActorHit` per applied hit and one
//! `ActorKilled` per spawn cycle.

use bevy::prelude::*;

use super::listeners::CombatNotice;

#[derive(Message, Clone, Copy, Debug)]
pub struct ActorHit(pub CombatNotice);

#[derive(Message, Clone, Copy, Debug)]
pub struct ActorKilled(pub CombatNotice);
