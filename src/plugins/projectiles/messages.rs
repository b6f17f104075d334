//! Buffered fire requests.
//!
//! Producers (ship control, enemy AI) only enqueue intent. The allocator is the
//! single writer that activates pooled bullets.

use bevy::prelude::*;

use crate::common::layers::AmmoClass;

#[derive(Message, Clone, Copy, Debug)]
pub struct FireRequest {
    pub class: AmmoClass,
    pub origin: Vec2,
    /// Heading in radians; speed comes from the ammo table.
    pub angle: f32,
}
