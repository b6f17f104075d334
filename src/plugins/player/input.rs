//! Keyboard → intent snapshot.
//!
//! `down` mirrors the keys held this frame. `just` latches presses until a consumer
//! takes them, so a press between two fixed ticks is not lost.

use bevy::prelude::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Intents {
    pub left: bool,
    pub right: bool,
    pub forward: bool,
    pub backward: bool,
    pub shoot: bool,
    pub bomb: bool,
    pub boost: bool,
    pub pause: bool,
    pub restart: bool,
}

impl Intents {
    fn read(keys: &ButtonInput<KeyCode>, probe: impl Fn(&ButtonInput<KeyCode>, KeyCode) -> bool) -> Self {
        let any = |codes: &[KeyCode]| codes.iter().any(|&k| probe(keys, k));
        Self {
            left: any(&[KeyCode::KeyA, KeyCode::ArrowLeft]),
            right: any(&[KeyCode::KeyD, KeyCode::ArrowRight]),
            forward: any(&[KeyCode::KeyW, KeyCode::ArrowUp]),
            backward: any(&[KeyCode::KeyS, KeyCode::ArrowDown]),
            shoot: any(&[KeyCode::Space]),
            bomb: any(&[KeyCode::KeyB]),
            boost: any(&[KeyCode::ShiftLeft, KeyCode::ShiftRight]),
            pause: any(&[KeyCode::KeyP]),
            restart: any(&[KeyCode::KeyR]),
        }
    }

    fn merge(&mut self, other: Intents) {
        self.left |= other.left;
        self.right |= other.right;
        self.forward |= other.forward;
        self.backward |= other.backward;
        self.shoot |= other.shoot;
        self.bomb |= other.bomb;
        self.boost |= other.boost;
        self.pause |= other.pause;
        self.restart |= other.restart;
    }
}

#[derive(Resource, Debug, Default, Clone)]
pub struct InputState {
    pub down: Intents,
    pub just: Intents,
}

impl InputState {
    /// Drop every pending press.
    pub fn clear_latches(&mut self) {
        self.just = Intents::default();
    }
}

pub fn gather_input(keys: Res<ButtonInput<KeyCode>>, mut input: ResMut<InputState>) {
    input.down = Intents::read(&keys, |k, code| k.pressed(code));
    let pressed = Intents::read(&keys, |k, code| k.just_pressed(code));
    input.just.merge(pressed);
}
