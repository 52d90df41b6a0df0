//! Keyboard capture
//!
//! Collects winit key events between ticks and hands the simulation one
//! [`TickInput`] snapshot at a time.

use std::collections::BTreeSet;

use winit::keyboard::KeyCode;

use crate::sim::{Key, TickInput};

/// Map a physical key to a simulation key. Keys the scenes never read map to `None`.
pub fn key_from_code(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::Digit0 => Key::Digit0,
        KeyCode::Digit1 => Key::Digit1,
        KeyCode::Digit2 => Key::Digit2,
        KeyCode::Digit3 => Key::Digit3,
        KeyCode::Digit4 => Key::Digit4,
        KeyCode::Digit5 => Key::Digit5,
        KeyCode::Digit6 => Key::Digit6,
        KeyCode::Digit7 => Key::Digit7,
        KeyCode::Digit8 => Key::Digit8,
        KeyCode::Digit9 => Key::Digit9,
        KeyCode::KeyA => Key::A,
        KeyCode::KeyB => Key::B,
        KeyCode::KeyC => Key::C,
        KeyCode::KeyD => Key::D,
        KeyCode::KeyE => Key::E,
        KeyCode::KeyF => Key::F,
        KeyCode::KeyG => Key::G,
        KeyCode::KeyH => Key::H,
        KeyCode::KeyI => Key::I,
        KeyCode::KeyJ => Key::J,
        KeyCode::KeyK => Key::K,
        KeyCode::KeyL => Key::L,
        KeyCode::KeyM => Key::M,
        KeyCode::KeyN => Key::N,
        KeyCode::KeyO => Key::O,
        KeyCode::KeyP => Key::P,
        KeyCode::KeyQ => Key::Q,
        KeyCode::KeyR => Key::R,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyT => Key::T,
        KeyCode::KeyU => Key::U,
        KeyCode::KeyV => Key::V,
        KeyCode::KeyW => Key::W,
        KeyCode::KeyX => Key::X,
        KeyCode::KeyY => Key::Y,
        KeyCode::KeyZ => Key::Z,
        KeyCode::ArrowLeft => Key::ArrowLeft,
        KeyCode::ArrowRight => Key::ArrowRight,
        KeyCode::ArrowUp => Key::ArrowUp,
        KeyCode::ArrowDown => Key::ArrowDown,
        _ => return None,
    };
    Some(key)
}

/// Held keys plus the presses not yet seen by a tick
#[derive(Debug, Default)]
pub struct InputState {
    held: BTreeSet<Key>,
    pressed: Vec<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key event. OS auto-repeat is not a new press, and a key
    /// counts as pressed at most once per tick.
    pub fn handle_key(&mut self, key: Key, pressed: bool, repeat: bool) {
        if pressed {
            if !repeat && self.held.insert(key) && !self.pressed.contains(&key) {
                self.pressed.push(key);
            }
        } else {
            self.held.remove(&key);
        }
    }

    /// Snapshot for the next tick; presses are delivered once
    pub fn take_tick_input(&mut self) -> TickInput {
        TickInput {
            held: self.held.clone(),
            just_pressed: std::mem::take(&mut self.pressed),
        }
    }

    /// Forget everything, e.g. when the window loses focus and releases are never seen
    pub fn clear(&mut self) {
        self.held.clear();
        self.pressed.clear();
    }
}
