//! Keyboard symbols and their physical QWERTY offsets
//!
//! Offsets are in key widths, measured from the centre of the T/Y/G/H
//! cluster. Rows are one unit apart and carry the usual QWERTY stagger.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Input symbols the scenes react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Key {
    Digit0,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
}

impl Key {
    /// Short label as printed on the keycap
    pub fn label(&self) -> &'static str {
        match self {
            Key::Digit0 => "0",
            Key::Digit1 => "1",
            Key::Digit2 => "2",
            Key::Digit3 => "3",
            Key::Digit4 => "4",
            Key::Digit5 => "5",
            Key::Digit6 => "6",
            Key::Digit7 => "7",
            Key::Digit8 => "8",
            Key::Digit9 => "9",
            Key::A => "A",
            Key::B => "B",
            Key::C => "C",
            Key::D => "D",
            Key::E => "E",
            Key::F => "F",
            Key::G => "G",
            Key::H => "H",
            Key::I => "I",
            Key::J => "J",
            Key::K => "K",
            Key::L => "L",
            Key::M => "M",
            Key::N => "N",
            Key::O => "O",
            Key::P => "P",
            Key::Q => "Q",
            Key::R => "R",
            Key::S => "S",
            Key::T => "T",
            Key::U => "U",
            Key::V => "V",
            Key::W => "W",
            Key::X => "X",
            Key::Y => "Y",
            Key::Z => "Z",
            Key::ArrowLeft => "Left",
            Key::ArrowRight => "Right",
            Key::ArrowUp => "Up",
            Key::ArrowDown => "Down",
        }
    }
}

/// Number of keys with a layout position
pub const MAPPED_KEY_COUNT: usize = 36;

/// Physical offset of every mapped key
pub const KEY_TABLE: [(Key, Vec2); MAPPED_KEY_COUNT] = [
    // Number row
    (Key::Digit1, Vec2::new(-5.5, -2.5)),
    (Key::Digit2, Vec2::new(-4.5, -2.5)),
    (Key::Digit3, Vec2::new(-3.5, -2.5)),
    (Key::Digit4, Vec2::new(-2.5, -2.5)),
    (Key::Digit5, Vec2::new(-1.5, -2.5)),
    (Key::Digit6, Vec2::new(-0.5, -2.5)),
    (Key::Digit7, Vec2::new(0.5, -2.5)),
    (Key::Digit8, Vec2::new(1.5, -2.5)),
    (Key::Digit9, Vec2::new(2.5, -2.5)),
    (Key::Digit0, Vec2::new(3.5, -2.5)),
    // Top letter row
    (Key::Q, Vec2::new(-5.25, -1.5)),
    (Key::W, Vec2::new(-4.25, -1.5)),
    (Key::E, Vec2::new(-3.25, -1.5)),
    (Key::R, Vec2::new(-2.25, -1.5)),
    (Key::T, Vec2::new(-1.25, -1.5)),
    (Key::Y, Vec2::new(-0.25, -1.5)),
    (Key::U, Vec2::new(0.75, -1.5)),
    (Key::I, Vec2::new(1.75, -1.5)),
    (Key::O, Vec2::new(2.75, -1.5)),
    (Key::P, Vec2::new(3.75, -1.5)),
    // Home row
    (Key::A, Vec2::new(-4.75, -0.5)),
    (Key::S, Vec2::new(-3.75, -0.5)),
    (Key::D, Vec2::new(-2.75, -0.5)),
    (Key::F, Vec2::new(-1.75, -0.5)),
    (Key::G, Vec2::new(-0.75, -0.5)),
    (Key::H, Vec2::new(0.25, -0.5)),
    (Key::J, Vec2::new(1.25, -0.5)),
    (Key::K, Vec2::new(2.25, -0.5)),
    (Key::L, Vec2::new(3.25, -0.5)),
    // Bottom row
    (Key::Z, Vec2::new(-4.25, 0.5)),
    (Key::X, Vec2::new(-3.25, 0.5)),
    (Key::C, Vec2::new(-2.25, 0.5)),
    (Key::V, Vec2::new(-1.25, 0.5)),
    (Key::B, Vec2::new(-0.25, 0.5)),
    (Key::N, Vec2::new(0.75, 0.5)),
    (Key::M, Vec2::new(1.75, 0.5)),
];

/// Layout offset for `key`, or `None` if the key applies no force
pub fn vector_for(key: Key) -> Option<Vec2> {
    KEY_TABLE
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, offset)| *offset)
}
