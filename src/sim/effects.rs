//! Key highlight timers for the keyboard visualisation

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::keymap::{Key, vector_for};

/// Remaining highlight ticks per recently pressed key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyEffects {
    /// Ordered for stable iteration
    remaining: BTreeMap<Key, u32>,
    duration: u32,
}

impl KeyEffects {
    pub fn new(duration: u32) -> Self {
        Self {
            remaining: BTreeMap::new(),
            duration: duration.max(1),
        }
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// Restart timers for new presses, then count every timer down.
    ///
    /// A timer already at zero is dropped, so a key stays in the map for
    /// `duration + 1` ticks after its press.
    pub fn tick(&mut self, just_pressed: &[Key]) {
        for &key in just_pressed {
            if vector_for(key).is_some() {
                self.remaining.insert(key, self.duration);
            }
        }

        self.remaining.retain(|_, ticks| {
            if *ticks > 0 {
                *ticks -= 1;
                true
            } else {
                false
            }
        });
    }

    pub fn remaining(&self, key: Key) -> Option<u32> {
        self.remaining.get(&key).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }
}
