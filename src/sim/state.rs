//! Scene state and core simulation types
//!
//! Each scene owns all the state its tick mutates and its draw pass reads.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorTuning};
use super::effects::KeyEffects;
use super::tiles::RotationIntensity;
use crate::consts::*;

/// Per-tick intensity deltas for held arrow keys
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntensitySteps {
    /// Left/Right
    pub small: f32,
    /// Up/Down
    pub large: f32,
}

impl Default for IntensitySteps {
    fn default() -> Self {
        Self {
            small: INTENSITY_SMALL_STEP,
            large: INTENSITY_LARGE_STEP,
        }
    }
}

/// Rotating tile background
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileScene {
    pub intensity: RotationIntensity,
    pub steps: IntensitySteps,
}

impl TileScene {
    pub fn new(initial_intensity: f32, steps: IntensitySteps) -> Self {
        Self {
            intensity: RotationIntensity::new(initial_intensity),
            steps,
        }
    }
}

impl Default for TileScene {
    fn default() -> Self {
        Self::new(START_INTENSITY, IntensitySteps::default())
    }
}

/// Keyboard layout movement toy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyboardScene {
    pub actor: Actor,
    pub effects: KeyEffects,
}

impl KeyboardScene {
    /// Scene on the standard 640x480 screen
    pub fn new(start: Vec2, sprite_size: Vec2, tuning: ActorTuning, effect_ticks: u32) -> Self {
        let screen = Vec2::new(SCREEN_WIDTH as f32, SCREEN_HEIGHT as f32);
        Self {
            actor: Actor::new(start, sprite_size, screen, tuning),
            effects: KeyEffects::new(effect_ticks),
        }
    }
}

/// Whichever scene the binary was started with
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SceneState {
    Tiles(TileScene),
    Keyboard(KeyboardScene),
}
