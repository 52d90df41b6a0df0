//! Tile Drift - two small 2D demos on a wgpu drawing layer
//!
//! Core modules:
//! - `sim`: Deterministic per-tick logic (tile rotations, key impulses, actor physics)
//! - `renderer`: Draw-call recording, scene drawing and the wgpu backend
//! - `platform`: winit window, keyboard tracking and the fixed-step loop
//! - `assets`: Image/font loading and texture preparation
//! - `settings`: Startup configuration

pub mod assets;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{SceneKind, Settings};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Logical screen size shared by both scenes
    pub const SCREEN_WIDTH: u32 = 640;
    pub const SCREEN_HEIGHT: u32 = 480;

    /// Rotation intensity range and defaults
    pub const MIN_INTENSITY: f32 = 0.0;
    pub const MAX_INTENSITY: f32 = 3.0;
    pub const START_INTENSITY: f32 = 1.0;
    pub const INTENSITY_SMALL_STEP: f32 = 0.001;
    pub const INTENSITY_LARGE_STEP: f32 = 0.01;

    /// Actor tuning defaults
    pub const ACTOR_DAMPING: f32 = 0.98;
    pub const ACTOR_IMPULSE_GAIN: f32 = 1.2;
    pub const ACTOR_DEADZONE: f32 = 0.01;
    /// Velocity factor applied on a wall hit (negate and halve)
    pub const ACTOR_RESTITUTION: f32 = -0.5;
    /// Actor spawn point (screen centre minus half a 30px sprite)
    pub const ACTOR_START: [f32; 2] = [320.0 - 15.0, 240.0 - 15.0];

    /// Key highlight duration (~0.5s)
    pub const KEY_EFFECT_TICKS: u32 = 30;
}
