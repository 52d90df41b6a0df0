//! Deterministic simulation module
//!
//! All per-tick logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Position-seeded RNG only
//! - Stable iteration order (ordered maps keyed by `Key`)
//! - No rendering or platform dependencies

pub mod actor;
pub mod effects;
pub mod keymap;
pub mod state;
pub mod tick;
pub mod tiles;

pub use actor::{Actor, ActorTuning};
pub use effects::KeyEffects;
pub use keymap::{KEY_TABLE, Key, MAPPED_KEY_COUNT, vector_for};
pub use state::{IntensitySteps, KeyboardScene, SceneState, TileScene};
pub use tick::{TickInput, tick, tick_keyboard, tick_tiles};
pub use tiles::{RotationIntensity, TileLayout, TilePlacement, rotation_for, tile_seed};
