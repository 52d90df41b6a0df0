//! Platform layer
//!
//! Handles the native side of the program:
//! - Window and GPU surface (winit)
//! - Keyboard events -> per-tick input
//! - Fixed-step frame loop

pub mod app;
pub mod input;

pub use app::{PreparedScene, SceneImage, load_hud_font, prepare_scene, run};
pub use input::{InputState, key_from_code};
