//! Startup settings
//!
//! Defaults reproduce the stock demos; an optional JSON file can override
//! any subset of fields.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{ActorTuning, IntensitySteps};

/// Which demo to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SceneKind {
    /// Rotating tile background
    #[default]
    Tiles,
    /// Keyboard layout movement toy
    Keyboard,
}

impl SceneKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SceneKind::Tiles => "tiles",
            SceneKind::Keyboard => "keyboard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "tiles" | "tile" | "gravel" => Some(SceneKind::Tiles),
            "keyboard" | "keys" => Some(SceneKind::Keyboard),
            _ => None,
        }
    }

    /// Window title
    pub fn title(&self) -> &'static str {
        match self {
            SceneKind::Tiles => "Rotating Tiles",
            SceneKind::Keyboard => "Keyboard Position Game",
        }
    }
}

/// Errors reading a settings file
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Scene to start
    pub scene: SceneKind,

    // === Window ===
    /// Initial window size in logical pixels (the scene itself is always 640x480)
    pub window_width: u32,
    pub window_height: u32,

    // === Assets (relative to `asset_root`) ===
    pub asset_root: PathBuf,
    pub tile_texture: PathBuf,
    pub character_sprite: PathBuf,
    /// HUD font (TTF/OTF, not bundled); text is skipped if it cannot be loaded
    pub hud_font: PathBuf,
    /// HUD text size in pixels
    pub hud_font_px: f32,

    // === Tile scene ===
    pub initial_intensity: f32,
    pub intensity_steps: IntensitySteps,
    /// Fade the tile texture edges with a radial alpha mask
    pub tile_alpha_fade: bool,

    // === Keyboard scene ===
    pub actor: ActorTuning,
    pub actor_start: [f32; 2],
    /// Ticks a pressed key stays highlighted
    pub key_effect_ticks: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scene: SceneKind::Tiles,

            window_width: SCREEN_WIDTH,
            window_height: SCREEN_HEIGHT,

            asset_root: PathBuf::from("assets"),
            tile_texture: PathBuf::from("textures/gravel_texture_1.png"),
            character_sprite: PathBuf::from("images/character.png"),
            hud_font: PathBuf::from("fonts/DejaVuSansMono.ttf"),
            hud_font_px: 13.0,

            initial_intensity: START_INTENSITY,
            intensity_steps: IntensitySteps::default(),
            tile_alpha_fade: true,

            actor: ActorTuning::default(),
            actor_start: ACTOR_START,
            key_effect_ticks: KEY_EFFECT_TICKS,
        }
    }
}

impl Settings {
    /// Create settings for a scene (everything else default)
    pub fn for_scene(scene: SceneKind) -> Self {
        Self {
            scene,
            ..Self::default()
        }
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Resolve an asset path against the asset root
    pub fn asset_path(&self, relative: &Path) -> PathBuf {
        self.asset_root.join(relative)
    }
}
