//! Deterministic per-tile rotation field and brick tiling layout
//!
//! Every tile draws its rotation from its own generator, seeded only by the
//! tile's grid coordinates. The same tile gets the same angle every frame
//! and every run.

use std::f32::consts::TAU;

use glam::{Affine2, Vec2};
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{MAX_INTENSITY, MIN_INTENSITY};

/// PCG stream shared by all tiles; only the state varies per tile
const TILE_STREAM: u64 = 0xa02b_dbf7_bb3c_0a7b;

/// Seed for a tile.
///
/// The coordinates are packed into the two halves of a `u64` and passed
/// through the splitmix64 finaliser. Both steps are bijective, so no two
/// tiles share a seed.
pub fn tile_seed(tile_x: i32, tile_y: i32) -> u64 {
    let packed = ((tile_y as u32 as u64) << 32) | tile_x as u32 as u64;
    splitmix64(packed)
}

fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Rotation (radians) for the tile at `(tile_x, tile_y)`.
///
/// A uniform draw in [0, 1) is centred to [-0.5, 0.5) and scaled by
/// `2 * 2π * intensity`, so intensity 3 spreads angles over ±6π and
/// intensity 0 leaves every tile unrotated.
pub fn rotation_for(tile_x: i32, tile_y: i32, intensity: f32) -> f32 {
    let mut rng = Pcg32::new(tile_seed(tile_x, tile_y), TILE_STREAM);
    let draw: f32 = rng.random();
    // Keep the tile-only factor first so scaling by intensity is monotonic
    let spread = (draw - 0.5) * 2.0 * TAU;
    spread * intensity
}

/// Rotation intensity, always within [0, 3]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationIntensity(f32);

impl RotationIntensity {
    pub fn new(value: f32) -> Self {
        Self(value.clamp(MIN_INTENSITY, MAX_INTENSITY))
    }

    #[inline]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Add `delta` and clamp back into range
    pub fn adjust(&mut self, delta: f32) {
        self.0 = (self.0 + delta).clamp(MIN_INTENSITY, MAX_INTENSITY);
    }
}

impl Default for RotationIntensity {
    fn default() -> Self {
        Self(crate::consts::START_INTENSITY)
    }
}

/// One rotated copy of the texture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TilePlacement {
    pub tile_x: i32,
    pub tile_y: i32,
    pub rotation: f32,
    /// Maps texture pixel space to screen space
    pub transform: Affine2,
}

/// Brick-pattern tiling of a texture over a viewport.
///
/// Tiles are spaced at half the texture size, so each full-size copy
/// overlaps its neighbours. Odd rows shift by half a tile, and one extra
/// tile of padding on every side keeps rotated edges off screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileLayout {
    texture: (u32, u32),
    tile: (u32, u32),
    viewport: (u32, u32),
}

impl TileLayout {
    pub fn new(texture_w: u32, texture_h: u32, viewport_w: u32, viewport_h: u32) -> Self {
        Self {
            texture: (texture_w, texture_h),
            tile: ((texture_w / 2).max(1), (texture_h / 2).max(1)),
            viewport: (viewport_w, viewport_h),
        }
    }

    pub fn tile_size(&self) -> (u32, u32) {
        self.tile
    }

    /// Column range, including the padding column on the left
    pub fn columns(&self) -> std::ops::Range<i32> {
        let (w, _) = self.tile;
        let tiles_x = self.viewport.0.div_ceil(w) + 1;
        -1..tiles_x as i32
    }

    /// Row range, including the padding row above
    pub fn rows(&self) -> std::ops::Range<i32> {
        let (_, h) = self.tile;
        let tiles_y = self.viewport.1.div_ceil(h);
        -1..tiles_y as i32
    }

    /// Horizontal shift for a row (running bond)
    pub fn row_offset(&self, tile_y: i32) -> f32 {
        if tile_y.rem_euclid(2) == 1 {
            self.tile.0 as f32 / 2.0
        } else {
            0.0
        }
    }

    /// Transform for one tile: rotate about the texture centre, then move
    /// to the tile's grid slot.
    pub fn transform(&self, tile_x: i32, tile_y: i32, rotation: f32) -> Affine2 {
        let half = Vec2::new(self.texture.0 as f32, self.texture.1 as f32) / 2.0;
        let slot = Vec2::new(
            (tile_x * self.tile.0 as i32) as f32 + self.row_offset(tile_y),
            (tile_y * self.tile.1 as i32) as f32,
        );
        Affine2::from_translation(slot + half)
            * Affine2::from_angle(rotation)
            * Affine2::from_translation(-half)
    }

    /// All placements for this frame, row by row
    pub fn placements(&self, intensity: RotationIntensity) -> Vec<TilePlacement> {
        let columns = self.columns();
        let rows = self.rows();
        let mut out = Vec::with_capacity(columns.len() * rows.len());
        for tile_y in rows {
            for tile_x in columns.clone() {
                let rotation = rotation_for(tile_x, tile_y, intensity.value());
                out.push(TilePlacement {
                    tile_x,
                    tile_y,
                    rotation,
                    transform: self.transform(tile_x, tile_y, rotation),
                });
            }
        }
        out
    }
}
