//! HUD text: a CPU glyph atlas built with `ab_glyph`.
//!
//! Printable ASCII is rasterised once at startup into a white RGBA atlas
//! whose alpha is glyph coverage, so text goes through the same textured
//! pipeline as sprites.

use std::collections::HashMap;

use ab_glyph::{Font, FontArc, Glyph, GlyphId, PxScale, ScaleFont};
use glam::Vec2;

use super::shapes;
use super::vertex::Vertex;

const ATLAS_WIDTH: u32 = 256;

struct GlyphInfo {
    /// Pixel rect in the atlas
    atlas_min: [u32; 2],
    size: [u32; 2],
    /// Offset from the pen position (top of the line) to the bitmap's top-left
    offset: Vec2,
    advance: f32,
    id: GlyphId,
}

/// Rasterised glyphs for one font size
pub struct GlyphAtlas {
    font: FontArc,
    scale: PxScale,
    glyphs: HashMap<char, GlyphInfo>,
    /// Coverage, one byte per pixel
    coverage: Vec<u8>,
    width: u32,
    height: u32,
    line_height: f32,
}

impl GlyphAtlas {
    pub fn new(font: FontArc, px: f32) -> Self {
        let scale = PxScale::from(px);
        let scaled = font.as_scaled(scale);
        let ascent = scaled.ascent();
        let line_height = scaled.height() + scaled.line_gap();

        let mut height: u32 = 64;
        let mut coverage = vec![0u8; (ATLAS_WIDTH * height) as usize];
        let mut cursor_x: u32 = 1;
        let mut cursor_y: u32 = 1;
        let mut row_h: u32 = 0;
        let mut glyphs = HashMap::new();

        for ch in (0x20u8..0x7f).map(char::from) {
            let id = font.glyph_id(ch);
            let advance = scaled.h_advance(id);
            let glyph = Glyph {
                id,
                scale,
                position: ab_glyph::point(0.0, ascent),
            };

            let Some(outlined) = font.outline_glyph(glyph) else {
                // Whitespace: advance only
                glyphs.insert(
                    ch,
                    GlyphInfo {
                        atlas_min: [0, 0],
                        size: [0, 0],
                        offset: Vec2::ZERO,
                        advance,
                        id,
                    },
                );
                continue;
            };

            let bounds = outlined.px_bounds();
            let gw = (bounds.width().ceil() as u32).max(1);
            let gh = (bounds.height().ceil() as u32).max(1);

            if cursor_x + gw + 1 >= ATLAS_WIDTH {
                cursor_x = 1;
                cursor_y += row_h + 1;
                row_h = 0;
            }
            if cursor_y + gh + 1 >= height {
                let new_height = (height * 2).max(cursor_y + gh + 2);
                coverage.resize((ATLAS_WIDTH * new_height) as usize, 0);
                height = new_height;
            }

            let (ox, oy) = (cursor_x, cursor_y);
            outlined.draw(|x, y, v| {
                let px = ox + x;
                let py = oy + y;
                if px < ATLAS_WIDTH && py < height {
                    let idx = (py * ATLAS_WIDTH + px) as usize;
                    coverage[idx] = coverage[idx].max((v * 255.0) as u8);
                }
            });

            glyphs.insert(
                ch,
                GlyphInfo {
                    atlas_min: [ox, oy],
                    size: [gw, gh],
                    offset: Vec2::new(bounds.min.x, bounds.min.y),
                    advance,
                    id,
                },
            );

            cursor_x += gw + 1;
            row_h = row_h.max(gh);
        }

        log::debug!(
            "Glyph atlas {}x{} for {} glyphs at {px}px",
            ATLAS_WIDTH,
            height,
            glyphs.len()
        );

        Self {
            font,
            scale,
            glyphs,
            coverage,
            width: ATLAS_WIDTH,
            height,
            line_height,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Atlas as white RGBA with coverage in alpha
    pub fn to_rgba(&self) -> Vec<u8> {
        self.coverage
            .iter()
            .flat_map(|&a| [255, 255, 255, a])
            .collect()
    }

    /// Quads for `text` with its top-left corner at `origin`
    pub fn layout(&self, text: &str, origin: Vec2, color: [f32; 4]) -> Vec<Vertex> {
        let scaled = self.font.as_scaled(self.scale);
        let atlas = Vec2::new(self.width as f32, self.height as f32);
        let mut vertices = Vec::with_capacity(text.len() * 6);

        for (line_index, line) in text.lines().enumerate() {
            let mut pen = origin + Vec2::new(0.0, line_index as f32 * self.line_height);
            let mut prev: Option<GlyphId> = None;

            for ch in line.chars() {
                let Some(info) = self.glyphs.get(&ch).or_else(|| self.glyphs.get(&'?')) else {
                    continue;
                };
                if let Some(prev) = prev {
                    pen.x += scaled.kern(prev, info.id);
                }
                prev = Some(info.id);

                if info.size[0] > 0 {
                    let min = (pen + info.offset).round();
                    let size = Vec2::new(info.size[0] as f32, info.size[1] as f32);
                    let uv_min = Vec2::new(info.atlas_min[0] as f32, info.atlas_min[1] as f32) / atlas;
                    let uv_max = uv_min + size / atlas;
                    vertices.extend_from_slice(&shapes::rect(min, size, uv_min, uv_max, color));
                }
                pen.x += info.advance;
            }
        }

        vertices
    }
}
