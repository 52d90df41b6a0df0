//! Turns a recorded frame into vertices grouped by texture

use std::ops::Range;

use super::draw::{DrawCommand, DrawList, TextureId};
use super::shapes;
use super::text::GlyphAtlas;
use super::vertex::Vertex;

/// A run of vertices drawn with one texture bound
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    pub texture: TextureId,
    pub vertices: Range<u32>,
}

/// What the tessellator needs to know about the backend's textures
pub trait TextureLookup {
    /// Pixel size of a texture, if it exists
    fn texture_size(&self, id: TextureId) -> Option<(u32, u32)>;
    /// 1x1 white texture used for solid fills
    fn white(&self) -> TextureId;
    /// Glyph atlas and its texture, if a font was loaded
    fn glyphs(&self) -> Option<(&GlyphAtlas, TextureId)>;
}

/// Tessellate `list` in painter's order, merging consecutive draws that
/// share a texture.
pub fn tessellate(list: &DrawList, textures: &impl TextureLookup) -> (Vec<Vertex>, Vec<Batch>) {
    let mut vertices: Vec<Vertex> = Vec::new();
    let mut batches: Vec<Batch> = Vec::new();

    let mut push = |texture: TextureId, verts: &[Vertex], vertices: &mut Vec<Vertex>| {
        if verts.is_empty() {
            return;
        }
        let start = vertices.len() as u32;
        vertices.extend_from_slice(verts);
        let end = vertices.len() as u32;
        match batches.last_mut() {
            Some(last) if last.texture == texture && last.vertices.end == start => {
                last.vertices.end = end;
            }
            _ => batches.push(Batch {
                texture,
                vertices: start..end,
            }),
        }
    };

    for cmd in list.commands() {
        match cmd {
            DrawCommand::Image { texture, transform } => {
                let Some((w, h)) = textures.texture_size(*texture) else {
                    log::warn!("draw_image with unknown texture {:?}", texture);
                    continue;
                };
                let quad = shapes::textured_quad(*transform, w as f32, h as f32, [1.0; 4]);
                push(*texture, &quad, &mut vertices);
            }
            DrawCommand::Rect { min, size, color } => {
                let quad = shapes::rect(*min, *size, glam::Vec2::ZERO, glam::Vec2::ONE, *color);
                push(textures.white(), &quad, &mut vertices);
            }
            DrawCommand::Text { text, pos, color } => {
                if let Some((atlas, texture)) = textures.glyphs() {
                    let glyph_verts = atlas.layout(text, *pos, *color);
                    push(texture, &glyph_verts, &mut vertices);
                }
            }
        }
    }

    (vertices, batches)
}
