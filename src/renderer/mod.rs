//! Rendering module
//!
//! Scenes draw through the [`Renderer`] trait into a [`DrawList`]; the wgpu
//! backend in [`pipeline`] tessellates that list into textured quads.

pub mod batch;
pub mod draw;
pub mod pipeline;
pub mod scenes;
pub mod shapes;
pub mod text;
pub mod texture;
pub mod vertex;

pub use draw::{Color, DrawCommand, DrawList, Renderer, TextureId, rgb8};
pub use pipeline::RenderState;
pub use scenes::{KeyboardAssets, SceneAssets, TileAssets, draw_scene};
pub use text::GlyphAtlas;
