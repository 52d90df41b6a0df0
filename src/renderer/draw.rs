//! Renderer-agnostic drawing interface
//!
//! Scenes describe a frame through [`Renderer`]; [`DrawList`] records the
//! calls so the GPU backend (or a test) can consume them afterwards.

use glam::{Affine2, Vec2};

/// Linear RGBA colour
pub type Color = [f32; 4];

/// Handle to a texture owned by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Convert an sRGB byte colour to linear RGBA (surfaces are sRGB)
pub fn rgb8(r: u8, g: u8, b: u8) -> Color {
    [srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b), 1.0]
}

fn srgb_to_linear(c: u8) -> f32 {
    let c = c as f32 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Drawing capability the scenes call into.
///
/// Coordinates are logical screen pixels, origin top-left, y down.
pub trait Renderer {
    /// Logical screen size
    fn size(&self) -> (u32, u32);

    /// Fill the whole screen
    fn clear(&mut self, color: Color);

    /// Draw a full texture with `transform` mapping texture pixels to screen pixels
    fn draw_image(&mut self, texture: TextureId, transform: Affine2);

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);

    /// Draw text with its top-left corner at `(x, y)`; `\n` starts a new line
    fn draw_text(&mut self, text: &str, x: f32, y: f32, color: Color);
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Image {
        texture: TextureId,
        transform: Affine2,
    },
    Rect {
        min: Vec2,
        size: Vec2,
        color: Color,
    },
    Text {
        text: String,
        pos: Vec2,
        color: Color,
    },
}

/// Recorded frame, in painter's order
#[derive(Debug, Clone)]
pub struct DrawList {
    size: (u32, u32),
    clear: Color,
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            clear: [0.0, 0.0, 0.0, 1.0],
            commands: Vec::new(),
        }
    }

    pub fn clear_color(&self) -> Color {
        self.clear
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Iterate over the recorded text, in draw order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Renderer for DrawList {
    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn clear(&mut self, color: Color) {
        // Anything drawn before is hidden anyway
        self.commands.clear();
        self.clear = color;
    }

    fn draw_image(&mut self, texture: TextureId, transform: Affine2) {
        self.commands.push(DrawCommand::Image { texture, transform });
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.commands.push(DrawCommand::Rect {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
            color,
        });
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, color: Color) {
        if text.is_empty() {
            return;
        }
        self.commands.push(DrawCommand::Text {
            text: text.to_owned(),
            pos: Vec2::new(x, y),
            color,
        });
    }
}
