//! Asset loading and texture preparation
//!
//! Scene images are decoded to RGBA8 up front; nothing is read from disk
//! after startup.

use std::path::{Path, PathBuf};

use ab_glyph::FontArc;
use image::RgbaImage;

/// Errors from loading startup assets
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("invalid font {path}: {source}")]
    Font {
        path: PathBuf,
        #[source]
        source: ab_glyph::InvalidFont,
    },
}

fn read(path: &Path) -> Result<Vec<u8>, LoadError> {
    std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Decode an image file to RGBA8
pub fn load_image(path: &Path) -> Result<RgbaImage, LoadError> {
    let bytes = read(path)?;
    let image = image::load_from_memory(&bytes)
        .map_err(|source| LoadError::Image {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgba8();
    log::info!(
        "Loaded {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(image)
}

/// Load a TrueType/OpenType font
pub fn load_font(path: &Path) -> Result<FontArc, LoadError> {
    let bytes = read(path)?;
    let font = FontArc::try_from_vec(bytes).map_err(|source| LoadError::Font {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Loaded font {}", path.display());
    Ok(font)
}

/// Radial fade: opaque up to `solid_radius`, then linear to transparent over `falloff`
pub fn gradient_alpha(distance: f32, solid_radius: f32, falloff: f32) -> f32 {
    if distance <= solid_radius {
        1.0
    } else if falloff <= 0.0 {
        0.0
    } else {
        (1.0 - (distance - solid_radius) / falloff).max(0.0)
    }
}

/// Fade the image edges so overlapping tiles blend without seams.
///
/// Pixels within a third of the short side from the centre keep their
/// alpha; the fade to zero spans a twentieth of the short side.
pub fn apply_alpha_gradient(image: &mut RgbaImage) {
    let (w, h) = image.dimensions();
    let cx = w as f32 / 2.0;
    let cy = h as f32 / 2.0;
    let short = w.min(h) as f32;
    let solid_radius = short / 3.0;
    let falloff = short / 20.0;

    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let dx = x as f32 - cx;
        let dy = y as f32 - cy;
        let mask = gradient_alpha((dx * dx + dy * dy).sqrt(), solid_radius, falloff);
        // Mask quantises like an 8-bit alpha channel before it scales the pixel
        let mask = (mask * 255.0) as u8;
        pixel[3] = ((pixel[3] as u16 * mask as u16) / 255) as u8;
    }
}
