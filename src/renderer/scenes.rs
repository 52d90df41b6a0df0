//! Scene draw passes
//!
//! Pure functions of the scene state: they read it and issue calls on a
//! [`Renderer`], never mutate it.

use std::f32::consts::FRAC_PI_2;

use glam::{Affine2, Vec2};

use super::draw::{Color, Renderer, TextureId, rgb8};
use super::vertex::colors;
use crate::sim::{KEY_TABLE, KeyboardScene, SceneState, TileLayout, TileScene};

/// Pixels per keyboard unit
const KEY_SCALE: f32 = 30.0;
/// Screen position of keyboard unit (0, 0)
const KEY_ORIGIN: Vec2 = Vec2::new(320.0, 400.0);
const KEY_SIZE: f32 = 24.0;
const ORIGIN_MARK_SIZE: f32 = 10.0;

pub const KEYBOARD_INSTRUCTIONS: &str =
    "Press A-Z and 1-0 keys to move the character. TYGH is the origin (0,0).";
pub const TILE_CONTROLS: &str = "Controls: <- -> small changes | up/down large changes";

/// GPU-side resources for the tile scene
#[derive(Debug, Clone, Copy)]
pub struct TileAssets {
    pub texture: TextureId,
    pub texture_size: (u32, u32),
}

/// GPU-side resources for the keyboard scene
#[derive(Debug, Clone, Copy)]
pub struct KeyboardAssets {
    pub sprite: TextureId,
    pub sprite_size: (u32, u32),
}

#[derive(Debug, Clone, Copy)]
pub enum SceneAssets {
    Tiles(TileAssets),
    Keyboard(KeyboardAssets),
}

/// Draw whichever scene is running. Mismatched assets draw nothing.
pub fn draw_scene<R: Renderer + ?Sized>(state: &SceneState, assets: &SceneAssets, r: &mut R) {
    match (state, assets) {
        (SceneState::Tiles(scene), SceneAssets::Tiles(assets)) => draw_tiles(scene, assets, r),
        (SceneState::Keyboard(scene), SceneAssets::Keyboard(assets)) => {
            draw_keyboard(scene, assets, r)
        }
        _ => log::warn!("Scene and assets do not match; skipping frame"),
    }
}

/// Rotated brick-offset tiles plus the intensity HUD
pub fn draw_tiles<R: Renderer + ?Sized>(scene: &TileScene, assets: &TileAssets, r: &mut R) {
    let (width, height) = r.size();
    let white = palette(colors::WHITE);

    r.clear([0.0, 0.0, 0.0, 1.0]);

    let (tex_w, tex_h) = assets.texture_size;
    let layout = TileLayout::new(tex_w, tex_h, width, height);
    for tile in layout.placements(scene.intensity) {
        r.draw_image(assets.texture, tile.transform);
    }

    let rate = format!("Rotation Rate: {:.2}", scene.intensity.value());
    r.draw_text(&rate, 10.0, 12.0, white);
    r.draw_text(TILE_CONTROLS, 10.0, height as f32 - 24.0, white);
}

fn palette([r, g, b]: [u8; 3]) -> Color {
    rgb8(r, g, b)
}

/// Yellow fade for a key with `remaining` of `duration` ticks left
fn key_highlight(remaining: u32, duration: u32) -> Color {
    let fade = 155 * u64::from(remaining.min(duration)) / u64::from(duration.max(1));
    let brightness = 100 + fade as u8;
    rgb8(brightness, brightness, 0)
}

/// Screen position of a key's centre
pub fn key_center(unit: Vec2) -> Vec2 {
    KEY_ORIGIN + unit * KEY_SCALE
}

fn draw_key_grid<R: Renderer + ?Sized>(scene: &KeyboardScene, r: &mut R) {
    let duration = scene.effects.duration();
    let border = palette(colors::KEY_BORDER);
    let idle = palette(colors::KEY_IDLE);
    let label_color = palette(colors::WHITE);
    let half = KEY_SIZE / 2.0;

    for (key, unit) in KEY_TABLE {
        let c = key_center(unit);
        let (x, y) = (c.x - half, c.y - half);

        let fill = match scene.effects.remaining(key) {
            Some(remaining) => key_highlight(remaining, duration),
            None => idle,
        };
        r.fill_rect(x, y, KEY_SIZE, KEY_SIZE, fill);

        // 1px frame
        r.fill_rect(x, y, KEY_SIZE, 1.0, border);
        r.fill_rect(x, y + KEY_SIZE - 1.0, KEY_SIZE, 1.0, border);
        r.fill_rect(x, y, 1.0, KEY_SIZE, border);
        r.fill_rect(x + KEY_SIZE - 1.0, y, 1.0, KEY_SIZE, border);

        r.draw_text(key.label(), c.x - 4.0, c.y - 4.0, label_color);
    }

    r.fill_rect(
        KEY_ORIGIN.x,
        KEY_ORIGIN.y,
        ORIGIN_MARK_SIZE,
        ORIGIN_MARK_SIZE,
        palette(colors::ORIGIN),
    );
}

/// Text shown above the sprite
pub fn actor_debug_text(scene: &KeyboardScene) -> String {
    let actor = &scene.actor;
    let mut text = format!("Speed: ({:.2}, {:.2})", actor.vel.x, actor.vel.y);
    if let Some((key, unit)) = actor
        .last_key
        .and_then(|key| crate::sim::vector_for(key).map(|unit| (key, unit)))
    {
        text.push_str(&format!(
            "\nKey: {}, Pos: ({:.1}, {:.1})",
            key.label(),
            unit.x,
            unit.y
        ));
    }
    text
}

/// Keyboard grid, sprite, debug text and instructions
pub fn draw_keyboard<R: Renderer + ?Sized>(
    scene: &KeyboardScene,
    assets: &KeyboardAssets,
    r: &mut R,
) {
    let white = palette(colors::WHITE);
    r.clear(palette(colors::BACKGROUND));

    draw_key_grid(scene, r);

    // Sprite art faces up; facing 0 points along +x
    let actor = &scene.actor;
    let half = Vec2::new(assets.sprite_size.0 as f32, assets.sprite_size.1 as f32) / 2.0;
    let transform = Affine2::from_translation(actor.pos + half)
        * Affine2::from_angle(actor.facing + FRAC_PI_2)
        * Affine2::from_translation(-half);
    r.draw_image(assets.sprite, transform);

    r.draw_text(
        &actor_debug_text(scene),
        actor.pos.x.trunc(),
        (actor.pos.y - 40.0).trunc(),
        white,
    );
    r.draw_text(KEYBOARD_INSTRUCTIONS, 10.0, 10.0, white);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::draw::{DrawCommand, DrawList};
    use crate::sim::{ActorTuning, Key, MAPPED_KEY_COUNT};

    fn keyboard() -> KeyboardScene {
        KeyboardScene::new(
            Vec2::new(305.0, 225.0),
            Vec2::new(30.0, 30.0),
            ActorTuning::default(),
            30,
        )
    }

    const SPRITE: KeyboardAssets = KeyboardAssets {
        sprite: TextureId(2),
        sprite_size: (30, 30),
    };

    #[test]
    fn test_key_highlight_fades_to_idle_level() {
        assert_eq!(key_highlight(30, 30), rgb8(255, 255, 0));
        assert_eq!(key_highlight(0, 30), rgb8(100, 100, 0));
        // Integer fade like the byte colour maths
        assert_eq!(key_highlight(15, 30), rgb8(177, 177, 0));
    }

    #[test]
    fn test_key_highlight_long_durations() {
        assert_eq!(key_highlight(u32::MAX, u32::MAX), rgb8(255, 255, 0));
        assert_eq!(key_highlight(u32::MAX / 2, u32::MAX), rgb8(177, 177, 0));
        assert_eq!(key_highlight(1, u32::MAX), rgb8(100, 100, 0));
    }

    #[test]
    fn test_key_center_places_home_row() {
        assert_eq!(key_center(Vec2::ZERO), Vec2::new(320.0, 400.0));
        assert_eq!(key_center(Vec2::new(-5.5, -2.5)), Vec2::new(155.0, 325.0));
    }

    #[test]
    fn test_keyboard_frame_contents() {
        let scene = keyboard();
        let mut list = DrawList::new(640, 480);
        draw_keyboard(&scene, &SPRITE, &mut list);

        assert_eq!(list.clear_color(), rgb8(40, 40, 40));
        let rects = list
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Rect { .. }))
            .count();
        // Fill + 4 border strips per key, plus the origin mark
        assert_eq!(rects, MAPPED_KEY_COUNT * 5 + 1);

        let images = list
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Image { .. }))
            .count();
        assert_eq!(images, 1);

        let texts: Vec<&str> = list.texts().collect();
        assert!(texts.contains(&"Q"));
        assert!(texts.contains(&"0"));
        assert!(texts.contains(&"Speed: (0.00, 0.00)"));
        assert_eq!(texts.last(), Some(&KEYBOARD_INSTRUCTIONS));
    }

    #[test]
    fn test_pressed_key_is_highlighted() {
        let mut scene = keyboard();
        scene.effects.tick(&[Key::G]);
        let mut list = DrawList::new(640, 480);
        draw_keyboard(&scene, &SPRITE, &mut list);

        let g = key_center(Vec2::new(-0.75, -0.5)) - Vec2::splat(KEY_SIZE / 2.0);
        let fill = list.commands().iter().find_map(|c| match c {
            DrawCommand::Rect { min, size, color } if *min == g && size.x == KEY_SIZE => {
                Some(*color)
            }
            _ => None,
        });
        assert_eq!(fill, Some(key_highlight(29, 30)));
    }

    #[test]
    fn test_debug_text_reports_last_key() {
        let mut scene = keyboard();
        assert_eq!(actor_debug_text(&scene), "Speed: (0.00, 0.00)");
        scene.actor.tick(&[Key::Digit1]);
        let text = actor_debug_text(&scene);
        assert!(text.ends_with("\nKey: 1, Pos: (-5.5, -2.5)"), "{text}");
    }

    #[test]
    fn test_sprite_rotates_about_its_centre() {
        let mut scene = keyboard();
        scene.actor.facing = 0.3;
        let mut list = DrawList::new(640, 480);
        draw_keyboard(&scene, &SPRITE, &mut list);

        let transform = list
            .commands()
            .iter()
            .find_map(|c| match c {
                DrawCommand::Image { transform, .. } => Some(*transform),
                _ => None,
            })
            .unwrap();
        let centre = transform.transform_point2(Vec2::new(15.0, 15.0));
        assert!((centre - Vec2::new(320.0, 240.0)).length() < 1e-4);
    }

    #[test]
    fn test_tile_frame_has_hud() {
        let scene = TileScene::default();
        let assets = TileAssets {
            texture: TextureId(1),
            texture_size: (256, 256),
        };
        let mut list = DrawList::new(640, 480);
        draw_tiles(&scene, &assets, &mut list);

        let texts: Vec<&str> = list.texts().collect();
        assert_eq!(texts, vec!["Rotation Rate: 1.00", TILE_CONTROLS]);
        assert_eq!(list.len(), 35 + 2);
    }

    #[test]
    fn test_mismatched_assets_draw_nothing() {
        let state = SceneState::Tiles(TileScene::default());
        let mut list = DrawList::new(640, 480);
        draw_scene(&state, &SceneAssets::Keyboard(SPRITE), &mut list);
        assert!(list.is_empty());
    }
}
