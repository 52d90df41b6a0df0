//! Native window and frame loop
//!
//! Scene assets are decoded before the event loop starts so a missing file
//! ends the program before a window appears. The GPU is brought up in
//! `resumed`, after which every redraw runs the fixed-step simulation and
//! renders one frame.

use std::sync::Arc;
use std::time::Instant;

use ab_glyph::FontArc;
use anyhow::Context;
use glam::Vec2;
use image::RgbaImage;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

use super::input::{InputState, key_from_code};
use crate::assets::{self, LoadError};
use crate::consts::*;
use crate::renderer::{
    DrawList, GlyphAtlas, KeyboardAssets, RenderState, SceneAssets, TileAssets, draw_scene,
};
use crate::settings::{SceneKind, Settings};
use crate::sim::{KeyboardScene, SceneState, TileScene, tick};

/// Decoded image the active scene draws
pub enum SceneImage {
    Tile(RgbaImage),
    Sprite(RgbaImage),
}

/// Initial scene state plus its decoded image
pub struct PreparedScene {
    pub state: SceneState,
    pub image: SceneImage,
}

/// Load the active scene's image and build its starting state
pub fn prepare_scene(settings: &Settings) -> Result<PreparedScene, LoadError> {
    match settings.scene {
        SceneKind::Tiles => {
            let mut image = assets::load_image(&settings.asset_path(&settings.tile_texture))?;
            if settings.tile_alpha_fade {
                assets::apply_alpha_gradient(&mut image);
            }
            Ok(PreparedScene {
                state: SceneState::Tiles(TileScene::new(
                    settings.initial_intensity,
                    settings.intensity_steps,
                )),
                image: SceneImage::Tile(image),
            })
        }
        SceneKind::Keyboard => {
            let image = assets::load_image(&settings.asset_path(&settings.character_sprite))?;
            let sprite_size = Vec2::new(image.width() as f32, image.height() as f32);
            Ok(PreparedScene {
                state: SceneState::Keyboard(KeyboardScene::new(
                    Vec2::from(settings.actor_start),
                    sprite_size,
                    settings.actor,
                    settings.key_effect_ticks,
                )),
                image: SceneImage::Sprite(image),
            })
        }
    }
}

/// HUD font, or `None` with a warning; text is skipped without it
pub fn load_hud_font(settings: &Settings) -> Option<FontArc> {
    match assets::load_font(&settings.asset_path(&settings.hud_font)) {
        Ok(font) => Some(font),
        Err(e) => {
            log::warn!("HUD text disabled: {e}");
            None
        }
    }
}

struct App {
    settings: Settings,
    state: SceneState,
    image: SceneImage,
    font: Option<FontArc>,
    window: Option<Arc<Window>>,
    render_state: Option<RenderState>,
    assets: Option<SceneAssets>,
    input: InputState,
    accumulator: f32,
    last_frame: Instant,
    /// First fatal error, returned from `run`
    error: Option<anyhow::Error>,
}

impl App {
    fn new(settings: Settings, scene: PreparedScene, font: Option<FontArc>) -> Self {
        Self {
            settings,
            state: scene.state,
            image: scene.image,
            font,
            window: None,
            render_state: None,
            assets: None,
            input: InputState::new(),
            accumulator: 0.0,
            last_frame: Instant::now(),
            error: None,
        }
    }

    fn init_gpu(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.settings.scene.title())
            .with_inner_size(LogicalSize::new(
                self.settings.window_width,
                self.settings.window_height,
            ));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(window.clone())
            .context("failed to create surface")?;
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("no suitable GPU adapter")?;

        let info = adapter.get_info();
        log::info!("GPU adapter: {} ({:?})", info.name, info.backend);

        let size = window.inner_size();
        let mut render_state =
            pollster::block_on(RenderState::new(surface, &adapter, size.width, size.height))?;

        let assets = match &self.image {
            SceneImage::Tile(image) => SceneAssets::Tiles(TileAssets {
                texture: render_state.upload_image("tile-texture", image),
                texture_size: image.dimensions(),
            }),
            SceneImage::Sprite(image) => SceneAssets::Keyboard(KeyboardAssets {
                sprite: render_state.upload_image("character-sprite", image),
                sprite_size: image.dimensions(),
            }),
        };
        if let Some(font) = self.font.take() {
            render_state.set_glyphs(GlyphAtlas::new(font, self.settings.hud_font_px));
        }

        window.request_redraw();
        self.window = Some(window);
        self.render_state = Some(render_state);
        self.assets = Some(assets);
        self.last_frame = Instant::now();
        Ok(())
    }

    /// Run simulation ticks for the time since the last frame
    fn update(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32().min(0.1);
        self.last_frame = now;
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            // Presses are drained by the first tick
            let input = self.input.take_tick_input();
            tick(&mut self.state, &input);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        self.update();

        let (Some(render_state), Some(assets)) = (&mut self.render_state, &self.assets) else {
            return;
        };

        let mut frame = DrawList::new(SCREEN_WIDTH, SCREEN_HEIGHT);
        draw_scene(&self.state, assets, &mut frame);

        match render_state.render(&frame) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                render_state.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of GPU memory, exiting");
                self.error = Some(anyhow::anyhow!("GPU out of memory"));
                event_loop.exit();
            }
            Err(e) => log::warn!("Surface error: {e}"),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init_gpu(event_loop) {
            log::error!("GPU initialization failed: {e:#}");
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(render_state) = &mut self.render_state {
                    render_state.resize(size.width, size.height);
                }
            }
            WindowEvent::Focused(false) => self.input.clear(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        repeat,
                        ..
                    },
                ..
            } => {
                if let Some(key) = key_from_code(code) {
                    self.input
                        .handle_key(key, state == ElementState::Pressed, repeat);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Load assets, open the window and run until it is closed
pub fn run(settings: Settings) -> anyhow::Result<()> {
    let scene = prepare_scene(&settings)
        .with_context(|| format!("failed to load {} scene", settings.scene.as_str()))?;
    let font = load_hud_font(&settings);

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(settings, scene, font);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn temp_assets(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("tile-drift-{name}-{}", std::process::id()));
        std::fs::create_dir_all(dir.join("images")).unwrap();
        dir
    }

    #[test]
    fn test_missing_scene_asset_is_an_error() {
        let mut settings = Settings::for_scene(SceneKind::Tiles);
        settings.asset_root = "/nonexistent/tile-drift".into();
        assert!(matches!(
            prepare_scene(&settings),
            Err(LoadError::Io { .. })
        ));
    }

    #[test]
    fn test_missing_font_is_not_fatal() {
        let mut settings = Settings::default();
        settings.asset_root = "/nonexistent/tile-drift".into();
        assert!(load_hud_font(&settings).is_none());
    }

    #[test]
    fn test_keyboard_scene_uses_sprite_size() {
        let root = temp_assets("sprite");
        let sprite = RgbaImage::from_pixel(20, 40, Rgba([255, 0, 0, 255]));
        sprite.save(root.join("images/character.png")).unwrap();

        let mut settings = Settings::for_scene(SceneKind::Keyboard);
        settings.asset_root = root.clone();
        let scene = prepare_scene(&settings).unwrap();

        match (&scene.state, &scene.image) {
            (SceneState::Keyboard(kb), SceneImage::Sprite(image)) => {
                assert_eq!(kb.actor.size, Vec2::new(20.0, 40.0));
                assert_eq!(kb.actor.pos, Vec2::new(305.0, 225.0));
                assert_eq!(image.dimensions(), (20, 40));
            }
            _ => panic!("expected keyboard scene"),
        }
        std::fs::remove_dir_all(root).ok();
    }
}
