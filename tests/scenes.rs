//! End-to-end scene tests: tick a scene, draw it into a `DrawList`, inspect the frame.

use glam::Vec2;

use tile_drift::consts::{ACTOR_START, KEY_EFFECT_TICKS, SCREEN_HEIGHT, SCREEN_WIDTH};
use tile_drift::renderer::scenes::{KEYBOARD_INSTRUCTIONS, TILE_CONTROLS};
use tile_drift::renderer::{
    DrawCommand, DrawList, KeyboardAssets, SceneAssets, TextureId, TileAssets, draw_scene,
};
use tile_drift::sim::{
    ActorTuning, Key, KeyboardScene, SceneState, TickInput, TileScene, rotation_for, tick,
};

const TILE_ASSETS: SceneAssets = SceneAssets::Tiles(TileAssets {
    texture: TextureId(1),
    texture_size: (256, 256),
});

const KEYBOARD_ASSETS: SceneAssets = SceneAssets::Keyboard(KeyboardAssets {
    sprite: TextureId(1),
    sprite_size: (30, 30),
});

fn frame(state: &SceneState, assets: &SceneAssets) -> DrawList {
    let mut list = DrawList::new(SCREEN_WIDTH, SCREEN_HEIGHT);
    draw_scene(state, assets, &mut list);
    list
}

fn keyboard_state() -> SceneState {
    SceneState::Keyboard(KeyboardScene::new(
        Vec2::from(ACTOR_START),
        Vec2::splat(30.0),
        ActorTuning::default(),
        KEY_EFFECT_TICKS,
    ))
}

#[test]
fn tiles_hud_tracks_held_arrow() {
    let mut state = SceneState::Tiles(TileScene::default());
    let hold_up = TickInput::holding(&[Key::ArrowUp]);
    for _ in 0..50 {
        tick(&mut state, &hold_up);
    }

    let list = frame(&state, &TILE_ASSETS);
    let texts: Vec<&str> = list.texts().collect();
    assert_eq!(texts, vec!["Rotation Rate: 1.50", TILE_CONTROLS]);
}

#[test]
fn tiles_frame_is_stable_between_ticks_without_input() {
    let mut state = SceneState::Tiles(TileScene::default());
    let before = frame(&state, &TILE_ASSETS);
    tick(&mut state, &TickInput::default());
    let after = frame(&state, &TILE_ASSETS);
    assert_eq!(before.commands(), after.commands());
}

#[test]
fn tiles_zero_intensity_draws_unrotated_grid() {
    let mut state = SceneState::Tiles(TileScene::new(0.0, Default::default()));
    tick(&mut state, &TickInput::default());
    let list = frame(&state, &TILE_ASSETS);

    for cmd in list.commands() {
        if let DrawCommand::Image { transform, .. } = cmd {
            assert_eq!(transform.matrix2, glam::Mat2::IDENTITY);
        }
    }
    assert_eq!(rotation_for(-1, -1, 0.0), 0.0);
}

#[test]
fn tiles_intensity_bottoms_out_at_zero() {
    let mut state = SceneState::Tiles(TileScene::default());
    let hold_down = TickInput::holding(&[Key::ArrowDown]);
    for _ in 0..200 {
        tick(&mut state, &hold_down);
    }
    let list = frame(&state, &TILE_ASSETS);
    assert_eq!(list.texts().next(), Some("Rotation Rate: 0.00"));
}

#[test]
fn keyboard_press_moves_sprite_and_lights_key() {
    let mut state = keyboard_state();
    tick(&mut state, &TickInput::pressed(&[Key::Digit5]));
    for _ in 0..4 {
        tick(&mut state, &TickInput::holding(&[Key::Digit5]));
    }

    let SceneState::Keyboard(scene) = &state else {
        panic!("expected keyboard scene");
    };
    // 5 pushes up and to the left
    assert!(scene.actor.pos.x < ACTOR_START[0]);
    assert!(scene.actor.pos.y < ACTOR_START[1]);
    assert_eq!(scene.effects.remaining(Key::Digit5), Some(KEY_EFFECT_TICKS - 5));

    let list = frame(&state, &KEYBOARD_ASSETS);
    let texts: Vec<&str> = list.texts().collect();
    assert!(
        texts.iter().any(|t| t.starts_with("Speed: (-") && t.contains("\nKey: 5, Pos: (-1.5, -2.5)")),
        "{texts:?}"
    );
    assert_eq!(texts.last(), Some(&KEYBOARD_INSTRUCTIONS));
}

#[test]
fn keyboard_highlight_expires() {
    let mut state = keyboard_state();
    tick(&mut state, &TickInput::pressed(&[Key::M]));
    for _ in 0..KEY_EFFECT_TICKS {
        tick(&mut state, &TickInput::default());
    }
    let SceneState::Keyboard(scene) = &state else {
        panic!("expected keyboard scene");
    };
    assert!(scene.effects.is_empty());
}

#[test]
fn keyboard_actor_settles_on_screen() {
    let mut state = keyboard_state();
    let presses = [Key::Digit1, Key::Z, Key::P, Key::Digit0, Key::A];
    for key in presses {
        tick(&mut state, &TickInput::pressed(&[key]));
    }
    for _ in 0..1000 {
        tick(&mut state, &TickInput::default());
    }

    let SceneState::Keyboard(scene) = &state else {
        panic!("expected keyboard scene");
    };
    let actor = &scene.actor;
    assert_eq!(actor.vel, Vec2::ZERO);
    assert!(actor.pos.x >= 0.0 && actor.pos.x <= SCREEN_WIDTH as f32 - 30.0);
    assert!(actor.pos.y >= 0.0 && actor.pos.y <= SCREEN_HEIGHT as f32 - 30.0);

    let list = frame(&state, &KEYBOARD_ASSETS);
    assert!(list.texts().any(|t| t.starts_with("Speed: (0.00, 0.00)")));
}
