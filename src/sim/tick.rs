//! Fixed timestep simulation tick
//!
//! Advances a scene by exactly one frame from a snapshot of the keyboard.

use std::collections::BTreeSet;

use super::keymap::{Key, vector_for};
use super::state::{KeyboardScene, SceneState, TileScene};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Keys currently held down
    pub held: BTreeSet<Key>,
    /// Keys that went down since the previous tick, in press order
    pub just_pressed: Vec<Key>,
}

impl TickInput {
    /// Input where `keys` were just pressed and are still held
    pub fn pressed(keys: &[Key]) -> Self {
        Self {
            held: keys.iter().copied().collect(),
            just_pressed: keys.to_vec(),
        }
    }

    /// Input where `keys` are held from an earlier tick
    pub fn holding(keys: &[Key]) -> Self {
        Self {
            held: keys.iter().copied().collect(),
            just_pressed: Vec::new(),
        }
    }

    #[inline]
    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }
}

/// Advance the active scene by one fixed timestep
pub fn tick(state: &mut SceneState, input: &TickInput) {
    match state {
        SceneState::Tiles(scene) => tick_tiles(scene, input),
        SceneState::Keyboard(scene) => tick_keyboard(scene, input),
    }
}

/// Held arrows nudge the rotation intensity; all deltas land before the clamp
pub fn tick_tiles(scene: &mut TileScene, input: &TickInput) {
    let mut delta = 0.0;
    if input.is_held(Key::ArrowRight) {
        delta += scene.steps.small;
    }
    if input.is_held(Key::ArrowLeft) {
        delta -= scene.steps.small;
    }
    if input.is_held(Key::ArrowUp) {
        delta += scene.steps.large;
    }
    if input.is_held(Key::ArrowDown) {
        delta -= scene.steps.large;
    }

    if delta != 0.0 {
        scene.intensity.adjust(delta);
    }
}

/// Highlight timers first, then the actor, as the draw pass expects
pub fn tick_keyboard(scene: &mut KeyboardScene, input: &TickInput) {
    for key in &input.just_pressed {
        if let Some(offset) = vector_for(*key) {
            log::debug!(
                "key {} pressed, impulse ({:.2}, {:.2})",
                key.label(),
                offset.x,
                offset.y
            );
        }
    }

    scene.effects.tick(&input.just_pressed);
    scene.actor.tick(&input.just_pressed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::IntensitySteps;
    use crate::sim::actor::ActorTuning;
    use glam::Vec2;

    fn keyboard_scene() -> KeyboardScene {
        KeyboardScene::new(
            Vec2::new(305.0, 225.0),
            Vec2::splat(30.0),
            ActorTuning::default(),
            30,
        )
    }

    #[test]
    fn test_tiles_large_increase_clamps_at_three() {
        let mut scene = TileScene::new(1.0, IntensitySteps::default());
        let input = TickInput::holding(&[Key::ArrowUp]);
        for _ in 0..400 {
            tick_tiles(&mut scene, &input);
        }
        assert_eq!(scene.intensity.value(), 3.0);
    }

    #[test]
    fn test_tiles_small_decrease() {
        let mut scene = TileScene::new(1.0, IntensitySteps::default());
        tick_tiles(&mut scene, &TickInput::holding(&[Key::ArrowLeft]));
        assert!((scene.intensity.value() - 0.999).abs() < 1e-6);
    }

    #[test]
    fn test_tiles_opposite_keys_cancel() {
        let mut scene = TileScene::new(1.5, IntensitySteps::default());
        tick_tiles(&mut scene, &TickInput::holding(&[Key::ArrowUp, Key::ArrowDown]));
        assert_eq!(scene.intensity.value(), 1.5);
    }

    #[test]
    fn test_tiles_ignore_letters() {
        let mut scene = TileScene::default();
        tick_tiles(&mut scene, &TickInput::pressed(&[Key::A, Key::Digit3]));
        assert_eq!(scene.intensity.value(), 1.0);
    }

    #[test]
    fn test_keyboard_press_moves_actor_and_lights_key() {
        let mut state = SceneState::Keyboard(keyboard_scene());
        tick(&mut state, &TickInput::pressed(&[Key::L]));

        let SceneState::Keyboard(scene) = &state else {
            panic!("scene changed kind");
        };
        assert!(scene.actor.vel.x > 0.0);
        assert_eq!(scene.actor.last_key, Some(Key::L));
        assert_eq!(scene.effects.remaining(Key::L), Some(29));
    }

    #[test]
    fn test_keyboard_held_key_does_not_repeat() {
        let mut scene = keyboard_scene();
        tick_keyboard(&mut scene, &TickInput::pressed(&[Key::K]));
        let after_press = scene.actor.vel;

        tick_keyboard(&mut scene, &TickInput::holding(&[Key::K]));
        // Only damping acted on the second tick
        assert!(scene.actor.vel.length() < after_press.length());
    }

    #[test]
    fn test_determinism() {
        // Two scenes fed the same inputs stay identical
        let mut a = SceneState::Keyboard(keyboard_scene());
        let mut b = SceneState::Keyboard(keyboard_scene());

        let inputs = [
            TickInput::pressed(&[Key::Q]),
            TickInput::default(),
            TickInput::pressed(&[Key::M, Key::Digit0]),
            TickInput::holding(&[Key::M]),
            TickInput::default(),
        ];

        for input in &inputs {
            tick(&mut a, input);
            tick(&mut b, input);
        }

        let (SceneState::Keyboard(a), SceneState::Keyboard(b)) = (&a, &b) else {
            panic!("scene changed kind");
        };
        assert_eq!(a.actor.pos, b.actor.pos);
        assert_eq!(a.actor.vel, b.actor.vel);
        assert_eq!(a.actor.facing.to_bits(), b.actor.facing.to_bits());
    }
}
