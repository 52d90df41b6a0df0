//! Keyboard-driven actor: impulses, inertia and wall bounces
//!
//! Units are pixels and ticks; there is no dt, one call to [`Actor::tick`]
//! advances exactly one frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::keymap::{Key, vector_for};
use crate::consts::*;

/// Physics constants for the actor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActorTuning {
    /// Fraction of velocity kept per tick (0-1, lower = more friction)
    pub damping: f32,
    /// Scale applied to a key's layout offset on press
    pub impulse_gain: f32,
    /// Velocity components below this snap to zero
    pub deadzone: f32,
    /// Velocity factor on a wall hit
    pub restitution: f32,
}

impl Default for ActorTuning {
    fn default() -> Self {
        Self {
            damping: ACTOR_DAMPING,
            impulse_gain: ACTOR_IMPULSE_GAIN,
            deadzone: ACTOR_DEADZONE,
            restitution: ACTOR_RESTITUTION,
        }
    }
}

/// The on-screen sprite's kinematic state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    /// Top-left corner of the sprite
    pub pos: Vec2,
    pub vel: Vec2,
    /// Facing (radians); kept while the actor is at rest
    pub facing: f32,
    /// Sprite extents
    pub size: Vec2,
    /// Largest allowed position on each axis
    pub max_pos: Vec2,
    pub tuning: ActorTuning,
    /// Most recent key that applied an impulse
    pub last_key: Option<Key>,
}

impl Actor {
    /// Create an actor confined to a `viewport`-sized screen
    pub fn new(pos: Vec2, size: Vec2, viewport: Vec2, tuning: ActorTuning) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            facing: 0.0,
            size,
            max_pos: (viewport - size).max(Vec2::ZERO),
            tuning,
            last_key: None,
        }
    }

    /// Apply the impulse for `key`. Returns false for keys with no layout position.
    pub fn apply_key(&mut self, key: Key) -> bool {
        match vector_for(key) {
            Some(offset) => {
                self.vel += offset * self.tuning.impulse_gain;
                self.last_key = Some(key);
                true
            }
            None => false,
        }
    }

    /// Advance one tick with the keys pressed since the last tick
    pub fn tick(&mut self, just_pressed: &[Key]) {
        for &key in just_pressed {
            self.apply_key(key);
        }

        // Inertia
        self.vel *= self.tuning.damping;

        // Snap residual drift to rest
        if self.vel.x.abs() < self.tuning.deadzone {
            self.vel.x = 0.0;
        }
        if self.vel.y.abs() < self.tuning.deadzone {
            self.vel.y = 0.0;
        }

        self.pos += self.vel;

        if self.vel != Vec2::ZERO {
            self.facing = self.vel.y.atan2(self.vel.x);
        }

        self.resolve_bounds();
    }

    /// Clamp into the screen, bouncing the velocity component that hit
    fn resolve_bounds(&mut self) {
        let restitution = self.tuning.restitution;

        if self.pos.x < 0.0 {
            self.pos.x = 0.0;
            self.vel.x *= restitution;
        }
        if self.pos.x > self.max_pos.x {
            self.pos.x = self.max_pos.x;
            self.vel.x *= restitution;
        }
        if self.pos.y < 0.0 {
            self.pos.y = 0.0;
            self.vel.y *= restitution;
        }
        if self.pos.y > self.max_pos.y {
            self.pos.y = self.max_pos.y;
            self.vel.y *= restitution;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SCREEN: Vec2 = Vec2::new(SCREEN_WIDTH as f32, SCREEN_HEIGHT as f32);

    fn actor_at(pos: Vec2, vel: Vec2, tuning: ActorTuning) -> Actor {
        let mut actor = Actor::new(pos, Vec2::splat(30.0), SCREEN, tuning);
        actor.vel = vel;
        actor
    }

    #[test]
    fn test_impulse_lookup() {
        let mut actor = actor_at(Vec2::new(300.0, 200.0), Vec2::new(1.0, 1.0), ActorTuning::default());
        assert!(actor.apply_key(Key::Digit1));
        // (-5.5, -2.5) * 1.2 added to (1, 1)
        assert!((actor.vel.x - (1.0 - 6.6)).abs() < 1e-5);
        assert!((actor.vel.y - (1.0 - 3.0)).abs() < 1e-5);
        assert_eq!(actor.last_key, Some(Key::Digit1));
    }

    #[test]
    fn test_impulse_applied_before_damping() {
        let mut actor = actor_at(Vec2::new(300.0, 200.0), Vec2::ZERO, ActorTuning::default());
        actor.tick(&[Key::Digit1]);
        assert!((actor.vel.x - (-6.6 * 0.98)).abs() < 1e-4);
        assert!((actor.vel.y - (-3.0 * 0.98)).abs() < 1e-4);
    }

    #[test]
    fn test_unmapped_key_is_noop() {
        let mut actor = actor_at(Vec2::new(300.0, 200.0), Vec2::new(2.0, -3.0), ActorTuning::default());
        assert!(!actor.apply_key(Key::ArrowUp));
        assert_eq!(actor.vel, Vec2::new(2.0, -3.0));
        assert_eq!(actor.last_key, None);
    }

    #[test]
    fn test_damping_converges_to_rest() {
        let mut actor = Actor::new(
            Vec2::new(5000.0, 5000.0),
            Vec2::splat(30.0),
            Vec2::splat(100_000.0),
            ActorTuning::default(),
        );
        actor.vel = Vec2::new(10.0, 10.0);

        let mut ticks = 0;
        while actor.vel != Vec2::ZERO {
            actor.tick(&[]);
            ticks += 1;
            assert!(ticks <= 700, "still moving after 700 ticks: {:?}", actor.vel);
        }

        // Stays at rest
        for _ in 0..100 {
            actor.tick(&[]);
            assert_eq!(actor.vel, Vec2::ZERO);
        }
    }

    #[test]
    fn test_wall_bounce_negates_and_halves() {
        let tuning = ActorTuning {
            damping: 1.0,
            ..Default::default()
        };
        let mut actor = actor_at(Vec2::new(0.0, 200.0), Vec2::new(-5.0, 0.0), tuning);
        actor.tick(&[]);
        assert_eq!(actor.pos.x, 0.0);
        assert_eq!(actor.vel.x, 2.5);
        assert_eq!(actor.pos.y, 200.0);
    }

    #[test]
    fn test_wall_bounce_with_default_damping() {
        let mut actor = actor_at(Vec2::new(0.0, 200.0), Vec2::new(-5.0, 0.0), ActorTuning::default());
        actor.tick(&[]);
        assert_eq!(actor.pos.x, 0.0);
        assert!((actor.vel.x - 2.45).abs() < 1e-5);
    }

    #[test]
    fn test_far_wall_uses_sprite_extent() {
        let mut actor = actor_at(Vec2::new(605.0, 445.0), Vec2::new(10.0, 10.0), ActorTuning::default());
        actor.tick(&[]);
        assert_eq!(actor.pos, Vec2::new(610.0, 450.0));
        assert!(actor.vel.x < 0.0 && actor.vel.y < 0.0);
    }

    #[test]
    fn test_facing_follows_velocity() {
        let mut actor = actor_at(Vec2::new(300.0, 200.0), Vec2::new(0.0, 5.0), ActorTuning::default());
        actor.tick(&[]);
        assert!((actor.facing - std::f32::consts::FRAC_PI_2).abs() < 1e-6);

        // Facing survives coming to rest
        actor.vel = Vec2::ZERO;
        actor.tick(&[]);
        assert!((actor.facing - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_last_key_is_last_mapped_press() {
        let mut actor = actor_at(Vec2::new(300.0, 200.0), Vec2::ZERO, ActorTuning::default());
        actor.tick(&[Key::Q, Key::P, Key::ArrowLeft]);
        assert_eq!(actor.last_key, Some(Key::P));
    }

    proptest! {
        #[test]
        fn prop_position_stays_on_screen(presses in proptest::collection::vec(0usize..36, 0..200)) {
            let mut actor = Actor::new(
                Vec2::from(ACTOR_START),
                Vec2::splat(30.0),
                SCREEN,
                ActorTuning::default(),
            );
            for index in presses {
                let (key, _) = crate::sim::keymap::KEY_TABLE[index];
                actor.tick(&[key]);
                prop_assert!(actor.pos.x >= 0.0 && actor.pos.x <= actor.max_pos.x);
                prop_assert!(actor.pos.y >= 0.0 && actor.pos.y <= actor.max_pos.y);
            }
        }
    }
}
