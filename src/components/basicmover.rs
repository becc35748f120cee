//! Eight-way keyboard movement.
//!
//! [`BasicMover`] moves its owner's transform directly from the arrow keys,
//! with no body or collision response involved. Diagonal movement is
//! normalized so every direction travels at `speed`.

use nalgebra::Vector2;

use crate::components::{Component, Context};
use crate::resources::input::Key;

pub const DEFAULT_MOVER_SPEED: f32 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BasicMover {
    /// Meters per second.
    pub speed: f32,
}

impl Default for BasicMover {
    fn default() -> Self {
        Self::new(DEFAULT_MOVER_SPEED)
    }
}

impl BasicMover {
    pub fn new(speed: f32) -> Self {
        Self { speed }
    }
}

impl Component for BasicMover {
    fn logic_update(&mut self, cx: &mut Context<'_>, dt: f32) {
        if !cx.is_active() {
            return;
        }

        let input = cx.input();
        let direction = Vector2::new(
            input.axis(Key::Left, Key::Right),
            input.axis(Key::Down, Key::Up),
        );
        let Some(direction) = direction.try_normalize(f32::EPSILON) else {
            return;
        };

        let step = direction * (self.speed * dt);
        if let Some(tx) = cx.transform_mut() {
            tx.translate(step);
        }
    }
}
