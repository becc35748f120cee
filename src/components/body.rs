//! Kinematic body: velocity integration and per-body gravity scale.
//!
//! The [`Body`] component stores the velocity of its entity. Once per frame
//! the physics update integrates every registered body with semi-implicit
//! Euler:
//!
//! ```text
//! position += velocity * dt          // old velocity
//! velocity += gravity * scale * dt   // advanced afterwards
//! ```
//!
//! The order matters for platformer feel: a body dropped from rest does not
//! move on its first frame, it only picks up speed.

use nalgebra::Vector2;

use crate::components::{Component, Context};

/// Velocity carrier registered with the [`PhysicsSystem`](crate::resources::physics::PhysicsSystem).
///
/// # Fields
/// - `velocity` - Current velocity in meters per second
/// - `angular_velocity` - Carried for gameplay code, not used by any resolution logic
/// - `gravity_scale` - Multiplier applied to the global gravity vector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub velocity: Vector2<f32>,
    pub angular_velocity: f32,
    pub gravity_scale: f32,
}

impl Default for Body {
    fn default() -> Self {
        Self::new()
    }
}

impl Body {
    /// Create a body at rest with full gravity.
    pub fn new() -> Self {
        Self {
            velocity: Vector2::zeros(),
            angular_velocity: 0.0,
            gravity_scale: 1.0,
        }
    }

    /// Create a body with an initial velocity.
    pub fn with_velocity(mut self, x: f32, y: f32) -> Self {
        self.velocity = Vector2::new(x, y);
        self
    }

    /// Set how strongly global gravity pulls on this body (0 disables it).
    pub fn with_gravity_scale(mut self, scale: f32) -> Self {
        self.gravity_scale = scale;
        self
    }

    pub fn velocity(&self) -> Vector2<f32> {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vector2<f32>) {
        self.velocity = velocity;
    }

    /// Add a delta to the current velocity.
    pub fn add_velocity(&mut self, dx: f32, dy: f32) {
        self.velocity.x += dx;
        self.velocity.y += dy;
    }

    /// One semi-implicit Euler step: move with the old velocity, then
    /// accelerate.
    pub fn integrate(&mut self, position: &mut Vector2<f32>, gravity: Vector2<f32>, dt: f32) {
        *position += self.velocity * dt;
        self.velocity += gravity * (self.gravity_scale * dt);
    }
}

impl Component for Body {
    fn initialize(&mut self, cx: &mut Context<'_>) {
        let id = cx.component;
        cx.physics().add_body(id);
    }

    fn clean_up(&mut self, cx: &mut Context<'_>) {
        let id = cx.component;
        cx.physics().remove_body(id);
    }
}
