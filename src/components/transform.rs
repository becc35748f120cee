//! Position, rotation and scale of an entity.
//!
//! Every entity that takes part in physics or rendering owns exactly one
//! [`Transform`]. The world caches its id on attach so that lookups are O(1).
//! Any component of the same entity may write to it; by convention only
//! gameplay code, [`Body`](super::body::Body) integration and hotspot
//! snapping do.

use nalgebra::Vector2;

use crate::components::Component;

/// World-space placement in meters (Y up, radians counter-clockwise).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector2<f32>,
    pub rotation: f32,
    pub scale: Vector2<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl Transform {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            position: Vector2::new(x, y),
            rotation: 0.0,
            scale: Vector2::new(1.0, 1.0),
        }
    }

    pub fn from_position(position: Vector2<f32>) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, x: f32, y: f32) -> Self {
        self.scale = Vector2::new(x, y);
        self
    }

    pub fn x(&self) -> f32 {
        self.position.x
    }

    pub fn y(&self) -> f32 {
        self.position.y
    }

    pub fn translate(&mut self, delta: Vector2<f32>) {
        self.position += delta;
    }

    pub fn add_x(&mut self, dx: f32) {
        self.position.x += dx;
    }

    pub fn add_y(&mut self, dy: f32) {
        self.position.y += dy;
    }
}

impl Component for Transform {}
