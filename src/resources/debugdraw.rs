//! Debug shape queue.
//!
//! While enabled, components push outlines, points and lines here from their
//! `debug_draw` hook. The renderer drains the queue once per frame with
//! [`DebugDraw::take`]. When disabled every push is dropped, so callers never
//! need to check the flag themselves.

use nalgebra::Vector2;

use crate::components::graphical::Color;

/// One queued debug primitive, in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DebugShape {
    Rect {
        center: Vector2<f32>,
        width: f32,
        height: f32,
        color: Color,
    },
    Circle {
        center: Vector2<f32>,
        radius: f32,
        color: Color,
    },
    Point {
        position: Vector2<f32>,
        color: Color,
    },
    Line {
        from: Vector2<f32>,
        to: Vector2<f32>,
        color: Color,
    },
}

#[derive(Debug, Clone, Default)]
pub struct DebugDraw {
    enabled: bool,
    shapes: Vec<DebugShape>,
}

impl DebugDraw {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            shapes: Vec::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Switch drawing on or off. Switching off drops anything queued.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.shapes.clear();
        }
    }

    pub fn toggle(&mut self) -> bool {
        self.set_enabled(!self.enabled);
        self.enabled
    }

    fn push(&mut self, shape: DebugShape) {
        if self.enabled {
            self.shapes.push(shape);
        }
    }

    pub fn rect(&mut self, center: Vector2<f32>, width: f32, height: f32, color: Color) {
        self.push(DebugShape::Rect {
            center,
            width,
            height,
            color,
        });
    }

    pub fn circle(&mut self, center: Vector2<f32>, radius: f32, color: Color) {
        self.push(DebugShape::Circle {
            center,
            radius,
            color,
        });
    }

    pub fn point(&mut self, position: Vector2<f32>, color: Color) {
        self.push(DebugShape::Point { position, color });
    }

    pub fn line(&mut self, from: Vector2<f32>, to: Vector2<f32>, color: Color) {
        self.push(DebugShape::Line { from, to, color });
    }

    pub fn shapes(&self) -> &[DebugShape] {
        &self.shapes
    }

    /// Drain the queue.
    pub fn take(&mut self) -> Vec<DebugShape> {
        std::mem::take(&mut self.shapes)
    }
}
