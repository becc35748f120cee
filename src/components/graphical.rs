//! Renderable shape component and the engine colour type.
//!
//! The engine does not draw anything itself. A [`Graphical`] describes what
//! the external renderer should draw for its entity: a shape, a fill colour,
//! a local offset and a layer. On initialize it registers with the world's
//! [`GraphicsRegistry`](crate::resources::graphics::GraphicsRegistry), which
//! [`collect_render_items`](crate::systems::render::collect_render_items)
//! walks once per frame.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::components::{Component, Context};

/// 8-bit RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const GRAY: Color = Color::rgb(128, 128, 128);
    pub const RED: Color = Color::rgb(230, 41, 55);
    pub const GREEN: Color = Color::rgb(0, 228, 48);
    pub const BLUE: Color = Color::rgb(0, 121, 241);
    pub const YELLOW: Color = Color::rgb(253, 249, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Multiply this colour with another one (component-wise).
    pub fn multiply(&self, other: Color) -> Color {
        Color::rgba(
            ((self.r as u16 * other.r as u16) / 255) as u8,
            ((self.g as u16 * other.g as u16) / 255) as u8,
            ((self.b as u16 * other.b as u16) / 255) as u8,
            ((self.a as u16 * other.a as u16) / 255) as u8,
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

/// Geometry to draw, in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GraphicalShape {
    Rect { width: f32, height: f32 },
    Circle { radius: f32 },
    Point,
}

/// Something the renderer should draw at its entity's transform.
///
/// # Fields
/// - `layer` - Sort key; lower layers are drawn first
/// - `offset` - Local offset from the owner's position
/// - `shape` - What to draw
/// - `fill` - Fill colour
/// - `image` - Optional image key; the backend resolves it and falls back to
///   `shape`/`fill` when it has no such image
#[derive(Debug, Clone, PartialEq)]
pub struct Graphical {
    pub layer: i32,
    pub offset: Vector2<f32>,
    pub shape: GraphicalShape,
    pub fill: Color,
    pub image: Option<String>,
    registered_layer: Option<i32>,
}

impl Graphical {
    pub fn new(shape: GraphicalShape, fill: Color) -> Self {
        Self {
            layer: 0,
            offset: Vector2::zeros(),
            shape,
            fill,
            image: None,
            registered_layer: None,
        }
    }

    pub fn rect(width: f32, height: f32, fill: Color) -> Self {
        Self::new(GraphicalShape::Rect { width, height }, fill)
    }

    pub fn circle(radius: f32, fill: Color) -> Self {
        Self::new(GraphicalShape::Circle { radius }, fill)
    }

    pub fn with_layer(mut self, layer: i32) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_offset(mut self, x: f32, y: f32) -> Self {
        self.offset = Vector2::new(x, y);
        self
    }

    pub fn with_image(mut self, key: impl Into<String>) -> Self {
        self.image = Some(key.into());
        self
    }

    /// Layer the registry filed this graphical under, if registered.
    pub fn registered_layer(&self) -> Option<i32> {
        self.registered_layer
    }
}

impl Component for Graphical {
    fn initialize(&mut self, cx: &mut Context<'_>) {
        let id = cx.component;
        cx.world.graphics.add(id, self.layer);
        self.registered_layer = Some(self.layer);
    }

    fn clean_up(&mut self, cx: &mut Context<'_>) {
        if let Some(layer) = self.registered_layer.take() {
            let id = cx.component;
            cx.world.graphics.remove(id, layer);
        }
    }
}
