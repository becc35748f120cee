//! Render hand-off.
//!
//! The engine does not draw anything itself. Each frame it flattens the
//! graphicals and tile maps of the world into a list of [`RenderItem`]s, lowest
//! layer first, and passes it to whatever [`Renderer`] the host installed.
//! Positions stay in world meters (Y up). The configured pixels-per-meter
//! factor travels with every call; [`RenderItem::to_pixels`] applies it and
//! flips Y for screen-space backends.

use log::warn;
use nalgebra::Vector2;

use crate::components::graphical::{Color, Graphical, GraphicalShape};
use crate::components::tilemap::TileMap;
use crate::entity::ComponentId;
use crate::resources::debugdraw::DebugShape;
use crate::world::World;

/// One drawable primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderItem {
    pub source: ComponentId,
    pub layer: i32,
    /// Center in world meters.
    pub position: Vector2<f32>,
    pub rotation: f32,
    pub scale: Vector2<f32>,
    pub shape: GraphicalShape,
    pub color: Color,
    pub image: Option<String>,
}

impl RenderItem {
    /// Screen position in pixels, Y down.
    pub fn to_pixels(&self, meter: f32) -> Vector2<f32> {
        meters_to_pixels(self.position, meter)
    }
}

/// World meters (Y up) to screen pixels (Y down).
pub fn meters_to_pixels(position: Vector2<f32>, meter: f32) -> Vector2<f32> {
    Vector2::new(position.x * meter, -position.y * meter)
}

/// Backend that turns render items into pixels.
///
/// `meter` is the number of pixels per world meter for this frame.
pub trait Renderer {
    fn render(&mut self, items: &[RenderItem], meter: f32);

    /// Debug overlay, drawn after the frame. Only called while debug drawing
    /// is enabled.
    fn debug_draw(&mut self, shapes: &[DebugShape], meter: f32) {
        let _ = (shapes, meter);
    }
}

/// Headless backend. Remembers what the last frame would have drawn.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames: u64,
    pub meter: f32,
    pub last_items: Vec<RenderItem>,
    /// Pixel positions of `last_items`, same order.
    pub last_pixels: Vec<Vector2<f32>>,
    pub last_debug: Vec<DebugShape>,
}

impl NullRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for NullRenderer {
    fn render(&mut self, items: &[RenderItem], meter: f32) {
        self.frames += 1;
        self.meter = meter;
        self.last_pixels = items.iter().map(|item| item.to_pixels(meter)).collect();
        self.last_items = items.to_vec();
    }

    fn debug_draw(&mut self, shapes: &[DebugShape], meter: f32) {
        self.meter = meter;
        self.last_debug = shapes.to_vec();
    }
}

/// Collect everything visible this frame, sorted by layer.
///
/// Inactive graphicals and tile maps are skipped, as are components whose
/// owner has no transform. Items on the same layer keep registration order,
/// and tile maps come after graphicals of their layer.
pub fn collect_render_items(world: &World) -> Vec<RenderItem> {
    let mut items = Vec::with_capacity(world.graphics.len());

    for (layer, id) in world.graphics.iter() {
        if !world.is_active(id) {
            continue;
        }
        let (Some(graphical), Some(owner)) = (world.component::<Graphical>(id), world.owner(id))
        else {
            continue;
        };
        let Some(tx) = world.transform(owner) else {
            warn!("Graphical {} on entity {} has no Transform", id, owner);
            continue;
        };
        items.push(RenderItem {
            source: id,
            layer,
            position: tx.position + graphical.offset,
            rotation: tx.rotation,
            scale: tx.scale,
            shape: graphical.shape,
            color: graphical.fill,
            image: graphical.image.clone(),
        });
    }

    for id in world.query::<TileMap>() {
        if !world.is_active(id) {
            continue;
        }
        let (Some(map), Some(owner)) = (world.component::<TileMap>(id), world.owner(id)) else {
            continue;
        };
        let Some(position) = world.transform(owner).map(|t| t.position) else {
            warn!("TileMap {} on entity {} has no Transform", id, owner);
            continue;
        };
        items.extend(map.tiles().map(|tile| RenderItem {
            source: id,
            layer: map.layer,
            position: map.tile_world_center(position, tile.x, tile.y),
            rotation: 0.0,
            scale: Vector2::new(1.0, 1.0),
            shape: GraphicalShape::Rect {
                width: 1.0,
                height: 1.0,
            },
            color: tile.color,
            image: tile.image.clone(),
        }));
    }

    // stable: equal layers keep insertion order
    items.sort_by_key(|item| item.layer);
    items
}

/// Collect the frame and hand it to `renderer` at `meter` pixels per meter.
pub fn render(world: &World, renderer: &mut dyn Renderer, meter: f32) {
    let items = collect_render_items(world);
    renderer.render(&items, meter);
}
