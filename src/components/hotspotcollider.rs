//! Eight tile probes around an entity, used for platformer snapping.
//!
//! A [`HotspotCollider`] samples the tile grid at fixed local points around
//! its owner. Each side (right, top, left, bottom) owns two probes, inset from
//! the corners by `corner_thickness`:
//!
//! ```text
//!    --3-------2--
//!    4     .     0
//!    |     .     |
//!    | . . + . . |
//!    |     .     |
//!    5     .     1
//!    --6-------7--
//! ```
//!
//! With `w = width/2 - padding`, `h = height/2 - padding`,
//! `x = w - corner_thickness` and `y = h - corner_thickness` the offsets are
//! `0 (w, y)`, `1 (w, -y)`, `2 (x, h)`, `3 (-x, h)`, `4 (-w, y)`, `5 (-w, -y)`,
//! `6 (-x, -h)`, `7 (x, -h)` (Y up). The physics pass fills [`triggered`]
//! every frame; gameplay reads it, e.g. "feet on the ground" is
//! `is_side_triggered(HotspotSide::Bottom)`.
//!
//! [`triggered`]: HotspotCollider::triggered

use nalgebra::Vector2;

use crate::components::graphical::Color;
use crate::components::tilemap::TileMap;
use crate::components::{Component, Context};

pub const DEFAULT_CORNER_THICKNESS: f32 = 0.25;

const PROBE_COLOR: Color = Color::WHITE;
const TRIGGERED_COLOR: Color = Color::rgb(255, 60, 60);

/// Side of the protected box. Sides are checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HotspotSide {
    Right,
    Top,
    Left,
    Bottom,
}

impl HotspotSide {
    pub const ALL: [HotspotSide; 4] = [
        HotspotSide::Right,
        HotspotSide::Top,
        HotspotSide::Left,
        HotspotSide::Bottom,
    ];

    /// Probe indices of this side, in tie-break order.
    pub fn indices(self) -> [usize; 2] {
        match self {
            HotspotSide::Right => [0, 1],
            HotspotSide::Top => [2, 3],
            HotspotSide::Left => [4, 5],
            HotspotSide::Bottom => [6, 7],
        }
    }
}

/// Result of sampling one side against a tile map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SideProbe {
    pub side: HotspotSide,
    /// Solidity found under each probe of the side, in [`HotspotSide::indices`] order.
    pub triggered: [bool; 2],
    /// Facing edge of the first solid tile found, if any.
    pub tile_edge: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HotspotCollider {
    width: f32,
    height: f32,
    corner_thickness: f32,
    padding: f32,
    hotspots: [Vector2<f32>; 8],
    triggered: [bool; 8],
    registered: bool,
}

impl HotspotCollider {
    /// Probes around a `width` x `height` box.
    pub fn new(width: f32, height: f32) -> Self {
        let mut collider = Self {
            width,
            height,
            corner_thickness: DEFAULT_CORNER_THICKNESS,
            padding: 0.0,
            hotspots: [Vector2::zeros(); 8],
            triggered: [false; 8],
            registered: false,
        };
        collider.layout();
        collider
    }

    pub fn with_corner_thickness(mut self, corner_thickness: f32) -> Self {
        self.corner_thickness = corner_thickness;
        self.layout();
        self
    }

    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self.layout();
        self
    }

    pub fn set_size(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.layout();
    }

    fn layout(&mut self) {
        let w = self.half_width();
        let h = self.half_height();
        let x = w - self.corner_thickness;
        let y = h - self.corner_thickness;
        self.hotspots = [
            Vector2::new(w, y),
            Vector2::new(w, -y),
            Vector2::new(x, h),
            Vector2::new(-x, h),
            Vector2::new(-w, y),
            Vector2::new(-w, -y),
            Vector2::new(-x, -h),
            Vector2::new(x, -h),
        ];
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn corner_thickness(&self) -> f32 {
        self.corner_thickness
    }

    pub fn padding(&self) -> f32 {
        self.padding
    }

    fn half_width(&self) -> f32 {
        self.width / 2.0 - self.padding
    }

    fn half_height(&self) -> f32 {
        self.height / 2.0 - self.padding
    }

    /// Local probe offsets.
    pub fn hotspots(&self) -> &[Vector2<f32>; 8] {
        &self.hotspots
    }

    /// Solidity recorded per probe by the last check.
    pub fn triggered(&self) -> &[bool; 8] {
        &self.triggered
    }

    pub fn is_triggered(&self, index: usize) -> bool {
        self.triggered.get(index).copied().unwrap_or(false)
    }

    /// Either probe of `side` found a solid tile.
    pub fn is_side_triggered(&self, side: HotspotSide) -> bool {
        side.indices().iter().any(|i| self.triggered[*i])
    }

    pub fn clear_triggered(&mut self) {
        self.triggered = [false; 8];
    }

    /// OR a side's probe result into the flags, so several maps can
    /// contribute in one frame.
    pub fn record(&mut self, probe: &SideProbe) {
        for (slot, hit) in probe.side.indices().into_iter().zip(probe.triggered) {
            self.triggered[slot] |= hit;
        }
    }

    pub fn world_left(&self, position: Vector2<f32>) -> f32 {
        position.x - self.half_width()
    }

    pub fn world_right(&self, position: Vector2<f32>) -> f32 {
        position.x + self.half_width()
    }

    pub fn world_top(&self, position: Vector2<f32>) -> f32 {
        position.y + self.half_height()
    }

    pub fn world_bottom(&self, position: Vector2<f32>) -> f32 {
        position.y - self.half_height()
    }

    /// Sample the probes of `side` for an owner at `position` against `map`,
    /// whose owner sits at `map_position`.
    pub fn probe(
        &self,
        side: HotspotSide,
        position: Vector2<f32>,
        map: &TileMap,
        map_position: Vector2<f32>,
    ) -> SideProbe {
        let mut triggered = [false; 2];
        let mut tile_edge = None;
        for (slot, index) in side.indices().into_iter().enumerate() {
            let world = position + self.hotspots[index];
            let Some(tile) = map.tile_at_world(map_position, world).filter(|t| t.solid) else {
                continue;
            };
            triggered[slot] = true;
            if tile_edge.is_none() {
                tile_edge = Some(match side {
                    HotspotSide::Right => map.tile_world_left(map_position, tile.x),
                    HotspotSide::Top => map.tile_world_bottom(map_position, tile.y),
                    HotspotSide::Left => map.tile_world_right(map_position, tile.x),
                    HotspotSide::Bottom => map.tile_world_top(map_position, tile.y),
                });
            }
        }
        SideProbe {
            side,
            triggered,
            tile_edge,
        }
    }

    /// Displacement along the side's axis that makes the box edge flush with
    /// `tile_edge`.
    pub fn snap_delta(&self, side: HotspotSide, position: Vector2<f32>, tile_edge: f32) -> f32 {
        match side {
            HotspotSide::Right => tile_edge - self.world_right(position),
            HotspotSide::Top => tile_edge - self.world_top(position),
            HotspotSide::Left => tile_edge - self.world_left(position),
            HotspotSide::Bottom => tile_edge - self.world_bottom(position),
        }
    }
}

impl Component for HotspotCollider {
    fn initialize(&mut self, cx: &mut Context<'_>) {
        let id = cx.component;
        cx.physics().add_hotspot_collider(id);
        self.registered = true;
    }

    fn debug_draw(&mut self, cx: &mut Context<'_>) {
        let Some(position) = cx.position() else {
            return;
        };
        for (offset, hit) in self.hotspots.iter().zip(self.triggered) {
            let color = if hit { TRIGGERED_COLOR } else { PROBE_COLOR };
            cx.debug().point(position + offset, color);
        }
    }

    fn clean_up(&mut self, cx: &mut Context<'_>) {
        if self.registered {
            let id = cx.component;
            cx.physics().remove_hotspot_collider(id);
            self.registered = false;
        }
    }
}
