//! Sparse tile grid positioned by its entity's transform.
//!
//! Storage is column-major: the outer key is the tile column (x index), the
//! inner key the row (y index). A missing key means "no tile", which is
//! passable.
//!
//! Tile `(i, j)` is centred on `origin + (i, j)` where
//! `origin = owner position + offset`. A tile owns its left and top edges:
//! columns map with `floor(x - origin.x + 0.5)`, rows with
//! `ceil(y - origin.y - 0.5)`.
//!
//! At most one map is *the* solid map. A map flagged solid registers itself
//! with the physics registry when initialized, replacing any earlier one;
//! hotspot checks and [`PhysicsSystem::solid_tile_at`] only ever consult the
//! registered map.
//!
//! [`PhysicsSystem::solid_tile_at`]: crate::resources::physics::PhysicsSystem::solid_tile_at

use log::warn;
use nalgebra::Vector2;
use rustc_hash::FxHashMap;

use crate::components::graphical::Color;
use crate::components::{Component, Context};
use crate::entity::ComponentId;
use crate::resources::physics::PhysicsSystem;

/// One cell of a [`TileMap`].
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub solid: bool,
    pub color: Color,
    /// Optional image key for the external renderer.
    pub image: Option<String>,
    /// Column index, set when the tile is added to a map.
    pub x: i32,
    /// Row index, set when the tile is added to a map.
    pub y: i32,
}

impl Tile {
    pub fn new(solid: bool, color: Color) -> Self {
        Self {
            solid,
            color,
            image: None,
            x: 0,
            y: 0,
        }
    }

    pub fn solid(color: Color) -> Self {
        Self::new(true, color)
    }

    pub fn decoration(color: Color) -> Self {
        Self::new(false, color)
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct TileMap {
    /// Added to the owner's position to get the centre of tile (0, 0).
    pub offset: Vector2<f32>,
    /// Render layer handed to the external renderer.
    pub layer: i32,
    solid: bool,
    initialized: bool,
    columns: FxHashMap<i32, FxHashMap<i32, Tile>>,
}

impl TileMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the map as the solid map consulted by hotspot checks.
    pub fn solid(mut self) -> Self {
        self.solid = true;
        self
    }

    pub fn with_offset(mut self, x: f32, y: f32) -> Self {
        self.offset = Vector2::new(x, y);
        self
    }

    pub fn with_layer(mut self, layer: i32) -> Self {
        self.layer = layer;
        self
    }

    pub fn is_solid(&self) -> bool {
        self.solid
    }

    /// Toggle solidity. An initialized map registers or deregisters itself
    /// as the solid map right away, so setting `true` also takes the
    /// registration back from another map; an uninitialized one only records
    /// the flag. Use [`World::set_tile_map_solid`](crate::world::World::set_tile_map_solid)
    /// to go through the world.
    pub fn set_solid(&mut self, physics: &mut PhysicsSystem, id: ComponentId, solid: bool) {
        if self.initialized {
            if solid {
                physics.set_solid_tile_map(id);
            } else {
                physics.clear_solid_tile_map(id);
            }
        }
        self.solid = solid;
    }

    /// Place `tile` at `(x, y)`, returning whatever was there.
    pub fn add(&mut self, x: i32, y: i32, mut tile: Tile) -> Option<Tile> {
        tile.x = x;
        tile.y = y;
        self.columns.entry(x).or_default().insert(y, tile)
    }

    pub fn remove(&mut self, x: i32, y: i32) -> Option<Tile> {
        let column = self.columns.get_mut(&x)?;
        let removed = column.remove(&y);
        if column.is_empty() {
            self.columns.remove(&x);
        }
        removed
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&Tile> {
        self.columns.get(&x)?.get(&y)
    }

    pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut Tile> {
        self.columns.get_mut(&x)?.get_mut(&y)
    }

    /// Fill the map from rows of legend indices.
    ///
    /// Row 0 is the top row, so row `r` of `n` lands on `y = n - 1 - r`. An
    /// index outside the legend or pointing to `None` leaves the cell empty.
    pub fn read_array<R: AsRef<[usize]>>(&mut self, rows: &[R], legend: &[Option<Tile>]) {
        let height = rows.len() as i32;
        for (row, cells) in rows.iter().enumerate() {
            let y = height - 1 - row as i32;
            for (x, index) in cells.as_ref().iter().enumerate() {
                match legend.get(*index) {
                    Some(Some(tile)) => {
                        self.add(x as i32, y, tile.clone());
                    }
                    Some(None) => {}
                    None => warn!("Tile legend has no entry {} (row {}, col {})", index, row, x),
                }
            }
        }
    }

    /// Every tile in unspecified order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.columns.values().flat_map(|column| column.values())
    }

    pub fn len(&self) -> usize {
        self.columns.values().map(|column| column.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Centre of tile `(0, 0)` for an owner at `position`.
    pub fn origin(&self, position: Vector2<f32>) -> Vector2<f32> {
        position + self.offset
    }

    /// Index of the tile covering `world`, for an owner at `position`.
    ///
    /// Columns own their left edge, rows own their top edge: the floor rule is
    /// applied along +x and along -y. A body snapped flush onto the ground
    /// therefore keeps sampling the ground tile on the next frame.
    pub fn tile_index_from_world(&self, position: Vector2<f32>, world: Vector2<f32>) -> (i32, i32) {
        let local = world - self.origin(position);
        ((local.x + 0.5).floor() as i32, (local.y - 0.5).ceil() as i32)
    }

    /// Tile covering `world`, for an owner at `position`.
    pub fn tile_at_world(&self, position: Vector2<f32>, world: Vector2<f32>) -> Option<&Tile> {
        let (x, y) = self.tile_index_from_world(position, world);
        self.get(x, y)
    }

    /// World centre of tile `(x, y)`.
    pub fn tile_world_center(&self, position: Vector2<f32>, x: i32, y: i32) -> Vector2<f32> {
        self.origin(position) + Vector2::new(x as f32, y as f32)
    }

    pub fn tile_world_left(&self, position: Vector2<f32>, x: i32) -> f32 {
        self.origin(position).x + x as f32 - 0.5
    }

    pub fn tile_world_right(&self, position: Vector2<f32>, x: i32) -> f32 {
        self.origin(position).x + x as f32 + 0.5
    }

    pub fn tile_world_bottom(&self, position: Vector2<f32>, y: i32) -> f32 {
        self.origin(position).y + y as f32 - 0.5
    }

    pub fn tile_world_top(&self, position: Vector2<f32>, y: i32) -> f32 {
        self.origin(position).y + y as f32 + 0.5
    }
}

impl Component for TileMap {
    fn initialize(&mut self, cx: &mut Context<'_>) {
        self.initialized = true;
        if self.solid {
            let id = cx.component;
            cx.physics().set_solid_tile_map(id);
        }
    }

    fn clean_up(&mut self, cx: &mut Context<'_>) {
        if self.initialized && self.solid {
            let id = cx.component;
            cx.physics().clear_solid_tile_map(id);
        }
        self.initialized = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== STORAGE TESTS ====================

    #[test]
    fn add_get_remove() {
        let mut map = TileMap::new();
        assert!(map.add(2, 1, Tile::solid(Color::GRAY)).is_none());
        assert!(map.add(2, 1, Tile::decoration(Color::RED)).is_some());
        let tile = map.get(2, 1).unwrap();
        assert!(!tile.solid);
        assert_eq!((tile.x, tile.y), (2, 1));
        assert_eq!(map.len(), 1);

        assert!(map.remove(2, 1).is_some());
        assert!(map.get(2, 1).is_none());
        assert!(map.is_empty());
        assert!(map.remove(2, 1).is_none());
    }

    #[test]
    fn negative_indices_are_valid_keys() {
        let mut map = TileMap::new();
        map.add(-3, -7, Tile::solid(Color::GRAY));
        assert!(map.get(-3, -7).is_some());
        assert!(map.get(3, 7).is_none());
    }

    #[test]
    fn read_array_puts_first_row_on_top() {
        let mut map = TileMap::new();
        let legend = [None, Some(Tile::solid(Color::GRAY))];
        map.read_array(&[[1usize, 0, 0], [0, 0, 0], [1, 1, 1]], &legend);

        assert_eq!(map.len(), 4);
        assert!(map.get(0, 2).unwrap().solid);
        assert!(map.get(0, 0).is_some());
        assert!(map.get(2, 0).is_some());
        assert!(map.get(2, 2).is_none());
    }

    #[test]
    fn read_array_skips_unknown_legend_index() {
        let mut map = TileMap::new();
        map.read_array(&[vec![5usize, 1]], &[None, Some(Tile::solid(Color::GRAY))]);
        assert_eq!(map.len(), 1);
        assert!(map.get(1, 0).is_some());
    }

    // ==================== WORLD MAPPING TESTS ====================

    #[test]
    fn world_to_index_owns_left_and_top_edges() {
        let map = TileMap::new();
        let at = Vector2::zeros();
        assert_eq!(map.tile_index_from_world(at, Vector2::new(0.0, 0.0)), (0, 0));
        assert_eq!(map.tile_index_from_world(at, Vector2::new(-0.5, 0.5)), (0, 0));
        assert_eq!(map.tile_index_from_world(at, Vector2::new(0.49, -0.5)), (0, -1));
        assert_eq!(map.tile_index_from_world(at, Vector2::new(0.5, -0.51)), (1, -1));
        assert_eq!(map.tile_index_from_world(at, Vector2::new(-1.2, 2.4)), (-1, 2));
    }

    #[test]
    fn index_respects_transform_and_offset() {
        let map = TileMap::new().with_offset(0.5, 0.0);
        let at = Vector2::new(10.0, -2.0);
        assert_eq!(map.tile_index_from_world(at, Vector2::new(10.5, -2.0)), (0, 0));
        assert_eq!(map.tile_index_from_world(at, Vector2::new(12.6, 0.0)), (2, 2));
    }

    #[test]
    fn tile_edges() {
        let map = TileMap::new().with_offset(1.0, 1.0);
        let at = Vector2::new(1.0, 0.0);
        assert_eq!(map.tile_world_left(at, 2), 3.5);
        assert_eq!(map.tile_world_right(at, 2), 4.5);
        assert_eq!(map.tile_world_bottom(at, 1), 1.5);
        assert_eq!(map.tile_world_top(at, 1), 2.5);
        assert_eq!(map.tile_world_center(at, 2, 1), Vector2::new(4.0, 2.0));
    }

    #[test]
    fn tile_at_world_reads_storage() {
        let mut map = TileMap::new();
        map.add(2, 1, Tile::solid(Color::GRAY));
        assert!(map.tile_at_world(Vector2::zeros(), Vector2::new(2.2, 1.4)).is_some());
        // top edge belongs to the tile, bottom edge to the row below
        assert!(map.tile_at_world(Vector2::zeros(), Vector2::new(2.2, 1.5)).is_some());
        assert!(map.tile_at_world(Vector2::zeros(), Vector2::new(2.2, 1.51)).is_none());
        assert!(map.tile_at_world(Vector2::zeros(), Vector2::new(2.2, 0.5)).is_none());
    }
}
