//! Bridges the [`TileMap`] on the same entity into the hotspot pass.
//!
//! Registering a `TileMapCollider` is what makes hotspot colliders sample a
//! tile map at all; the map must also be the registered solid map.

use log::warn;

use crate::components::tilemap::TileMap;
use crate::components::{Component, Context};
use crate::entity::ComponentId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TileMapCollider {
    tile_map: Option<ComponentId>,
}

impl TileMapCollider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sibling tile map resolved at initialize.
    pub fn tile_map(&self) -> Option<ComponentId> {
        self.tile_map
    }
}

impl Component for TileMapCollider {
    fn initialize(&mut self, cx: &mut Context<'_>) {
        self.tile_map = cx.first::<TileMap>();
        if self.tile_map.is_none() {
            warn!(
                "TileMapCollider {} on entity {} has no sibling TileMap",
                cx.component, cx.entity
            );
        }
        let id = cx.component;
        cx.physics().add_tile_map_collider(id);
    }

    fn clean_up(&mut self, cx: &mut Context<'_>) {
        let id = cx.component;
        cx.physics().remove_tile_map_collider(id);
        self.tile_map = None;
    }
}
