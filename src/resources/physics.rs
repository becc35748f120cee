//! Physics registries.
//!
//! [`PhysicsSystem`] is the world-owned resource holding the flat id lists the
//! physics pass iterates every frame: static and dynamic colliders, bodies,
//! hotspot colliders and tile-map colliders, plus the single active solid tile
//! map and the global gravity vector.
//!
//! Components register themselves from their `initialize` hook and
//! deregister from `clean_up`. Every list is unordered; removal swaps the
//! last element into the freed slot.

use log::{debug, warn};
use nalgebra::Vector2;

use crate::components::tilemap::{Tile, TileMap};
use crate::entity::ComponentId;
use crate::world::World;

/// Default vertical gravity in m/s² (Y up).
pub const DEFAULT_GRAVITY_Y: f32 = -9.81;

#[derive(Debug, Clone)]
pub struct PhysicsSystem {
    static_colliders: Vec<ComponentId>,
    dynamic_colliders: Vec<ComponentId>,
    bodies: Vec<ComponentId>,
    hotspot_colliders: Vec<ComponentId>,
    tile_map_colliders: Vec<ComponentId>,
    solid_tile_map: Option<ComponentId>,
    gravity: Vector2<f32>,
}

impl Default for PhysicsSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// Remove `id` by swapping the last element into its slot.
fn swap_remove_id(list: &mut Vec<ComponentId>, id: ComponentId) -> bool {
    match list.iter().position(|c| *c == id) {
        Some(index) => {
            list.swap_remove(index);
            true
        }
        None => false,
    }
}

/// Append unless already present. Double registration is a bug in the caller.
fn push_unique(list: &mut Vec<ComponentId>, id: ComponentId, what: &str) -> bool {
    if list.contains(&id) {
        warn!("{} {} registered twice, ignoring", what, id);
        return false;
    }
    list.push(id);
    true
}

impl PhysicsSystem {
    pub fn new() -> Self {
        Self {
            static_colliders: Vec::new(),
            dynamic_colliders: Vec::new(),
            bodies: Vec::new(),
            hotspot_colliders: Vec::new(),
            tile_map_colliders: Vec::new(),
            solid_tile_map: None,
            gravity: Vector2::new(0.0, DEFAULT_GRAVITY_Y),
        }
    }

    pub fn gravity(&self) -> Vector2<f32> {
        self.gravity
    }

    pub fn set_gravity(&mut self, gravity: Vector2<f32>) {
        self.gravity = gravity;
    }

    // ---------------------------------------------------------------- colliders

    pub fn static_colliders(&self) -> &[ComponentId] {
        &self.static_colliders
    }

    pub fn dynamic_colliders(&self) -> &[ComponentId] {
        &self.dynamic_colliders
    }

    fn collider_list(&mut self, dynamic: bool) -> &mut Vec<ComponentId> {
        if dynamic {
            &mut self.dynamic_colliders
        } else {
            &mut self.static_colliders
        }
    }

    /// Insert into the dynamic or static list according to `dynamic`.
    pub fn add_collider(&mut self, id: ComponentId, dynamic: bool) {
        push_unique(self.collider_list(dynamic), id, "Collider");
    }

    pub fn remove_collider(&mut self, id: ComponentId, dynamic: bool) -> bool {
        let removed = swap_remove_id(self.collider_list(dynamic), id);
        if !removed {
            debug!("Collider {} was not in the {} list", id, class_name(dynamic));
        }
        removed
    }

    /// Move a registered collider from one list to the other. Both steps
    /// happen inside this call, so no caller observes it in neither or both.
    pub fn reclassify(&mut self, id: ComponentId, from_dynamic: bool, to_dynamic: bool) {
        if from_dynamic == to_dynamic {
            return;
        }
        if !swap_remove_id(self.collider_list(from_dynamic), id) {
            warn!(
                "Reclassifying collider {} that was not in the {} list",
                id,
                class_name(from_dynamic)
            );
        }
        push_unique(self.collider_list(to_dynamic), id, "Collider");
    }

    /// Whether `id` is in either collider list.
    pub fn has_collider(&self, id: ComponentId) -> bool {
        self.static_colliders.contains(&id) || self.dynamic_colliders.contains(&id)
    }

    // ---------------------------------------------------------------- bodies

    pub fn bodies(&self) -> &[ComponentId] {
        &self.bodies
    }

    pub fn add_body(&mut self, id: ComponentId) {
        push_unique(&mut self.bodies, id, "Body");
    }

    pub fn remove_body(&mut self, id: ComponentId) -> bool {
        swap_remove_id(&mut self.bodies, id)
    }

    // ---------------------------------------------------------------- hotspots

    pub fn hotspot_colliders(&self) -> &[ComponentId] {
        &self.hotspot_colliders
    }

    pub fn add_hotspot_collider(&mut self, id: ComponentId) {
        push_unique(&mut self.hotspot_colliders, id, "HotspotCollider");
    }

    pub fn remove_hotspot_collider(&mut self, id: ComponentId) -> bool {
        swap_remove_id(&mut self.hotspot_colliders, id)
    }

    // ---------------------------------------------------------------- tile maps

    pub fn tile_map_colliders(&self) -> &[ComponentId] {
        &self.tile_map_colliders
    }

    pub fn add_tile_map_collider(&mut self, id: ComponentId) {
        push_unique(&mut self.tile_map_colliders, id, "TileMapCollider");
    }

    pub fn remove_tile_map_collider(&mut self, id: ComponentId) -> bool {
        swap_remove_id(&mut self.tile_map_colliders, id)
    }

    pub fn solid_tile_map(&self) -> Option<ComponentId> {
        self.solid_tile_map
    }

    /// Make `tile_map` the map consulted by [`solid_tile_at`](Self::solid_tile_at).
    /// Replaces any previous one.
    pub fn set_solid_tile_map(&mut self, tile_map: ComponentId) {
        match self.solid_tile_map {
            Some(previous) if previous != tile_map => {
                debug!("Solid tile map {} replaced by {}", previous, tile_map);
            }
            _ => {}
        }
        self.solid_tile_map = Some(tile_map);
    }

    /// Clear the solid map, but only if it is still `tile_map`.
    pub fn clear_solid_tile_map(&mut self, tile_map: ComponentId) {
        if self.solid_tile_map == Some(tile_map) {
            self.solid_tile_map = None;
        }
    }

    /// Solid tile of the active solid map covering `position`, if any.
    ///
    /// Misses (no active map, map checked out, owner without transform, no
    /// tile there, tile not solid) all come back as `None`.
    pub fn solid_tile_at(world: &World, position: Vector2<f32>) -> Option<&Tile> {
        let map_id = world.physics.solid_tile_map?;
        let owner = world.owner(map_id)?;
        let origin = world.transform(owner)?.position;
        let map = world.component::<TileMap>(map_id)?;
        map.tile_at_world(origin, position).filter(|t| t.solid)
    }
}

fn class_name(dynamic: bool) -> &'static str {
    if dynamic { "dynamic" } else { "static" }
}
