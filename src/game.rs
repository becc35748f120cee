//! Demo scenes.
//!
//! Two small scenes exercise the engine end to end:
//!
//! - `platformer`: a tile-map level with a hotspot-driven player. The level
//!   comes from a tile map JSON file when one is given, otherwise from a
//!   built-in layout.
//! - `rain`: seeded random circles fall on a tinted floor and vanish on impact.
//!
//! [`scene_by_name`] maps the names accepted on the command line to scenes.

use std::rc::Rc;

use log::{info, warn};

use crate::components::body::Body;
use crate::components::collider::Collider;
use crate::components::collisiontint::CollisionTint;
use crate::components::graphical::{Color, Graphical};
use crate::components::hotspotcollider::HotspotCollider;
use crate::components::platformercontroller::PlatformerController;
use crate::components::tilemap::{Tile, TileMap};
use crate::components::tilemapcollider::TileMapCollider;
use crate::components::transform::Transform;
use crate::components::{Component, Context};
use crate::entity::EntityId;
use crate::error::EngineError;
use crate::events::collision::Collision;
use crate::resources::tilemapstore::TilemapData;
use crate::world::{Scene, World};

/// Built-in level, top row first. `1` is ground, `2` is grass decoration.
const LEVEL: [[usize; 16]; 8] = [
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 2, 2, 0, 0, 0, 0, 0, 0, 0, 0, 2, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

pub const PLAYER_START: (f32, f32) = (2.0, 3.0);

pub struct PlatformerScene {
    level: Option<TilemapData>,
}

impl Default for PlatformerScene {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformerScene {
    /// Scene with the built-in level.
    pub fn new() -> Self {
        Self { level: None }
    }

    /// Scene whose level layers come from a tile map file.
    pub fn from_tilemap(level: TilemapData) -> Self {
        Self { level: Some(level) }
    }

    fn spawn_builtin_level(world: &mut World) {
        let legend = [
            None,
            Some(Tile::solid(Color::GRAY)),
            Some(Tile::decoration(Color::GREEN)),
        ];
        let mut map = TileMap::new().solid().with_layer(-1);
        map.read_array(&LEVEL, &legend);

        let level = world.spawn("level");
        world.add(level, Transform::default());
        world.add(level, map);
        world.add(level, TileMapCollider::new());
    }

    fn spawn_tilemap_level(world: &mut World, data: &TilemapData) {
        for layer in &data.layers {
            let entity = world.spawn(layer.name.clone());
            world.add(entity, Transform::default());
            world.add(entity, data.build_layer(layer).with_layer(-1));
            if layer.solid {
                world.add(entity, TileMapCollider::new());
            }
        }
        if !data.layers.iter().any(|l| l.solid) {
            warn!("Tile map has no solid layer; the player will fall forever");
        }
    }
}

/// Spawn the player of the platformer scene.
pub fn spawn_player(world: &mut World, x: f32, y: f32) -> EntityId {
    let player = world.spawn("player");
    world.add(player, Transform::new(x, y));
    world.add(player, Body::new());
    world.add(player, HotspotCollider::new(0.9, 1.0));
    world.add(player, Collider::aabb(0.9, 1.0).dynamic());
    world.add(player, Graphical::rect(0.9, 1.0, Color::BLUE).with_layer(1));
    world.add(player, PlatformerController::new());
    player
}

impl Scene for PlatformerScene {
    fn name(&self) -> &str {
        "platformer"
    }

    fn load(&self, world: &mut World) -> Result<(), EngineError> {
        match &self.level {
            Some(data) => Self::spawn_tilemap_level(world, data),
            None => Self::spawn_builtin_level(world),
        }
        spawn_player(world, PLAYER_START.0, PLAYER_START.1);
        Ok(())
    }
}

/// Destroys its entity on the first contact.
#[derive(Debug, Default, Clone, Copy)]
pub struct Raindrop;

impl Component for Raindrop {
    fn collision_started(&mut self, cx: &mut Context<'_>, _collision: &Collision) {
        cx.world.destroy(cx.entity);
    }
}

pub struct RainScene {
    pub seed: u64,
    pub drops: usize,
}

impl RainScene {
    pub fn new(seed: u64, drops: usize) -> Self {
        Self { seed, drops }
    }
}

impl Scene for RainScene {
    fn name(&self) -> &str {
        "rain"
    }

    fn load(&self, world: &mut World) -> Result<(), EngineError> {
        let floor = world.spawn("floor");
        world.add(floor, Transform::new(0.0, -6.0));
        world.add(floor, Collider::aabb(20.0, 1.0));
        world.add(floor, Graphical::rect(20.0, 1.0, Color::GRAY));
        world.add(floor, CollisionTint::default());

        let mut rng = fastrand::Rng::with_seed(self.seed);
        for i in 0..self.drops {
            let drop = world.spawn(format!("drop{}", i));
            let x = rng.f32() * 18.0 - 9.0;
            let y = rng.f32() * 10.0;
            let radius = 0.1 + rng.f32() * 0.2;
            world.add(drop, Transform::new(x, y));
            world.add(drop, Body::new().with_gravity_scale(0.5 + rng.f32()));
            world.add(drop, Collider::circle(radius).dynamic());
            world.add(drop, Graphical::circle(radius, Color::rgb(80, 120, 255)));
            world.add(drop, Raindrop);
        }
        info!("Rain scene: {} drops, seed {}", self.drops, self.seed);
        Ok(())
    }
}

/// Look up a demo scene by name.
pub fn scene_by_name(
    name: &str,
    level: Option<TilemapData>,
    seed: u64,
) -> Result<Rc<dyn Scene>, EngineError> {
    match name {
        "platformer" => Ok(Rc::new(match level {
            Some(data) => PlatformerScene::from_tilemap(data),
            None => PlatformerScene::new(),
        })),
        "rain" => Ok(Rc::new(RainScene::new(seed, 64))),
        other => Err(EngineError::UnknownScene(other.to_string())),
    }
}
