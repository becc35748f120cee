//! Long-lived engine state outside the entity arena.
//!
//! Most of these live as public fields of the [`World`](crate::world::World)
//! so component hooks can reach them through their context; the rest are
//! owned by the [`Engine`](crate::engine::Engine).
//!
//! Overview
//! - `debugdraw` – enable flag and per-frame queue of debug primitives
//! - `gameconfig` – INI-backed engine configuration
//! - `graphics` – layer-bucketed registry of graphical components
//! - `input` – per-frame keyboard state of keys relevant to the game
//! - `physics` – collider, body, hotspot and tile-map registries plus gravity
//! - `tilemapstore` – tile map files and loaded maps by key
//! - `worldtime` – simulation time and delta
pub mod debugdraw;
pub mod gameconfig;
pub mod graphics;
pub mod input;
pub mod physics;
pub mod tilemapstore;
pub mod worldtime;
