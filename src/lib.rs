//! Cogworks engine library.
//!
//! Entities are bags of components kept in an id arena by the [`world::World`].
//! The [`engine::Engine`] drives the frame: logic, physics, late update,
//! clean-up and the render hand-off. Exposed as a library for integration
//! tests and for hosts that bring their own renderer.

pub mod components;
pub mod engine;
pub mod entity;
pub mod error;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
pub mod world;
