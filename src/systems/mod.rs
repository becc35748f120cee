//! Engine systems.
//!
//! Free functions that advance the world by one phase. Each takes the world
//! (and whatever else it needs) explicitly; there is no scheduler.
//!
//! Submodules overview
//! - [`narrowphase`] – placed shapes and the pairwise overlap dispatch table
//! - [`physics`] – body integration, contact tracking and hotspot snapping
//! - [`render`] – flatten graphicals and tiles into render items for a backend
//! - [`time`] – pick the frame dt and advance [`crate::resources::worldtime::WorldTime`]

pub mod narrowphase;
pub mod physics;
pub mod render;
pub mod time;
