//! Event payloads passed to component hooks.
//!
//! Submodules:
//! - [`collision`] – contact transitions reported by the physics pass
pub mod collision;
