//! Collision payloads delivered to component hooks.
//!
//! The physics pass builds one [`Collision`] per owner and contact transition
//! and fans it out to every component of that owner, through
//! `collision_started`, `collision_persisted` or `collision_ended`.

use crate::entity::{ComponentId, EntityId};

/// What a component learns about a contact of its entity.
///
/// # Fields
/// - `other` - The entity on the other side of the contact
/// - `collider` - The receiving entity's collider involved
/// - `other_collider` - The other entity's collider involved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collision {
    pub other: EntityId,
    pub collider: ComponentId,
    pub other_collider: ComponentId,
}

/// Transition of a contact pair in one detection pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollisionPhase {
    Started,
    Persisted,
    Ended,
}

impl CollisionPhase {
    /// Phase implied by "overlapping now" and "contact already recorded".
    /// `None` for a separated pair without contact.
    pub fn from_state(overlapping: bool, had_contact: bool) -> Option<Self> {
        match (overlapping, had_contact) {
            (true, false) => Some(CollisionPhase::Started),
            (true, true) => Some(CollisionPhase::Persisted),
            (false, true) => Some(CollisionPhase::Ended),
            (false, false) => None,
        }
    }
}
