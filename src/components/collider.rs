//! Collider component: testable 2D geometry for the collision pass.
//!
//! A [`Collider`] is either an axis-aligned box or a circle, placed at its
//! owner's transform plus a local offset. Colliders are classified dynamic or
//! static: static colliders are never tested against each other, dynamic ones
//! are tested against everything.
//!
//! Each collider keeps one [`Contact`] per collider it currently touches. The
//! physics pass maintains the lists in matched pairs, so `a` lists `b` exactly
//! when `b` lists `a`.

use log::warn;
use nalgebra::Vector2;
use smallvec::SmallVec;

use crate::components::graphical::Color;
use crate::components::{Component, Context};
use crate::entity::{ComponentId, EntityId};
use crate::resources::physics::PhysicsSystem;
use crate::systems::narrowphase::{self, Aabb, Circle, PlacedShape, ShapeKind};

const OUTLINE_COLOR: Color = Color::rgb(0, 250, 255);
const CONTACT_COLOR: Color = Color::rgb(250, 20, 50);

/// Geometry of a collider in local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderShape {
    Aabb { half_width: f32, half_height: f32 },
    Circle { radius: f32 },
}

impl ColliderShape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            ColliderShape::Aabb { .. } => ShapeKind::Aabb,
            ColliderShape::Circle { .. } => ShapeKind::Circle,
        }
    }
}

/// Record that this collider currently touches another one.
///
/// Refers to the other side by id; ids are never reused so a stale contact
/// can only ever resolve to "not found".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub other_collider: ComponentId,
    pub other_entity: EntityId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Collider {
    pub shape: ColliderShape,
    /// Applied to the owner's position before any test.
    pub offset: Vector2<f32>,
    dynamic: bool,
    registered: bool,
    contacts: SmallVec<[Contact; 4]>,
}

impl Collider {
    /// Box collider with full width and height.
    pub fn aabb(width: f32, height: f32) -> Self {
        Self::from_shape(ColliderShape::Aabb {
            half_width: width / 2.0,
            half_height: height / 2.0,
        })
    }

    pub fn circle(radius: f32) -> Self {
        Self::from_shape(ColliderShape::Circle { radius })
    }

    pub fn from_shape(shape: ColliderShape) -> Self {
        Self {
            shape,
            offset: Vector2::zeros(),
            dynamic: false,
            registered: false,
            contacts: SmallVec::new(),
        }
    }

    pub fn with_offset(mut self, x: f32, y: f32) -> Self {
        self.offset = Vector2::new(x, y);
        self
    }

    /// Mark as dynamic before the first registration.
    pub fn dynamic(mut self) -> Self {
        self.dynamic = true;
        self
    }

    pub fn is_dynamic(&self) -> bool {
        self.dynamic
    }

    /// True between `initialize` and `clean_up`.
    pub fn is_registered(&self) -> bool {
        self.registered
    }

    /// Change the classification. A registered collider is moved between the
    /// static and dynamic lists in one step; an unregistered one only records
    /// the flag for its first registration.
    pub fn set_dynamic(&mut self, physics: &mut PhysicsSystem, id: ComponentId, dynamic: bool) {
        if self.registered && dynamic != self.dynamic {
            physics.reclassify(id, self.dynamic, dynamic);
        }
        self.dynamic = dynamic;
    }

    /// World-space geometry for an owner at `position`.
    pub fn placed(&self, position: Vector2<f32>) -> PlacedShape {
        let center = position + self.offset;
        match self.shape {
            ColliderShape::Aabb {
                half_width,
                half_height,
            } => PlacedShape::Aabb(Aabb::from_center(center, half_width, half_height)),
            ColliderShape::Circle { radius } => PlacedShape::Circle(Circle { center, radius }),
        }
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn add_contact(&mut self, contact: Contact) {
        self.contacts.push(contact);
    }

    pub fn contact_exists_with(&self, other: ComponentId) -> bool {
        self.contacts.iter().any(|c| c.other_collider == other)
    }

    /// Remove the contact with `other`. Returns whether one was found.
    pub fn prune_contact_with(&mut self, other: ComponentId) -> bool {
        let Some(index) = self.contacts.iter().position(|c| c.other_collider == other) else {
            return false;
        };
        self.contacts.swap_remove(index);
        true
    }
}

impl Component for Collider {
    fn initialize(&mut self, cx: &mut Context<'_>) {
        let id = cx.component;
        cx.physics().add_collider(id, self.dynamic);
        self.registered = true;
    }

    fn debug_draw(&mut self, cx: &mut Context<'_>) {
        let Some(position) = cx.position() else {
            return;
        };
        let placed = self.placed(position);
        match placed {
            PlacedShape::Aabb(b) => {
                cx.debug()
                    .rect(b.center(), b.width(), b.height(), OUTLINE_COLOR);
            }
            PlacedShape::Circle(c) => {
                cx.debug().circle(c.center, c.radius, OUTLINE_COLOR);
            }
        }
        for contact in self.contacts.clone() {
            if let Some(other) = narrowphase::placed_shape(cx.world, contact.other_collider) {
                cx.debug()
                    .line(placed.center(), other.center(), CONTACT_COLOR);
            }
        }
    }

    fn clean_up(&mut self, cx: &mut Context<'_>) {
        let id = cx.component;
        cx.physics().remove_collider(id, self.dynamic);
        self.registered = false;

        // Partners would otherwise keep a contact nobody will ever end.
        for contact in self.contacts.drain(..) {
            match cx.world.component_mut::<Collider>(contact.other_collider) {
                Some(other) => {
                    other.prune_contact_with(id);
                }
                None => warn!(
                    "Collider {} cleaned up while its partner {} is unavailable",
                    id, contact.other_collider
                ),
            }
        }
    }
}
