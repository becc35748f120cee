//! Components and the contract every behavior implements.
//!
//! A component is a unit of per-entity data and behavior. The [`World`] owns
//! all of them in an arena keyed by [`ComponentId`]; entities only keep the
//! ids. Each frame the world fans its phases out to every component of every
//! entity, in attach order, through the hooks of the [`Component`] trait.
//!
//! Submodules overview:
//! - [`basicmover`] – eight-way keyboard movement, handy for tests and tools
//! - [`body`] – velocity integration and per-body gravity scale
//! - [`collider`] – AABB/circle collider with dynamic/static class and contacts
//! - [`collisiontint`] – swaps a sibling graphical's colour while touching
//! - [`graphical`] – renderable shape handed to the external renderer
//! - [`hotspotcollider`] – eight tile probes used for platformer snapping
//! - [`platformercontroller`] – run/jump controller driven by foot/head hotspots
//! - [`tilemap`] – sparse grid of tiles positioned by its entity's transform
//! - [`tilemapcollider`] – bridges a tile map into the hotspot pass
//! - [`transform`] – position, rotation and scale of an entity

pub mod basicmover;
pub mod body;
pub mod collider;
pub mod collisiontint;
pub mod graphical;
pub mod hotspotcollider;
pub mod platformercontroller;
pub mod tilemap;
pub mod tilemapcollider;
pub mod transform;

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

use nalgebra::Vector2;

use crate::components::transform::Transform;
use crate::entity::{ComponentId, EntityId};
use crate::events::collision::Collision;
use crate::resources::debugdraw::DebugDraw;
use crate::resources::input::InputState;
use crate::resources::physics::PhysicsSystem;
use crate::world::World;

/// Object-safe access to the concrete type behind a `dyn Component`.
///
/// Implemented for every `'static` type. Call it on `&dyn Component`, never on
/// a `Box<dyn Component>`, or the box itself gets downcast.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn type_name(&self) -> &'static str;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// Lifecycle hooks of a component. Every hook defaults to a no-op.
///
/// Hooks are called with the component temporarily checked out of the world
/// arena, so `cx.world` is freely mutable. Looking up the calling component
/// through the world during its own hook returns nothing.
///
/// The `active` flag stored with each component does not stop the world from
/// calling these hooks. Behaviors that want to pause check
/// [`Context::is_active`] themselves.
#[allow(unused_variables)]
pub trait Component: AsAny {
    /// Startup code. Colliders, bodies and graphicals register with their
    /// systems here, exactly once.
    fn initialize(&mut self, cx: &mut Context<'_>) {}
    /// Ordinary gameplay behavior.
    fn logic_update(&mut self, cx: &mut Context<'_>, dt: f32) {}
    /// Anything that must see post-physics state.
    fn late_update(&mut self, cx: &mut Context<'_>, dt: f32) {}
    /// Queue debug shapes. Only called while debug drawing is enabled.
    fn debug_draw(&mut self, cx: &mut Context<'_>) {}
    /// First frame the owning entity touches another one.
    fn collision_started(&mut self, cx: &mut Context<'_>, collision: &Collision) {}
    /// Every following frame of the same contact.
    fn collision_persisted(&mut self, cx: &mut Context<'_>, collision: &Collision) {}
    /// First frame the two entities stop touching.
    fn collision_ended(&mut self, cx: &mut Context<'_>, collision: &Collision) {}
    /// The owning entity was destroyed. It stays valid until the end of the frame.
    fn destroyed(&mut self, cx: &mut Context<'_>) {}
    /// Last call before the component is dropped; deregister from systems here.
    fn clean_up(&mut self, cx: &mut Context<'_>) {}
}

/// Type tag used for component lookups. Equality is exact type equality.
#[derive(Clone, Copy)]
pub struct ComponentType {
    id: TypeId,
    name: &'static str,
}

impl ComponentType {
    pub fn of<T: Component>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn of_val(component: &dyn Component) -> Self {
        Self {
            id: Any::type_id(component.as_any()),
            name: component.type_name(),
        }
    }

    /// Full type path, e.g. `cogworks::components::body::Body`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Last path segment, e.g. `Body`.
    pub fn short_name(&self) -> &'static str {
        self.name.rsplit("::").next().unwrap_or(self.name)
    }
}

impl PartialEq for ComponentType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ComponentType {}

impl Hash for ComponentType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentType({})", self.short_name())
    }
}

/// Downcast a component to its concrete type.
pub fn downcast_ref<T: Component>(component: &dyn Component) -> Option<&T> {
    component.as_any().downcast_ref::<T>()
}

/// Mutable variant of [`downcast_ref`].
pub fn downcast_mut<T: Component>(component: &mut dyn Component) -> Option<&mut T> {
    component.as_any_mut().downcast_mut::<T>()
}

/// What a hook gets to work with: the whole world plus who is calling.
pub struct Context<'w> {
    pub world: &'w mut World,
    /// Owner of the component whose hook is running.
    pub entity: EntityId,
    /// The component whose hook is running.
    pub component: ComponentId,
}

impl<'w> Context<'w> {
    pub fn new(world: &'w mut World, entity: EntityId, component: ComponentId) -> Self {
        Self {
            world,
            entity,
            component,
        }
    }

    pub fn transform(&self) -> Option<&Transform> {
        self.world.transform(self.entity)
    }

    pub fn transform_mut(&mut self) -> Option<&mut Transform> {
        self.world.transform_mut(self.entity)
    }

    /// Owner position, if the owner has a transform.
    pub fn position(&self) -> Option<Vector2<f32>> {
        self.transform().map(|tx| tx.position)
    }

    /// First sibling component of type `T` on the owning entity.
    pub fn first<T: Component>(&self) -> Option<ComponentId> {
        self.world.first::<T>(self.entity)
    }

    pub fn is_active(&self) -> bool {
        self.world.is_active(self.component)
    }

    pub fn physics(&mut self) -> &mut PhysicsSystem {
        &mut self.world.physics
    }

    pub fn input(&self) -> &InputState {
        &self.world.input
    }

    pub fn debug(&mut self) -> &mut DebugDraw {
        &mut self.world.debug
    }
}
