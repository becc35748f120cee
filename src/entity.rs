//! Entity identifiers and the per-entity record kept by the [`World`](crate::world::World).
//!
//! An entity is nothing but a name, a unique id, a couple of flags and the
//! ordered list of components attached to it. Components themselves live in
//! the world arena and are referenced by [`ComponentId`].

use std::fmt;

/// Unique identifier of an entity. Never reused within a [`World`](crate::world::World).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

/// Unique identifier of a component. Shares its counter with [`EntityId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// Monotonic id source for entities and components.
///
/// Owned by the world instead of living in a global so that several engines
/// can coexist (tests spin up many of them).
#[derive(Debug, Default, Clone)]
pub struct IdCounter {
    next: u64,
}

impl IdCounter {
    pub fn new() -> Self {
        Self { next: 0 }
    }

    /// Hand out the next id. Ids are never handed out twice.
    pub fn next(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Number of ids issued so far.
    pub fn issued(&self) -> u64 {
        self.next
    }
}

/// A named bag of components sharing one transform.
#[derive(Debug, Clone)]
pub struct Entity {
    id: EntityId,
    /// Non-unique name used for lookups.
    pub name: String,
    components: Vec<ComponentId>,
    transform: Option<ComponentId>,
    marked: bool,
    initialized: bool,
    /// Persistent entities survive [`World::load`](crate::world::World::load).
    pub persistent: bool,
}

impl Entity {
    pub(crate) fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            components: Vec::new(),
            transform: None,
            marked: false,
            initialized: false,
            persistent: false,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Attached components in attach order (until something is removed).
    pub fn components(&self) -> &[ComponentId] {
        &self.components
    }

    /// The cached transform component, if one has been added.
    pub fn transform_id(&self) -> Option<ComponentId> {
        self.transform
    }

    /// True once [`World::destroy`](crate::world::World::destroy) ran for this entity.
    pub fn is_marked(&self) -> bool {
        self.marked
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub(crate) fn attach(&mut self, component: ComponentId, is_transform: bool) {
        if is_transform {
            self.transform = Some(component);
        }
        self.components.push(component);
    }

    /// Swap-remove; attach order is not preserved afterwards.
    pub(crate) fn detach(&mut self, component: ComponentId) -> bool {
        let Some(index) = self.components.iter().position(|c| *c == component) else {
            return false;
        };
        self.components.swap_remove(index);
        if self.transform == Some(component) {
            self.transform = None;
        }
        true
    }

    /// Returns false when the entity was already marked.
    pub(crate) fn mark(&mut self) -> bool {
        if self.marked {
            return false;
        }
        self.marked = true;
        true
    }

    pub(crate) fn set_initialized(&mut self) {
        self.initialized = true;
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Entity {}|{}]", self.name, self.id)
    }
}
