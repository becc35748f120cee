//! The world: entity/component arena, per-frame fan-out and scenes.
//!
//! [`World`] owns every entity and component plus the engine-wide resources
//! components talk to from their hooks (physics registries, graphics registry,
//! debug queue, input). Everything is addressed by id; an id that no longer
//! resolves simply yields `None`.
//!
//! # Hooks and check-out
//!
//! A hook runs with its component taken out of the arena, which is what lets
//! it receive `&mut World`. While checked out, lookups of that component id
//! return `None` and hooks on it are skipped.
//!
//! # Destruction
//!
//! [`World::destroy`] only marks an entity and notifies its components.
//! Marked entities stay fully usable, colliders included, until
//! [`World::clean_up`] runs at the end of the frame, calls every component's
//! `clean_up` hook and drops them.

use std::rc::Rc;

use log::{debug, info, warn};
use rustc_hash::FxHashMap;

use crate::components::collider::Collider;
use crate::components::tilemap::TileMap;
use crate::components::transform::Transform;
use crate::components::{downcast_mut, downcast_ref, Component, ComponentType, Context};
use crate::entity::{ComponentId, Entity, EntityId, IdCounter};
use crate::error::EngineError;
use crate::events::collision::{Collision, CollisionPhase};
use crate::resources::debugdraw::DebugDraw;
use crate::resources::graphics::GraphicsRegistry;
use crate::resources::input::InputState;
use crate::resources::physics::PhysicsSystem;

/// Something that populates a world. Loaded with [`World::load`].
pub trait Scene {
    fn name(&self) -> &str;

    /// Spawn and set up entities. Entities left uninitialized are initialized
    /// by the world right after this returns.
    fn load(&self, world: &mut World) -> Result<(), EngineError>;
}

/// Arena slot of one component.
struct Slot {
    owner: EntityId,
    name: String,
    active: bool,
    ty: ComponentType,
    /// `None` while a hook of this component is running.
    component: Option<Box<dyn Component>>,
}

pub struct World {
    ids: IdCounter,
    entities: FxHashMap<EntityId, Entity>,
    /// Entity ids in creation order.
    order: Vec<EntityId>,
    slots: FxHashMap<ComponentId, Slot>,
    current_scene: Option<Rc<dyn Scene>>,
    pub physics: PhysicsSystem,
    pub graphics: GraphicsRegistry,
    pub debug: DebugDraw,
    pub input: InputState,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    pub fn new() -> Self {
        Self {
            ids: IdCounter::new(),
            entities: FxHashMap::default(),
            order: Vec::new(),
            slots: FxHashMap::default(),
            current_scene: None,
            physics: PhysicsSystem::new(),
            graphics: GraphicsRegistry::new(),
            debug: DebugDraw::default(),
            input: InputState::new(),
        }
    }

    // ---------------------------------------------------------------- entities

    /// Create an empty entity.
    pub fn spawn(&mut self, name: impl Into<String>) -> EntityId {
        let id = EntityId(self.ids.next());
        let entity = Entity::new(id, name);
        debug!("Spawned {}", entity);
        self.entities.insert(id, entity);
        self.order.push(id);
        id
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    /// All entity ids in creation order.
    pub fn entity_ids(&self) -> Vec<EntityId> {
        self.order.clone()
    }

    pub fn entity_count(&self) -> usize {
        self.order.len()
    }

    pub fn component_count(&self) -> usize {
        self.slots.len()
    }

    /// First entity named `name`, in creation order.
    pub fn find_entity(&self, name: &str) -> Option<EntityId> {
        self.order
            .iter()
            .copied()
            .find(|id| self.entities.get(id).is_some_and(|e| e.name == name))
    }

    pub fn find_entities(&self, name: &str) -> Vec<EntityId> {
        self.order
            .iter()
            .copied()
            .filter(|id| self.entities.get(id).is_some_and(|e| e.name == name))
            .collect()
    }

    pub fn set_persistent(&mut self, entity: EntityId, persistent: bool) {
        if let Some(e) = self.entities.get_mut(&entity) {
            e.persistent = persistent;
        }
    }

    // ---------------------------------------------------------------- components

    /// Attach `component` to `entity`. `None` if the entity does not exist.
    pub fn add<T: Component>(&mut self, entity: EntityId, component: T) -> Option<ComponentId> {
        self.add_boxed(entity, Box::new(component))
    }

    /// Attach an already boxed component.
    ///
    /// Attaching to an entity that is already initialized initializes the new
    /// component right away.
    pub fn add_boxed(
        &mut self,
        entity: EntityId,
        component: Box<dyn Component>,
    ) -> Option<ComponentId> {
        let Some(owner) = self.entities.get(&entity) else {
            warn!("Cannot add a component to missing entity {}", entity);
            return None;
        };
        let initialized = owner.is_initialized();
        let ty = ComponentType::of_val(&*component);
        let is_transform = ty == ComponentType::of::<Transform>();
        if is_transform && owner.transform_id().is_some() {
            warn!("{} already has a Transform, replacing the cached one", owner);
        }

        let id = ComponentId(self.ids.next());
        self.slots.insert(
            id,
            Slot {
                owner: entity,
                name: ty.short_name().to_string(),
                active: true,
                ty,
                component: Some(component),
            },
        );
        if let Some(owner) = self.entities.get_mut(&entity) {
            owner.attach(id, is_transform);
        }

        if initialized {
            self.run_hook(id, |c, cx| c.initialize(cx));
        }
        Some(id)
    }

    /// Clean up and drop one component. Attach order of the remaining
    /// components is not preserved.
    pub fn remove_component(&mut self, id: ComponentId) -> bool {
        match self.slots.get(&id) {
            None => return false,
            Some(slot) if slot.component.is_none() => {
                warn!("Component {} cannot be removed from inside its own hook", id);
                return false;
            }
            Some(_) => {}
        }
        self.run_hook(id, |c, cx| c.clean_up(cx));
        let Some(slot) = self.slots.remove(&id) else {
            return false;
        };
        if let Some(owner) = self.entities.get_mut(&slot.owner) {
            owner.detach(id);
        }
        true
    }

    pub fn owner(&self, id: ComponentId) -> Option<EntityId> {
        self.slots.get(&id).map(|s| s.owner)
    }

    pub fn component_type(&self, id: ComponentId) -> Option<ComponentType> {
        self.slots.get(&id).map(|s| s.ty)
    }

    /// Typed access. `None` for a missing id, a type mismatch or a component
    /// whose hook is running.
    pub fn component<T: Component>(&self, id: ComponentId) -> Option<&T> {
        self.slots
            .get(&id)?
            .component
            .as_deref()
            .and_then(|c| downcast_ref::<T>(c))
    }

    pub fn component_mut<T: Component>(&mut self, id: ComponentId) -> Option<&mut T> {
        self.slots
            .get_mut(&id)?
            .component
            .as_deref_mut()
            .and_then(|c| downcast_mut::<T>(c))
    }

    /// First component of `entity` with type `ty`.
    pub fn get(&self, entity: EntityId, ty: ComponentType) -> Option<ComponentId> {
        self.entities
            .get(&entity)?
            .components()
            .iter()
            .copied()
            .find(|id| self.slots.get(id).is_some_and(|s| s.ty == ty))
    }

    pub fn get_all(&self, entity: EntityId, ty: ComponentType) -> Vec<ComponentId> {
        self.entity_components_where(entity, |s| s.ty == ty)
    }

    pub fn first<T: Component>(&self, entity: EntityId) -> Option<ComponentId> {
        self.get(entity, ComponentType::of::<T>())
    }

    pub fn all<T: Component>(&self, entity: EntityId) -> Vec<ComponentId> {
        self.get_all(entity, ComponentType::of::<T>())
    }

    /// First component of `entity` named `name`.
    pub fn find(&self, entity: EntityId, name: &str) -> Option<ComponentId> {
        self.entities
            .get(&entity)?
            .components()
            .iter()
            .copied()
            .find(|id| self.slots.get(id).is_some_and(|s| s.name == name))
    }

    pub fn find_all(&self, entity: EntityId, name: &str) -> Vec<ComponentId> {
        self.entity_components_where(entity, |s| s.name == name)
    }

    fn entity_components_where(
        &self,
        entity: EntityId,
        predicate: impl Fn(&Slot) -> bool,
    ) -> Vec<ComponentId> {
        let Some(e) = self.entities.get(&entity) else {
            return Vec::new();
        };
        e.components()
            .iter()
            .copied()
            .filter(|id| self.slots.get(id).is_some_and(&predicate))
            .collect()
    }

    /// Every component of type `T` in the world, by entity creation order
    /// then attach order.
    pub fn query<T: Component>(&self) -> Vec<ComponentId> {
        let ty = ComponentType::of::<T>();
        self.order
            .iter()
            .flat_map(|entity| self.entity_components_where(*entity, |s| s.ty == ty))
            .collect()
    }

    /// Component name, defaulting to the short type name.
    pub fn component_name(&self, id: ComponentId) -> Option<&str> {
        self.slots.get(&id).map(|s| s.name.as_str())
    }

    pub fn set_component_name(&mut self, id: ComponentId, name: impl Into<String>) {
        if let Some(slot) = self.slots.get_mut(&id) {
            slot.name = name.into();
        }
    }

    /// The `active` flag. Only gameplay code consults it; the world keeps
    /// calling hooks of inactive components.
    pub fn is_active(&self, id: ComponentId) -> bool {
        self.slots.get(&id).is_some_and(|s| s.active)
    }

    pub fn set_active(&mut self, id: ComponentId, active: bool) {
        if let Some(slot) = self.slots.get_mut(&id) {
            slot.active = active;
        }
    }

    pub fn transform(&self, entity: EntityId) -> Option<&Transform> {
        let id = self.entities.get(&entity)?.transform_id()?;
        self.component::<Transform>(id)
    }

    pub fn transform_mut(&mut self, entity: EntityId) -> Option<&mut Transform> {
        let id = self.entities.get(&entity)?.transform_id()?;
        self.component_mut::<Transform>(id)
    }

    /// Toggle a collider between the dynamic and static lists.
    pub fn set_collider_dynamic(&mut self, id: ComponentId, dynamic: bool) -> bool {
        let Some(collider) = self
            .slots
            .get_mut(&id)
            .and_then(|s| s.component.as_deref_mut())
            .and_then(|c| downcast_mut::<Collider>(c))
        else {
            warn!("set_collider_dynamic: {} is not an available collider", id);
            return false;
        };
        collider.set_dynamic(&mut self.physics, id, dynamic);
        true
    }

    /// Toggle whether a tile map is the solid map, keeping the registration
    /// in step with the flag.
    pub fn set_tile_map_solid(&mut self, id: ComponentId, solid: bool) -> bool {
        let Some(map) = self
            .slots
            .get_mut(&id)
            .and_then(|s| s.component.as_deref_mut())
            .and_then(|c| downcast_mut::<TileMap>(c))
        else {
            warn!("set_tile_map_solid: {} is not an available tile map", id);
            return false;
        };
        map.set_solid(&mut self.physics, id, solid);
        true
    }

    // ---------------------------------------------------------------- hooks

    /// Run `hook` on component `id` with the component checked out. Returns
    /// false when the component is missing or already checked out.
    fn run_hook(
        &mut self,
        id: ComponentId,
        hook: impl FnOnce(&mut dyn Component, &mut Context<'_>),
    ) -> bool {
        let Some(slot) = self.slots.get_mut(&id) else {
            return false;
        };
        let owner = slot.owner;
        let Some(mut component) = slot.component.take() else {
            return false;
        };
        {
            let mut cx = Context::new(self, owner, id);
            hook(component.as_mut(), &mut cx);
        }
        if let Some(slot) = self.slots.get_mut(&id) {
            slot.component = Some(component);
        }
        true
    }

    /// Fan `hook` out to every component of `entity`, in attach order.
    fn run_entity(
        &mut self,
        entity: EntityId,
        mut hook: impl FnMut(&mut dyn Component, &mut Context<'_>),
    ) {
        let Some(components) = self.entities.get(&entity).map(|e| e.components().to_vec()) else {
            return;
        };
        for id in components {
            self.run_hook(id, &mut hook);
        }
    }

    /// Fan `hook` out to every entity alive when the phase starts.
    fn run_all(&mut self, mut hook: impl FnMut(&mut dyn Component, &mut Context<'_>)) {
        for entity in self.order.clone() {
            self.run_entity(entity, &mut hook);
        }
    }

    /// Call `initialize` on every component of `entity`, once.
    pub fn initialize(&mut self, entity: EntityId) {
        let Some(e) = self.entities.get(&entity) else {
            return;
        };
        if e.is_initialized() {
            warn!("{} initialized twice, ignoring", e);
            return;
        }
        self.run_entity(entity, |c, cx| c.initialize(cx));
        if let Some(e) = self.entities.get_mut(&entity) {
            e.set_initialized();
        }
    }

    /// Initialize every entity that has not been yet.
    pub fn initialize_pending(&mut self) {
        for entity in self.order.clone() {
            if self.entities.get(&entity).is_some_and(|e| !e.is_initialized()) {
                self.initialize(entity);
            }
        }
    }

    pub fn logic_update(&mut self, dt: f32) {
        self.run_all(|c, cx| c.logic_update(cx, dt));
    }

    pub fn late_update(&mut self, dt: f32) {
        self.run_all(|c, cx| c.late_update(cx, dt));
    }

    /// Run debug draw hooks; skipped while debug drawing is off.
    pub fn debug_draw(&mut self) {
        if !self.debug.is_enabled() {
            return;
        }
        self.run_all(|c, cx| c.debug_draw(cx));
    }

    /// Deliver a contact transition to every component of `entity`.
    pub fn notify_collision(&mut self, entity: EntityId, phase: CollisionPhase, collision: &Collision) {
        match phase {
            CollisionPhase::Started => self.run_entity(entity, |c, cx| c.collision_started(cx, collision)),
            CollisionPhase::Persisted => {
                self.run_entity(entity, |c, cx| c.collision_persisted(cx, collision))
            }
            CollisionPhase::Ended => self.run_entity(entity, |c, cx| c.collision_ended(cx, collision)),
        }
    }

    /// Mark `entity` for removal at the end of the frame and notify its
    /// components. Repeated calls are no-ops.
    pub fn destroy(&mut self, entity: EntityId) {
        let Some(e) = self.entities.get_mut(&entity) else {
            return;
        };
        if !e.mark() {
            return;
        }
        debug!("Destroying {}", e);
        self.run_entity(entity, |c, cx| c.destroyed(cx));
    }

    /// Clean up and drop every marked entity. Entities destroyed by a
    /// clean-up hook are dropped in the same call.
    pub fn clean_up(&mut self) {
        loop {
            let marked: Vec<EntityId> = self
                .order
                .iter()
                .copied()
                .filter(|id| self.entities.get(id).is_some_and(|e| e.is_marked()))
                .collect();
            if marked.is_empty() {
                return;
            }
            for entity in &marked {
                self.run_entity(*entity, |c, cx| c.clean_up(cx));
            }
            for entity in &marked {
                if let Some(e) = self.entities.remove(entity) {
                    for id in e.components() {
                        self.slots.remove(id);
                    }
                }
            }
            self.order.retain(|id| self.entities.contains_key(id));
        }
    }

    // ---------------------------------------------------------------- scenes

    /// Destroy every non-persistent entity.
    pub fn clear(&mut self) {
        for entity in self.order.clone() {
            if self.entities.get(&entity).is_some_and(|e| !e.persistent) {
                self.destroy(entity);
            }
        }
    }

    /// Replace the world contents with `scene`. Persistent entities stay.
    pub fn load(&mut self, scene: Rc<dyn Scene>) -> Result<(), EngineError> {
        self.clear();
        self.clean_up();
        self.current_scene = Some(scene.clone());
        self.load_additively(scene)
    }

    /// Add the entities of `scene` to the ones already there.
    pub fn load_additively(&mut self, scene: Rc<dyn Scene>) -> Result<(), EngineError> {
        scene.load(self)?;
        self.initialize_pending();
        info!("Loaded scene '{}' ({} entities)", scene.name(), self.entity_count());
        if self.current_scene.is_none() {
            self.current_scene = Some(scene);
        }
        Ok(())
    }

    /// Load the current scene again. No-op without one.
    pub fn reload(&mut self) -> Result<(), EngineError> {
        match self.current_scene.clone() {
            Some(scene) => self.load(scene),
            None => Ok(()),
        }
    }

    pub fn current_scene_name(&self) -> Option<&str> {
        self.current_scene.as_deref().map(|s| s.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::body::Body;
    use std::cell::RefCell;

    type Log = Rc<RefCell<Vec<String>>>;

    /// Records every hook call as "<tag>:<hook>".
    struct Recorder {
        tag: &'static str,
        log: Log,
    }

    impl Recorder {
        fn new(tag: &'static str, log: &Log) -> Self {
            Self {
                tag,
                log: log.clone(),
            }
        }

        fn push(&self, hook: &str) {
            self.log.borrow_mut().push(format!("{}:{}", self.tag, hook));
        }
    }

    impl Component for Recorder {
        fn initialize(&mut self, _cx: &mut Context<'_>) {
            self.push("init");
        }
        fn logic_update(&mut self, cx: &mut Context<'_>, _dt: f32) {
            // own id is checked out
            assert!(cx.world.component::<Recorder>(cx.component).is_none());
            self.push("logic");
        }
        fn destroyed(&mut self, _cx: &mut Context<'_>) {
            self.push("destroyed");
        }
        fn clean_up(&mut self, _cx: &mut Context<'_>) {
            self.push("clean");
        }
    }

    fn log() -> Log {
        Rc::new(RefCell::new(Vec::new()))
    }

    // ==================== ARENA TESTS ====================

    #[test]
    fn test_ids_are_unique_across_entities_and_components() {
        let mut world = World::new();
        let a = world.spawn("a");
        let c = world.add(a, Transform::default()).unwrap();
        let b = world.spawn("b");
        assert_ne!(a.0, c.0);
        assert_ne!(c.0, b.0);
        assert!(b.0 > a.0);
    }

    #[test]
    fn test_add_caches_transform_and_sets_owner() {
        let mut world = World::new();
        let e = world.spawn("hero");
        let body = world.add(e, Body::new()).unwrap();
        let tx = world.add(e, Transform::new(1.0, 2.0)).unwrap();

        assert_eq!(world.entity(e).unwrap().transform_id(), Some(tx));
        assert_eq!(world.owner(body), Some(e));
        assert_eq!(world.transform(e).unwrap().y(), 2.0);
        assert_eq!(world.component_name(body), Some("Body"));
    }

    #[test]
    fn test_add_to_missing_entity() {
        let mut world = World::new();
        assert!(world.add(EntityId(99), Body::new()).is_none());
    }

    #[test]
    fn test_get_and_get_all_by_type() {
        let mut world = World::new();
        let e = world.spawn("e");
        let b1 = world.add(e, Body::new()).unwrap();
        world.add(e, Transform::default());
        let b2 = world.add(e, Body::new()).unwrap();

        assert_eq!(world.get(e, ComponentType::of::<Body>()), Some(b1));
        assert_eq!(world.all::<Body>(e), vec![b1, b2]);
        assert!(world.first::<Collider>(e).is_none());
        assert!(world.get_all(e, ComponentType::of::<Collider>()).is_empty());
    }

    #[test]
    fn test_find_by_name() {
        let mut world = World::new();
        let e = world.spawn("e");
        let a = world.add(e, Body::new()).unwrap();
        let b = world.add(e, Body::new()).unwrap();
        world.set_component_name(b, "jetpack");

        assert_eq!(world.find(e, "Body"), Some(a));
        assert_eq!(world.find(e, "jetpack"), Some(b));
        assert_eq!(world.find_all(e, "Body"), vec![a]);
        assert!(world.find(e, "nothing").is_none());
    }

    #[test]
    fn test_find_entities() {
        let mut world = World::new();
        let a = world.spawn("coin");
        world.spawn("hero");
        let c = world.spawn("coin");
        assert_eq!(world.find_entity("coin"), Some(a));
        assert_eq!(world.find_entities("coin"), vec![a, c]);
        assert!(world.find_entity("ghost").is_none());
    }

    #[test]
    fn test_typed_access_checks_type() {
        let mut world = World::new();
        let e = world.spawn("e");
        let id = world.add(e, Body::new().with_gravity_scale(0.5)).unwrap();
        assert!(world.component::<Transform>(id).is_none());
        world.component_mut::<Body>(id).unwrap().gravity_scale = 2.0;
        assert_eq!(world.component::<Body>(id).unwrap().gravity_scale, 2.0);
    }

    #[test]
    fn test_remove_component_swaps_and_cleans_up() {
        let mut world = World::new();
        let e = world.spawn("e");
        let tx = world.add(e, Transform::default()).unwrap();
        let body = world.add(e, Body::new()).unwrap();
        world.initialize(e);
        assert_eq!(world.physics.bodies(), &[body]);

        assert!(world.remove_component(tx));
        assert!(world.transform(e).is_none());
        assert_eq!(world.entity(e).unwrap().components(), &[body]);

        assert!(world.remove_component(body));
        assert!(world.physics.bodies().is_empty());
        assert!(!world.remove_component(body));
    }

    #[test]
    fn test_active_flag_does_not_stop_dispatch() {
        let log = log();
        let mut world = World::new();
        let e = world.spawn("e");
        let id = world.add(e, Recorder::new("r", &log)).unwrap();
        world.set_active(id, false);
        assert!(!world.is_active(id));

        world.logic_update(0.1);
        assert!(log.borrow().contains(&"r:logic".to_string()));
    }

    // ==================== LIFECYCLE TESTS ====================

    #[test]
    fn test_hooks_run_in_attach_order() {
        let log = log();
        let mut world = World::new();
        let e = world.spawn("e");
        world.add(e, Recorder::new("a", &log));
        world.add(e, Recorder::new("b", &log));
        world.initialize(e);
        world.initialize(e);
        world.logic_update(0.016);

        assert_eq!(*log.borrow(), vec!["a:init", "b:init", "a:logic", "b:logic"]);
    }

    #[test]
    fn test_add_after_initialize_initializes() {
        let log = log();
        let mut world = World::new();
        let e = world.spawn("e");
        world.initialize(e);
        world.add(e, Recorder::new("late", &log));
        assert_eq!(*log.borrow(), vec!["late:init"]);
    }

    #[test]
    fn test_destroy_is_idempotent_and_deferred() {
        let log = log();
        let mut world = World::new();
        let e = world.spawn("e");
        world.add(e, Transform::default());
        let body = world.add(e, Body::new()).unwrap();
        world.add(e, Recorder::new("r", &log));
        world.initialize(e);

        world.destroy(e);
        world.destroy(e);
        assert_eq!(*log.borrow(), vec!["r:init", "r:destroyed"]);

        // still valid until clean-up
        assert!(world.transform(e).is_some());
        assert_eq!(world.physics.bodies(), &[body]);

        world.clean_up();
        assert_eq!(*log.borrow(), vec!["r:init", "r:destroyed", "r:clean"]);
        assert!(world.entity(e).is_none());
        assert!(world.component::<Body>(body).is_none());
        assert!(world.physics.bodies().is_empty());
        assert_eq!(world.component_count(), 0);
    }

    #[test]
    fn test_clean_up_keeps_unmarked() {
        let mut world = World::new();
        let a = world.spawn("a");
        let b = world.spawn("b");
        world.destroy(a);
        world.clean_up();
        assert_eq!(world.entity_ids(), vec![b]);
    }

    // ==================== SCENE TESTS ====================

    struct Boxes(usize);

    impl Scene for Boxes {
        fn name(&self) -> &str {
            "boxes"
        }

        fn load(&self, world: &mut World) -> Result<(), EngineError> {
            for i in 0..self.0 {
                let e = world.spawn("box");
                world.add(e, Transform::new(i as f32, 0.0));
                world.add(e, Collider::aabb(1.0, 1.0));
            }
            Ok(())
        }
    }

    #[test]
    fn test_load_initializes_and_reload_replaces() {
        let mut world = World::new();
        let keeper = world.spawn("keeper");
        world.set_persistent(keeper, true);

        world.load(Rc::new(Boxes(3))).unwrap();
        assert_eq!(world.current_scene_name(), Some("boxes"));
        assert_eq!(world.find_entities("box").len(), 3);
        assert_eq!(world.physics.static_colliders().len(), 3);

        let before = world.find_entities("box");
        world.reload().unwrap();
        let after = world.find_entities("box");
        assert_eq!(after.len(), 3);
        assert!(before.iter().all(|id| !after.contains(id)));
        assert_eq!(world.physics.static_colliders().len(), 3);
        assert!(world.contains(keeper));
    }

    #[test]
    fn test_load_additively_keeps_existing() {
        let mut world = World::new();
        world.load(Rc::new(Boxes(1))).unwrap();
        world.load_additively(Rc::new(Boxes(2))).unwrap();
        assert_eq!(world.find_entities("box").len(), 3);
        assert_eq!(world.current_scene_name(), Some("boxes"));
    }

    #[test]
    fn test_reload_without_scene_is_noop() {
        let mut world = World::new();
        world.spawn("lonely");
        world.reload().unwrap();
        assert_eq!(world.entity_count(), 1);
    }

    #[test]
    fn test_set_collider_dynamic_moves_registered_collider() {
        let mut world = World::new();
        let e = world.spawn("e");
        world.add(e, Transform::default());
        let c = world.add(e, Collider::aabb(1.0, 1.0)).unwrap();
        world.initialize(e);
        assert_eq!(world.physics.static_colliders(), &[c]);

        assert!(world.set_collider_dynamic(c, true));
        assert_eq!(world.physics.dynamic_colliders(), &[c]);
        assert!(world.physics.static_colliders().is_empty());
        assert!(world.component::<Collider>(c).unwrap().is_dynamic());
    }
}
