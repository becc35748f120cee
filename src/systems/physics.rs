//! Physics update: body integration, contact detection and tile snapping.
//!
//! One call to [`physics_update`] per frame runs three passes in a fixed
//! order, each to completion before the next starts:
//!
//! 1. [`integrate_bodies`] moves every registered body (semi-implicit Euler).
//! 2. [`check_collisions`] tests every dynamic collider against every static
//!    one and against every later dynamic one, and drives each pair through
//!    the start/persist/end contact state machine.
//! 3. [`check_tile_maps`] samples each hotspot collider against the
//!    registered solid tile map and snaps its owner out of solid tiles.
//!
//! Collision callbacks run synchronously inside pass 2. They may destroy
//! entities; destroyed entities keep their colliders until the world's
//! clean-up, so later pairs in the same pass still resolve.
//!
//! Registry lists are walked by index against their live length, so a callback
//! that registers new colliders does not invalidate the walk.

use log::{error, trace, warn};

use crate::components::body::Body;
use crate::components::collider::{Collider, Contact};
use crate::components::hotspotcollider::{HotspotCollider, HotspotSide};
use crate::components::tilemap::TileMap;
use crate::components::tilemapcollider::TileMapCollider;
use crate::entity::{ComponentId, EntityId};
use crate::events::collision::{Collision, CollisionPhase};
use crate::systems::narrowphase::{placed_shape, test_function};
use crate::world::World;

/// Integrate, detect contacts, then resolve tile maps.
pub fn physics_update(world: &mut World, dt: f32) {
    integrate_bodies(world, dt);
    check_collisions(world);
    check_tile_maps(world);
}

/// Advance every registered body by `dt`, in registry order.
///
/// Position moves with the velocity from before this step; gravity is
/// applied to the velocity afterwards.
pub fn integrate_bodies(world: &mut World, dt: f32) {
    let gravity = world.physics.gravity();
    let mut i = 0;
    while i < world.physics.bodies().len() {
        let id = world.physics.bodies()[i];
        i += 1;

        let Some(owner) = world.owner(id) else {
            warn!("Registered body {} no longer exists", id);
            continue;
        };
        let Some(mut body) = world.component::<Body>(id).copied() else {
            continue;
        };
        let Some(tx) = world.transform_mut(owner) else {
            warn!("Body {} on entity {} has no Transform", id, owner);
            continue;
        };
        body.integrate(&mut tx.position, gravity, dt);
        if let Some(stored) = world.component_mut::<Body>(id) {
            stored.velocity = body.velocity;
        }
    }
}

/// Test each (dynamic, static) pair and each (dynamic, later dynamic) pair
/// exactly once.
pub fn check_collisions(world: &mut World) {
    let mut i = 0;
    while i < world.physics.dynamic_colliders().len() {
        let a = world.physics.dynamic_colliders()[i];

        let mut s = 0;
        while s < world.physics.static_colliders().len() {
            let b = world.physics.static_colliders()[s];
            s += 1;
            test_pair(world, a, b);
        }

        let mut j = i + 1;
        while j < world.physics.dynamic_colliders().len() {
            let b = world.physics.dynamic_colliders()[j];
            j += 1;
            test_pair(world, a, b);
        }

        i += 1;
    }
}

/// Run the narrow-phase test for one pair and apply the contact transition.
///
/// Returns the transition that fired, or `None` for a separated pair without
/// contact and for pairs that could not be tested (logged).
pub fn test_pair(world: &mut World, a: ComponentId, b: ComponentId) -> Option<CollisionPhase> {
    let (Some(shape_a), Some(shape_b)) = (placed_shape(world, a), placed_shape(world, b)) else {
        warn!(
            "Skipping pair {} / {}: collider missing or owner without Transform",
            a, b
        );
        return None;
    };
    let Some(test) = test_function(shape_a.kind(), shape_b.kind()) else {
        error!(
            "No narrow-phase test for {:?} vs {:?}, skipping {} / {}",
            shape_a.kind(),
            shape_b.kind(),
            a,
            b
        );
        return None;
    };
    let overlapping = test(&shape_a, &shape_b);

    let (owner_a, owner_b) = (world.owner(a)?, world.owner(b)?);
    let a_lists_b = world.component::<Collider>(a)?.contact_exists_with(b);
    let b_lists_a = world.component::<Collider>(b)?.contact_exists_with(a);
    let asymmetric = a_lists_b != b_lists_a;
    if asymmetric {
        warn!(
            "Asymmetric contact between {} ({}) and {} ({}), repairing",
            a, a_lists_b, b, b_lists_a
        );
    }

    let phase = CollisionPhase::from_state(overlapping, a_lists_b || b_lists_a)?;
    trace!("{:?}: {} / {}", phase, a, b);

    match phase {
        CollisionPhase::Started => {
            add_contact(world, a, b, owner_b);
            add_contact(world, b, a, owner_a);
        }
        CollisionPhase::Persisted => {
            if !a_lists_b {
                add_contact(world, a, b, owner_b);
            }
            if !b_lists_a {
                add_contact(world, b, a, owner_a);
            }
        }
        CollisionPhase::Ended => {
            prune_contact(world, a, b);
            prune_contact(world, b, a);
        }
    }

    world.notify_collision(
        owner_a,
        phase,
        &Collision {
            other: owner_b,
            collider: a,
            other_collider: b,
        },
    );
    world.notify_collision(
        owner_b,
        phase,
        &Collision {
            other: owner_a,
            collider: b,
            other_collider: a,
        },
    );
    Some(phase)
}

fn add_contact(world: &mut World, collider: ComponentId, other: ComponentId, other_entity: EntityId) {
    if let Some(c) = world.component_mut::<Collider>(collider) {
        c.add_contact(Contact {
            other_collider: other,
            other_entity,
        });
    }
}

fn prune_contact(world: &mut World, collider: ComponentId, other: ComponentId) {
    if let Some(c) = world.component_mut::<Collider>(collider) {
        c.prune_contact_with(other);
    }
}

/// Clear every hotspot collider's flags, then check each of them against
/// the registered solid tile map. The solid map only takes part while a
/// [`TileMapCollider`] bridges it into the pass.
pub fn check_tile_maps(world: &mut World) {
    let hotspots = world.physics.hotspot_colliders().to_vec();
    for id in &hotspots {
        if let Some(hotspot) = world.component_mut::<HotspotCollider>(*id) {
            hotspot.clear_triggered();
        }
    }

    let Some(map) = world.physics.solid_tile_map() else {
        return;
    };
    let bridged = world.physics.tile_map_colliders().iter().any(|bridge| {
        world
            .component::<TileMapCollider>(*bridge)
            .and_then(|c| c.tile_map())
            == Some(map)
    });
    if !bridged {
        trace!("Solid tile map {} has no TileMapCollider", map);
        return;
    }
    for id in &hotspots {
        check_hotspots(world, *id, map);
    }
}

/// Sample one hotspot collider against one tile map and snap its owner.
///
/// Sides run in order right, top, left, bottom. Each side samples the
/// position left by the sides before it, so a body wedged in a corner is
/// pushed out on both axes in one pass. Flags are OR-ed into the collider's
/// `triggered` array.
pub fn check_hotspots(world: &mut World, hotspot: ComponentId, tile_map: ComponentId) {
    let (Some(owner), Some(map_owner)) = (world.owner(hotspot), world.owner(tile_map)) else {
        return;
    };

    for side in HotspotSide::ALL {
        let Some(position) = world.transform(owner).map(|t| t.position) else {
            warn!("HotspotCollider {} on entity {} has no Transform", hotspot, owner);
            return;
        };
        let Some(map_position) = world.transform(map_owner).map(|t| t.position) else {
            warn!("TileMap {} on entity {} has no Transform", tile_map, map_owner);
            return;
        };

        let (probe, delta) = {
            let (Some(hs), Some(map)) = (
                world.component::<HotspotCollider>(hotspot),
                world.component::<TileMap>(tile_map),
            ) else {
                return;
            };
            let probe = hs.probe(side, position, map, map_position);
            let delta = probe
                .tile_edge
                .map(|edge| hs.snap_delta(side, position, edge));
            (probe, delta)
        };

        if let Some(hs) = world.component_mut::<HotspotCollider>(hotspot) {
            hs.record(&probe);
        }
        let (Some(delta), Some(tx)) = (delta, world.transform_mut(owner)) else {
            continue;
        };
        match side {
            HotspotSide::Right | HotspotSide::Left => tx.add_x(delta),
            HotspotSide::Top | HotspotSide::Bottom => tx.add_y(delta),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::graphical::Color;
    use crate::components::tilemap::Tile;
    use crate::components::transform::Transform;
    use approx::assert_relative_eq;
    use nalgebra::Vector2;

    fn boxed(world: &mut World, x: f32, y: f32, dynamic: bool) -> (EntityId, ComponentId) {
        let e = world.spawn("box");
        world.add(e, Transform::new(x, y));
        let collider = if dynamic {
            Collider::aabb(1.0, 1.0).dynamic()
        } else {
            Collider::aabb(1.0, 1.0)
        };
        let c = world.add(e, collider).unwrap();
        world.initialize(e);
        (e, c)
    }

    fn contacts(world: &World, id: ComponentId) -> usize {
        world.component::<Collider>(id).unwrap().contacts().len()
    }

    #[test]
    fn test_integrate_bodies_order() {
        let mut world = World::new();
        world.physics.set_gravity(Vector2::new(0.0, -10.0));
        let e = world.spawn("ball");
        world.add(e, Transform::new(0.0, 0.0));
        let b = world.add(e, Body::new().with_velocity(1.0, 2.0)).unwrap();
        world.initialize(e);

        integrate_bodies(&mut world, 0.5);
        assert_relative_eq!(world.transform(e).unwrap().position, Vector2::new(0.5, 1.0));
        assert_relative_eq!(world.component::<Body>(b).unwrap().velocity, Vector2::new(1.0, -3.0));
    }

    #[test]
    fn test_body_without_transform_is_skipped() {
        let mut world = World::new();
        let e = world.spawn("ghost");
        let b = world.add(e, Body::new()).unwrap();
        world.initialize(e);
        integrate_bodies(&mut world, 1.0);
        assert_eq!(world.component::<Body>(b).unwrap().velocity, Vector2::zeros());
    }

    #[test]
    fn test_static_pairs_are_never_tested() {
        let mut world = World::new();
        let (_, a) = boxed(&mut world, 0.0, 0.0, false);
        let (_, b) = boxed(&mut world, 0.0, 0.0, false);
        check_collisions(&mut world);
        assert_eq!(contacts(&world, a), 0);
        assert_eq!(contacts(&world, b), 0);
    }

    #[test]
    fn test_pair_lifecycle() {
        let mut world = World::new();
        let (_, a) = boxed(&mut world, 0.0, 0.0, true);
        let (eb, b) = boxed(&mut world, 0.0, 0.9, false);

        assert_eq!(test_pair(&mut world, a, b), Some(CollisionPhase::Started));
        assert_eq!(test_pair(&mut world, a, b), Some(CollisionPhase::Persisted));
        assert_eq!(contacts(&world, a), 1);

        world.transform_mut(eb).unwrap().position = Vector2::new(0.0, 5.0);
        assert_eq!(test_pair(&mut world, a, b), Some(CollisionPhase::Ended));
        assert_eq!(test_pair(&mut world, a, b), None);
        assert_eq!(contacts(&world, a), 0);
        assert_eq!(contacts(&world, b), 0);
    }

    #[test]
    fn test_asymmetric_contact_is_repaired() {
        let mut world = World::new();
        let (_, a) = boxed(&mut world, 0.0, 0.0, true);
        let (eb, b) = boxed(&mut world, 0.5, 0.0, false);
        world.component_mut::<Collider>(a).unwrap().add_contact(Contact {
            other_collider: b,
            other_entity: eb,
        });

        assert_eq!(test_pair(&mut world, a, b), Some(CollisionPhase::Persisted));
        assert!(world.component::<Collider>(b).unwrap().contact_exists_with(a));
        assert_eq!(contacts(&world, a), 1);
    }

    #[test]
    fn test_pair_without_transform_is_skipped() {
        let mut world = World::new();
        let (_, a) = boxed(&mut world, 0.0, 0.0, true);
        let e = world.spawn("no-transform");
        let b = world.add(e, Collider::circle(1.0)).unwrap();
        world.initialize(e);
        assert_eq!(test_pair(&mut world, a, b), None);
    }

    #[test]
    fn test_hotspot_snaps_onto_ground() {
        let mut world = World::new();
        let ground = world.spawn("ground");
        world.add(ground, Transform::default());
        let mut map = TileMap::new().solid();
        map.add(2, 1, Tile::solid(Color::GRAY));
        let map_id = world.add(ground, map).unwrap();
        world.initialize(ground);

        let hero = world.spawn("hero");
        world.add(hero, Transform::new(2.0, 1.875));
        let hs = world.add(hero, HotspotCollider::new(1.0, 1.0)).unwrap();
        world.initialize(hero);

        check_hotspots(&mut world, hs, map_id);
        assert_eq!(world.transform(hero).unwrap().y(), 2.0);
        assert_eq!(world.transform(hero).unwrap().x(), 2.0);
        let triggered = world.component::<HotspotCollider>(hs).unwrap().triggered();
        assert_eq!(triggered, &[false, false, false, false, false, false, true, true]);
    }

    #[test]
    fn test_check_tile_maps_needs_bridge_and_solid_flag() {
        let mut world = World::new();
        let ground = world.spawn("ground");
        world.add(ground, Transform::default());
        let mut map = TileMap::new();
        map.add(0, 0, Tile::solid(Color::GRAY));
        let map_id = world.add(ground, map).unwrap();
        world.initialize(ground);

        let hero = world.spawn("hero");
        world.add(hero, Transform::new(0.0, 0.875));
        let hs = world.add(hero, HotspotCollider::new(1.0, 1.0)).unwrap();
        world.initialize(hero);

        // no bridge yet
        check_tile_maps(&mut world);
        assert_eq!(world.transform(hero).unwrap().y(), 0.875);

        world.add(ground, TileMapCollider::new());
        // bridged but not solid
        check_tile_maps(&mut world);
        assert_eq!(world.transform(hero).unwrap().y(), 0.875);

        assert!(world.set_tile_map_solid(map_id, true));
        assert_eq!(world.physics.solid_tile_map(), Some(map_id));
        check_tile_maps(&mut world);
        assert_eq!(world.transform(hero).unwrap().y(), 1.0);
        assert!(world
            .component::<HotspotCollider>(hs)
            .unwrap()
            .is_side_triggered(HotspotSide::Bottom));

        // clearing the flag deregisters the map again
        assert!(world.set_tile_map_solid(map_id, false));
        assert_eq!(world.physics.solid_tile_map(), None);
        world.transform_mut(hero).unwrap().position.y = 0.875;
        check_tile_maps(&mut world);
        assert_eq!(world.transform(hero).unwrap().y(), 0.875);
        assert!(!world
            .component::<HotspotCollider>(hs)
            .unwrap()
            .is_side_triggered(HotspotSide::Bottom));
    }

    #[test]
    fn test_only_the_registered_solid_map_is_sampled() {
        let mut world = World::new();
        let mut maps = Vec::new();
        for name in ["first", "second"] {
            let e = world.spawn(name);
            world.add(e, Transform::default());
            let mut map = TileMap::new().solid();
            map.add(0, 0, Tile::solid(Color::GRAY));
            maps.push(world.add(e, map).unwrap());
            world.add(e, TileMapCollider::new());
            world.initialize(e);
        }
        // the later map replaced the earlier registration
        assert_eq!(world.physics.solid_tile_map(), Some(maps[1]));

        let hero = world.spawn("hero");
        world.add(hero, Transform::new(0.0, 0.875));
        world.add(hero, HotspotCollider::new(1.0, 1.0));
        world.initialize(hero);

        world.set_tile_map_solid(maps[1], false);
        check_tile_maps(&mut world);
        assert_eq!(world.transform(hero).unwrap().y(), 0.875);

        world.set_tile_map_solid(maps[0], true);
        check_tile_maps(&mut world);
        assert_eq!(world.transform(hero).unwrap().y(), 1.0);
    }
}
