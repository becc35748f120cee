//! Recolours a sibling [`Graphical`] while its entity touches something.
//!
//! Whether the entity is touching is read from the live contact lists of its
//! colliders, not counted from events: a partner destroyed mid-contact is
//! pruned without a `collision_ended`, and the next late update still sees
//! the list shrink.

use log::warn;

use crate::components::collider::Collider;
use crate::components::graphical::{Color, Graphical};
use crate::components::{Component, Context};
use crate::entity::ComponentId;
use crate::events::collision::Collision;

#[derive(Debug, Clone, PartialEq)]
pub struct CollisionTint {
    pub active_color: Color,
    default_color: Color,
    graphical: Option<ComponentId>,
    touching: usize,
}

impl Default for CollisionTint {
    fn default() -> Self {
        Self::new(Color::rgb(250, 20, 50))
    }
}

impl CollisionTint {
    pub fn new(active_color: Color) -> Self {
        Self {
            active_color,
            default_color: Color::WHITE,
            graphical: None,
            touching: 0,
        }
    }

    /// Contacts seen at the last refresh, summed over the entity's colliders.
    pub fn touching(&self) -> usize {
        self.touching
    }

    /// Colour restored once nothing touches the entity.
    pub fn default_color(&self) -> Color {
        self.default_color
    }

    fn refresh(&mut self, cx: &mut Context<'_>) {
        self.touching = cx
            .world
            .all::<Collider>(cx.entity)
            .into_iter()
            .filter_map(|id| cx.world.component::<Collider>(id))
            .map(|c| c.contacts().len())
            .sum();
        let color = if self.touching > 0 {
            self.active_color
        } else {
            self.default_color
        };
        if let Some(g) = self
            .graphical
            .and_then(|id| cx.world.component_mut::<Graphical>(id))
        {
            g.fill = color;
        }
    }
}

impl Component for CollisionTint {
    fn initialize(&mut self, cx: &mut Context<'_>) {
        self.graphical = cx.first::<Graphical>();
        match self
            .graphical
            .and_then(|id| cx.world.component::<Graphical>(id))
        {
            Some(g) => self.default_color = g.fill,
            None => warn!("CollisionTint on entity {} has no Graphical", cx.entity),
        }
        if cx.first::<Collider>().is_none() {
            warn!("CollisionTint on entity {} has no Collider", cx.entity);
        }
    }

    fn late_update(&mut self, cx: &mut Context<'_>, _dt: f32) {
        self.refresh(cx);
    }

    fn collision_started(&mut self, cx: &mut Context<'_>, _collision: &Collision) {
        self.refresh(cx);
    }

    fn collision_ended(&mut self, cx: &mut Context<'_>, _collision: &Collision) {
        self.refresh(cx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::collider::Collider;
    use crate::components::transform::Transform;
    use crate::systems::physics::check_collisions;
    use crate::world::World;

    #[test]
    fn test_tint_follows_contacts() {
        let mut world = World::new();
        let a = world.spawn("a");
        world.add(a, Transform::new(0.0, 0.0));
        world.add(a, Collider::aabb(1.0, 1.0).dynamic());
        let g = world.add(a, Graphical::rect(1.0, 1.0, Color::BLUE)).unwrap();
        let tint = world.add(a, CollisionTint::new(Color::RED)).unwrap();
        world.initialize(a);

        let mut walls = Vec::new();
        for x in [0.5, -0.5] {
            let wall = world.spawn("wall");
            world.add(wall, Transform::new(x, 0.0));
            world.add(wall, Collider::aabb(1.0, 1.0));
            world.initialize(wall);
            walls.push(wall);
        }

        check_collisions(&mut world);
        assert_eq!(world.component::<Graphical>(g).unwrap().fill, Color::RED);
        assert_eq!(world.component::<CollisionTint>(tint).unwrap().touching(), 2);

        // one wall leaves, still touching the other
        world.transform_mut(walls[0]).unwrap().position.x = 10.0;
        check_collisions(&mut world);
        assert_eq!(world.component::<Graphical>(g).unwrap().fill, Color::RED);

        world.transform_mut(walls[1]).unwrap().position.x = -10.0;
        check_collisions(&mut world);
        assert_eq!(world.component::<Graphical>(g).unwrap().fill, Color::BLUE);
    }

    #[test]
    fn test_tint_clears_when_partner_is_destroyed() {
        let mut world = World::new();
        let floor = world.spawn("floor");
        world.add(floor, Transform::new(0.0, 0.0));
        world.add(floor, Collider::aabb(4.0, 1.0));
        let g = world.add(floor, Graphical::rect(4.0, 1.0, Color::GRAY)).unwrap();
        let tint = world.add(floor, CollisionTint::default()).unwrap();
        world.initialize(floor);

        let drop = world.spawn("drop");
        world.add(drop, Transform::new(0.0, 0.6));
        world.add(drop, Collider::circle(0.2).dynamic());
        world.initialize(drop);

        check_collisions(&mut world);
        assert_eq!(world.component::<Graphical>(g).unwrap().fill, Color::rgb(250, 20, 50));

        // pruned on clean-up, no collision_ended reaches the floor
        world.destroy(drop);
        world.clean_up();
        assert_eq!(world.component::<Graphical>(g).unwrap().fill, Color::rgb(250, 20, 50));

        world.late_update(1.0 / 60.0);
        assert_eq!(world.component::<Graphical>(g).unwrap().fill, Color::GRAY);
        let tint = world.component::<CollisionTint>(tint).unwrap();
        assert_eq!(tint.touching(), 0);
        assert_eq!(tint.default_color(), Color::GRAY);
    }
}
