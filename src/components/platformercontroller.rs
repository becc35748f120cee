//! Run and jump controller for hotspot-driven platformers.
//!
//! [`PlatformerController`] needs a [`Body`] and a [`HotspotCollider`] on the
//! same entity. Horizontal movement writes the transform directly; jumping
//! sets the body's vertical velocity. After physics, the controller reads the
//! foot and head hotspots:
//!
//! - feet touching: downward velocity is cleared (standing on ground)
//! - head touching: upward velocity is cleared (bonked a ceiling)
//!
//! Landings and bonks are counted on the frame the contact begins.

use log::warn;

use crate::components::body::Body;
use crate::components::hotspotcollider::{HotspotCollider, HotspotSide};
use crate::components::{Component, Context};
use crate::entity::ComponentId;
use crate::resources::input::Key;
use crate::world::World;

#[derive(Debug, Clone, PartialEq)]
pub struct PlatformerController {
    /// Horizontal speed in meters per second.
    pub move_speed: f32,
    /// Vertical velocity set by a jump (positive is up).
    pub jump_speed: f32,
    pub jump_key: Key,
    body: Option<ComponentId>,
    hotspots: Option<ComponentId>,
    prev_head_contact: bool,
    prev_foot_contact: bool,
    landings: u32,
    bonks: u32,
}

impl Default for PlatformerController {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformerController {
    pub fn new() -> Self {
        Self {
            move_speed: 8.0,
            jump_speed: 10.0,
            jump_key: Key::Space,
            body: None,
            hotspots: None,
            prev_head_contact: false,
            prev_foot_contact: false,
            landings: 0,
            bonks: 0,
        }
    }

    pub fn with_speeds(mut self, move_speed: f32, jump_speed: f32) -> Self {
        self.move_speed = move_speed;
        self.jump_speed = jump_speed;
        self
    }

    pub fn landings(&self) -> u32 {
        self.landings
    }

    pub fn bonks(&self) -> u32 {
        self.bonks
    }

    fn contact(&self, world: &World, side: HotspotSide) -> bool {
        self.hotspots
            .and_then(|id| world.component::<HotspotCollider>(id))
            .is_some_and(|h| h.is_side_triggered(side))
    }

    /// Feet hotspots touch a solid tile.
    pub fn foot_contact(&self, world: &World) -> bool {
        self.contact(world, HotspotSide::Bottom)
    }

    /// Head hotspots touch a solid tile.
    pub fn head_contact(&self, world: &World) -> bool {
        self.contact(world, HotspotSide::Top)
    }

    fn body_mut<'w>(&self, world: &'w mut World) -> Option<&'w mut Body> {
        self.body.and_then(|id| world.component_mut::<Body>(id))
    }
}

impl Component for PlatformerController {
    fn initialize(&mut self, cx: &mut Context<'_>) {
        self.body = cx.first::<Body>();
        self.hotspots = cx.first::<HotspotCollider>();
        if self.body.is_none() || self.hotspots.is_none() {
            warn!(
                "PlatformerController on entity {} needs a Body and a HotspotCollider",
                cx.entity
            );
        }
    }

    fn logic_update(&mut self, cx: &mut Context<'_>, dt: f32) {
        if !cx.is_active() {
            return;
        }

        let movement = cx.input().axis(Key::Left, Key::Right);
        let jump = cx.input().pressed(self.jump_key);
        if let Some(tx) = cx.transform_mut() {
            tx.add_x(movement * self.move_speed * dt);
        }

        if jump && self.foot_contact(cx.world) {
            let jump_speed = self.jump_speed;
            if let Some(body) = self.body_mut(cx.world) {
                body.velocity.y = jump_speed;
            }
        }
    }

    fn late_update(&mut self, cx: &mut Context<'_>, _dt: f32) {
        let head = self.head_contact(cx.world);
        let foot = self.foot_contact(cx.world);

        if let Some(body) = self.body_mut(cx.world) {
            if foot && body.velocity.y < 0.0 {
                body.velocity.y = 0.0;
            }
            if head && body.velocity.y > 0.0 {
                body.velocity.y = 0.0;
            }
        }

        if foot && !self.prev_foot_contact {
            self.landings += 1;
        }
        if head && !self.prev_head_contact {
            self.bonks += 1;
        }
        self.prev_head_contact = head;
        self.prev_foot_contact = foot;
    }
}
