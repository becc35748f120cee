//! Frame driver.
//!
//! [`Engine`] owns the world, the clock, the configuration and the render
//! backend, and runs one frame per [`Engine::update`] call. Every phase runs
//! to completion over all entities before the next one starts:
//!
//! ```text
//! dt  -> hotkeys -> logic update -> physics update -> late update
//!     -> clean-up -> render -> debug draw -> input rotation
//! ```
//!
//! The host feeds key levels into `engine.world.input` before calling
//! `update`; edges are dropped at the end of the frame.

use std::rc::Rc;

use log::{error, info};

use crate::error::EngineError;
use crate::resources::debugdraw::DebugDraw;
use crate::resources::gameconfig::EngineConfig;
use crate::resources::input::Key;
use crate::resources::worldtime::WorldTime;
use crate::systems::physics::physics_update;
use crate::systems::render::{self, Renderer};
use crate::systems::time::{select_dt, update_world_time};
use crate::world::{Scene, World};

pub struct Engine {
    pub world: World,
    pub time: WorldTime,
    pub config: EngineConfig,
    renderer: Box<dyn Renderer>,
}

impl Engine {
    /// Build an engine from a loaded configuration.
    pub fn new(config: EngineConfig, renderer: Box<dyn Renderer>) -> Self {
        let mut world = World::new();
        world.physics.set_gravity(config.gravity);
        world.debug = DebugDraw::new(config.debug_draw);
        let time = WorldTime {
            time_scale: config.time_scale,
            ..WorldTime::default()
        };
        Self {
            world,
            time,
            config,
            renderer,
        }
    }

    pub fn renderer(&self) -> &dyn Renderer {
        &*self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut dyn Renderer {
        &mut *self.renderer
    }

    pub fn frame_count(&self) -> u64 {
        self.time.frame_count
    }

    /// Replace the current scene.
    pub fn load_scene(&mut self, scene: Rc<dyn Scene>) -> Result<(), EngineError> {
        info!("Loading scene '{}'", scene.name());
        self.world.load(scene)
    }

    /// Run one frame. `real_dt` is the measured time since the last frame;
    /// it is ignored in fixed-step mode. Returns the dt the phases received.
    pub fn update(&mut self, real_dt: f32) -> f32 {
        let dt = select_dt(self.config.dt_mode, self.config.fixed_timestep, real_dt);
        let dt = update_world_time(&mut self.time, dt);

        self.handle_hotkeys();

        self.world.logic_update(dt);
        physics_update(&mut self.world, dt);
        self.world.late_update(dt);
        self.world.clean_up();

        let meter = self.config.meter;
        render::render(&self.world, &mut *self.renderer, meter);

        if self.world.debug.is_enabled() {
            self.world.debug_draw();
            let shapes = self.world.debug.take();
            self.renderer.debug_draw(&shapes, meter);
        }

        self.world.input.rotate();
        self.time.frame_count += 1;
        dt
    }

    fn handle_hotkeys(&mut self) {
        let input = &self.world.input;
        if !input.down(Key::Ctrl) {
            return;
        }
        let (toggle_debug, reload) = (input.pressed(Key::D), input.pressed(Key::R));

        if toggle_debug {
            let enabled = self.world.debug.toggle();
            info!("Debug draw {}", if enabled { "on" } else { "off" });
        }
        if reload {
            if let Err(e) = self.world.reload() {
                error!("Reload failed: {}", e);
            }
        }
    }
}
