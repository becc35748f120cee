//! Engine tick integration tests: full frames through `Engine::update` with the
//! demo scenes, hotkeys and a recording render backend.

use std::cell::RefCell;
use std::rc::Rc;

use cogworks::components::collisiontint::CollisionTint;
use cogworks::components::graphical::{Color, Graphical};
use cogworks::components::platformercontroller::PlatformerController;
use cogworks::engine::Engine;
use cogworks::game::{scene_by_name, PlatformerScene, RainScene, PLAYER_START};
use cogworks::resources::debugdraw::DebugShape;
use cogworks::resources::gameconfig::EngineConfig;
use cogworks::resources::input::Key;
use cogworks::resources::tilemapstore::TilemapData;
use cogworks::systems::render::{collect_render_items, RenderItem, Renderer};
use nalgebra::Vector2;

const FRAME: f32 = 1.0 / 60.0;

#[derive(Default)]
struct Frames {
    items: Vec<usize>,
    debug: Vec<usize>,
    meters: Vec<f32>,
    pixels: Vec<Vector2<f32>>,
}

/// Counts what each frame hands to the backend.
struct CountingRenderer(Rc<RefCell<Frames>>);

impl Renderer for CountingRenderer {
    fn render(&mut self, items: &[RenderItem], meter: f32) {
        let mut frames = self.0.borrow_mut();
        frames.items.push(items.len());
        frames.meters.push(meter);
        frames.pixels = items.iter().map(|item| item.to_pixels(meter)).collect();
    }

    fn debug_draw(&mut self, shapes: &[DebugShape], _meter: f32) {
        self.0.borrow_mut().debug.push(shapes.len());
    }
}

fn engine() -> (Engine, Rc<RefCell<Frames>>) {
    let frames = Rc::new(RefCell::new(Frames::default()));
    let engine = Engine::new(
        EngineConfig::new(),
        Box::new(CountingRenderer(frames.clone())),
    );
    (engine, frames)
}

fn run(engine: &mut Engine, frames: usize) {
    for _ in 0..frames {
        engine.update(FRAME);
    }
}

#[test]
fn test_player_lands_and_walks() {
    let (mut engine, _) = engine();
    engine.load_scene(Rc::new(PlatformerScene::new())).unwrap();
    let player = engine.world.find_entity("player").unwrap();

    run(&mut engine, 90);
    let tx = engine.world.transform(player).unwrap();
    assert_eq!(tx.y(), 1.0);
    assert_eq!(tx.x(), PLAYER_START.0);

    engine.world.input.set_key(Key::Right, true);
    run(&mut engine, 15);
    let x = engine.world.transform(player).unwrap().x();
    assert!(x > PLAYER_START.0 + 1.5, "player only reached x = {}", x);
    assert_eq!(engine.world.transform(player).unwrap().y(), 1.0);
}

#[test]
fn test_jump_leaves_and_returns_to_ground() {
    let (mut engine, _) = engine();
    engine.load_scene(Rc::new(PlatformerScene::new())).unwrap();
    let player = engine.world.find_entity("player").unwrap();
    run(&mut engine, 90);

    engine.world.input.set_key(Key::Space, true);
    run(&mut engine, 10);
    assert!(engine.world.transform(player).unwrap().y() > 1.5);

    engine.world.input.set_key(Key::Space, false);
    run(&mut engine, 180);
    assert_eq!(engine.world.transform(player).unwrap().y(), 1.0);

    let controller = engine.world.first::<PlatformerController>(player).unwrap();
    let controller = engine.world.component::<PlatformerController>(controller).unwrap();
    assert_eq!(controller.landings(), 2);
}

#[test]
fn test_ctrl_r_reloads_the_scene() {
    let (mut engine, _) = engine();
    engine.load_scene(Rc::new(PlatformerScene::new())).unwrap();
    let first_player = engine.world.find_entity("player").unwrap();
    run(&mut engine, 30);

    engine.world.input.set_key(Key::Ctrl, true);
    engine.world.input.set_key(Key::R, true);
    engine.update(FRAME);

    let player = engine.world.find_entity("player").unwrap();
    assert_ne!(player, first_player);
    assert!(!engine.world.contains(first_player));
    assert_eq!(engine.world.find_entities("player").len(), 1);
    assert_eq!(engine.world.current_scene_name(), Some("platformer"));
}

#[test]
fn test_render_receives_tiles_and_graphicals() {
    let (mut engine, frames) = engine();
    engine.load_scene(Rc::new(PlatformerScene::new())).unwrap();
    run(&mut engine, 3);

    let expected = collect_render_items(&engine.world).len();
    let frames = frames.borrow();
    assert_eq!(frames.items, vec![expected; 3]);
    assert!(frames.debug.is_empty());
}

#[test]
fn test_configured_meter_reaches_the_backend() {
    let mut config = EngineConfig::new();
    config.meter = 16.0;
    let frames = Rc::new(RefCell::new(Frames::default()));
    let mut engine = Engine::new(config, Box::new(CountingRenderer(frames.clone())));
    engine.load_scene(Rc::new(PlatformerScene::new())).unwrap();
    engine.update(FRAME);

    let items = collect_render_items(&engine.world);
    let player = items
        .iter()
        .position(|item| item.layer == 1)
        .expect("player graphical is on layer 1");
    let expected = Vector2::new(items[player].position.x * 16.0, -items[player].position.y * 16.0);

    let frames = frames.borrow();
    assert_eq!(frames.meters, vec![16.0]);
    assert_eq!(frames.pixels[player], expected);
    assert_eq!(frames.pixels[player].x, PLAYER_START.0 * 16.0);
}

#[test]
fn test_debug_draw_reaches_the_backend_when_enabled() {
    let mut config = EngineConfig::new();
    config.debug_draw = true;
    let frames = Rc::new(RefCell::new(Frames::default()));
    let mut engine = Engine::new(config, Box::new(CountingRenderer(frames.clone())));
    engine.load_scene(Rc::new(PlatformerScene::new())).unwrap();
    run(&mut engine, 2);

    let frames = frames.borrow();
    assert_eq!(frames.debug.len(), 2);
    // player outline + eight probes at least
    assert!(frames.debug[0] >= 9);
    assert!(engine.world.debug.shapes().is_empty());
}

#[test]
fn test_rain_empties_onto_the_floor() {
    let (mut engine, _) = engine();
    engine.load_scene(Rc::new(RainScene::new(42, 32))).unwrap();
    assert_eq!(engine.world.entity_count(), 33);

    run(&mut engine, 600);
    assert_eq!(engine.world.entity_count(), 1);
    assert_eq!(engine.frame_count(), 600);

    let floor = engine.world.find_entity("floor").unwrap();
    let tint = engine.world.first::<CollisionTint>(floor).unwrap();
    let tint = engine.world.component::<CollisionTint>(tint).unwrap();
    assert_eq!(tint.touching(), 0);
    let graphical = engine.world.first::<Graphical>(floor).unwrap();
    assert_eq!(engine.world.component::<Graphical>(graphical).unwrap().fill, Color::GRAY);
}

#[test]
fn test_platformer_from_tilemap_json() {
    let json = r#"{
        "map_width": 6, "map_height": 4,
        "layers": [ { "name": "ground", "solid": true,
            "positions": [ {"x":0,"y":3,"id":1}, {"x":1,"y":3,"id":1}, {"x":2,"y":3,"id":1},
                           {"x":3,"y":3,"id":1}, {"x":4,"y":3,"id":1}, {"x":5,"y":3,"id":1} ] } ],
        "palette": [ { "id": 1, "solid": true } ]
    }"#;
    let data = TilemapData::from_json(json).unwrap();
    let (mut engine, _) = engine();
    engine
        .load_scene(scene_by_name("platformer", Some(data), 0).unwrap())
        .unwrap();
    let player = engine.world.find_entity("player").unwrap();

    run(&mut engine, 90);
    assert_eq!(engine.world.transform(player).unwrap().y(), 1.0);
}
