//! Tilemap storage and data types.
//!
//! Provides simple serializable structs for tile map files and a store for
//! loaded maps. Scenes turn a loaded layer into a [`TileMap`] component with
//! [`TilemapData::build_layer`].
//!
//! File positions count rows from the top of the map; the engine is Y-up, so
//! row `y` becomes tile row `map_height - 1 - y`.

use std::path::Path;

use log::{info, warn};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::components::graphical::Color;
use crate::components::tilemap::{Tile, TileMap};
use crate::error::EngineError;

/// Single tile placement within a layer.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Tileposition {
    /// X coordinate in tiles.
    pub x: u32,
    /// Y coordinate in tiles, counted from the top row.
    pub y: u32,
    /// Palette identifier.
    pub id: u32,
}

/// A named tile layer containing positions.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Tilelayer {
    pub name: String,
    /// Whether the layer should become the solid map.
    #[serde(default)]
    pub solid: bool,
    pub positions: Vec<Tileposition>,
}

/// How a palette id looks and behaves.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PaletteEntry {
    pub id: u32,
    #[serde(default)]
    pub solid: bool,
    #[serde(default)]
    pub color: Color,
    #[serde(default)]
    pub image: Option<String>,
}

/// Tilemap metadata and layers.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TilemapData {
    /// Map width in tiles.
    pub map_width: u32,
    /// Map height in tiles.
    pub map_height: u32,
    pub layers: Vec<Tilelayer>,
    #[serde(default)]
    pub palette: Vec<PaletteEntry>,
}

impl TilemapData {
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn layer(&self, name: &str) -> Option<&Tilelayer> {
        self.layers.iter().find(|l| l.name == name)
    }

    /// Build the [`TileMap`] of one layer. Ids missing from the palette are
    /// logged and skipped; positions outside the map are logged and skipped.
    pub fn build_layer(&self, layer: &Tilelayer) -> TileMap {
        let palette: FxHashMap<u32, &PaletteEntry> =
            self.palette.iter().map(|entry| (entry.id, entry)).collect();

        let mut map = if layer.solid {
            TileMap::new().solid()
        } else {
            TileMap::new()
        };
        for position in &layer.positions {
            if position.x >= self.map_width || position.y >= self.map_height {
                warn!(
                    "Layer '{}': tile ({}, {}) outside {}x{} map",
                    layer.name, position.x, position.y, self.map_width, self.map_height
                );
                continue;
            }
            let Some(entry) = palette.get(&position.id) else {
                warn!("Layer '{}': unknown palette id {}", layer.name, position.id);
                continue;
            };
            let mut tile = Tile::new(entry.solid, entry.color);
            tile.image = entry.image.clone();
            let y = self.map_height as i32 - 1 - position.y as i32;
            map.add(position.x as i32, y, tile);
        }
        map
    }
}

/// Registry of loaded tilemaps by key.
#[derive(Debug, Default)]
pub struct TilemapStore {
    pub map: FxHashMap<String, TilemapData>,
}

impl TilemapStore {
    /// Create an empty store.
    pub fn new() -> Self {
        TilemapStore {
            map: FxHashMap::default(),
        }
    }

    /// Read and parse a JSON tile map file, then store it under `key`.
    pub fn load_from_file(
        &mut self,
        key: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<&TilemapData, EngineError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| EngineError::io(path, e))?;
        let data = TilemapData::from_json(&json)?;
        let key = key.into();
        info!(
            "Loaded tilemap '{}' from {:?}: {}x{}, {} layers",
            key,
            path,
            data.map_width,
            data.map_height,
            data.layers.len()
        );
        self.map.insert(key.clone(), data);
        self.map
            .get(&key)
            .ok_or_else(|| EngineError::Config(format!("tilemap '{}' vanished", key)))
    }

    /// Get a tilemap by its key.
    pub fn get(&self, key: impl AsRef<str>) -> Option<&TilemapData> {
        self.map.get(key.as_ref())
    }

    /// Insert a tilemap with a specific key.
    pub fn insert(&mut self, key: impl Into<String>, tilemap: TilemapData) {
        self.map.insert(key.into(), tilemap);
    }

    /// Clear all loaded tilemaps.
    pub fn clear(&mut self) {
        self.map.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JSON: &str = r#"{
        "map_width": 4,
        "map_height": 3,
        "layers": [
            { "name": "ground", "solid": true,
              "positions": [ { "x": 0, "y": 2, "id": 1 }, { "x": 1, "y": 2, "id": 1 },
                             { "x": 3, "y": 0, "id": 2 }, { "x": 9, "y": 0, "id": 1 },
                             { "x": 2, "y": 2, "id": 7 } ] },
            { "name": "decor", "positions": [] }
        ],
        "palette": [
            { "id": 1, "solid": true, "color": { "r": 90, "g": 90, "b": 90, "a": 255 } },
            { "id": 2, "image": "flower" }
        ]
    }"#;

    #[test]
    fn test_parse_defaults() {
        let data = TilemapData::from_json(JSON).unwrap();
        assert_eq!(data.layers.len(), 2);
        assert!(!data.layer("decor").unwrap().solid);
        assert!(!data.palette[1].solid);
        assert_eq!(data.palette[1].color, Color::WHITE);
    }

    #[test]
    fn test_build_layer_flips_rows() {
        let data = TilemapData::from_json(JSON).unwrap();
        let map = data.build_layer(data.layer("ground").unwrap());

        assert!(map.is_solid());
        assert_eq!(map.len(), 3);
        // bottom row of the file is row 0
        assert!(map.get(0, 0).unwrap().solid);
        assert!(map.get(1, 0).unwrap().solid);
        let flower = map.get(3, 2).unwrap();
        assert!(!flower.solid);
        assert_eq!(flower.image.as_deref(), Some("flower"));
    }

    #[test]
    fn test_bad_json_is_json_error() {
        let err = TilemapData::from_json("{ not json").unwrap_err();
        assert!(matches!(err, EngineError::Json(_)));
    }

    #[test]
    fn test_store_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("level.json");
        std::fs::write(&path, JSON).unwrap();

        let mut store = TilemapStore::new();
        store.load_from_file("level", &path).unwrap();
        assert!(store.get("level").is_some());

        let err = store.load_from_file("missing", dir.path().join("nope.json"));
        assert!(matches!(err, Err(EngineError::Io { .. })));
        store.clear();
        assert!(store.get("level").is_none());
    }
}
