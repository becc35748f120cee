//! Registry of renderable components, bucketed by layer.
//!
//! Buckets are kept in a `BTreeMap` so iteration is already back-to-front.
//! Within a bucket order is unspecified (swap-remove).

use std::collections::BTreeMap;

use log::warn;

use crate::entity::ComponentId;

#[derive(Debug, Clone, Default)]
pub struct GraphicsRegistry {
    layers: BTreeMap<i32, Vec<ComponentId>>,
}

impl GraphicsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, id: ComponentId, layer: i32) {
        let bucket = self.layers.entry(layer).or_default();
        if bucket.contains(&id) {
            warn!("Graphical {} registered twice on layer {}", id, layer);
            return;
        }
        bucket.push(id);
    }

    pub fn remove(&mut self, id: ComponentId, layer: i32) -> bool {
        let Some(bucket) = self.layers.get_mut(&layer) else {
            return false;
        };
        let Some(index) = bucket.iter().position(|c| *c == id) else {
            return false;
        };
        bucket.swap_remove(index);
        if bucket.is_empty() {
            self.layers.remove(&layer);
        }
        true
    }

    /// Every registered id with its layer, lowest layer first.
    pub fn iter(&self) -> impl Iterator<Item = (i32, ComponentId)> + '_ {
        self.layers
            .iter()
            .flat_map(|(layer, ids)| ids.iter().map(move |id| (*layer, *id)))
    }

    pub fn len(&self) -> usize {
        self.layers.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}
