//! Saving and loading drawings through a key-value blob store.
//!
//! The blob is the drawing's markup. Loading never fails outward: missing
//! data gives an empty drawing, and unreadable data is logged and dropped.

use std::collections::HashMap;
use thiserror::Error;
use vs_core::{SceneGraph, emit_markup, parse_markup};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// The backing store cannot be reached (e.g. storage disabled).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The store refused the write (e.g. quota exceeded).
    #[error("storage write failed: {0}")]
    Write(String),
}

/// Key-value string storage.
pub trait BlobStore {
    fn save(&mut self, key: &str, blob: &str) -> Result<(), StoreError>;

    /// `Ok(None)` when nothing is stored under `key`.
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;
}

/// In-memory store for native use and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryStore {
    fn save(&mut self, key: &str, blob: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), blob.to_string());
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }
}

/// Serialize `graph` and store it under `key`.
pub fn save_drawing(
    store: &mut dyn BlobStore,
    key: &str,
    graph: &SceneGraph,
) -> Result<(), StoreError> {
    let markup = emit_markup(graph);
    store.save(key, &markup)?;
    log::debug!("saved {} nodes under {key:?}", graph.len());
    Ok(())
}

/// Load the drawing stored under `key`, or an empty one.
pub fn load_drawing(store: &dyn BlobStore, key: &str) -> SceneGraph {
    let markup = match store.load(key) {
        Ok(Some(markup)) => markup,
        Ok(None) => return SceneGraph::new(),
        Err(e) => {
            log::warn!("could not read saved drawing: {e}");
            return SceneGraph::new();
        }
    };
    match parse_markup(&markup) {
        Ok(graph) => {
            log::debug!("loaded {} nodes from {key:?}", graph.len());
            graph
        }
        Err(e) => {
            log::warn!("discarding unreadable saved drawing: {e}");
            SceneGraph::new()
        }
    }
}
