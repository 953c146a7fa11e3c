pub mod config;
pub mod export;
pub mod layout;
pub mod list;
pub mod run;
pub mod upload;

use std::path::Path;

use anyhow::{Context, Result};
use memlane_core::MemoryStore;

/// Memories from `path`, or the built-in samples
pub fn load_store(path: Option<&Path>) -> Result<MemoryStore> {
    match path {
        Some(path) => MemoryStore::load_json(path)
            .with_context(|| format!("Failed to load memories from {}", path.display())),
        None => Ok(MemoryStore::samples()),
    }
}
