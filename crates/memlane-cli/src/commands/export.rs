use std::path::Path;

use anyhow::{bail, Context, Result};
use memlane_core::memory::export_to_dir;

use super::load_store;

pub fn run(memories: Option<&Path>, index: Option<usize>, out: &Path) -> Result<()> {
    let store = load_store(memories)?;

    let selected: Vec<_> = match index {
        Some(i) => match i.checked_sub(1).and_then(|i| store.get_index(i)) {
            Some(memory) => vec![memory],
            None => bail!("No memory at position {} (have {})", i, store.len()),
        },
        None => store.iter().collect(),
    };

    if selected.is_empty() {
        println!("No memories to export.");
        return Ok(());
    }

    for memory in selected {
        let path = export_to_dir(memory, out)?;
        println!("{} -> {}", memory.title, path.display());
    }

    Ok(())
}

/// Write every memory into a single JSON array file
pub fn save_collection(memories: Option<&Path>, file: &Path) -> Result<()> {
    let store = load_store(memories)?;
    store
        .save_json(file)
        .with_context(|| format!("Failed to save collection to {}", file.display()))?;
    println!("Saved {} memories to {}", store.len(), file.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use memlane_core::MemoryStore;

    #[test]
    fn test_save_collection_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("backup").join("memories.json");
        save_collection(None, &file).unwrap();

        let loaded = MemoryStore::load_json(&file).unwrap();
        let samples = MemoryStore::samples();
        assert_eq!(loaded.len(), samples.len());
        assert_eq!(loaded.get_index(2), samples.get_index(2));

        // Round trip through --memories
        let again = dir.path().join("again.json");
        save_collection(Some(&file), &again).unwrap();
        assert_eq!(MemoryStore::load_json(&again).unwrap().len(), samples.len());
    }

    #[test]
    fn test_export_rejects_bad_position() {
        let dir = tempfile::tempdir().unwrap();
        assert!(run(None, Some(0), dir.path()).is_err());
        assert!(run(None, Some(7), dir.path()).is_err());
        run(None, Some(1), dir.path()).unwrap();
        assert!(dir.path().join("memory-The-Beginning.json").exists());
    }
}
