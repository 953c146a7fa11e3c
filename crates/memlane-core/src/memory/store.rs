use std::path::Path;

use chrono::{NaiveDate, Utc};
use tracing::{debug, info};

use super::models::{CollectionId, Memory, MemoryId, NewMemory};
use crate::{Error, Result};

/// Ordered, in-memory collection of memories.
///
/// Order defines carousel adjacency. Every change of membership mints a new
/// [`CollectionId`] so navigators know to reset.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    memories: Vec<Memory>,
    collection: CollectionId,
    last_id: i64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_memories(Vec::new())
    }

    pub fn with_memories(memories: Vec<Memory>) -> Self {
        let last_id = memories.iter().map(|m| m.id.0).max().unwrap_or(0);
        Self {
            memories,
            collection: CollectionId::new(),
            last_id,
        }
    }

    /// The built-in sample collection
    pub fn samples() -> Self {
        const SAMPLES: [(&str, (i32, u32, u32), &str, &str); 6] = [
            (
                "The Beginning",
                (2024, 1, 15),
                "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?w=800&h=800&fit=crop",
                "Every journey starts with a single step. This was the moment everything changed.",
            ),
            (
                "City of Dreams",
                (2024, 3, 22),
                "https://images.unsplash.com/photo-1514565131-fce0801e5785?w=800&h=800&fit=crop",
                "The city lights welcomed us with open arms. A new chapter was about to unfold.",
            ),
            (
                "Ocean Whispers",
                (2024, 5, 10),
                "https://images.unsplash.com/photo-1505142468610-359e7d316be0?w=800&h=800&fit=crop",
                "The waves told stories of distant lands. We listened, and we learned.",
            ),
            (
                "Mountain Peak",
                (2024, 7, 18),
                "https://images.unsplash.com/photo-1464822759023-fed622ff2c3b?w=800&h=800&fit=crop",
                "At the summit, we found more than just a view. We found ourselves.",
            ),
            (
                "Golden Hour",
                (2024, 9, 5),
                "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=800&h=800&fit=crop",
                "As the sun set, we realized this was just the beginning of something beautiful.",
            ),
            (
                "Winter Magic",
                (2024, 12, 1),
                "https://images.unsplash.com/photo-1491002052546-bf38f186af56?w=800&h=800&fit=crop",
                "The snow fell softly, covering everything in a blanket of pure white wonder.",
            ),
        ];

        let memories = SAMPLES
            .iter()
            .enumerate()
            .filter_map(|(i, (title, (y, m, d), image, story))| {
                Some(Memory {
                    id: MemoryId(i as i64 + 1),
                    title: title.to_string(),
                    date: NaiveDate::from_ymd_opt(*y, *m, *d)?,
                    image: image.to_string(),
                    story: story.to_string(),
                    chapter: Some(i as u32 + 1),
                })
            })
            .collect();
        Self::with_memories(memories)
    }

    /// Import a JSON array of memories
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let memories: Vec<Memory> = serde_json::from_str(&content)?;
        info!("Loaded {} memories from {}", memories.len(), path.display());
        Ok(Self::with_memories(memories))
    }

    /// Write the whole collection as a JSON array
    pub fn save_json(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.memories)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.memories.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.memories.is_empty()
    }

    pub fn collection_id(&self) -> CollectionId {
        self.collection
    }

    pub fn iter(&self) -> impl Iterator<Item = &Memory> {
        self.memories.iter()
    }

    pub fn get(&self, id: MemoryId) -> Option<&Memory> {
        self.memories.iter().find(|m| m.id == id)
    }

    pub fn get_index(&self, index: usize) -> Option<&Memory> {
        self.memories.get(index)
    }

    pub fn position(&self, id: MemoryId) -> Option<usize> {
        self.memories.iter().position(|m| m.id == id)
    }

    /// Append a memory as the next chapter
    pub fn add(&mut self, new: NewMemory) -> &Memory {
        let id = self.next_id(Utc::now().timestamp_millis());
        let chapter = self.memories.len() as u32 + 1;
        self.memories.push(Memory {
            id,
            title: new.title,
            date: new.date,
            image: new.image,
            story: new.story,
            chapter: Some(chapter),
        });
        self.collection = CollectionId::new();
        debug!(%id, chapter, "memory added");
        &self.memories[self.memories.len() - 1]
    }

    pub fn remove(&mut self, id: MemoryId) -> Result<Memory> {
        let index = self.position(id).ok_or(Error::MemoryNotFound(id.0))?;
        let removed = self.memories.remove(index);
        self.collection = CollectionId::new();
        debug!(%id, "memory removed");
        Ok(removed)
    }

    /// Epoch-millis id, bumped past the last one handed out
    fn next_id(&mut self, now_ms: i64) -> MemoryId {
        let id = now_ms.max(self.last_id + 1);
        self.last_id = id;
        MemoryId(id)
    }
}
