use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use super::models::Memory;
use crate::Result;

/// Downloadable form of a memory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRecord {
    pub title: String,
    pub date: String,
    pub story: String,
    pub image: String,
}

pub fn export_record(memory: &Memory) -> ExportRecord {
    ExportRecord {
        title: memory.title.clone(),
        date: memory.date.format("%Y-%m-%d").to_string(),
        story: memory.story.clone(),
        image: memory.image.clone(),
    }
}

/// `memory-<title>.json` with whitespace runs and path separators as `-`
pub fn export_file_name(memory: &Memory) -> String {
    let title = memory
        .title
        .replace(['/', '\\'], "-")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");
    format!("memory-{}.json", title)
}

/// Write the export record into `dir` and return the file path
pub fn export_to_dir(memory: &Memory, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(memory));
    let content = serde_json::to_string_pretty(&export_record(memory))?;
    std::fs::write(&path, content)?;
    info!("Exported memory {} to {}", memory.id, path.display());
    Ok(path)
}

/// Plain-text payload for the platform share sheet
pub fn share_text(memory: &Memory) -> String {
    let mut text = format!("{} ({})", memory.title, memory.long_date());
    if !memory.story.is_empty() {
        text.push_str("\n\n");
        text.push_str(&memory.story);
    }
    if let Some(url) = memory.image_url() {
        text.push_str("\n\n");
        text.push_str(url.as_str());
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;

    fn golden_hour() -> Memory {
        MemoryStore::samples().get_index(4).cloned().unwrap()
    }

    #[test]
    fn test_file_name_collapses_whitespace() {
        let mut memory = golden_hour();
        assert_eq!(export_file_name(&memory), "memory-Golden-Hour.json");
        memory.title = "A  day\tat the/beach".to_string();
        assert_eq!(export_file_name(&memory), "memory-A-day-at-the-beach.json");
    }

    #[test]
    fn test_export_writes_pretty_record() {
        let dir = tempfile::tempdir().unwrap();
        let memory = golden_hour();
        let path = export_to_dir(&memory, &dir.path().join("exports")).unwrap();
        assert!(path.ends_with("memory-Golden-Hour.json"));

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\n  \"title\": \"Golden Hour\""));
        let record: ExportRecord = serde_json::from_str(&content).unwrap();
        assert_eq!(record, export_record(&memory));
        assert_eq!(record.date, "2024-09-05");
    }

    #[test]
    fn test_share_text() {
        let memory = golden_hour();
        let text = share_text(&memory);
        assert!(text.starts_with("Golden Hour (September 5, 2024)"));
        assert!(text.contains("something beautiful"));
        assert!(text.contains("https://images.unsplash.com/"));

        let mut embedded = memory;
        embedded.image = "data:image/png;base64,AAAA".to_string();
        embedded.story.clear();
        assert_eq!(share_text(&embedded), "Golden Hour (September 5, 2024)");
    }
}
