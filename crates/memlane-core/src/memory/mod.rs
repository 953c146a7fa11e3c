mod export;
mod models;
mod store;

pub use export::{export_file_name, export_record, export_to_dir, share_text, ExportRecord};
pub use models::{CollectionId, Memory, MemoryDraft, MemoryId, NewMemory};
pub use store::MemoryStore;
