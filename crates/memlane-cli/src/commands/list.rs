use std::path::Path;

use anyhow::Result;

use super::load_store;

pub fn run(memories: Option<&Path>, json: bool) -> Result<()> {
    let store = load_store(memories)?;

    if json {
        let all: Vec<_> = store.iter().collect();
        println!("{}", serde_json::to_string_pretty(&all)?);
        return Ok(());
    }

    if store.is_empty() {
        println!("No memories yet.");
        return Ok(());
    }

    println!("Memories ({}):\n", store.len());

    for (i, memory) in store.iter().enumerate() {
        let chapter = memory
            .chapter
            .map(|c| format!(" [chapter {}]", c))
            .unwrap_or_default();
        println!("  {}. {} - {}{}", i + 1, memory.title, memory.long_date(), chapter);

        let image = if let Some(url) = memory.image_url() {
            url.to_string()
        } else if memory.image_is_embedded() {
            "(embedded)".to_string()
        } else {
            "(none)".to_string()
        };
        println!("    Image: {}", image);
        if !memory.story.is_empty() {
            println!("    {}", memory.story);
        }
        println!();
    }

    Ok(())
}
