use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::{Error, Result};

/// Stable identity of a memory (creation time in epoch millis for new ones)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryId(pub i64);

impl std::fmt::Display for MemoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of one collection of memories; a new one is minted whenever
/// membership changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollectionId(Uuid);

impl CollectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CollectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CollectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One photo story
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Memory {
    pub id: MemoryId,
    pub title: String,
    pub date: NaiveDate,
    /// Hosted URL, `data:` URL, or empty when the memory has no picture
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub story: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapter: Option<u32>,
}

impl Memory {
    /// Date as shown to readers, e.g. "January 15, 2024"
    pub fn long_date(&self) -> String {
        self.date.format("%B %-d, %Y").to_string()
    }

    pub fn has_image(&self) -> bool {
        !self.image.is_empty()
    }

    /// True when the image is embedded rather than hosted
    pub fn image_is_embedded(&self) -> bool {
        self.image.starts_with("data:")
    }

    /// Hosted image location, if the image is a web URL
    pub fn image_url(&self) -> Option<Url> {
        Url::parse(&self.image)
            .ok()
            .filter(|u| matches!(u.scheme(), "http" | "https"))
    }
}

/// Validated data for a memory that has not been added to a store yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewMemory {
    pub title: String,
    pub date: NaiveDate,
    pub story: String,
    pub image: String,
}

/// Free-form state of the "new memory" form
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryDraft {
    pub title: String,
    /// `YYYY-MM-DD`; blank means today
    pub date: String,
    pub story: String,
    pub image: String,
}

impl Default for MemoryDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            date: Local::now().date_naive().format("%Y-%m-%d").to_string(),
            story: String::new(),
            image: String::new(),
        }
    }
}

impl MemoryDraft {
    pub fn validate(&self) -> Result<NewMemory> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(Error::Validation("title is required".to_string()));
        }

        let date = self.date.trim();
        let date = if date.is_empty() {
            Local::now().date_naive()
        } else {
            NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .map_err(|_| Error::Validation(format!("invalid date '{}', expected YYYY-MM-DD", date)))?
        };

        let image = self.image.trim();
        if !image.is_empty() && !image.starts_with("data:image/") {
            let url = Url::parse(image)
                .map_err(|e| Error::Validation(format!("invalid image reference: {}", e)))?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(Error::Validation(format!(
                    "unsupported image scheme '{}'",
                    url.scheme()
                )));
            }
        }

        Ok(NewMemory {
            title: title.to_string(),
            date,
            story: self.story.trim().to_string(),
            image: image.to_string(),
        })
    }
}
