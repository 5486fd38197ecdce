use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

/// One published image: a display name plus something usable as an image `src`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    /// Either a `data:` URI or a direct external URL. Exposed as `data` on the wire.
    #[serde(rename = "data", alias = "url")]
    pub image_ref: String,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, image_ref: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image_ref: image_ref.into(),
        }
    }

    /// Build an entry whose image is inlined as a base64 data URI.
    pub fn inline(name: impl Into<String>, mime_type: &str, bytes: &[u8]) -> Self {
        Self::new(name, data_uri(mime_type, bytes))
    }

    pub fn is_inline(&self) -> bool {
        self.image_ref.starts_with("data:")
    }
}

pub fn data_uri(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}

/// The ordered catalog served for the lifetime of the process.
///
/// Constructed once from a build and never mutated afterwards; share it behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<CatalogEntry>> for Catalog {
    fn from(entries: Vec<CatalogEntry>) -> Self {
        Self::new(entries)
    }
}
