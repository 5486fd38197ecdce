//! Startup-time catalog construction.
//!
//! A build resolves one [`SourceConfig`] into a [`BuildReport`]: the entries
//! that resolved plus one [`SourceFailure`] per item that did not. Nothing in
//! here logs outcomes; the startup routine decides how to report them.

pub mod direct;
pub mod local;
pub mod remote;

use crate::app::ports::ImageFetcher;
use crate::constants::DEFAULT_IMAGE_DIR;
use crate::error::CatalogError;
use crate::types::{Catalog, CatalogEntry};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Where catalog images come from. Exactly one mode is active per process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum SourceConfig {
    /// Download each locator once and inline the bytes.
    #[serde(rename = "remote")]
    RemoteFetch { links: Vec<String> },
    /// Inline every image file found in a directory.
    #[serde(rename = "local")]
    LocalDirectory {
        #[serde(default = "default_dir")]
        dir: PathBuf,
    },
    /// Serve pre-built entries verbatim, optionally followed by a directory scan.
    #[serde(rename = "direct")]
    DirectReference {
        #[serde(default)]
        entries: Vec<CatalogEntry>,
        #[serde(default)]
        fallback_dir: Option<PathBuf>,
    },
}

fn default_dir() -> PathBuf {
    PathBuf::from(DEFAULT_IMAGE_DIR)
}

impl SourceConfig {
    pub fn mode_name(&self) -> &'static str {
        match self {
            SourceConfig::RemoteFetch { .. } => "remote",
            SourceConfig::LocalDirectory { .. } => "local",
            SourceConfig::DirectReference { .. } => "direct",
        }
    }
}

/// A source item that was skipped during the build.
#[derive(Debug)]
pub struct SourceFailure {
    /// Display label of the item (`chain_3`, a file name, ...).
    pub item: String,
    /// Locator or path the item was resolved from.
    pub source: String,
    pub reason: CatalogError,
}

impl SourceFailure {
    pub fn new(item: impl Into<String>, source: impl Into<String>, reason: CatalogError) -> Self {
        Self {
            item: item.into(),
            source: source.into(),
            reason,
        }
    }
}

impl fmt::Display for SourceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.item, self.source, self.reason)
    }
}

/// Result of a build: successful entries in output order plus skipped items.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub entries: Vec<CatalogEntry>,
    pub failures: Vec<SourceFailure>,
}

impl BuildReport {
    pub fn loaded(&self) -> usize {
        self.entries.len()
    }

    pub fn skipped(&self) -> usize {
        self.failures.len()
    }

    /// Appends another report after this one, preserving both orders.
    pub fn extend(&mut self, other: BuildReport) {
        self.entries.extend(other.entries);
        self.failures.extend(other.failures);
    }

    pub fn into_catalog(self) -> Catalog {
        Catalog::new(self.entries)
    }
}

/// Run the build for the configured source mode.
///
/// Completes every item before returning; callers must await this before
/// serving.
pub async fn build_catalog(source: &SourceConfig, fetcher: &dyn ImageFetcher) -> BuildReport {
    match source {
        SourceConfig::RemoteFetch { links } => remote::fetch_all(fetcher, links).await,
        SourceConfig::LocalDirectory { dir } => local::scan_dir(dir),
        SourceConfig::DirectReference {
            entries,
            fallback_dir,
        } => direct::with_fallback(entries, fallback_dir.as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_config_from_toml() {
        let source: SourceConfig = toml::from_str(
            r#"
            mode = "direct"
            fallback_dir = "chains"

            [[entries]]
            name = "Rope"
            url = "https://cdn.example.com/rope.png"
            "#,
        )
        .unwrap();

        assert_eq!(
            source,
            SourceConfig::DirectReference {
                entries: vec![CatalogEntry::new("Rope", "https://cdn.example.com/rope.png")],
                fallback_dir: Some(PathBuf::from("chains")),
            }
        );
        assert_eq!(source.mode_name(), "direct");
    }

    #[test]
    fn test_local_mode_defaults_dir() {
        let source: SourceConfig = toml::from_str(r#"mode = "local""#).unwrap();
        assert_eq!(
            source,
            SourceConfig::LocalDirectory {
                dir: PathBuf::from("chains")
            }
        );
    }

    #[test]
    fn test_report_extend_keeps_order() {
        let mut first = BuildReport {
            entries: vec![CatalogEntry::new("a", "https://x/a.png")],
            failures: vec![],
        };
        let second = BuildReport {
            entries: vec![CatalogEntry::new("b", "https://x/b.png")],
            failures: vec![SourceFailure::new(
                "c",
                "c.png",
                CatalogError::Status { status: 404 },
            )],
        };
        first.extend(second);

        assert_eq!(first.loaded(), 2);
        assert_eq!(first.skipped(), 1);
        let names: Vec<_> = first.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(first.failures[0].to_string(), "c (c.png): HTTP 404");
    }
}
