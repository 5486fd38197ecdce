use super::{local, BuildReport};
use crate::types::CatalogEntry;
use std::path::Path;

/// Static entries verbatim, then the fallback directory's images if one is set.
pub fn with_fallback(entries: &[CatalogEntry], fallback_dir: Option<&Path>) -> BuildReport {
    let mut report = BuildReport {
        entries: entries.to_vec(),
        failures: Vec::new(),
    };
    if let Some(dir) = fallback_dir {
        report.extend(local::scan_dir(dir));
    }
    report
}
