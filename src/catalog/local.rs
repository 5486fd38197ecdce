use super::{BuildReport, SourceFailure};
use crate::constants::IMAGE_EXTENSIONS;
use crate::types::CatalogEntry;
use std::fs;
use std::path::{Path, PathBuf};

/// Inline every image in `dir`, in sorted file name order.
///
/// The directory is created when missing. An unreadable file is recorded and
/// skipped; a directory that cannot be created or listed yields an empty
/// report with a single failure.
pub fn scan_dir(dir: &Path) -> BuildReport {
    let mut report = BuildReport::default();
    let dir_label = dir.display().to_string();

    if let Err(e) = fs::create_dir_all(dir) {
        report
            .failures
            .push(SourceFailure::new(&dir_label, &dir_label, e.into()));
        return report;
    }

    let listing = match fs::read_dir(dir) {
        Ok(listing) => listing,
        Err(e) => {
            report
                .failures
                .push(SourceFailure::new(&dir_label, &dir_label, e.into()));
            return report;
        }
    };

    let mut images: Vec<(PathBuf, String)> = Vec::new();
    for entry in listing {
        match entry {
            Ok(entry) => {
                let path = entry.path();
                if let Some(mime) = image_mime(&path) {
                    images.push((path, mime));
                }
            }
            Err(e) => report
                .failures
                .push(SourceFailure::new(&dir_label, &dir_label, e.into())),
        }
    }
    images.sort_by(|(a, _), (b, _)| a.file_name().cmp(&b.file_name()));

    for (path, mime) in images {
        let name = entry_name(&path);
        match fs::read(&path) {
            Ok(bytes) => report.entries.push(CatalogEntry::inline(name, &mime, &bytes)),
            Err(e) => report.failures.push(SourceFailure::new(
                name,
                path.display().to_string(),
                e.into(),
            )),
        }
    }

    report
}

/// MIME type for a supported image path, `None` for anything else.
pub fn image_mime(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    if !IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        return None;
    }
    let subtype = if ext == "jpg" { "jpeg" } else { ext.as_str() };
    Some(format!("image/{}", subtype))
}

fn entry_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
