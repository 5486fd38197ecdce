use super::{BuildReport, SourceFailure};
use crate::app::ports::ImageFetcher;
use crate::constants::{REMOTE_MIME_TYPE, REMOTE_NAME_PREFIX};
use crate::error::{CatalogError, Result};
use crate::types::CatalogEntry;

/// Fetch every locator in order, one attempt each.
///
/// Entries are named by their 1-based position in `links`, so a skipped
/// locator leaves a gap in the numbering.
pub async fn fetch_all(fetcher: &dyn ImageFetcher, links: &[String]) -> BuildReport {
    let mut report = BuildReport::default();

    for (index, url) in links.iter().enumerate() {
        let name = format!("{}{}", REMOTE_NAME_PREFIX, index + 1);
        match fetch_one(fetcher, url).await {
            Ok(bytes) => report
                .entries
                .push(CatalogEntry::inline(name, REMOTE_MIME_TYPE, &bytes)),
            Err(reason) => report.failures.push(SourceFailure::new(name, url, reason)),
        }
    }

    report
}

async fn fetch_one(fetcher: &dyn ImageFetcher, url: &str) -> Result<Vec<u8>> {
    let resp = fetcher.get(url).await?;
    if resp.status != 200 {
        return Err(CatalogError::Status {
            status: resp.status,
        });
    }
    Ok(resp.bytes)
}
