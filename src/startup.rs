//! Building phase: resolve the configured source into a catalog and report
//! the outcome before any request is served.

use crate::catalog::{build_catalog, BuildReport, SourceConfig};
use crate::config::Config;
use crate::error::Result;
use crate::infra::http_client::ReqwestHttp;
use crate::types::Catalog;
use tracing::{info, warn};

pub async fn build_and_report(config: &Config) -> Result<Catalog> {
    let fetcher = ReqwestHttp::new(config.fetch_timeout())?;

    info!(mode = config.source.mode_name(), "Loading chain catalog");
    let report = build_catalog(&config.source, &fetcher).await;
    log_report(&config.source, &report);

    Ok(report.into_catalog())
}

pub fn log_report(source: &SourceConfig, report: &BuildReport) {
    for failure in &report.failures {
        warn!(
            item = %failure.item,
            source = %failure.source,
            "Failed to load: {}",
            failure.reason
        );
    }

    info!(
        mode = source.mode_name(),
        loaded = report.loaded(),
        skipped = report.skipped(),
        "Total chains loaded: {}",
        report.loaded()
    );

    if report.entries.is_empty() {
        warn!("Catalog is empty; /api/chains will return an empty list");
    }
}
