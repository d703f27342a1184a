// src/pipeline/crawl.rs

//! Statute crawling pipeline.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use crate::error::Result;
use crate::models::{Config, CrawlOutcome, CrawlStats, Termination};
use crate::services::SectionCrawler;
use crate::storage::LocalStore;

/// The JSON document written to the output root after a run.
#[derive(Serialize)]
struct RunSummary<'a> {
    stats: &'a CrawlStats,
    outcome: &'a CrawlOutcome,
}

/// Run the statute crawler end to end.
pub async fn run_crawler(config: &Config) -> Result<()> {
    let start_time = Utc::now();
    log::info!(
        "Crawling {} statutes into {}",
        config.statutes.len(),
        config.output.root_dir.display()
    );

    let store = LocalStore::new(&config.output.root_dir);
    store.ensure_folders(&config.statutes).await?;

    let crawler = SectionCrawler::new(Arc::new(config.clone()), store.clone())?;
    let outcome = crawler.crawl_all().await;

    let stats = CrawlStats {
        start_time,
        end_time: Utc::now(),
        statute_count: config.statutes.len(),
        pages_written: outcome.pages_written(),
        pages_failed: outcome.pages_failed(),
    };

    let summary_path = store
        .write_summary(
            &config.output.summary_file,
            &RunSummary {
                stats: &stats,
                outcome: &outcome,
            },
        )
        .await?;

    report(&outcome, &stats);
    log::info!("Summary written to {}", summary_path.display());

    Ok(())
}

/// Log the final per-lineage and overall totals.
fn report(outcome: &CrawlOutcome, stats: &CrawlStats) {
    for lineage in &outcome.lineages {
        match &lineage.termination {
            Termination::EndOfStatute => log::info!(
                "{}: {} pages written, {} failed",
                lineage.statute,
                lineage.pages_written(),
                lineage.pages_failed()
            ),
            Termination::CycleDetected(url) => log::error!(
                "{}: stopped on repeated URL {} after {} pages",
                lineage.statute,
                url,
                lineage.pages_written()
            ),
            Termination::Failed(error) => log::error!(
                "{}: aborted after {} pages: {}",
                lineage.statute,
                lineage.pages_written(),
                error
            ),
        }
    }

    let elapsed = stats.end_time - stats.start_time;
    let level = if outcome.is_clean() {
        log::Level::Info
    } else {
        log::Level::Warn
    };
    log::log!(
        level,
        "Crawl finished in {}s: {} written, {} failed across {} statutes",
        elapsed.num_seconds(),
        stats.pages_written,
        stats.pages_failed,
        stats.statute_count
    );
}
