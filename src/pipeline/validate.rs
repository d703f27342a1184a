// src/pipeline/validate.rs

//! Configuration validation pipeline.

use crate::error::Result;
use crate::models::Config;

/// Validate the loaded configuration and report what would be crawled.
pub fn run_validate(config: &Config) -> Result<()> {
    match config.validate() {
        Ok(()) => {
            log::info!("Configuration is valid");
            log::info!("  user agent: {}", config.crawler.user_agent);
            log::info!("  timeout: {}s", config.crawler.timeout_secs);
            log::info!("  max concurrent lineages: {}", config.crawler.max_concurrent);
            log::info!("  output root: {}", config.output.root_dir.display());
            log::info!(
                "  page: {}x{}pt, margin {}pt, wrap width {} chars",
                config.layout.page_width,
                config.layout.page_height,
                config.layout.margin,
                config.layout.wrap_width()
            );
            log::info!("  statutes: {}", config.statutes.len());
            for statute in &config.statutes {
                log::info!("    {} ({}) <- {}", statute.name, statute.abbr, statute.seed_url);
            }
            Ok(())
        }
        Err(e) => {
            log::error!("Configuration invalid: {}", e);
            Err(e)
        }
    }
}
