//! Application configuration structures.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::Statute;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP and crawling behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Output location settings
    #[serde(default)]
    pub output: OutputConfig,

    /// PDF page geometry
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Statutes to crawl
    #[serde(default = "Statute::default_statutes")]
    pub statutes: Vec<Statute>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        if self.crawler.max_concurrent == 0 {
            return Err(AppError::validation("crawler.max_concurrent must be > 0"));
        }
        self.layout.validate()?;
        if self.statutes.is_empty() {
            return Err(AppError::validation("No statutes defined"));
        }
        let mut folders = HashSet::new();
        for statute in &self.statutes {
            if statute.name.trim().is_empty() {
                return Err(AppError::validation("Statute folder name is empty"));
            }
            if statute.abbr.trim().is_empty() {
                return Err(AppError::validation(format!(
                    "Statute '{}' has an empty abbreviation",
                    statute.name
                )));
            }
            url::Url::parse(&statute.seed_url).map_err(|e| {
                AppError::validation(format!(
                    "Statute '{}' has invalid seed URL '{}': {}",
                    statute.name, statute.seed_url, e
                ))
            })?;
            // Abbreviations may repeat (two acts share "cat"); folders may not,
            // since the folder is what keeps their stems apart on disk.
            if !folders.insert(statute.name.as_str()) {
                return Err(AppError::validation(format!(
                    "Duplicate statute folder name '{}'",
                    statute.name
                )));
            }
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            crawler: CrawlerConfig::default(),
            output: OutputConfig::default(),
            layout: LayoutConfig::default(),
            statutes: Statute::default_statutes(),
        }
    }
}

/// HTTP client and crawling behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Delay between requests within a lineage, in milliseconds
    #[serde(default = "defaults::request_delay")]
    pub request_delay_ms: u64,

    /// Maximum statute lineages crawled concurrently
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            request_delay_ms: defaults::request_delay(),
            max_concurrent: defaults::max_concurrent(),
        }
    }
}

/// Output location settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Root directory the statute folders are created under
    #[serde(default = "defaults::root_dir")]
    pub root_dir: PathBuf,

    /// Filename of the JSON run summary written to the root
    #[serde(default = "defaults::summary_file")]
    pub summary_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root_dir: defaults::root_dir(),
            summary_file: defaults::summary_file(),
        }
    }
}

/// PDF page geometry.
///
/// Defaults describe a landscape letter page with a 10pt fixed font; the
/// character width is an empirical approximation used for wrapping, not a
/// true text-measurement pass.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Page width in points
    #[serde(default = "defaults::page_width")]
    pub page_width: f32,

    /// Page height in points
    #[serde(default = "defaults::page_height")]
    pub page_height: f32,

    /// Margin on all sides, in points
    #[serde(default = "defaults::margin")]
    pub margin: f32,

    /// Vertical advance per text line, in points
    #[serde(default = "defaults::line_spacing")]
    pub line_spacing: f32,

    /// Font size in points
    #[serde(default = "defaults::font_size")]
    pub font_size: f32,

    /// Assumed average character width in points
    #[serde(default = "defaults::char_width")]
    pub char_width: f32,
}

impl LayoutConfig {
    /// Maximum characters per rendered line before word-wrapping.
    pub fn wrap_width(&self) -> usize {
        ((self.page_width - 2.0 * self.margin) / self.char_width) as usize
    }

    /// Check geometry values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.page_width <= 2.0 * self.margin {
            return Err(AppError::validation(
                "layout.page_width must exceed twice the margin",
            ));
        }
        if self.page_height <= 2.0 * self.margin {
            return Err(AppError::validation(
                "layout.page_height must exceed twice the margin",
            ));
        }
        if self.line_spacing <= 0.0 {
            return Err(AppError::validation("layout.line_spacing must be > 0"));
        }
        if self.char_width <= 0.0 {
            return Err(AppError::validation("layout.char_width must be > 0"));
        }
        if self.font_size <= 0.0 {
            return Err(AppError::validation("layout.font_size must be > 0"));
        }
        Ok(())
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_width: defaults::page_width(),
            page_height: defaults::page_height(),
            margin: defaults::margin(),
            line_spacing: defaults::line_spacing(),
            font_size: defaults::font_size(),
            char_width: defaults::char_width(),
        }
    }
}

mod defaults {
    // Crawler defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; statutebook/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn request_delay() -> u64 {
        100
    }
    pub fn max_concurrent() -> usize {
        5
    }

    // Output defaults
    pub fn root_dir() -> std::path::PathBuf {
        ".".into()
    }
    pub fn summary_file() -> String {
        "crawl-summary.json".into()
    }

    // Landscape letter geometry
    pub fn page_width() -> f32 {
        792.0
    }
    pub fn page_height() -> f32 {
        612.0
    }
    pub fn margin() -> f32 {
        40.0
    }
    pub fn line_spacing() -> f32 {
        12.0
    }
    pub fn font_size() -> f32 {
        10.0
    }
    pub fn char_width() -> f32 {
        6.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_default_wrap_width() {
        // (792 - 80) / 6.5 = 109.5, truncated
        assert_eq!(LayoutConfig::default().wrap_width(), 109);
    }

    #[test]
    fn test_validate_rejects_zero_concurrency() {
        let mut config = Config::default();
        config.crawler.max_concurrent = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_seed_url() {
        let mut config = Config::default();
        config.statutes[0].seed_url = "not a url".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_duplicate_folder() {
        let mut config = Config::default();
        let dup = config.statutes[0].name.clone();
        config.statutes[1].name = dup;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_allows_duplicate_abbr() {
        // Two of the built-in acts legitimately share "cat".
        let config = Config::default();
        let cats = config.statutes.iter().filter(|s| s.abbr == "cat").count();
        assert_eq!(cats, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_toml() {
        let toml_str = r#"
            [crawler]
            request_delay_ms = 250

            [output]
            root_dir = "out"
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.crawler.request_delay_ms, 250);
        assert_eq!(config.output.root_dir, PathBuf::from("out"));
        assert_eq!(config.statutes.len(), 5);
        assert_eq!(config.layout.page_width, 792.0);
    }
}
