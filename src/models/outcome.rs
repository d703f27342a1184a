//! Per-page, per-lineage, and whole-run crawl outcomes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of visiting one statute page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRecord {
    /// URL of the visited page
    pub url: String,

    /// Path of the written PDF, relative to the output root
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Error text when rendering or writing failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PageRecord {
    pub fn written(url: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            file: Some(file.into()),
            error: None,
        }
    }

    pub fn failed(url: impl Into<String>, error: impl ToString) -> Self {
        Self {
            url: url.into(),
            file: None,
            error: Some(error.to_string()),
        }
    }
}

/// Why a lineage stopped following next-page links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail")]
pub enum Termination {
    /// No next link present: the statute's sections are exhausted
    EndOfStatute,

    /// A URL repeated within the lineage's visited set
    CycleDetected(String),

    /// A fetch or parse failure ended the lineage early
    Failed(String),
}

/// Summary of one statute lineage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineageOutcome {
    /// Statute folder name
    pub statute: String,

    /// Per-page results, in visit order
    pub pages: Vec<PageRecord>,

    /// How the lineage ended
    pub termination: Termination,
}

impl LineageOutcome {
    pub fn pages_written(&self) -> usize {
        self.pages.iter().filter(|p| p.file.is_some()).count()
    }

    pub fn pages_failed(&self) -> usize {
        self.pages.iter().filter(|p| p.error.is_some()).count()
    }
}

/// Summary of a whole crawl run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrawlOutcome {
    pub lineages: Vec<LineageOutcome>,
}

impl CrawlOutcome {
    pub fn pages_written(&self) -> usize {
        self.lineages.iter().map(|l| l.pages_written()).sum()
    }

    pub fn pages_failed(&self) -> usize {
        self.lineages.iter().map(|l| l.pages_failed()).sum()
    }

    /// True when every lineage ran to the end of its statute with no
    /// per-page failures.
    pub fn is_clean(&self) -> bool {
        self.pages_failed() == 0
            && self
                .lineages
                .iter()
                .all(|l| l.termination == Termination::EndOfStatute)
    }
}

/// Timing and volume statistics for a crawl run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlStats {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub statute_count: usize,
    pub pages_written: usize,
    pub pages_failed: usize,
}
