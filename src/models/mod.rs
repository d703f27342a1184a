// src/models/mod.rs

//! Domain models for the statute crawler.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod identity;
mod outcome;
mod statute;

// Re-export all public types
pub use config::{Config, CrawlerConfig, LayoutConfig, OutputConfig};
pub use identity::DocumentIdentity;
pub use outcome::{CrawlOutcome, CrawlStats, LineageOutcome, PageRecord, Termination};
pub use statute::Statute;
