//! Service layer for the statute crawler.
//!
//! This module contains the business logic for:
//! - HTML body normalization (`normalize`)
//! - Field and next-link extraction (`FieldExtractor`)
//! - Section crawling (`SectionCrawler`)

mod crawler;
mod extract;
mod normalize;

pub use crawler::SectionCrawler;
pub use extract::FieldExtractor;
pub use normalize::normalize_fragment;
