//! Field and next-link extraction from statute pages.
//!
//! Selectors are parsed once at construction; extraction misses are
//! represented as `None`/placeholder values, never errors.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

use crate::error::{AppError, Result};
use crate::models::DocumentIdentity;

/// "SCHEDULE 7" style tokens in normalized text.
static SCHEDULE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"SCHEDULE\s(\d+)").expect("schedule pattern"));

/// First standalone 4-digit token, used for the year in titles.
static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\d{4}\b").expect("year pattern"));

/// Year placeholder when the title holds no 4-digit token.
const YEAR_PLACEHOLDER: &str = "-";

/// Extracts document identity fields and the next-section link from a
/// statute page.
pub struct FieldExtractor {
    body: Selector,
    section_primary: Selector,
    section_fallback: Selector,
    title: Selector,
    next_link: Selector,
}

impl FieldExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            body: Self::parse_selector("#act")?,
            // The section heading is the bold text of the paragraph that
            // follows the section anchor.
            section_primary: Self::parse_selector("a + p b")?,
            section_fallback: Self::parse_selector("b")?,
            title: Self::parse_selector(".content-title")?,
            next_link: Self::parse_selector(".navigation-toolbar li:nth-child(2) a")?,
        })
    }

    /// The statute body fragment's HTML, or `None` when absent.
    pub fn body_fragment(&self, document: &Html) -> Option<String> {
        document.select(&self.body).next().map(|el| el.html())
    }

    /// Derive the identity fields from the page markup and its
    /// normalized text.
    pub fn identity(&self, document: &Html, text: &str) -> DocumentIdentity {
        DocumentIdentity {
            schedule_number: Self::schedule_number(text),
            section_number: self.section_number(document),
            year: self.year(document),
        }
    }

    /// Href of the "next section" link in the navigation toolbar, or
    /// `None` when the lineage is exhausted.
    pub fn next_href(&self, document: &Html) -> Option<String> {
        document
            .select(&self.next_link)
            .next()
            .and_then(|el| el.value().attr("href"))
            .map(str::to_string)
    }

    fn schedule_number(text: &str) -> Option<String> {
        SCHEDULE_RE
            .captures(text)
            .map(|caps| caps[1].to_string())
    }

    fn section_number(&self, document: &Html) -> Option<String> {
        document
            .select(&self.section_primary)
            .next()
            .or_else(|| document.select(&self.section_fallback).next())
            .map(|el| {
                el.text()
                    .collect::<String>()
                    .trim()
                    .trim_end_matches('.')
                    .to_string()
            })
            .filter(|s| !s.is_empty())
    }

    fn year(&self, document: &Html) -> String {
        let title = document
            .select(&self.title)
            .next()
            .map(|el| el.text().collect::<String>())
            .unwrap_or_default();

        YEAR_RE
            .find(title.trim())
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| YEAR_PLACEHOLDER.to_string())
    }

    fn parse_selector(s: &str) -> Result<Selector> {
        Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
    }
}
