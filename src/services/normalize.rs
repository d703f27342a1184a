//! HTML body normalization.
//!
//! Converts a statute body fragment into flat text that is safe to wrap
//! and paginate: markdown artifacts and residual navigation links are
//! stripped, and paragraph spacing is expressed as blank lines.

use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;

/// Parenthesized link remnants left behind by markdown conversion,
/// e.g. "(./sec0002.html#sec2)".
static HTML_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\.html[^)]*\)").expect("link pattern"));

/// Normalize a statute body fragment to flat printable text.
///
/// An empty fragment yields an empty string; malformed markup is passed
/// through the cleanup chain without raising.
pub fn normalize_fragment(fragment: &str) -> String {
    if fragment.trim().is_empty() {
        return String::new();
    }

    let markdown = html_to_markdown(fragment);

    let text = markdown
        .replace('|', "")
        .replace('*', "")
        .replace('\\', "")
        .replace(" ___ ", "/")
        .replace("---", "")
        .replace('\n', "\n\n")
        .replace('[', "")
        .replace(']', "");
    let text = text.trim();

    HTML_LINK_RE.replace_all(text, "").into_owned()
}

/// Convert HTML to markdown, falling back to bare text extraction when
/// conversion fails.
fn html_to_markdown(html: &str) -> String {
    htmd::convert(html).unwrap_or_else(|_| {
        let document = Html::parse_fragment(html);
        document.root_element().text().collect::<String>()
    })
}
