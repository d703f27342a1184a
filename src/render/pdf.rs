//! Paginated PDF output.
//!
//! Wraps normalized text to a character-width budget, advances a vertical
//! cursor down each page, and assembles the placed lines into a landscape
//! PDF document. Pagination is a pure function over the text and the page
//! geometry, so identical input always produces identical bytes.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use unicode_segmentation::UnicodeSegmentation;

use crate::error::Result;
use crate::models::LayoutConfig;

/// One line of text placed at a vertical position on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub y: f32,
    pub text: String,
}

/// Renders normalized text into paginated PDF bytes.
pub struct PdfRenderer {
    layout: LayoutConfig,
}

impl PdfRenderer {
    pub fn new(layout: LayoutConfig) -> Self {
        Self { layout }
    }

    /// Lay the text out into pages of placed lines.
    ///
    /// Always yields at least one page; empty text yields one empty page.
    pub fn paginate(&self, text: &str) -> Vec<Vec<PlacedLine>> {
        let wrap_width = self.layout.wrap_width();
        let top = self.layout.page_height - self.layout.margin;

        let mut pages: Vec<Vec<PlacedLine>> = vec![Vec::new()];
        let mut y = top;

        for line in text.lines() {
            if line.trim().is_empty() {
                // Blank lines only consume vertical space; the page-break
                // check happens when the next line is drawn.
                y -= self.layout.line_spacing;
                continue;
            }
            for wrapped in wrap_line(line, wrap_width) {
                if y < self.layout.margin {
                    pages.push(Vec::new());
                    y = top;
                }
                pages
                    .last_mut()
                    .expect("pages is never empty")
                    .push(PlacedLine { y, text: wrapped });
                y -= self.layout.line_spacing;
            }
        }

        pages
    }

    /// Render the text into a complete PDF document.
    pub fn render(&self, text: &str) -> Result<Vec<u8>> {
        let pages = self.paginate(text);

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
        for page in &pages {
            let mut operations = Vec::with_capacity(page.len() * 5);
            for line in page {
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new(
                    "Tf",
                    vec!["F1".into(), self.layout.font_size.into()],
                ));
                operations.push(Operation::new(
                    "Td",
                    vec![self.layout.margin.into(), line.y.into()],
                ));
                operations.push(Operation::new(
                    "Tj",
                    vec![Object::string_literal(encode_text(&line.text))],
                ));
                operations.push(Operation::new("ET", vec![]));
            }

            let content = Content { operations };
            let stream_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => stream_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![
                    0.into(),
                    0.into(),
                    self.layout.page_width.into(),
                    self.layout.page_height.into(),
                ],
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.compress();

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)?;
        Ok(bytes)
    }
}

/// Greedily word-wrap a line into sub-lines of at most `width` graphemes.
/// A single word longer than the width is hard-split.
fn wrap_line(line: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut wrapped = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in line.split_whitespace() {
        let word_len = word.graphemes(true).count();

        if word_len > width {
            if !current.is_empty() {
                wrapped.push(std::mem::take(&mut current));
                current_len = 0;
            }
            for chunk in split_long_word(word, width) {
                wrapped.push(chunk);
            }
            // Let the tail of a split word start a fresh line.
            continue;
        }

        let needed = if current.is_empty() { word_len } else { word_len + 1 };
        if current_len + needed > width && !current.is_empty() {
            wrapped.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        wrapped.push(current);
    }
    wrapped
}

fn split_long_word(word: &str, width: usize) -> Vec<String> {
    let graphemes: Vec<&str> = word.graphemes(true).collect();
    graphemes
        .chunks(width)
        .map(|chunk| chunk.concat())
        .collect()
}

/// Map text to the single-byte range the standard Helvetica font covers.
/// Characters outside Latin-1 are replaced with '?'.
fn encode_text(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| if (c as u32) < 256 { c as u8 } else { b'?' })
        .collect()
}
