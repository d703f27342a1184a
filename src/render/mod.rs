//! PDF rendering for normalized statute text.

mod pdf;

pub use pdf::{PdfRenderer, PlacedLine};
