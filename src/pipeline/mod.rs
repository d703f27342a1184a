//! Pipeline entry points for crawler operations.
//!
//! - `run_crawler`: walk every statute lineage and export section PDFs
//! - `run_validate`: check the configuration without touching the network

mod crawl;
mod validate;

pub use crawl::run_crawler;
pub use validate::run_validate;
