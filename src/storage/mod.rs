//! Storage backends for crawl artifacts.

mod local;

pub use local::LocalStore;
