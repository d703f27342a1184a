//! Local filesystem artifact store.
//!
//! All paths hang off an explicit output root; nothing consults the
//! process working directory.
//!
//! ## Layout
//!
//! ```text
//! {root}/
//! ├── crawl-summary.json           # JSON run summary
//! ├── TaxesConsolidationAct1997/
//! │   ├── s1_tca1997.pdf
//! │   └── schedule1_tca1997.pdf
//! └── ...one folder per statute
//! ```

use std::path::PathBuf;

use serde::Serialize;
use tokio::io::AsyncWriteExt;

use crate::error::Result;
use crate::models::Statute;

/// Filesystem store rooted at the configured output directory.
#[derive(Clone)]
pub struct LocalStore {
    root_dir: PathBuf,
}

impl LocalStore {
    /// Create a store rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Ensure every statute's output folder exists. Idempotent.
    pub async fn ensure_folders(&self, statutes: &[Statute]) -> Result<()> {
        for statute in statutes {
            let path = self.root_dir.join(&statute.name);
            if path.is_dir() {
                log::debug!("Folder '{}' already exists", statute.name);
            } else {
                tokio::fs::create_dir_all(&path).await?;
                log::info!("Created folder '{}'", statute.name);
            }
        }
        Ok(())
    }

    /// Write a PDF artifact, overwriting any file of the same name.
    ///
    /// Returns the written path relative to the root.
    pub async fn write_artifact(&self, folder: &str, stem: &str, bytes: &[u8]) -> Result<String> {
        let relative = format!("{folder}/{stem}.pdf");
        self.write_bytes(&relative, bytes).await?;
        Ok(relative)
    }

    /// Write the JSON run summary to the root.
    pub async fn write_summary<T: Serialize + ?Sized>(
        &self,
        file_name: &str,
        value: &T,
    ) -> Result<PathBuf> {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.write_bytes(file_name, &bytes).await?;
        Ok(self.path(file_name))
    }

    /// Full path for a root-relative key.
    pub fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_artifact() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStore::new(tmp.path());

        let relative = store
            .write_artifact("TaxesConsolidationAct1997", "s1_tca1997", b"%PDF-1.5")
            .await
            .unwrap();

        assert_eq!(relative, "TaxesConsolidationAct1997/s1_tca1997.pdf");
        let written = tokio::fs::read(store.path(&relative)).await.unwrap();
        assert_eq!(written, b"%PDF-1.5");
    }

    #[tokio::test]
    async fn test_write_artifact_overwrites() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStore::new(tmp.path());

        store.write_artifact("f", "s1_x1999", b"old").await.unwrap();
        store.write_artifact("f", "s1_x1999", b"new").await.unwrap();

        let written = tokio::fs::read(store.path("f/s1_x1999.pdf")).await.unwrap();
        assert_eq!(written, b"new");
    }

    #[tokio::test]
    async fn test_ensure_folders_idempotent() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStore::new(tmp.path());
        let statutes = Statute::default_statutes();

        store.ensure_folders(&statutes).await.unwrap();
        store.ensure_folders(&statutes).await.unwrap();

        let mut entries = tokio::fs::read_dir(tmp.path()).await.unwrap();
        let mut count = 0;
        while let Some(entry) = entries.next_entry().await.unwrap() {
            assert!(entry.file_type().await.unwrap().is_dir());
            count += 1;
        }
        assert_eq!(count, 5);
    }

    #[tokio::test]
    async fn test_write_summary() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStore::new(tmp.path());

        let path = store
            .write_summary("crawl-summary.json", &serde_json::json!({"pages": 3}))
            .await
            .unwrap();

        let content = tokio::fs::read_to_string(path).await.unwrap();
        assert!(content.contains("\"pages\": 3"));
    }
}
