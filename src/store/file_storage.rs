//! Implements the `Storage` trait with one JSON file per key.

use crate::store::Storage;
use crate::{utils, Result};
use anyhow::bail;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Keeps the value for each key in `{dir}/{key}.json`. A missing file means the key is absent.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            bail!("Invalid storage key '{key}'")
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

#[async_trait::async_trait]
impl Storage for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path(key)?;
        if !path.is_file() {
            trace!("No file for key '{key}' at {}", path.display());
            return Ok(None);
        }
        Ok(Some(utils::read(&path).await?))
    }

    async fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path(key)?;
        trace!("Writing key '{key}' to {}", path.display());
        utils::write(&path, value).await
    }
}
