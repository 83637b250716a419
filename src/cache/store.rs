//! Token cache storage
//!
//! One JSON file per cache key, named after the key digest. Writes go
//! through a temp file and a rename so concurrent plugin invocations never
//! observe a half-written entry.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use tempfile::NamedTempFile;
use tokio::fs;
use tracing::debug;

use crate::cache::entry::CacheEntry;
use crate::cache::key::CacheKey;

#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Missing, unreadable and corrupt entries are all errors.
    async fn find_by_key(&self, dir: &Path, key: &CacheKey) -> Result<CacheEntry>;

    /// Insert or replace the entry for `key`.
    async fn save(&self, dir: &Path, key: &CacheKey, entry: &CacheEntry) -> Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct FileCacheStore;

impl FileCacheStore {
    pub fn new() -> Self {
        Self
    }

    pub fn entry_path(dir: &Path, key: &CacheKey) -> PathBuf {
        dir.join(key.digest())
    }
}

#[async_trait]
impl CacheStore for FileCacheStore {
    async fn find_by_key(&self, dir: &Path, key: &CacheKey) -> Result<CacheEntry> {
        let path = Self::entry_path(dir, key);
        let content = match fs::read(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(anyhow!("no token cache at {}", path.display()));
            }
            Err(e) => return Err(e).with_context(|| format!("could not read {}", path.display())),
        };
        let entry: CacheEntry = serde_json::from_slice(&content)
            .with_context(|| format!("invalid token cache at {}", path.display()))?;
        debug!(path = %path.display(), "token cache loaded");
        Ok(entry)
    }

    async fn save(&self, dir: &Path, key: &CacheKey, entry: &CacheEntry) -> Result<()> {
        create_private_dir(dir).await?;

        let path = Self::entry_path(dir, key);
        let content = serde_json::to_vec(entry).context("could not encode the token cache")?;
        let dir = dir.to_path_buf();
        let target = path.clone();
        tokio::task::spawn_blocking(move || write_atomically(&dir, &target, &content))
            .await
            .context("token cache writer panicked")??;

        debug!(path = %path.display(), "token cache written");
        Ok(())
    }
}

/// Each writer gets its own 0600 temp file in `dir`; the rename replaces
/// `path` in one step. A failed write or rename drops the temp file.
fn write_atomically(dir: &Path, path: &Path, content: &[u8]) -> Result<()> {
    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("could not create a temp file in {}", dir.display()))?;
    tmp.write_all(content)
        .with_context(|| format!("could not write {}", tmp.path().display()))?;
    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("could not move token cache into {}", path.display()))?;
    Ok(())
}

async fn create_private_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .await
        .with_context(|| format!("could not create directory {}", dir.display()))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = fs::set_permissions(dir, std::fs::Permissions::from_mode(0o700)).await;
    }
    Ok(())
}
