//! Tenant-scoped offline cache of the merged inventory ledger
//!
//! A snapshot is written after every successful live load and read back only
//! when a source fetch fails. Snapshots are never treated as authoritative.

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::LineItem;
use tempfile::NamedTempFile;
use tokio::sync::RwLock;

use crate::error::{AppError, AppResult};

/// A stored copy of a merged ledger
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CachedInventory {
    pub items: Vec<LineItem>,
    pub cached_at: DateTime<Utc>,
}

/// Storage for per-company ledger snapshots
#[async_trait]
pub trait CacheRepository: Send + Sync {
    async fn load(&self, tenant_id: &str) -> AppResult<Option<CachedInventory>>;

    async fn store(&self, tenant_id: &str, items: &[LineItem]) -> AppResult<()>;
}

/// Storage key for a company's snapshot
pub fn cache_key(tenant_id: &str) -> AppResult<String> {
    validate_tenant_id(tenant_id)?;
    Ok(format!("inventory_products_{}", tenant_id))
}

/// Company ids end up in file names, so only `[A-Za-z0-9_-]` is accepted
pub fn validate_tenant_id(tenant_id: &str) -> AppResult<()> {
    let valid = !tenant_id.is_empty()
        && tenant_id.len() <= 64
        && tenant_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(AppError::Validation {
            field: "company_id".to_string(),
            message: "Company id must be 1-64 letters, digits, '-' or '_'".to_string(),
        })
    }
}

// ============================================================================
// File-backed cache
// ============================================================================

/// One JSON file per company under a directory
#[derive(Debug, Clone)]
pub struct FileCacheRepository {
    directory: PathBuf,
}

impl FileCacheRepository {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn path_for(&self, tenant_id: &str) -> AppResult<PathBuf> {
        Ok(self.directory.join(format!("{}.json", cache_key(tenant_id)?)))
    }
}

#[async_trait]
impl CacheRepository for FileCacheRepository {
    async fn load(&self, tenant_id: &str) -> AppResult<Option<CachedInventory>> {
        let path = self.path_for(tenant_id)?;

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(AppError::Cache(format!("read {}: {}", path.display(), e))),
        };

        let snapshot = serde_json::from_slice(&bytes)
            .map_err(|e| AppError::Cache(format!("corrupt snapshot {}: {}", path.display(), e)))?;
        Ok(Some(snapshot))
    }

    async fn store(&self, tenant_id: &str, items: &[LineItem]) -> AppResult<()> {
        let path = self.path_for(tenant_id)?;
        let snapshot = CachedInventory {
            items: items.to_vec(),
            cached_at: Utc::now(),
        };
        let bytes = serde_json::to_vec(&snapshot)
            .map_err(|e| AppError::Cache(format!("serialize snapshot: {}", e)))?;

        let directory = self.directory.clone();
        tokio::task::spawn_blocking(move || replace_file(&directory, &path, &bytes))
            .await
            .map_err(|e| AppError::Cache(format!("snapshot writer failed: {}", e)))??;

        tracing::debug!(tenant_id, items = items.len(), "stored inventory snapshot");
        Ok(())
    }
}

/// Write `bytes` to a uniquely named temp file in `directory` and rename it
/// over `path`. Concurrent writers each get their own temp file, and readers
/// only ever see a complete snapshot.
fn replace_file(directory: &Path, path: &Path, bytes: &[u8]) -> AppResult<()> {
    std::fs::create_dir_all(directory)
        .map_err(|e| AppError::Cache(format!("create {}: {}", directory.display(), e)))?;

    let mut tmp = NamedTempFile::new_in(directory)
        .map_err(|e| AppError::Cache(format!("temp file in {}: {}", directory.display(), e)))?;
    tmp.write_all(bytes)
        .map_err(|e| AppError::Cache(format!("write {}: {}", tmp.path().display(), e)))?;
    tmp.persist(path)
        .map_err(|e| AppError::Cache(format!("rename {}: {}", path.display(), e.error)))?;
    Ok(())
}

// ============================================================================
// In-memory cache
// ============================================================================

/// Process-local cache, lost on restart
#[derive(Debug, Default)]
pub struct InMemoryCacheRepository {
    entries: RwLock<HashMap<String, CachedInventory>>,
}

impl InMemoryCacheRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheRepository for InMemoryCacheRepository {
    async fn load(&self, tenant_id: &str) -> AppResult<Option<CachedInventory>> {
        let key = cache_key(tenant_id)?;
        Ok(self.entries.read().await.get(&key).cloned())
    }

    async fn store(&self, tenant_id: &str, items: &[LineItem]) -> AppResult<()> {
        let key = cache_key(tenant_id)?;
        let snapshot = CachedInventory {
            items: items.to_vec(),
            cached_at: Utc::now(),
        };
        self.entries.write().await.insert(key, snapshot);
        Ok(())
    }
}
