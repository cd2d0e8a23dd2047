// Flat-file repository implementation
use crate::application::reading_repository::ReadingRepository;
use crate::domain::reading::Reading;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;

/// Append-only reading store persisted as one JSON array in a single file.
///
/// Every write is a full read-modify-write of the serialized collection,
/// finished with an atomic rename, so a concurrent reader sees either the
/// pre- or post-write state and never a torn file. There is no locking:
/// concurrent writers are last-writer-wins and must be avoided by
/// deployment (one feed process).
#[derive(Debug, Clone)]
pub struct FileReadingRepository {
    path: PathBuf,
}

impl FileReadingRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }

    /// Read paths degrade to an empty history: a missing file is a normal
    /// empty store, and an unreadable or corrupt file is logged and treated
    /// the same rather than propagated.
    async fn load(&self) -> Vec<Reading> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::error!("failed to read {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(readings) => readings,
            Err(e) => {
                tracing::error!("corrupt data file {}: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    async fn persist(&self, readings: &[Reading]) -> Result<()> {
        let json = serde_json::to_vec_pretty(readings).context("serialize readings")?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("create data directory {}", parent.display()))?;
            }
        }

        let staging = self.staging_path();
        fs::write(&staging, &json)
            .await
            .with_context(|| format!("write {}", staging.display()))?;
        fs::rename(&staging, &self.path)
            .await
            .with_context(|| format!("replace {}", self.path.display()))?;
        Ok(())
    }
}

#[async_trait]
impl ReadingRepository for FileReadingRepository {
    async fn read_all(&self) -> Result<Vec<Reading>> {
        Ok(self.load().await)
    }

    async fn append(&self, reading: Reading) -> Result<()> {
        let mut readings = self.load().await;
        readings.push(reading);
        self.persist(&readings).await
    }

    async fn replace_all(&self, readings: &[Reading]) -> Result<()> {
        self.persist(readings).await
    }
}
