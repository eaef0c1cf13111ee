// JSON file snapshot store implementation
use crate::application::snapshot_store::SnapshotStore;
use crate::domain::dashboard::DashboardSnapshot;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SnapshotStore for FileSnapshotStore {
    async fn load(&self) -> Result<Option<DashboardSnapshot>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => {
                let snapshot =
                    serde_json::from_slice(&bytes).context("Failed to parse snapshot file")?;
                Ok(Some(snapshot))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).context("Failed to read snapshot file"),
        }
    }

    async fn save(&self, snapshot: &DashboardSnapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .context("Failed to create snapshot directory")?;
        }
        let bytes = serde_json::to_vec_pretty(snapshot)?;
        tokio::fs::write(&self.path, bytes)
            .await
            .context("Failed to write snapshot file")
    }
}
