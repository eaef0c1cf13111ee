// Store trait for dashboard snapshot persistence
use crate::domain::dashboard::DashboardSnapshot;
use async_trait::async_trait;

#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Load the last saved snapshot, if any.
    async fn load(&self) -> anyhow::Result<Option<DashboardSnapshot>>;

    /// Persist a snapshot, replacing any previous one.
    async fn save(&self, snapshot: &DashboardSnapshot) -> anyhow::Result<()>;
}
