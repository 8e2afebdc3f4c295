//! Storage health reporting.

use async_trait::async_trait;
use mockall::automock;

use crate::database::{Db, StorageStatus};

#[derive(Debug, Clone)]
pub struct PgHealthService {
    db: Db,
}

impl PgHealthService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl HealthService for PgHealthService {
    async fn check_storage(&self) -> StorageStatus {
        self.db.ping().await
    }

    async fn storage_status(&self) -> StorageStatus {
        self.db.status().await
    }
}

#[automock]
#[async_trait]
pub trait HealthService: Send + Sync {
    /// Probes storage and returns the refreshed status.
    async fn check_storage(&self) -> StorageStatus;

    /// Returns the last observed status without probing.
    async fn storage_status(&self) -> StorageStatus;
}
