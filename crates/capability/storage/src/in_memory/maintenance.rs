//! 维修申请内存存储实现

use crate::error::StorageError;
use crate::traits::MaintenanceRequestStore;
use crate::validation::ensure_actor;
use domain::{ActorContext, MaintenanceRequest};
use std::sync::RwLock;

/// 维修申请内存存储（按提交顺序）
pub struct InMemoryMaintenanceRequestStore {
    requests: RwLock<Vec<MaintenanceRequest>>,
}

impl InMemoryMaintenanceRequestStore {
    pub fn new() -> Self {
        Self {
            requests: RwLock::new(Vec::new()),
        }
    }

    pub fn with_records(records: Vec<MaintenanceRequest>) -> Self {
        Self {
            requests: RwLock::new(records),
        }
    }
}

impl Default for InMemoryMaintenanceRequestStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl MaintenanceRequestStore for InMemoryMaintenanceRequestStore {
    async fn list_requests(
        &self,
        ctx: &ActorContext,
    ) -> Result<Vec<MaintenanceRequest>, StorageError> {
        ensure_actor(ctx)?;
        let items = self
            .requests
            .read()
            .map_err(|_| StorageError::lock_failed())?;
        Ok(items.clone())
    }

    async fn find_request(
        &self,
        ctx: &ActorContext,
        request_id: &str,
    ) -> Result<Option<MaintenanceRequest>, StorageError> {
        ensure_actor(ctx)?;
        let items = self
            .requests
            .read()
            .map_err(|_| StorageError::lock_failed())?;
        Ok(items.iter().find(|item| item.id == request_id).cloned())
    }

    async fn create_request(
        &self,
        ctx: &ActorContext,
        record: MaintenanceRequest,
    ) -> Result<MaintenanceRequest, StorageError> {
        ensure_actor(ctx)?;
        let mut items = self
            .requests
            .write()
            .map_err(|_| StorageError::lock_failed())?;
        if items.iter().any(|item| item.id == record.id) {
            return Err(StorageError::new("request exists"));
        }
        items.push(record.clone());
        Ok(record)
    }

    async fn update_request(
        &self,
        ctx: &ActorContext,
        record: MaintenanceRequest,
    ) -> Result<Option<MaintenanceRequest>, StorageError> {
        ensure_actor(ctx)?;
        let mut items = self
            .requests
            .write()
            .map_err(|_| StorageError::lock_failed())?;
        let slot = match items.iter_mut().find(|item| item.id == record.id) {
            Some(slot) => slot,
            None => return Ok(None),
        };
        *slot = record.clone();
        Ok(Some(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn poisoned_lock_is_a_storage_error() {
        let store = InMemoryMaintenanceRequestStore::new();
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = store.requests.write().expect("lock");
            panic!("poison lock");
        }));
        let ctx = ActorContext::system();
        let err = store.find_request(&ctx, "MT-1001").await.expect_err("poisoned");
        assert_eq!(err, StorageError::lock_failed());
    }
}
