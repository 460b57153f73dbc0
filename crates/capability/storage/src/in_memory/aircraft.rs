//! 机体内存存储实现
//!
//! 功能：
//! - 机体登记（ID / 序列号唯一）
//! - 按写入顺序列出
//! - 整体替换更新

use crate::error::StorageError;
use crate::traits::AircraftStore;
use crate::validation::ensure_actor;
use domain::{ActorContext, Aircraft};
use std::sync::RwLock;

/// 机体内存存储
///
/// 使用 RwLock + Vec 保留登记顺序。
pub struct InMemoryAircraftStore {
    aircraft: RwLock<Vec<Aircraft>>,
}

impl InMemoryAircraftStore {
    /// 创建新的机体存储
    pub fn new() -> Self {
        Self {
            aircraft: RwLock::new(Vec::new()),
        }
    }

    /// 以已有记录初始化（快照导入）
    pub fn with_records(records: Vec<Aircraft>) -> Self {
        Self {
            aircraft: RwLock::new(records),
        }
    }
}

impl Default for InMemoryAircraftStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl AircraftStore for InMemoryAircraftStore {
    async fn list_aircraft(&self, ctx: &ActorContext) -> Result<Vec<Aircraft>, StorageError> {
        ensure_actor(ctx)?;
        let items = self
            .aircraft
            .read()
            .map_err(|_| StorageError::lock_failed())?;
        Ok(items.clone())
    }

    async fn find_aircraft(
        &self,
        ctx: &ActorContext,
        aircraft_id: &str,
    ) -> Result<Option<Aircraft>, StorageError> {
        ensure_actor(ctx)?;
        let items = self
            .aircraft
            .read()
            .map_err(|_| StorageError::lock_failed())?;
        Ok(items.iter().find(|item| item.id == aircraft_id).cloned())
    }

    async fn find_by_serial(
        &self,
        ctx: &ActorContext,
        serial: &str,
    ) -> Result<Option<Aircraft>, StorageError> {
        ensure_actor(ctx)?;
        let serial = serial.trim();
        let items = self
            .aircraft
            .read()
            .map_err(|_| StorageError::lock_failed())?;
        Ok(items
            .iter()
            .find(|item| item.serial.eq_ignore_ascii_case(serial))
            .cloned())
    }

    async fn create_aircraft(
        &self,
        ctx: &ActorContext,
        record: Aircraft,
    ) -> Result<Aircraft, StorageError> {
        ensure_actor(ctx)?;
        let mut items = self
            .aircraft
            .write()
            .map_err(|_| StorageError::lock_failed())?;
        if items.iter().any(|item| item.id == record.id) {
            return Err(StorageError::new("aircraft exists"));
        }
        if items
            .iter()
            .any(|item| item.serial.eq_ignore_ascii_case(&record.serial))
        {
            return Err(StorageError::new("serial exists"));
        }
        items.push(record.clone());
        Ok(record)
    }

    async fn update_aircraft(
        &self,
        ctx: &ActorContext,
        record: Aircraft,
    ) -> Result<Option<Aircraft>, StorageError> {
        ensure_actor(ctx)?;
        let mut items = self
            .aircraft
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
        let store = InMemoryAircraftStore::new();
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = store.aircraft.write().expect("lock");
            panic!("poison lock");
        }));
        let ctx = ActorContext::system();
        let err = store.find_aircraft(&ctx, "AC-001").await.expect_err("poisoned");
        assert_eq!(err, StorageError::lock_failed());
        assert!(store.find_by_serial(&ctx, "M300-001").await.is_err());
    }
}
