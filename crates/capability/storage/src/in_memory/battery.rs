//! 电池内存存储实现
//!
//! 更新时校验审计轨迹只增不减，且原有条目保持不变。

use crate::error::StorageError;
use crate::traits::BatteryStore;
use crate::validation::ensure_actor;
use domain::{ActorContext, Battery};
use std::sync::RwLock;

/// 电池内存存储
pub struct InMemoryBatteryStore {
    batteries: RwLock<Vec<Battery>>,
}

impl InMemoryBatteryStore {
    pub fn new() -> Self {
        Self {
            batteries: RwLock::new(Vec::new()),
        }
    }

    pub fn with_records(records: Vec<Battery>) -> Self {
        Self {
            batteries: RwLock::new(records),
        }
    }
}

impl Default for InMemoryBatteryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl BatteryStore for InMemoryBatteryStore {
    async fn list_batteries(&self, ctx: &ActorContext) -> Result<Vec<Battery>, StorageError> {
        ensure_actor(ctx)?;
        let items = self
            .batteries
            .read()
            .map_err(|_| StorageError::lock_failed())?;
        Ok(items.clone())
    }

    async fn find_battery(
        &self,
        ctx: &ActorContext,
        battery_id: &str,
    ) -> Result<Option<Battery>, StorageError> {
        ensure_actor(ctx)?;
        let items = self
            .batteries
            .read()
            .map_err(|_| StorageError::lock_failed())?;
        Ok(items.iter().find(|item| item.id == battery_id).cloned())
    }

    async fn create_battery(
        &self,
        ctx: &ActorContext,
        record: Battery,
    ) -> Result<Battery, StorageError> {
        ensure_actor(ctx)?;
        let mut items = self
            .batteries
            .write()
            .map_err(|_| StorageError::lock_failed())?;
        if items
            .iter()
            .any(|item| item.id == record.id || item.tag.eq_ignore_ascii_case(&record.tag))
        {
            return Err(StorageError::new("battery exists"));
        }
        items.push(record.clone());
        Ok(record)
    }

    async fn update_battery(
        &self,
        ctx: &ActorContext,
        record: Battery,
    ) -> Result<Option<Battery>, StorageError> {
        ensure_actor(ctx)?;
        let mut items = self
            .batteries
            .write()
            .map_err(|_| StorageError::lock_failed())?;
        let slot = match items.iter_mut().find(|item| item.id == record.id) {
            Some(slot) => slot,
            None => return Ok(None),
        };
        let existing = slot.audit_trail.entries();
        let incoming = record.audit_trail.entries();
        if incoming.len() < existing.len() || incoming[..existing.len()] != *existing {
            return Err(StorageError::new("audit trail is append-only"));
        }
        *slot = record.clone();
        Ok(Some(record))
    }
}
