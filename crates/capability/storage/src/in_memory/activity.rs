//! 动态内存存储实现
//!
//! 只追加；列表按时间倒序。

use crate::error::StorageError;
use crate::traits::ActivityStore;
use crate::validation::ensure_actor;
use domain::{ActivityEntry, ActivityKind, ActorContext};
use std::sync::RwLock;

/// 动态内存存储
pub struct InMemoryActivityStore {
    entries: RwLock<Vec<ActivityEntry>>,
}

impl InMemoryActivityStore {
    /// 创建新的动态存储
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    /// 以已有记录初始化（快照导入）
    pub fn with_records(records: Vec<ActivityEntry>) -> Self {
        Self {
            entries: RwLock::new(records),
        }
    }
}

impl Default for InMemoryActivityStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ActivityStore for InMemoryActivityStore {
    async fn append_activity(
        &self,
        ctx: &ActorContext,
        entry: ActivityEntry,
    ) -> Result<ActivityEntry, StorageError> {
        ensure_actor(ctx)?;
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StorageError::lock_failed())?;
        entries.push(entry.clone());
        Ok(entry)
    }

    async fn list_activities(
        &self,
        ctx: &ActorContext,
        kind: Option<ActivityKind>,
    ) -> Result<Vec<ActivityEntry>, StorageError> {
        ensure_actor(ctx)?;
        let entries = self
            .entries
            .read()
            .map_err(|_| StorageError::lock_failed())?;
        let mut items: Vec<ActivityEntry> = entries
            .iter()
            .rev()
            .filter(|item| match kind {
                Some(kind) => item.kind == kind,
                None => true,
            })
            .cloned()
            .collect();
        // 稳定排序：时间相同的保持后写入在前
        items.sort_by(|a, b| b.at.cmp(&a.at));
        Ok(items)
    }
}
