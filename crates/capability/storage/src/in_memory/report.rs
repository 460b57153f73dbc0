//! 维修报告内存存储实现

use crate::error::StorageError;
use crate::traits::ReportStore;
use crate::validation::ensure_actor;
use domain::{ActorContext, MaintenanceReport};
use std::sync::RwLock;

/// 维修报告内存存储
pub struct InMemoryReportStore {
    reports: RwLock<Vec<MaintenanceReport>>,
}

impl InMemoryReportStore {
    pub fn new() -> Self {
        Self {
            reports: RwLock::new(Vec::new()),
        }
    }

    /// 以已有记录初始化（快照导入）
    pub fn with_records(records: Vec<MaintenanceReport>) -> Self {
        Self {
            reports: RwLock::new(records),
        }
    }
}

impl Default for InMemoryReportStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ReportStore for InMemoryReportStore {
    async fn list_reports(
        &self,
        ctx: &ActorContext,
    ) -> Result<Vec<MaintenanceReport>, StorageError> {
        ensure_actor(ctx)?;
        let reports = self
            .reports
            .read()
            .map_err(|_| StorageError::lock_failed())?;
        // 同一天的报告：后上传的在前
        let mut items: Vec<MaintenanceReport> = reports.iter().rev().cloned().collect();
        items.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(items)
    }

    async fn create_report(
        &self,
        ctx: &ActorContext,
        record: MaintenanceReport,
    ) -> Result<MaintenanceReport, StorageError> {
        ensure_actor(ctx)?;
        let mut reports = self
            .reports
            .write()
            .map_err(|_| StorageError::lock_failed())?;
        if reports.iter().any(|item| item.id == record.id) {
            return Err(StorageError::new("report exists"));
        }
        reports.push(record.clone());
        Ok(record)
    }
}
