//! 维修列表统计与搜索。

use domain::{MaintenanceRequest, WorkStatus};
use fleet_storage::contains_ci;
use serde::Serialize;

/// 按作业状态统计（驳回的申请不计入）。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceAnalytics {
    pub pending: usize,
    pub in_progress: usize,
    pub done: usize,
}

pub fn analytics(records: &[MaintenanceRequest]) -> MaintenanceAnalytics {
    records
        .iter()
        .fold(MaintenanceAnalytics::default(), |mut acc, record| {
            match record.work_status {
                WorkStatus::Pending => acc.pending += 1,
                WorkStatus::InProgress => acc.in_progress += 1,
                WorkStatus::Done => acc.done += 1,
                WorkStatus::Declined => {}
            }
            acc
        })
}

/// 在所有文本字段中做大小写不敏感搜索；空查询匹配一切。
pub fn matches_search(record: &MaintenanceRequest, text: &str) -> bool {
    let hours = record.flight_hours.to_string();
    let requested_at = record.requested_at.to_string();
    let maintenance_type = record.maintenance_type.to_string();
    let approval = record.approval.to_string();
    let work = record.work_status.to_string();
    [
        record.id.as_str(),
        record.aircraft_model.as_str(),
        record.serial_number.as_str(),
        record.location.as_str(),
        hours.as_str(),
        maintenance_type.as_str(),
        record.reason.as_str(),
        approval.as_str(),
        work.as_str(),
        record.requested_by.as_str(),
        requested_at.as_str(),
    ]
    .iter()
    .any(|field| contains_ci(field, text))
}

pub fn search(records: &[MaintenanceRequest], text: &str) -> Vec<MaintenanceRequest> {
    records
        .iter()
        .filter(|record| matches_search(record, text))
        .cloned()
        .collect()
}
