//! 维修申请记录与两条状态轴。

use crate::attachment::Attachment;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 计划性维修的原因目录。
pub const SCHEDULED_REASONS: &[&str] = &[
    "50 Hour Routine Inspection",
    "100 Hour Full Inspection",
    "Battery Health Check",
    "Motor Bearing Inspection",
    "Propeller Replacement Cycle",
    "Firmware Update Validation",
    "IMU Calibration",
    "Compass Calibration",
    "ESC Diagnostics",
    "Payload Mount Inspection",
    "Landing Gear Stress Check",
    "Airframe Structural Assessment",
    "GNSS Signal Integrity Test",
    "Camera Sensor Cleaning",
    "Thermal Sensor Calibration",
    "Waterproof Seal Inspection",
    "Internal Wiring Audit",
    "Cooling System Inspection",
    "Telemetry Verification",
    "Post-Mission Scheduled Inspection",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaintenanceType {
    Scheduled,
    Unscheduled,
}

impl fmt::Display for MaintenanceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scheduled => f.write_str("scheduled"),
            Self::Unscheduled => f.write_str("unscheduled"),
        }
    }
}

/// 审批轴：pending → approved | rejected（两者均为终态）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => f.write_str("pending"),
            Self::Approved => f.write_str("approved"),
            Self::Rejected => f.write_str("rejected"),
        }
    }
}

/// 作业轴：pending → in_progress → done；驳回时强制为 declined。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkStatus {
    Pending,
    InProgress,
    Done,
    Declined,
}

impl WorkStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Declined)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Done => "Completed",
            Self::Declined => "Declined",
        }
    }
}

impl fmt::Display for WorkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => f.write_str("pending"),
            Self::InProgress => f.write_str("in_progress"),
            Self::Done => f.write_str("done"),
            Self::Declined => f.write_str("declined"),
        }
    }
}

/// 完工报告，作业完成前必须提供。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionReport {
    pub title: String,
    pub summary: String,
    #[serde(default)]
    pub attachment: Option<Attachment>,
}

/// 维修申请记录。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRequest {
    pub id: String,
    pub aircraft_model: String,
    pub serial_number: String,
    pub location: String,
    pub flight_hours: f64,
    pub maintenance_type: MaintenanceType,
    pub reason: String,
    pub approval: ApprovalStatus,
    pub work_status: WorkStatus,
    pub requested_by: String,
    pub requested_at: NaiveDate,
    #[serde(default)]
    pub completion_report: Option<CompletionReport>,
}
