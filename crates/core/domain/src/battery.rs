//! 电池记录、放置状态与只追加的审计轨迹。

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 健康度分档（由循环次数推导）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BatteryHealth {
    Excellent,
    Good,
    Weak,
    Critical,
    Expired,
}

impl fmt::Display for BatteryHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Weak => "Weak",
            Self::Critical => "Critical",
            Self::Expired => "Expired",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BatteryStatus {
    InStore,
    InUse,
    Decommissioned,
}

impl BatteryStatus {
    pub const ALL: [BatteryStatus; 3] = [Self::InStore, Self::InUse, Self::Decommissioned];
}

impl fmt::Display for BatteryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InStore => f.write_str("IN_STORE"),
            Self::InUse => f.write_str("IN_USE"),
            Self::Decommissioned => f.write_str("DECOMMISSIONED"),
        }
    }
}

/// 装机信息。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub aircraft_number: String,
    pub aircraft: String,
    pub call_sign: String,
    pub assigned_by: String,
    pub assigned_date: NaiveDate,
}

/// 按状态区分的放置信息：每个状态只携带属于它的字段。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Placement {
    InStore {
        #[serde(rename = "storageLocation")]
        storage_location: String,
    },
    InUse {
        assignment: Assignment,
    },
    Decommissioned {
        #[serde(rename = "decommissionedDate")]
        decommissioned_date: NaiveDate,
    },
}

impl Placement {
    pub fn status(&self) -> BatteryStatus {
        match self {
            Self::InStore { .. } => BatteryStatus::InStore,
            Self::InUse { .. } => BatteryStatus::InUse,
            Self::Decommissioned { .. } => BatteryStatus::Decommissioned,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    Purchased,
    Assigned,
    Decommissioned,
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Purchased => f.write_str("PURCHASED"),
            Self::Assigned => f.write_str("ASSIGNED"),
            Self::Decommissioned => f.write_str("DECOMMISSIONED"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub action: AuditAction,
    pub by: String,
    pub date: NaiveDate,
}

/// 只追加的审计轨迹：除 `push` 外不暴露任何修改入口。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuditTrail(Vec<AuditEntry>);

impl AuditTrail {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, entry: AuditEntry) {
        self.0.push(entry);
    }

    pub fn entries(&self) -> &[AuditEntry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&AuditEntry> {
        self.0.last()
    }
}

/// 电池记录。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Battery {
    pub id: String,
    pub tag: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub chemistry: String,
    #[serde(default)]
    pub capacity: String,
    #[serde(default)]
    pub voltage: String,
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default)]
    pub supplier: String,
    #[serde(default)]
    pub purchase_date: Option<NaiveDate>,
    pub cycles: u32,
    #[serde(flatten)]
    pub placement: Placement,
    #[serde(default)]
    pub audit_trail: AuditTrail,
}

impl Battery {
    pub fn status(&self) -> BatteryStatus {
        self.placement.status()
    }

    pub fn storage_location(&self) -> Option<&str> {
        match &self.placement {
            Placement::InStore { storage_location } => Some(storage_location),
            _ => None,
        }
    }

    pub fn assignment(&self) -> Option<&Assignment> {
        match &self.placement {
            Placement::InUse { assignment } => Some(assignment),
            _ => None,
        }
    }

    pub fn decommissioned_date(&self) -> Option<NaiveDate> {
        match &self.placement {
            Placement::Decommissioned {
                decommissioned_date,
            } => Some(*decommissioned_date),
            _ => None,
        }
    }
}
