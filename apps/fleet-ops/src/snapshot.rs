//! 机队快照：JSON 导入的全部记录，或内置演示数据。

use domain::{ActivityEntry, Aircraft, Battery, MaintenanceReport, MaintenanceRequest};
use serde::{Deserialize, Serialize};

const DEMO_SNAPSHOT: &str = include_str!("../data/demo-snapshot.json");

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("read snapshot {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("parse snapshot: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetSnapshot {
    #[serde(default)]
    pub aircraft: Vec<Aircraft>,
    #[serde(default)]
    pub requests: Vec<MaintenanceRequest>,
    #[serde(default)]
    pub batteries: Vec<Battery>,
    #[serde(default)]
    pub reports: Vec<MaintenanceReport>,
    #[serde(default)]
    pub activities: Vec<ActivityEntry>,
}

impl FleetSnapshot {
    pub fn from_json(document: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(document)?)
    }

    pub async fn load(path: &str) -> Result<Self, SnapshotError> {
        let document = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| SnapshotError::Io {
                path: path.to_string(),
                source,
            })?;
        Self::from_json(&document)
    }

    /// 内置演示数据（5 架机体、2 条维修申请、6 块电池、6 条动态）。
    pub fn demo() -> Result<Self, SnapshotError> {
        Self::from_json(DEMO_SNAPSHOT)
    }
}
