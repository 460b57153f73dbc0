//! 机体记录与维修履历。

use crate::validation::ValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// 机体运行状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AircraftStatus {
    #[serde(rename = "IN_SERVICE", alias = "In Service")]
    InService,
    #[serde(rename = "UNDER_MAINTENANCE", alias = "Under Maintenance")]
    UnderMaintenance,
    #[serde(rename = "GROUNDED", alias = "Grounded")]
    Grounded,
}

impl AircraftStatus {
    pub const ALL: [AircraftStatus; 3] = [Self::InService, Self::UnderMaintenance, Self::Grounded];

    pub fn code(&self) -> &'static str {
        match self {
            Self::InService => "IN_SERVICE",
            Self::UnderMaintenance => "UNDER_MAINTENANCE",
            Self::Grounded => "GROUNDED",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::InService => "In Service",
            Self::UnderMaintenance => "Under Maintenance",
            Self::Grounded => "Grounded",
        }
    }

    /// 解析状态码或展示名（大小写、空格/下划线/连字符不敏感）。
    pub fn parse(value: &str) -> Option<Self> {
        let key: String = value
            .trim()
            .chars()
            .filter(|ch| !matches!(ch, ' ' | '_' | '-'))
            .collect::<String>()
            .to_ascii_uppercase();
        match key.as_str() {
            "INSERVICE" => Some(Self::InService),
            "UNDERMAINTENANCE" => Some(Self::UnderMaintenance),
            "GROUNDED" => Some(Self::Grounded),
            _ => None,
        }
    }
}

impl fmt::Display for AircraftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 已完成的维修履历条目。
///
/// `completed_interval` 记录所完成的定检项目代码；历史导入数据可能缺失。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceHistoryEntry {
    pub title: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub files: Vec<String>,
    #[serde(default)]
    pub completed_interval: Option<String>,
}

/// 机体记录。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aircraft {
    pub id: String,
    pub model: String,
    pub serial: String,
    pub manufacturer: String,
    #[serde(rename = "type")]
    pub aircraft_type: String,
    pub status: AircraftStatus,
    /// 导入数据中的文本小时会被解析；无法解析时记为 NaN，评估为未分类。
    #[serde(default = "unknown_hours", deserialize_with = "lenient_hours")]
    pub flight_hours: f64,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub history: Vec<ServiceHistoryEntry>,
}

fn unknown_hours() -> f64 {
    f64::NAN
}

/// 接受数字或文本形式的小时数；null、空串与非数字文本都记为 NaN。
fn lenient_hours<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawHours {
        Number(f64),
        Text(String),
    }

    let hours = match Option::<RawHours>::deserialize(deserializer)? {
        Some(RawHours::Number(value)) => value,
        Some(RawHours::Text(text)) => text.trim().parse::<f64>().unwrap_or(f64::NAN),
        None => f64::NAN,
    };
    Ok(hours)
}

/// 解析表单输入的飞行小时。
///
/// 空值、非数字、负数或非有限值均为校验错误，不会被当作 0。
pub fn parse_flight_hours(raw: &str) -> Result<f64, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Missing("flightHours".to_string()));
    }
    let value = trimmed
        .parse::<f64>()
        .map_err(|_| ValidationError::NotANumber {
            field: "flightHours".to_string(),
            value: raw.to_string(),
        })?;
    if !value.is_finite() {
        return Err(ValidationError::NotANumber {
            field: "flightHours".to_string(),
            value: raw.to_string(),
        });
    }
    if value < 0.0 {
        return Err(ValidationError::invalid("flightHours", "must not be negative"));
    }
    Ok(value)
}
