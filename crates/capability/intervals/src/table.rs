//! 定检表：类别键 → 定检项目列表。

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 兜底类别键。
pub const GENERAL_CATEGORY: &str = "GENERAL";

/// 定检项目。`hours` 为空表示年检/合规类项目，不参与小时计算。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledItem {
    pub code: String,
    pub label: String,
    #[serde(default)]
    pub hours: Option<f64>,
}

impl ScheduledItem {
    pub fn hourly(code: &str, label: &str, hours: f64) -> Self {
        Self {
            code: code.to_string(),
            label: label.to_string(),
            hours: Some(hours),
        }
    }

    pub fn calendar(code: &str, label: &str) -> Self {
        Self {
            code: code.to_string(),
            label: label.to_string(),
            hours: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IntervalTableError {
    #[error("interval table must define a {GENERAL_CATEGORY} category")]
    MissingGeneral,
    #[error("category key is empty")]
    EmptyCategory,
    #[error("category {0} is defined more than once")]
    DuplicateCategory(String),
    #[error("item in category {category} has an empty code")]
    EmptyCode { category: String },
    #[error("item {code} in category {category} has invalid threshold {hours}")]
    InvalidThreshold {
        category: String,
        code: String,
        hours: f64,
    },
    #[error("invalid interval table document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// 类别键归一化：去首尾空白、转大写，空白/连字符/下划线连续段折叠为单个空格。
///
/// "Fixed-Wing"、"fixed_wing"、" FIXED  WING " 均得到 "FIXED WING"。
pub fn normalize_key(raw: &str) -> String {
    raw.split(|ch: char| ch.is_whitespace() || ch == '-' || ch == '_')
        .filter(|part| !part.is_empty())
        .map(|part| part.to_uppercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// 不可变定检表。
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalTable {
    categories: BTreeMap<String, Vec<ScheduledItem>>,
}

impl IntervalTable {
    /// 构造并校验：键归一化后唯一、必须含 GENERAL、阈值有限且非负。
    pub fn new<I, K>(categories: I) -> Result<Self, IntervalTableError>
    where
        I: IntoIterator<Item = (K, Vec<ScheduledItem>)>,
        K: AsRef<str>,
    {
        let mut normalized = BTreeMap::new();
        for (raw_key, items) in categories {
            let key = normalize_key(raw_key.as_ref());
            if key.is_empty() {
                return Err(IntervalTableError::EmptyCategory);
            }
            for item in &items {
                if item.code.trim().is_empty() {
                    return Err(IntervalTableError::EmptyCode {
                        category: key.clone(),
                    });
                }
                if let Some(hours) = item.hours {
                    if !hours.is_finite() || hours < 0.0 {
                        return Err(IntervalTableError::InvalidThreshold {
                            category: key.clone(),
                            code: item.code.clone(),
                            hours,
                        });
                    }
                }
            }
            if normalized.insert(key.clone(), items).is_some() {
                return Err(IntervalTableError::DuplicateCategory(key));
            }
        }
        if !normalized.contains_key(GENERAL_CATEGORY) {
            return Err(IntervalTableError::MissingGeneral);
        }
        Ok(Self {
            categories: normalized,
        })
    }

    /// 从 JSON 文档加载：`{ "DJI": [{ "code": "...", "label": "...", "hours": 100 }] }`。
    pub fn from_json(document: &str) -> Result<Self, IntervalTableError> {
        let raw: BTreeMap<String, Vec<ScheduledItem>> = serde_json::from_str(document)?;
        Self::new(raw)
    }

    /// 内置定检表。
    pub fn builtin() -> Self {
        let hourly = ScheduledItem::hourly;
        let annual = || ScheduledItem::calendar("ANNUAL", "Annual Airworthiness Review");
        let mut categories = BTreeMap::new();
        categories.insert(
            "DJI".to_string(),
            vec![
                hourly("50H", "50 Hour Routine Inspection", 50.0),
                hourly("100H", "100 Hour Full Inspection", 100.0),
                hourly("200H", "200 Hour Propulsion Overhaul", 200.0),
                hourly("300H", "300 Hour Airframe Inspection", 300.0),
                annual(),
            ],
        );
        categories.insert(
            "AUTEL ROBOTICS".to_string(),
            vec![
                hourly("50H", "50 Hour Routine Inspection", 50.0),
                hourly("100H", "100 Hour Full Inspection", 100.0),
                hourly("200H", "200 Hour Gimbal and Motor Service", 200.0),
            ],
        );
        categories.insert(
            "WINGTRA".to_string(),
            vec![
                hourly("25H", "25 Hour Servo Check", 25.0),
                hourly("100H", "100 Hour Full Inspection", 100.0),
                hourly("250H", "250 Hour Wing Structure Inspection", 250.0),
                annual(),
            ],
        );
        categories.insert(
            "QUANTUM SYSTEMS".to_string(),
            vec![
                hourly("50H", "50 Hour Routine Inspection", 50.0),
                hourly("150H", "150 Hour Tilt Mechanism Service", 150.0),
                hourly("300H", "300 Hour Airframe Inspection", 300.0),
            ],
        );
        categories.insert(
            "QUADCOPTER".to_string(),
            vec![
                hourly("50H", "50 Hour Routine Inspection", 50.0),
                hourly("100H", "100 Hour Full Inspection", 100.0),
                hourly("200H", "200 Hour Motor Bearing Replacement", 200.0),
            ],
        );
        categories.insert(
            "HEXACOPTER".to_string(),
            vec![
                hourly("50H", "50 Hour Routine Inspection", 50.0),
                hourly("150H", "150 Hour Full Inspection", 150.0),
                hourly("300H", "300 Hour Motor Replacement", 300.0),
            ],
        );
        categories.insert(
            "FIXED WING".to_string(),
            vec![
                hourly("25H", "25 Hour Control Surface Check", 25.0),
                hourly("100H", "100 Hour Full Inspection", 100.0),
                hourly("250H", "250 Hour Airframe Inspection", 250.0),
            ],
        );
        categories.insert(
            "VTOL".to_string(),
            vec![
                hourly("50H", "50 Hour Routine Inspection", 50.0),
                hourly("150H", "150 Hour Transition System Check", 150.0),
                hourly("300H", "300 Hour Airframe Inspection", 300.0),
            ],
        );
        categories.insert(
            GENERAL_CATEGORY.to_string(),
            vec![
                hourly("50H", "50 Hour Routine Inspection", 50.0),
                hourly("100H", "100 Hour Full Inspection", 100.0),
                hourly("200H", "200 Hour Major Inspection", 200.0),
                annual(),
            ],
        );
        Self { categories }
    }

    /// 按已归一化的键查找类别。
    pub fn category(&self, key: &str) -> Option<&[ScheduledItem]> {
        self.categories.get(key).map(Vec::as_slice)
    }

    /// 同 `category`，附带表内存储的键。
    pub fn entry(&self, key: &str) -> Option<(&str, &[ScheduledItem])> {
        self.categories
            .get_key_value(key)
            .map(|(key, items)| (key.as_str(), items.as_slice()))
    }

    /// 兜底类别（构造时已保证存在）。
    pub fn general(&self) -> &[ScheduledItem] {
        self.category(GENERAL_CATEGORY).unwrap_or(&[])
    }

    pub fn category_keys(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }
}

impl Default for IntervalTable {
    fn default() -> Self {
        Self::builtin()
    }
}
