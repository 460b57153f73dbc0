//! 定检状态评估。
//!
//! 飞行小时非有限或为负时不做分类：无下一到期、不临近、不超期。

use crate::DEFAULT_APPROACHING_WINDOW_HOURS;
use crate::table::{GENERAL_CATEGORY, IntervalTable, ScheduledItem, normalize_key};
use domain::{Aircraft, ServiceHistoryEntry};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// 解析出的类别。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryRef<'a> {
    pub key: &'a str,
    pub items: &'a [ScheduledItem],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceStatus {
    Unclassified,
    Overdue,
    Approaching,
    UpToDate,
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unclassified => f.write_str("unclassified"),
            Self::Overdue => f.write_str("overdue"),
            Self::Approaching => f.write_str("approaching"),
            Self::UpToDate => f.write_str("up to date"),
        }
    }
}

/// 单架机体的定检评估结果。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceAssessment {
    pub category: String,
    pub next_due: Option<f64>,
    pub status: ServiceStatus,
    pub overdue_items: Vec<String>,
}

/// 定检评估器：持有注入的定检表与临近窗口。
#[derive(Debug, Clone)]
pub struct IntervalEvaluator {
    table: Arc<IntervalTable>,
    approaching_window: f64,
}

impl IntervalEvaluator {
    pub fn new(table: IntervalTable) -> Self {
        Self::shared(Arc::new(table))
    }

    pub fn shared(table: Arc<IntervalTable>) -> Self {
        Self {
            table,
            approaching_window: DEFAULT_APPROACHING_WINDOW_HOURS,
        }
    }

    /// 非有限或非正窗口保留默认值。
    pub fn with_approaching_window(mut self, hours: f64) -> Self {
        if hours.is_finite() && hours > 0.0 {
            self.approaching_window = hours;
        }
        self
    }

    pub fn approaching_window(&self) -> f64 {
        self.approaching_window
    }

    pub fn table(&self) -> &IntervalTable {
        &self.table
    }

    /// 先按制造商、再按机型查找，均未命中时回落到 GENERAL。
    pub fn resolve_category(&self, aircraft: &Aircraft) -> CategoryRef<'_> {
        for raw in [&aircraft.manufacturer, &aircraft.aircraft_type] {
            let key = normalize_key(raw);
            if key.is_empty() {
                continue;
            }
            if let Some((key, items)) = self.table.entry(&key) {
                return CategoryRef { key, items };
            }
        }
        CategoryRef {
            key: GENERAL_CATEGORY,
            items: self.table.general(),
        }
    }

    /// 大于当前小时的最小阈值；无阈值或已越过全部阈值时为 None。
    pub fn next_due_interval(&self, aircraft: &Aircraft) -> Option<f64> {
        let hours = classifiable_hours(aircraft)?;
        sorted_thresholds(self.resolve_category(aircraft).items)
            .into_iter()
            .find(|threshold| *threshold > hours)
    }

    /// 距下一阈值的差值落在 (0, window] 内。
    pub fn is_approaching(&self, aircraft: &Aircraft) -> bool {
        let Some(hours) = classifiable_hours(aircraft) else {
            return false;
        };
        match self.next_due_interval(aircraft) {
            Some(next) => {
                let gap = next - hours;
                gap > 0.0 && gap <= self.approaching_window
            }
            None => false,
        }
    }

    /// 存在已越过但履历中无完成记录的阈值项目。
    pub fn is_overdue(&self, aircraft: &Aircraft) -> bool {
        !self.overdue_items(aircraft).is_empty()
    }

    /// 未完成的超期项目代码，按阈值升序。
    pub fn overdue_items(&self, aircraft: &Aircraft) -> Vec<String> {
        let Some(hours) = classifiable_hours(aircraft) else {
            return Vec::new();
        };
        let mut due: Vec<(f64, &ScheduledItem)> = self
            .resolve_category(aircraft)
            .items
            .iter()
            .filter_map(|item| item.hours.map(|threshold| (threshold, item)))
            .filter(|(threshold, _)| *threshold <= hours)
            .collect();
        due.sort_by(|a, b| a.0.total_cmp(&b.0));
        due.into_iter()
            .filter(|(threshold, item)| !is_completed(&aircraft.history, item, *threshold))
            .map(|(_, item)| item.code.clone())
            .collect()
    }

    /// 汇总评估；超期优先于临近。
    pub fn evaluate(&self, aircraft: &Aircraft) -> ServiceAssessment {
        let category = self.resolve_category(aircraft).key.to_string();
        if classifiable_hours(aircraft).is_none() {
            return ServiceAssessment {
                category,
                next_due: None,
                status: ServiceStatus::Unclassified,
                overdue_items: Vec::new(),
            };
        }
        let next_due = self.next_due_interval(aircraft);
        let overdue_items = self.overdue_items(aircraft);
        let status = if !overdue_items.is_empty() {
            ServiceStatus::Overdue
        } else if self.is_approaching(aircraft) {
            ServiceStatus::Approaching
        } else {
            ServiceStatus::UpToDate
        };
        ServiceAssessment {
            category,
            next_due,
            status,
            overdue_items,
        }
    }
}

fn classifiable_hours(aircraft: &Aircraft) -> Option<f64> {
    let hours = aircraft.flight_hours;
    (hours.is_finite() && hours >= 0.0).then_some(hours)
}

fn sorted_thresholds(items: &[ScheduledItem]) -> Vec<f64> {
    let mut thresholds: Vec<f64> = items.iter().filter_map(|item| item.hours).collect();
    thresholds.sort_by(f64::total_cmp);
    thresholds.dedup();
    thresholds
}

/// 履历是否记录了该项目的完成。
///
/// 带 `completed_interval` 的条目只匹配同代码项目；
/// 无代码的旧条目退回到标题中的整数字匹配（"200" 不匹配 "1200" 或 "2000"）。
fn is_completed(history: &[ServiceHistoryEntry], item: &ScheduledItem, threshold: f64) -> bool {
    history.iter().any(|entry| match entry.completed_interval.as_deref() {
        Some(code) => code.trim().eq_ignore_ascii_case(item.code.trim()),
        None => title_mentions_hours(&entry.title, threshold),
    })
}

fn title_mentions_hours(title: &str, threshold: f64) -> bool {
    numeric_tokens(title).any(|value| value == threshold)
}

fn numeric_tokens(text: &str) -> impl Iterator<Item = f64> + '_ {
    text.split(|ch: char| !(ch.is_ascii_digit() || ch == '.'))
        .map(|token| token.trim_matches('.'))
        .filter(|token| !token.is_empty())
        .filter_map(|token| token.parse::<f64>().ok())
}
