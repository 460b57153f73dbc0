//! 定检间隔评估：按制造商/机型解析定检表，计算下一次到期小时、临近与超期。
//!
//! 规则均为纯函数；定检表是注入的不可变值。

pub mod evaluator;
pub mod table;

pub use evaluator::{CategoryRef, IntervalEvaluator, ServiceAssessment, ServiceStatus};
pub use table::{
    GENERAL_CATEGORY, IntervalTable, IntervalTableError, ScheduledItem, normalize_key,
};

/// 默认临近窗口（小时）。
pub const DEFAULT_APPROACHING_WINDOW_HOURS: f64 = 10.0;
