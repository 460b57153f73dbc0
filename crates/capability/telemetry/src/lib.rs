//! 日志初始化、巡检关联 ID 与计数指标。

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 指标快照。
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsSnapshot {
    pub assessments: u64,
    pub transitions_applied: u64,
    pub transitions_rejected: u64,
    pub validation_failures: u64,
    pub permission_denials: u64,
    pub activities_recorded: u64,
}

/// 进程级计数指标。
pub struct TelemetryMetrics {
    assessments: AtomicU64,
    transitions_applied: AtomicU64,
    transitions_rejected: AtomicU64,
    validation_failures: AtomicU64,
    permission_denials: AtomicU64,
    activities_recorded: AtomicU64,
}

impl TelemetryMetrics {
    pub fn new() -> Self {
        Self {
            assessments: AtomicU64::new(0),
            transitions_applied: AtomicU64::new(0),
            transitions_rejected: AtomicU64::new(0),
            validation_failures: AtomicU64::new(0),
            permission_denials: AtomicU64::new(0),
            activities_recorded: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            assessments: self.assessments.load(Ordering::Relaxed),
            transitions_applied: self.transitions_applied.load(Ordering::Relaxed),
            transitions_rejected: self.transitions_rejected.load(Ordering::Relaxed),
            validation_failures: self.validation_failures.load(Ordering::Relaxed),
            permission_denials: self.permission_denials.load(Ordering::Relaxed),
            activities_recorded: self.activities_recorded.load(Ordering::Relaxed),
        }
    }
}

impl Default for TelemetryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

static METRICS: OnceLock<TelemetryMetrics> = OnceLock::new();

/// 获取全局指标实例。
pub fn metrics() -> &'static TelemetryMetrics {
    METRICS.get_or_init(TelemetryMetrics::new)
}

/// 初始化 tracing（默认 info）。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// 生成一次巡检运行的关联 ID。
pub fn new_run_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// 记录一次维护状态评估。
pub fn record_assessment() {
    metrics().assessments.fetch_add(1, Ordering::Relaxed);
}

/// 记录一次成功的状态流转。
pub fn record_transition_applied() {
    metrics().transitions_applied.fetch_add(1, Ordering::Relaxed);
}

/// 记录一次被拒绝的状态流转（非法状态）。
pub fn record_transition_rejected() {
    metrics().transitions_rejected.fetch_add(1, Ordering::Relaxed);
}

/// 记录一次校验失败。
pub fn record_validation_failure() {
    metrics().validation_failures.fetch_add(1, Ordering::Relaxed);
}

/// 记录一次权限拒绝。
pub fn record_permission_denial() {
    metrics().permission_denials.fetch_add(1, Ordering::Relaxed);
}

/// 记录动态写入次数。
pub fn record_activity() {
    metrics().activities_recorded.fetch_add(1, Ordering::Relaxed);
}
