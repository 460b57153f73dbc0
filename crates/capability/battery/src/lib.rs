//! 电池生命周期规则与服务。

pub mod lifecycle;
pub mod service;

pub use lifecycle::{
    AssignmentDraft, BatteryAction, BatteryError, CRITICAL_CYCLE_THRESHOLD, PurchaseDraft,
    assign, decommission, health_for_cycles, is_critical, register_purchase,
};
pub use service::{BatteryService, BatterySummary, ServiceError, matches_search, summarize};
