//! 维修申请流程：审批轴与作业轴状态机、列表统计、申请与报告服务。
//!
//! 纯规则在 [`workflow`]，异步服务在 [`service`]。

pub mod query;
pub mod service;
pub mod workflow;

pub use query::{MaintenanceAnalytics, analytics, matches_search, search};
pub use service::{MaintenanceService, ReportDraft, ReportService, ServiceError};
pub use workflow::{
    RequestDraft, Transition, WorkflowError, approve, complete_work, reject, start_work,
    submit_request,
};
