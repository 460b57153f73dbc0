//! 维修申请状态机。
//!
//! 审批轴：pending → approved | rejected（终态）。
//! 作业轴：pending → in_progress → done；驳回时强制为 declined。
//!
//! 每个流转都先做权限校验，再校验当前状态；不允许的流转一律返回错误，
//! 入参记录不会被修改，成功时返回新记录。

use chrono::NaiveDate;
use domain::permissions::{MAINTENANCE_APPROVE, MAINTENANCE_REQUEST, MAINTENANCE_WORK};
use domain::{
    ApprovalStatus, AttachmentPolicy, CapabilityCheck, CompletionReport, MaintenanceRequest,
    MaintenanceType, PermissionDenied, ValidationError, WorkStatus, parse_flight_hours,
    require_permission, require_text,
};
use std::fmt;

/// 流转动作。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    Submit,
    Approve,
    Reject,
    StartWork,
    CompleteWork,
}

impl Transition {
    /// 执行该动作所需的权限码。
    pub fn permission(&self) -> &'static str {
        match self {
            Self::Submit => MAINTENANCE_REQUEST,
            Self::Approve | Self::Reject => MAINTENANCE_APPROVE,
            Self::StartWork | Self::CompleteWork => MAINTENANCE_WORK,
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Submit => f.write_str("submit"),
            Self::Approve => f.write_str("approve"),
            Self::Reject => f.write_str("reject"),
            Self::StartWork => f.write_str("start work on"),
            Self::CompleteWork => f.write_str("complete work on"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error(transparent)]
    PermissionDenied(#[from] PermissionDenied),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("cannot {action} request {request_id}: approval is {approval}, work is {work}")]
    InvalidTransition {
        request_id: String,
        action: Transition,
        approval: ApprovalStatus,
        work: WorkStatus,
    },
}

impl WorkflowError {
    fn invalid(request: &MaintenanceRequest, action: Transition) -> Self {
        Self::InvalidTransition {
            request_id: request.id.clone(),
            action,
            approval: request.approval,
            work: request.work_status,
        }
    }
}

/// 新申请表单（数值字段保留原始文本，由校验负责解析）。
#[derive(Debug, Clone, Default)]
pub struct RequestDraft {
    pub aircraft_model: String,
    pub serial_number: String,
    pub location: String,
    pub flight_hours: String,
    pub maintenance_type: Option<MaintenanceType>,
    pub reason: String,
}

/// 校验并生成新申请，两条状态轴均为 pending。
///
/// 计划性维修的原因必须取自 `reasons` 目录；非计划性维修要求非空描述。
pub fn submit_request<C>(
    actor: &C,
    draft: RequestDraft,
    id: impl Into<String>,
    on: NaiveDate,
    reasons: &[&str],
) -> Result<MaintenanceRequest, WorkflowError>
where
    C: CapabilityCheck + ?Sized,
{
    require_permission(actor, Transition::Submit.permission())?;
    require_text("aircraftModel", &draft.aircraft_model)?;
    require_text("serialNumber", &draft.serial_number)?;
    require_text("location", &draft.location)?;
    let flight_hours = parse_flight_hours(&draft.flight_hours)?;
    let maintenance_type = draft
        .maintenance_type
        .ok_or_else(|| ValidationError::Missing("maintenanceType".to_string()))?;
    let reason = draft.reason.trim();
    require_text("reason", reason)?;
    if maintenance_type == MaintenanceType::Scheduled && !reasons.contains(&reason) {
        return Err(ValidationError::invalid(
            "reason",
            format!("{reason:?} is not a scheduled maintenance reason"),
        )
        .into());
    }

    Ok(MaintenanceRequest {
        id: id.into(),
        aircraft_model: draft.aircraft_model.trim().to_string(),
        serial_number: draft.serial_number.trim().to_string(),
        location: draft.location.trim().to_string(),
        flight_hours,
        maintenance_type,
        reason: reason.to_string(),
        approval: ApprovalStatus::Pending,
        work_status: WorkStatus::Pending,
        requested_by: actor.actor_name().to_string(),
        requested_at: on,
        completion_report: None,
    })
}

/// 批准：仅限审批 pending，作业状态保持 pending。
pub fn approve<C>(actor: &C, request: &MaintenanceRequest) -> Result<MaintenanceRequest, WorkflowError>
where
    C: CapabilityCheck + ?Sized,
{
    require_permission(actor, Transition::Approve.permission())?;
    if request.approval != ApprovalStatus::Pending {
        return Err(WorkflowError::invalid(request, Transition::Approve));
    }
    Ok(MaintenanceRequest {
        approval: ApprovalStatus::Approved,
        work_status: WorkStatus::Pending,
        ..request.clone()
    })
}

/// 驳回：仅限审批 pending，作业状态强制为 declined。
pub fn reject<C>(actor: &C, request: &MaintenanceRequest) -> Result<MaintenanceRequest, WorkflowError>
where
    C: CapabilityCheck + ?Sized,
{
    require_permission(actor, Transition::Reject.permission())?;
    if request.approval != ApprovalStatus::Pending {
        return Err(WorkflowError::invalid(request, Transition::Reject));
    }
    Ok(MaintenanceRequest {
        approval: ApprovalStatus::Rejected,
        work_status: WorkStatus::Declined,
        ..request.clone()
    })
}

/// 开工：需已批准且作业 pending。
pub fn start_work<C>(
    actor: &C,
    request: &MaintenanceRequest,
) -> Result<MaintenanceRequest, WorkflowError>
where
    C: CapabilityCheck + ?Sized,
{
    require_permission(actor, Transition::StartWork.permission())?;
    if request.approval != ApprovalStatus::Approved || request.work_status != WorkStatus::Pending {
        return Err(WorkflowError::invalid(request, Transition::StartWork));
    }
    Ok(MaintenanceRequest {
        work_status: WorkStatus::InProgress,
        ..request.clone()
    })
}

/// 完工：需已批准且作业 in_progress；完工报告必须有标题、摘要和 PDF 附件。
pub fn complete_work<C>(
    actor: &C,
    request: &MaintenanceRequest,
    report: CompletionReport,
    policy: &AttachmentPolicy,
) -> Result<MaintenanceRequest, WorkflowError>
where
    C: CapabilityCheck + ?Sized,
{
    require_permission(actor, Transition::CompleteWork.permission())?;
    if request.approval != ApprovalStatus::Approved
        || request.work_status != WorkStatus::InProgress
    {
        return Err(WorkflowError::invalid(request, Transition::CompleteWork));
    }
    validate_completion_report(&report, policy)?;
    Ok(MaintenanceRequest {
        work_status: WorkStatus::Done,
        completion_report: Some(CompletionReport {
            title: report.title.trim().to_string(),
            summary: report.summary.trim().to_string(),
            attachment: report.attachment,
        }),
        ..request.clone()
    })
}

fn validate_completion_report(
    report: &CompletionReport,
    policy: &AttachmentPolicy,
) -> Result<(), ValidationError> {
    require_text("title", &report.title)?;
    require_text("summary", &report.summary)?;
    match &report.attachment {
        Some(attachment) => policy.validate(attachment),
        None => Err(ValidationError::Missing("attachment".to_string())),
    }
}
