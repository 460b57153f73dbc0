//! 维修申请与维修报告服务：持久化、动态记录、日志与计数。

use crate::query::{self, MaintenanceAnalytics};
use crate::workflow::{self, RequestDraft, Transition, WorkflowError};
use chrono::{NaiveDate, Utc};
use domain::permissions::REPORT_UPLOAD;
use domain::{
    ActivityKind, ActorContext, Attachment, AttachmentPolicy, CapabilityCheck,
    CompletionReport, MaintenanceReport, MaintenanceRequest, PermissionDenied, SCHEDULED_REASONS,
    ValidationError, require_permission, require_text,
};
use fleet_storage::{ActivityStore, MaintenanceRequestStore, ReportStore, log_activity};
use fleet_telemetry::{
    record_permission_denial, record_transition_applied, record_transition_rejected,
    record_validation_failure,
};
use std::sync::Arc;
use tracing::{info, warn};

/// 服务层错误。
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Workflow(#[from] WorkflowError),
    #[error("{0} not found")]
    NotFound(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<PermissionDenied> for ServiceError {
    fn from(err: PermissionDenied) -> Self {
        Self::Workflow(WorkflowError::PermissionDenied(err))
    }
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        Self::Workflow(WorkflowError::Validation(err))
    }
}

/// 按错误类型累加计数。
fn record_rejection(err: &WorkflowError) {
    match err {
        WorkflowError::PermissionDenied(_) => record_permission_denial(),
        WorkflowError::Validation(_) => record_validation_failure(),
        WorkflowError::InvalidTransition { .. } => record_transition_rejected(),
    }
}

fn short_id(prefix: &str) -> String {
    let raw = uuid::Uuid::new_v4().simple().to_string();
    format!("{}-{}", prefix, raw[..8].to_ascii_uppercase())
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// 维修申请服务。
pub struct MaintenanceService {
    request_store: Arc<dyn MaintenanceRequestStore>,
    activity_store: Arc<dyn ActivityStore>,
    attachment_policy: AttachmentPolicy,
}

impl MaintenanceService {
    pub fn new(
        request_store: Arc<dyn MaintenanceRequestStore>,
        activity_store: Arc<dyn ActivityStore>,
    ) -> Self {
        Self::new_with_policy(request_store, activity_store, AttachmentPolicy::default())
    }

    pub fn new_with_policy(
        request_store: Arc<dyn MaintenanceRequestStore>,
        activity_store: Arc<dyn ActivityStore>,
        attachment_policy: AttachmentPolicy,
    ) -> Self {
        Self {
            request_store,
            activity_store,
            attachment_policy,
        }
    }

    pub async fn submit(
        &self,
        ctx: &ActorContext,
        draft: RequestDraft,
    ) -> Result<MaintenanceRequest, ServiceError> {
        let record = workflow::submit_request(
            ctx,
            draft,
            short_id("MT"),
            today(),
            SCHEDULED_REASONS,
        )
        .inspect_err(|err| {
            record_rejection(err);
            warn!(
                target: "fleet.maintenance",
                actor = %ctx.user_id,
                error = %err,
                "maintenance_submit_rejected"
            );
        })?;
        let record = self
            .request_store
            .create_request(ctx, record)
            .await
            .map_err(|err| ServiceError::Storage(err.to_string()))?;
        record_transition_applied();
        info!(
            target: "fleet.maintenance",
            actor = %ctx.user_id,
            request_id = %record.id,
            maintenance_type = %record.maintenance_type,
            serial = %record.serial_number,
            "maintenance_request_submitted"
        );
        log_activity(
            self.activity_store.as_ref(),
            ctx,
            ActivityKind::Add,
            format!(
                "submitted {} maintenance request for {}",
                record.maintenance_type, record.aircraft_model
            ),
            format!("maintenance:{}", record.id),
        )
        .await;
        Ok(record)
    }

    pub async fn approve(
        &self,
        ctx: &ActorContext,
        request_id: &str,
    ) -> Result<MaintenanceRequest, ServiceError> {
        self.transition(ctx, request_id, Transition::Approve, |current| {
            workflow::approve(ctx, current)
        })
        .await
    }

    pub async fn reject(
        &self,
        ctx: &ActorContext,
        request_id: &str,
    ) -> Result<MaintenanceRequest, ServiceError> {
        self.transition(ctx, request_id, Transition::Reject, |current| {
            workflow::reject(ctx, current)
        })
        .await
    }

    pub async fn start_work(
        &self,
        ctx: &ActorContext,
        request_id: &str,
    ) -> Result<MaintenanceRequest, ServiceError> {
        self.transition(ctx, request_id, Transition::StartWork, |current| {
            workflow::start_work(ctx, current)
        })
        .await
    }

    pub async fn complete_work(
        &self,
        ctx: &ActorContext,
        request_id: &str,
        report: CompletionReport,
    ) -> Result<MaintenanceRequest, ServiceError> {
        let policy = self.attachment_policy;
        self.transition(ctx, request_id, Transition::CompleteWork, move |current| {
            workflow::complete_work(ctx, current, report, &policy)
        })
        .await
    }

    pub async fn list(&self, ctx: &ActorContext) -> Result<Vec<MaintenanceRequest>, ServiceError> {
        self.request_store
            .list_requests(ctx)
            .await
            .map_err(|err| ServiceError::Storage(err.to_string()))
    }

    pub async fn search(
        &self,
        ctx: &ActorContext,
        text: &str,
    ) -> Result<Vec<MaintenanceRequest>, ServiceError> {
        let records = self.list(ctx).await?;
        Ok(query::search(&records, text))
    }

    pub async fn analytics(&self, ctx: &ActorContext) -> Result<MaintenanceAnalytics, ServiceError> {
        let records = self.list(ctx).await?;
        Ok(query::analytics(&records))
    }

    async fn transition<F>(
        &self,
        ctx: &ActorContext,
        request_id: &str,
        action: Transition,
        apply: F,
    ) -> Result<MaintenanceRequest, ServiceError>
    where
        F: FnOnce(&MaintenanceRequest) -> Result<MaintenanceRequest, WorkflowError>,
    {
        let current = self
            .request_store
            .find_request(ctx, request_id)
            .await
            .map_err(|err| ServiceError::Storage(err.to_string()))?
            .ok_or_else(|| ServiceError::NotFound(format!("maintenance request {request_id}")))?;
        let next = apply(&current).inspect_err(|err| {
            record_rejection(err);
            warn!(
                target: "fleet.maintenance",
                actor = %ctx.user_id,
                request_id = %request_id,
                action = %action,
                error = %err,
                "maintenance_transition_rejected"
            );
        })?;
        let next = self
            .request_store
            .update_request(ctx, next)
            .await
            .map_err(|err| ServiceError::Storage(err.to_string()))?
            .ok_or_else(|| ServiceError::NotFound(format!("maintenance request {request_id}")))?;
        record_transition_applied();
        info!(
            target: "fleet.maintenance",
            actor = %ctx.user_id,
            request_id = %next.id,
            action = %action,
            approval = %next.approval,
            work_status = %next.work_status,
            "maintenance_transition_applied"
        );
        let kind = match action {
            Transition::Submit => ActivityKind::Add,
            Transition::Approve => ActivityKind::Approve,
            Transition::Reject => ActivityKind::Decline,
            Transition::StartWork | Transition::CompleteWork => ActivityKind::Update,
        };
        log_activity(
            self.activity_store.as_ref(),
            ctx,
            kind,
            format!(
                "{} maintenance request for {} ({})",
                past_tense(action),
                next.aircraft_model,
                next.work_status.label()
            ),
            format!("maintenance:{}", next.id),
        )
        .await;
        Ok(next)
    }
}

fn past_tense(action: Transition) -> &'static str {
    match action {
        Transition::Submit => "submitted",
        Transition::Approve => "approved",
        Transition::Reject => "rejected",
        Transition::StartWork => "started work on",
        Transition::CompleteWork => "completed work on",
    }
}

/// 报告上传表单。
#[derive(Debug, Clone, Default)]
pub struct ReportDraft {
    pub title: String,
    pub content: String,
    /// 缺省为当天。
    pub date: Option<NaiveDate>,
    pub attachment: Option<Attachment>,
}

/// 维修报告服务。
pub struct ReportService {
    report_store: Arc<dyn ReportStore>,
    activity_store: Arc<dyn ActivityStore>,
    attachment_policy: AttachmentPolicy,
}

impl ReportService {
    pub fn new(
        report_store: Arc<dyn ReportStore>,
        activity_store: Arc<dyn ActivityStore>,
        attachment_policy: AttachmentPolicy,
    ) -> Self {
        Self {
            report_store,
            activity_store,
            attachment_policy,
        }
    }

    pub async fn upload_report(
        &self,
        ctx: &ActorContext,
        draft: ReportDraft,
    ) -> Result<MaintenanceReport, ServiceError> {
        if let Err(err) = require_permission(ctx, REPORT_UPLOAD) {
            record_permission_denial();
            warn!(
                target: "fleet.reports",
                actor = %ctx.user_id,
                error = %err,
                "report_upload_denied"
            );
            return Err(err.into());
        }
        if let Err(err) = self.validate_draft(&draft) {
            record_validation_failure();
            warn!(
                target: "fleet.reports",
                actor = %ctx.user_id,
                error = %err,
                "report_upload_invalid"
            );
            return Err(err.into());
        }
        let record = MaintenanceReport {
            id: short_id("RPT"),
            title: draft.title.trim().to_string(),
            date: draft.date.unwrap_or_else(today),
            content: draft.content.trim().to_string(),
            attachment: draft.attachment,
            uploaded_by: ctx.actor_name().to_string(),
        };
        let record = self
            .report_store
            .create_report(ctx, record)
            .await
            .map_err(|err| ServiceError::Storage(err.to_string()))?;
        info!(
            target: "fleet.reports",
            actor = %ctx.user_id,
            report_id = %record.id,
            has_attachment = record.attachment.is_some(),
            "report_uploaded"
        );
        log_activity(
            self.activity_store.as_ref(),
            ctx,
            ActivityKind::Add,
            format!("uploaded report {}", record.title),
            format!("report:{}", record.id),
        )
        .await;
        Ok(record)
    }

    pub async fn list_reports(
        &self,
        ctx: &ActorContext,
    ) -> Result<Vec<MaintenanceReport>, ServiceError> {
        self.report_store
            .list_reports(ctx)
            .await
            .map_err(|err| ServiceError::Storage(err.to_string()))
    }

    fn validate_draft(&self, draft: &ReportDraft) -> Result<(), ValidationError> {
        require_text("title", &draft.title)?;
        require_text("content", &draft.content)?;
        if let Some(attachment) = &draft.attachment {
            self.attachment_policy.validate(attachment)?;
        }
        Ok(())
    }
}
