use chrono::NaiveDate;
use domain::permissions::{ROLE_ADMIN, ROLE_GENERAL, ROLE_TECHNICAL};
use domain::{
    ActorContext, ApprovalStatus, Attachment, AttachmentPolicy, CompletionReport,
    MaintenanceRequest, MaintenanceType, SCHEDULED_REASONS, ValidationError, WorkStatus,
};
use fleet_maintenance::{
    RequestDraft, Transition, WorkflowError, approve, complete_work, reject, start_work,
    submit_request,
};

fn actor(role: &str) -> ActorContext {
    ActorContext::with_roles(
        format!("{}-user", role.to_lowercase()),
        format!("{role} User"),
        vec![role.to_string()],
    )
}

fn request(approval: ApprovalStatus, work: WorkStatus) -> MaintenanceRequest {
    MaintenanceRequest {
        id: "MT-1001".to_string(),
        aircraft_model: "Matrice 300".to_string(),
        serial_number: "DJI-M300-8821".to_string(),
        location: "Port Harcourt Hub".to_string(),
        flight_hours: 96.0,
        maintenance_type: MaintenanceType::Scheduled,
        reason: "100 Hour Full Inspection".to_string(),
        approval,
        work_status: work,
        requested_by: "ops.team".to_string(),
        requested_at: NaiveDate::from_ymd_opt(2026, 2, 1).expect("date"),
        completion_report: None,
    }
}

fn report(title: &str, summary: &str, file: Option<&str>) -> CompletionReport {
    CompletionReport {
        title: title.to_string(),
        summary: summary.to_string(),
        attachment: file.map(Attachment::named),
    }
}

#[test]
fn reject_forces_declined_and_blocks_work() {
    let admin = actor(ROLE_ADMIN);
    let pending = request(ApprovalStatus::Pending, WorkStatus::Pending);
    let rejected = reject(&admin, &pending).expect("reject");
    assert_eq!(rejected.approval, ApprovalStatus::Rejected);
    assert_eq!(rejected.work_status, WorkStatus::Declined);
    assert_eq!(pending.approval, ApprovalStatus::Pending);

    let err = start_work(&admin, &rejected).expect_err("start after reject");
    assert!(matches!(
        err,
        WorkflowError::InvalidTransition {
            action: Transition::StartWork,
            approval: ApprovalStatus::Rejected,
            work: WorkStatus::Declined,
            ..
        }
    ));
}

#[test]
fn approve_keeps_work_pending_and_is_single_shot() {
    let admin = actor(ROLE_ADMIN);
    let approved = approve(&admin, &request(ApprovalStatus::Pending, WorkStatus::Pending))
        .expect("approve");
    assert_eq!(approved.approval, ApprovalStatus::Approved);
    assert_eq!(approved.work_status, WorkStatus::Pending);

    assert!(approve(&admin, &approved).is_err());
    assert!(reject(&admin, &approved).is_err());
}

#[test]
fn full_happy_path_attaches_report() {
    let admin = actor(ROLE_ADMIN);
    let technician = actor(ROLE_TECHNICAL);
    let policy = AttachmentPolicy::default();

    let approved =
        approve(&admin, &request(ApprovalStatus::Pending, WorkStatus::Pending)).expect("approve");
    let started = start_work(&technician, &approved).expect("start");
    assert_eq!(started.work_status, WorkStatus::InProgress);
    assert!(start_work(&technician, &started).is_err());

    let done = complete_work(&technician, &started, report("T", "S", Some("report.pdf")), &policy)
        .expect("complete");
    assert_eq!(done.work_status, WorkStatus::Done);
    let attached = done.completion_report.expect("report attached");
    assert_eq!(attached.title, "T");
    assert_eq!(attached.summary, "S");
    assert_eq!(
        attached.attachment.expect("attachment").file_name,
        "report.pdf"
    );
}

#[test]
fn complete_with_incomplete_report_fails_without_change() {
    let technician = actor(ROLE_TECHNICAL);
    let policy = AttachmentPolicy::default();
    let in_progress = request(ApprovalStatus::Approved, WorkStatus::InProgress);

    for bad in [
        report("", "", None),
        report("T", "", Some("report.pdf")),
        report("T", "S", None),
        report("T", "S", Some("report.docx")),
    ] {
        let err = complete_work(&technician, &in_progress, bad, &policy).expect_err("invalid");
        assert!(matches!(err, WorkflowError::Validation(_)));
    }
    assert_eq!(in_progress.work_status, WorkStatus::InProgress);
    assert!(in_progress.completion_report.is_none());
}

#[test]
fn complete_rejects_oversized_pdf() {
    let technician = actor(ROLE_TECHNICAL);
    let policy = AttachmentPolicy::new(1024);
    let mut big = report("T", "S", Some("report.pdf"));
    if let Some(attachment) = big.attachment.as_mut() {
        attachment.size_bytes = 4096;
    }
    let err = complete_work(
        &technician,
        &request(ApprovalStatus::Approved, WorkStatus::InProgress),
        big,
        &policy,
    )
    .expect_err("too large");
    assert!(matches!(
        err,
        WorkflowError::Validation(ValidationError::AttachmentTooLarge { .. })
    ));
}

#[test]
fn complete_requires_work_in_progress() {
    let technician = actor(ROLE_TECHNICAL);
    let policy = AttachmentPolicy::default();
    let err = complete_work(
        &technician,
        &request(ApprovalStatus::Approved, WorkStatus::Pending),
        report("T", "S", Some("report.pdf")),
        &policy,
    )
    .expect_err("not started");
    assert!(matches!(err, WorkflowError::InvalidTransition { .. }));
}

#[test]
fn every_transition_checks_permission() {
    let general = actor(ROLE_GENERAL);
    let technician = actor(ROLE_TECHNICAL);
    let policy = AttachmentPolicy::default();
    let pending = request(ApprovalStatus::Pending, WorkStatus::Pending);

    assert!(matches!(
        approve(&technician, &pending),
        Err(WorkflowError::PermissionDenied(_))
    ));
    assert!(matches!(
        reject(&general, &pending),
        Err(WorkflowError::PermissionDenied(_))
    ));
    assert!(matches!(
        start_work(&general, &request(ApprovalStatus::Approved, WorkStatus::Pending)),
        Err(WorkflowError::PermissionDenied(_))
    ));
    assert!(matches!(
        complete_work(
            &general,
            &request(ApprovalStatus::Approved, WorkStatus::InProgress),
            report("T", "S", Some("report.pdf")),
            &policy,
        ),
        Err(WorkflowError::PermissionDenied(_))
    ));
    assert!(matches!(
        submit_request(
            &ActorContext::new("nobody", "Nobody", Vec::new(), Vec::new()),
            RequestDraft::default(),
            "MT-1",
            NaiveDate::from_ymd_opt(2026, 2, 1).expect("date"),
            SCHEDULED_REASONS,
        ),
        Err(WorkflowError::PermissionDenied(_))
    ));
}

#[test]
fn submit_validates_hours_and_reasons() {
    let general = actor(ROLE_GENERAL);
    let on = NaiveDate::from_ymd_opt(2026, 2, 3).expect("date");
    let draft = RequestDraft {
        aircraft_model: "Mavic 3 Pro".to_string(),
        serial_number: "DJI-M3P-7755".to_string(),
        location: "Lagos Base".to_string(),
        flight_hours: "143".to_string(),
        maintenance_type: Some(MaintenanceType::Scheduled),
        reason: "IMU Calibration".to_string(),
    };

    let created =
        submit_request(&general, draft.clone(), "MT-2", on, SCHEDULED_REASONS).expect("submit");
    assert_eq!(created.approval, ApprovalStatus::Pending);
    assert_eq!(created.work_status, WorkStatus::Pending);
    assert_eq!(created.flight_hours, 143.0);
    assert_eq!(created.requested_by, "GENERAL User");
    assert_eq!(created.requested_at, on);

    let bad_hours = RequestDraft {
        flight_hours: "lots".to_string(),
        ..draft.clone()
    };
    assert!(matches!(
        submit_request(&general, bad_hours, "MT-3", on, SCHEDULED_REASONS),
        Err(WorkflowError::Validation(ValidationError::NotANumber { .. }))
    ));

    let off_catalogue = RequestDraft {
        reason: "Paint job".to_string(),
        ..draft.clone()
    };
    assert!(submit_request(&general, off_catalogue, "MT-4", on, SCHEDULED_REASONS).is_err());

    let unscheduled = RequestDraft {
        maintenance_type: Some(MaintenanceType::Unscheduled),
        reason: "Gimbal vibration detected during flight.".to_string(),
        ..draft.clone()
    };
    assert!(submit_request(&general, unscheduled, "MT-5", on, SCHEDULED_REASONS).is_ok());

    let blank_reason = RequestDraft {
        maintenance_type: Some(MaintenanceType::Unscheduled),
        reason: "   ".to_string(),
        ..draft
    };
    assert!(matches!(
        submit_request(&general, blank_reason, "MT-6", on, SCHEDULED_REASONS),
        Err(WorkflowError::Validation(ValidationError::Missing(field))) if field == "reason"
    ));
}
