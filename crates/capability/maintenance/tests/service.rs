use domain::permissions::{ROLE_ADMIN, ROLE_GENERAL, ROLE_QHSE, ROLE_TECHNICAL};
use domain::{
    ActivityKind, ActorContext, ApprovalStatus, Attachment, AttachmentPolicy, CompletionReport,
    MaintenanceType, WorkStatus,
};
use fleet_maintenance::{
    MaintenanceService, ReportDraft, ReportService, RequestDraft, ServiceError, WorkflowError,
};
use fleet_storage::{
    ActivityStore, InMemoryActivityStore, InMemoryMaintenanceRequestStore, InMemoryReportStore,
};
use std::sync::Arc;

fn actor(role: &str) -> ActorContext {
    ActorContext::with_roles(
        format!("{}-user", role.to_lowercase()),
        format!("{role} User"),
        vec![role.to_string()],
    )
}

fn draft() -> RequestDraft {
    RequestDraft {
        aircraft_model: "Matrice 300".to_string(),
        serial_number: "DJI-M300-8821".to_string(),
        location: "Port Harcourt Hub".to_string(),
        flight_hours: "96".to_string(),
        maintenance_type: Some(MaintenanceType::Scheduled),
        reason: "100 Hour Full Inspection".to_string(),
    }
}

fn maintenance_service() -> (MaintenanceService, Arc<InMemoryActivityStore>) {
    let activities = Arc::new(InMemoryActivityStore::new());
    let service = MaintenanceService::new(
        Arc::new(InMemoryMaintenanceRequestStore::new()),
        activities.clone(),
    );
    (service, activities)
}

#[tokio::test]
async fn request_lifecycle_records_activity() {
    let (service, activities) = maintenance_service();
    let requester = actor(ROLE_GENERAL);
    let admin = actor(ROLE_ADMIN);
    let technician = actor(ROLE_TECHNICAL);

    let created = service.submit(&requester, draft()).await.expect("submit");
    assert!(created.id.starts_with("MT-"));

    service.approve(&admin, &created.id).await.expect("approve");
    service
        .start_work(&technician, &created.id)
        .await
        .expect("start");
    let done = service
        .complete_work(
            &technician,
            &created.id,
            CompletionReport {
                title: "100h inspection".to_string(),
                summary: "All checks passed".to_string(),
                attachment: Some(Attachment::named("inspection.pdf")),
            },
        )
        .await
        .expect("complete");
    assert_eq!(done.work_status, WorkStatus::Done);

    let feed = activities
        .list_activities(&admin, None)
        .await
        .expect("feed");
    assert_eq!(feed.len(), 4);
    let approvals = activities
        .list_activities(&admin, Some(ActivityKind::Approve))
        .await
        .expect("feed");
    assert_eq!(approvals.len(), 1);
    assert_eq!(approvals[0].actor_id, "admin-user");
    assert_eq!(approvals[0].resource, format!("maintenance:{}", created.id));
}

#[tokio::test]
async fn rejected_transition_leaves_store_untouched() {
    let (service, activities) = maintenance_service();
    let admin = actor(ROLE_ADMIN);
    let created = service.submit(&admin, draft()).await.expect("submit");
    service.reject(&admin, &created.id).await.expect("reject");

    let err = service
        .start_work(&admin, &created.id)
        .await
        .expect_err("declined");
    assert!(matches!(
        err,
        ServiceError::Workflow(WorkflowError::InvalidTransition { .. })
    ));

    let stored = service.list(&admin).await.expect("list");
    assert_eq!(stored[0].approval, ApprovalStatus::Rejected);
    assert_eq!(stored[0].work_status, WorkStatus::Declined);
    let feed = activities
        .list_activities(&admin, None)
        .await
        .expect("feed");
    assert_eq!(feed.len(), 2);
    assert_eq!(feed[0].kind, ActivityKind::Decline);
}

#[tokio::test]
async fn unknown_request_is_not_found() {
    let (service, _) = maintenance_service();
    let err = service
        .approve(&actor(ROLE_ADMIN), "MT-404")
        .await
        .expect_err("missing");
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn analytics_and_search_cover_all_records() {
    let (service, _) = maintenance_service();
    let admin = actor(ROLE_ADMIN);
    let first = service.submit(&admin, draft()).await.expect("submit");
    let second = service
        .submit(
            &admin,
            RequestDraft {
                aircraft_model: "Mavic 3 Pro".to_string(),
                serial_number: "DJI-M3P-7755".to_string(),
                location: "Lagos Base".to_string(),
                maintenance_type: Some(MaintenanceType::Unscheduled),
                reason: "Gimbal vibration detected during flight.".to_string(),
                ..draft()
            },
        )
        .await
        .expect("submit");
    service.approve(&admin, &second.id).await.expect("approve");
    service.start_work(&admin, &second.id).await.expect("start");
    service.reject(&admin, &first.id).await.expect("reject");

    let analytics = service.analytics(&admin).await.expect("analytics");
    assert_eq!(analytics.pending, 0);
    assert_eq!(analytics.in_progress, 1);
    assert_eq!(analytics.done, 0);

    let hits = service.search(&admin, "gimbal").await.expect("search");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, second.id);
    assert_eq!(service.search(&admin, "lagos").await.expect("search").len(), 1);
    assert_eq!(service.search(&admin, "").await.expect("search").len(), 2);
}

#[tokio::test]
async fn report_upload_requires_permission_and_pdf() {
    let activities = Arc::new(InMemoryActivityStore::new());
    let service = ReportService::new(
        Arc::new(InMemoryReportStore::new()),
        activities.clone(),
        AttachmentPolicy::new(1024 * 1024),
    );
    let report = ReportDraft {
        title: "Q1 airworthiness".to_string(),
        content: "Fleet-wide inspection summary".to_string(),
        date: None,
        attachment: Some(Attachment {
            file_name: "q1.pdf".to_string(),
            content_type: Some("application/pdf".to_string()),
            size_bytes: 2048,
        }),
    };

    let err = service
        .upload_report(&actor(ROLE_GENERAL), report.clone())
        .await
        .expect_err("general cannot upload");
    assert!(matches!(
        err,
        ServiceError::Workflow(WorkflowError::PermissionDenied(_))
    ));

    let not_pdf = ReportDraft {
        attachment: Some(Attachment::named("q1.xlsx")),
        ..report.clone()
    };
    assert!(matches!(
        service.upload_report(&actor(ROLE_QHSE), not_pdf).await,
        Err(ServiceError::Workflow(WorkflowError::Validation(_)))
    ));

    let uploaded = service
        .upload_report(&actor(ROLE_QHSE), report)
        .await
        .expect("upload");
    assert!(uploaded.id.starts_with("RPT-"));
    assert_eq!(uploaded.uploaded_by, "QHSE User");

    let qhse = actor(ROLE_QHSE);
    assert_eq!(service.list_reports(&qhse).await.expect("list").len(), 1);
    assert_eq!(
        activities
            .list_activities(&qhse, Some(ActivityKind::Add))
            .await
            .expect("feed")
            .len(),
        1
    );
}
