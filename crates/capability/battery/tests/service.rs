use domain::permissions::ROLE_TECHNICAL;
use domain::{ActivityKind, ActorContext, BatteryStatus};
use fleet_battery::{
    AssignmentDraft, BatteryError, BatteryService, PurchaseDraft, ServiceError,
};
use fleet_storage::{ActivityStore, InMemoryActivityStore, InMemoryBatteryStore};
use std::sync::Arc;

fn technician() -> ActorContext {
    ActorContext::with_roles("tech-1", "Tech One", vec![ROLE_TECHNICAL.to_string()])
}

fn purchase(tag: &str) -> PurchaseDraft {
    PurchaseDraft {
        tag: tag.to_string(),
        kind: "TB60".to_string(),
        storage_location: "Rack A".to_string(),
        ..PurchaseDraft::default()
    }
}

fn assignment(aircraft_number: &str) -> AssignmentDraft {
    AssignmentDraft {
        aircraft_number: aircraft_number.to_string(),
        aircraft: "Matrice 300 RTK".to_string(),
        call_sign: "CAA".to_string(),
        assigned_date: chrono::NaiveDate::from_ymd_opt(2025, 3, 5),
    }
}

#[tokio::test]
async fn tabs_and_search_follow_lifecycle() {
    let activities = Arc::new(InMemoryActivityStore::new());
    let service = BatteryService::new(Arc::new(InMemoryBatteryStore::new()), activities.clone());
    let ctx = technician();

    service.purchase(&ctx, purchase("BAT-101")).await.expect("purchase");
    service.purchase(&ctx, purchase("BAT-102")).await.expect("purchase");
    service
        .assign(&ctx, "BAT-101", assignment("AC-045"))
        .await
        .expect("assign");
    service
        .assign(&ctx, "BAT-102", assignment("AC-046"))
        .await
        .expect("assign");
    service
        .decommission(&ctx, "BAT-102")
        .await
        .expect("decommission");

    let in_use = service
        .list_tab(&ctx, BatteryStatus::InUse, "ac-045")
        .await
        .expect("tab");
    assert_eq!(in_use.len(), 1);
    assert_eq!(in_use[0].tag, "BAT-101");

    let in_store = service
        .list_tab(&ctx, BatteryStatus::InStore, "")
        .await
        .expect("tab");
    assert!(in_store.is_empty());

    let summary = service.summary(&ctx).await.expect("summary");
    assert_eq!(summary.in_use, 1);
    assert_eq!(summary.decommissioned, 1);
    assert_eq!(summary.critical, 0);

    let feed = activities.list_activities(&ctx, None).await.expect("feed");
    assert_eq!(feed.len(), 5);
    assert_eq!(feed[0].kind, ActivityKind::Delete);
}

#[tokio::test]
async fn failed_assignment_keeps_stored_battery() {
    let service = BatteryService::new(
        Arc::new(InMemoryBatteryStore::new()),
        Arc::new(InMemoryActivityStore::new()),
    );
    let ctx = technician();
    service.purchase(&ctx, purchase("BAT-201")).await.expect("purchase");

    let err = service
        .assign(&ctx, "BAT-201", assignment(""))
        .await
        .expect_err("missing aircraft number");
    assert_eq!(err.to_string(), "Aircraft Number is required");

    let stored = service
        .list_tab(&ctx, BatteryStatus::InStore, "bat-201")
        .await
        .expect("tab");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].audit_trail.len(), 1);

    assert!(matches!(
        service.decommission(&ctx, "BAT-404").await,
        Err(ServiceError::NotFound(_))
    ));
}

#[tokio::test]
async fn stored_battery_is_not_decommissioned() {
    let service = BatteryService::new(
        Arc::new(InMemoryBatteryStore::new()),
        Arc::new(InMemoryActivityStore::new()),
    );
    let ctx = technician();
    service.purchase(&ctx, purchase("BAT-301")).await.expect("purchase");

    assert!(matches!(
        service.decommission(&ctx, "BAT-301").await,
        Err(ServiceError::Battery(BatteryError::InvalidTransition { .. }))
    ));
    let stored = service
        .list_tab(&ctx, BatteryStatus::InStore, "")
        .await
        .expect("tab");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].audit_trail.len(), 1);
}
