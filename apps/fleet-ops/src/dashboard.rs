//! 仪表盘汇总：机队状态、定检告警、维修进度、电池概况与最新动态。

use chrono::{DateTime, Utc};
use domain::permissions::ACTIVITY_READ;
use domain::{ActivityEntry, ActorContext, AircraftStatus, AttachmentPolicy, CapabilityCheck};
use fleet_battery::{BatteryService, BatterySummary};
use fleet_intervals::{IntervalEvaluator, ServiceStatus};
use fleet_inventory::{
    ActivityFeedError, ActivityService, FleetEntry, InventoryError, InventoryService,
};
use fleet_maintenance::{MaintenanceAnalytics, MaintenanceService, ReportService};
use fleet_storage::{
    ActivityQuery, ActivityStore, InMemoryActivityStore, InMemoryAircraftStore,
    InMemoryBatteryStore, InMemoryMaintenanceRequestStore, InMemoryReportStore,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::snapshot::FleetSnapshot;

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error(transparent)]
    Inventory(#[from] InventoryError),
    #[error(transparent)]
    Maintenance(#[from] fleet_maintenance::ServiceError),
    #[error(transparent)]
    Battery(#[from] fleet_battery::ServiceError),
    #[error(transparent)]
    Activity(#[from] ActivityFeedError),
}

/// 仪表盘所需的全部服务。
pub struct Services {
    pub inventory: InventoryService,
    pub maintenance: MaintenanceService,
    pub batteries: BatteryService,
    pub reports: ReportService,
    pub activity: ActivityService,
}

impl Services {
    /// 以快照装载内存存储，所有服务共享同一动态存储。
    pub fn from_snapshot(
        snapshot: FleetSnapshot,
        evaluator: IntervalEvaluator,
        attachment_policy: AttachmentPolicy,
    ) -> Self {
        let activity_store: Arc<dyn ActivityStore> =
            Arc::new(InMemoryActivityStore::with_records(snapshot.activities));
        Self {
            inventory: InventoryService::new(
                Arc::new(InMemoryAircraftStore::with_records(snapshot.aircraft)),
                activity_store.clone(),
                evaluator,
            ),
            maintenance: MaintenanceService::new_with_policy(
                Arc::new(InMemoryMaintenanceRequestStore::with_records(snapshot.requests)),
                activity_store.clone(),
                attachment_policy,
            ),
            batteries: BatteryService::new(
                Arc::new(InMemoryBatteryStore::with_records(snapshot.batteries)),
                activity_store.clone(),
            ),
            reports: ReportService::new(
                Arc::new(InMemoryReportStore::with_records(snapshot.reports)),
                activity_store.clone(),
                attachment_policy,
            ),
            activity: ActivityService::new(activity_store),
        }
    }
}

/// 分页与条数设置。
#[derive(Debug, Clone, Copy)]
pub struct DashboardLimits {
    pub fleet_page_size: usize,
    pub activity_page_size: usize,
    pub activity_limit: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AircraftFlag {
    pub id: String,
    pub model: String,
    pub serial: String,
    pub flight_hours: f64,
    pub category: String,
    pub next_due: Option<f64>,
    pub overdue_items: Vec<String>,
}

impl AircraftFlag {
    fn from_entry(entry: &FleetEntry) -> Self {
        Self {
            id: entry.aircraft.id.clone(),
            model: entry.aircraft.model.clone(),
            serial: entry.aircraft.serial.clone(),
            flight_hours: entry.aircraft.flight_hours,
            category: entry.assessment.category.clone(),
            next_due: entry.assessment.next_due,
            overdue_items: entry.assessment.overdue_items.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetSection {
    pub total: usize,
    pub total_pages: usize,
    pub by_status: BTreeMap<&'static str, usize>,
    pub overdue: Vec<AircraftFlag>,
    pub approaching: Vec<AircraftFlag>,
    pub unclassified: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySection {
    pub total_entries: usize,
    pub total_pages: usize,
    pub latest: Vec<ActivityEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub run_id: String,
    pub generated_at: DateTime<Utc>,
    pub fleet: FleetSection,
    pub maintenance: MaintenanceAnalytics,
    pub batteries: BatterySummary,
    pub reports: usize,
    /// 无 ACTIVITY.READ 权限时省略。
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity: Option<ActivitySection>,
}

pub fn fleet_section(entries: &[FleetEntry], page_size: usize) -> FleetSection {
    let mut by_status: BTreeMap<&'static str, usize> = AircraftStatus::ALL
        .iter()
        .map(|status| (status.code(), 0))
        .collect();
    let mut overdue = Vec::new();
    let mut approaching = Vec::new();
    let mut unclassified = 0;
    for entry in entries {
        *by_status.entry(entry.aircraft.status.code()).or_insert(0) += 1;
        match entry.assessment.status {
            ServiceStatus::Overdue => overdue.push(AircraftFlag::from_entry(entry)),
            ServiceStatus::Approaching => approaching.push(AircraftFlag::from_entry(entry)),
            ServiceStatus::Unclassified => unclassified += 1,
            ServiceStatus::UpToDate => {}
        }
    }
    FleetSection {
        total: entries.len(),
        total_pages: entries.len().div_ceil(page_size.max(1)),
        by_status,
        overdue,
        approaching,
        unclassified,
    }
}

pub async fn build_summary(
    services: &Services,
    ctx: &ActorContext,
    limits: DashboardLimits,
    run_id: &str,
) -> Result<DashboardSummary, DashboardError> {
    let entries = services.inventory.fleet_overview(ctx).await?;
    let fleet = fleet_section(&entries, limits.fleet_page_size);
    let maintenance = services.maintenance.analytics(ctx).await?;
    let batteries = services.batteries.summary(ctx).await?;
    let reports = services.reports.list_reports(ctx).await?.len();

    let activity = if ctx.has_permission(ACTIVITY_READ) {
        let first_page = services
            .activity
            .list(
                ctx,
                &ActivityQuery {
                    page_size: limits.activity_page_size,
                    ..ActivityQuery::default()
                },
            )
            .await?;
        let latest = services.activity.latest(ctx, limits.activity_limit).await?;
        Some(ActivitySection {
            total_entries: first_page.total_items,
            total_pages: first_page.total_pages,
            latest,
        })
    } else {
        None
    };

    Ok(DashboardSummary {
        run_id: run_id.to_string(),
        generated_at: Utc::now(),
        fleet,
        maintenance,
        batteries,
        reports,
        activity,
    })
}
