//! 机队维护巡检：装载快照与维护间隔表，输出仪表盘汇总 JSON。

mod dashboard;
mod snapshot;

use dashboard::{DashboardLimits, Services, build_summary};
use domain::{ActorContext, AttachmentPolicy};
use fleet_config::AppConfig;
use fleet_intervals::{IntervalEvaluator, IntervalTable};
use fleet_telemetry::{init_tracing, metrics, new_run_id};
use snapshot::FleetSnapshot;
use tracing::{Instrument, info, info_span};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载本地 .env（如存在）
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    init_tracing();

    let run_id = new_run_id();
    let span = info_span!("fleet_ops_run", run_id = %run_id);
    run(config, run_id).instrument(span).await
}

async fn run(config: AppConfig, run_id: String) -> Result<(), Box<dyn std::error::Error>> {
    let table = match config.interval_table_path.as_deref() {
        Some(path) => {
            let document = tokio::fs::read_to_string(path).await?;
            let table = IntervalTable::from_json(&document)?;
            info!(
                target: "fleet.intervals",
                path = %path,
                categories = table.category_keys().count(),
                "interval_table_loaded"
            );
            table
        }
        None => IntervalTable::builtin(),
    };
    let evaluator =
        IntervalEvaluator::new(table).with_approaching_window(config.approaching_window_hours);

    let snapshot = match config.snapshot_path.as_deref() {
        Some(path) => FleetSnapshot::load(path).await?,
        None => FleetSnapshot::demo()?,
    };
    info!(
        target: "fleet.ops",
        aircraft = snapshot.aircraft.len(),
        requests = snapshot.requests.len(),
        batteries = snapshot.batteries.len(),
        "snapshot_loaded"
    );

    let services = Services::from_snapshot(
        snapshot,
        evaluator,
        AttachmentPolicy::new(config.report_max_bytes),
    );
    let limits = DashboardLimits {
        fleet_page_size: config.fleet_page_size,
        activity_page_size: config.activity_page_size,
        activity_limit: config.dashboard_activity_limit,
    };
    let summary = build_summary(&services, &ActorContext::system(), limits, &run_id).await?;

    let counters = metrics().snapshot();
    info!(
        target: "fleet.ops",
        assessments = counters.assessments,
        overdue = summary.fleet.overdue.len(),
        approaching = summary.fleet.approaching.len(),
        critical_batteries = summary.batteries.critical,
        permission_denials = counters.permission_denials,
        "dashboard_built"
    );

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
