//! 电池服务：持久化流转结果、记录动态与计数。

use crate::lifecycle::{
    self, AssignmentDraft, BatteryAction, BatteryError, PurchaseDraft, is_critical,
};
use chrono::{NaiveDate, Utc};
use domain::{ActivityKind, ActorContext, Battery, BatteryStatus};
use fleet_storage::{ActivityStore, BatteryStore, contains_ci, log_activity};
use fleet_telemetry::{
    record_permission_denial, record_transition_applied, record_transition_rejected,
    record_validation_failure,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Battery(#[from] BatteryError),
    #[error("battery {0} not found")]
    NotFound(String),
    #[error("storage error: {0}")]
    Storage(String),
}

/// 各状态数量与告警电池数。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatterySummary {
    pub in_store: usize,
    pub in_use: usize,
    pub decommissioned: usize,
    pub critical: usize,
}

pub fn summarize(batteries: &[Battery]) -> BatterySummary {
    batteries
        .iter()
        .fold(BatterySummary::default(), |mut acc, battery| {
            match battery.status() {
                BatteryStatus::InStore => acc.in_store += 1,
                BatteryStatus::InUse => acc.in_use += 1,
                BatteryStatus::Decommissioned => acc.decommissioned += 1,
            }
            // 已退役的电池不再告警
            if battery.status() != BatteryStatus::Decommissioned && is_critical(battery.cycles) {
                acc.critical += 1;
            }
            acc
        })
}

/// 标签或装机机号匹配。
pub fn matches_search(battery: &Battery, text: &str) -> bool {
    contains_ci(&battery.tag, text)
        || battery
            .assignment()
            .is_some_and(|assignment| contains_ci(&assignment.aircraft_number, text))
}

fn record_rejection(err: &BatteryError) {
    match err {
        BatteryError::PermissionDenied(_) => record_permission_denial(),
        BatteryError::Validation(_) => record_validation_failure(),
        BatteryError::InvalidTransition { .. } => record_transition_rejected(),
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub struct BatteryService {
    battery_store: Arc<dyn BatteryStore>,
    activity_store: Arc<dyn ActivityStore>,
}

impl BatteryService {
    pub fn new(
        battery_store: Arc<dyn BatteryStore>,
        activity_store: Arc<dyn ActivityStore>,
    ) -> Self {
        Self {
            battery_store,
            activity_store,
        }
    }

    pub async fn purchase(
        &self,
        ctx: &ActorContext,
        draft: PurchaseDraft,
    ) -> Result<Battery, ServiceError> {
        let battery = lifecycle::register_purchase(ctx, draft, today()).inspect_err(|err| {
            record_rejection(err);
            warn!(
                target: "fleet.battery",
                actor = %ctx.user_id,
                error = %err,
                "battery_purchase_rejected"
            );
        })?;
        let battery = self
            .battery_store
            .create_battery(ctx, battery)
            .await
            .map_err(|err| ServiceError::Storage(err.to_string()))?;
        record_transition_applied();
        info!(
            target: "fleet.battery",
            actor = %ctx.user_id,
            battery_id = %battery.id,
            "battery_purchased"
        );
        log_activity(
            self.activity_store.as_ref(),
            ctx,
            ActivityKind::Add,
            format!("registered battery {}", battery.tag),
            format!("battery:{}", battery.id),
        )
        .await;
        Ok(battery)
    }

    pub async fn assign(
        &self,
        ctx: &ActorContext,
        battery_id: &str,
        draft: AssignmentDraft,
    ) -> Result<Battery, ServiceError> {
        let current = self.load(ctx, battery_id).await?;
        let next = lifecycle::assign(ctx, &current, draft, today())
            .inspect_err(|err| self.log_rejection(ctx, battery_id, BatteryAction::Assign, err))?;
        let next = self.save(ctx, next).await?;
        let aircraft_number = next
            .assignment()
            .map(|assignment| assignment.aircraft_number.clone())
            .unwrap_or_default();
        info!(
            target: "fleet.battery",
            actor = %ctx.user_id,
            battery_id = %next.id,
            aircraft_number = %aircraft_number,
            "battery_assigned"
        );
        log_activity(
            self.activity_store.as_ref(),
            ctx,
            ActivityKind::Update,
            format!("assigned battery {} to {}", next.tag, aircraft_number),
            format!("battery:{}", next.id),
        )
        .await;
        Ok(next)
    }

    pub async fn decommission(
        &self,
        ctx: &ActorContext,
        battery_id: &str,
    ) -> Result<Battery, ServiceError> {
        let current = self.load(ctx, battery_id).await?;
        let next = lifecycle::decommission(ctx, &current, today()).inspect_err(|err| {
            self.log_rejection(ctx, battery_id, BatteryAction::Decommission, err)
        })?;
        let next = self.save(ctx, next).await?;
        info!(
            target: "fleet.battery",
            actor = %ctx.user_id,
            battery_id = %next.id,
            cycles = next.cycles,
            "battery_decommissioned"
        );
        log_activity(
            self.activity_store.as_ref(),
            ctx,
            ActivityKind::Delete,
            format!("decommissioned battery {}", next.tag),
            format!("battery:{}", next.id),
        )
        .await;
        Ok(next)
    }

    /// 按状态页签列出，并按标签或装机机号搜索。
    pub async fn list_tab(
        &self,
        ctx: &ActorContext,
        status: BatteryStatus,
        search: &str,
    ) -> Result<Vec<Battery>, ServiceError> {
        let batteries = self.list(ctx).await?;
        Ok(batteries
            .into_iter()
            .filter(|battery| battery.status() == status && matches_search(battery, search))
            .collect())
    }

    pub async fn list(&self, ctx: &ActorContext) -> Result<Vec<Battery>, ServiceError> {
        self.battery_store
            .list_batteries(ctx)
            .await
            .map_err(|err| ServiceError::Storage(err.to_string()))
    }

    pub async fn summary(&self, ctx: &ActorContext) -> Result<BatterySummary, ServiceError> {
        let batteries = self.list(ctx).await?;
        Ok(summarize(&batteries))
    }

    async fn load(&self, ctx: &ActorContext, battery_id: &str) -> Result<Battery, ServiceError> {
        self.battery_store
            .find_battery(ctx, battery_id)
            .await
            .map_err(|err| ServiceError::Storage(err.to_string()))?
            .ok_or_else(|| ServiceError::NotFound(battery_id.to_string()))
    }

    async fn save(&self, ctx: &ActorContext, battery: Battery) -> Result<Battery, ServiceError> {
        let battery_id = battery.id.clone();
        let saved = self
            .battery_store
            .update_battery(ctx, battery)
            .await
            .map_err(|err| ServiceError::Storage(err.to_string()))?
            .ok_or(ServiceError::NotFound(battery_id))?;
        record_transition_applied();
        Ok(saved)
    }

    fn log_rejection(
        &self,
        ctx: &ActorContext,
        battery_id: &str,
        action: BatteryAction,
        err: &BatteryError,
    ) {
        record_rejection(err);
        warn!(
            target: "fleet.battery",
            actor = %ctx.user_id,
            battery_id = %battery_id,
            action = %action,
            error = %err,
            "battery_transition_rejected"
        );
    }
}
