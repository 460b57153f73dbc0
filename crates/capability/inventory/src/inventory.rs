//! 机体台账服务。
//!
//! 写操作需要 FLEET.WRITE，读操作需要 FLEET.READ。
//! 飞行小时只允许增加；履历条目可携带结构化的定检项目代码。

use chrono::NaiveDate;
use domain::permissions::{FLEET_READ, FLEET_WRITE};
use domain::{
    ActivityKind, ActorContext, Aircraft, AircraftStatus, PermissionDenied, ServiceHistoryEntry,
    ValidationError, parse_flight_hours, require_permission, require_text,
};
use fleet_intervals::{IntervalEvaluator, ServiceAssessment};
use fleet_storage::{ActivityStore, AircraftStore, FleetQuery, Page, log_activity, paginate};
use fleet_telemetry::{
    record_assessment, record_permission_denial, record_transition_applied,
    record_validation_failure,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error(transparent)]
    PermissionDenied(#[from] PermissionDenied),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("serial {0} is already registered")]
    DuplicateSerial(String),
    #[error("aircraft {0} not found")]
    NotFound(String),
    #[error("storage error: {0}")]
    Storage(String),
}

/// 新机体登记表单（飞行小时保留原始文本）。
#[derive(Debug, Clone, Default)]
pub struct AircraftDraft {
    pub model: String,
    pub serial: String,
    pub manufacturer: String,
    pub aircraft_type: String,
    /// 缺省为在役。
    pub status: Option<AircraftStatus>,
    pub flight_hours: String,
    pub location: String,
}

/// 维修履历登记表单。
#[derive(Debug, Clone)]
pub struct ServiceRecordDraft {
    pub title: String,
    pub date: NaiveDate,
    pub notes: String,
    pub files: Vec<String>,
    pub completed_interval: Option<String>,
}

/// 机队总览中的一项。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetEntry {
    pub aircraft: Aircraft,
    pub assessment: ServiceAssessment,
}

pub struct InventoryService {
    aircraft_store: Arc<dyn AircraftStore>,
    activity_store: Arc<dyn ActivityStore>,
    evaluator: IntervalEvaluator,
}

impl InventoryService {
    pub fn new(
        aircraft_store: Arc<dyn AircraftStore>,
        activity_store: Arc<dyn ActivityStore>,
        evaluator: IntervalEvaluator,
    ) -> Self {
        Self {
            aircraft_store,
            activity_store,
            evaluator,
        }
    }

    pub fn evaluator(&self) -> &IntervalEvaluator {
        &self.evaluator
    }

    pub async fn register_aircraft(
        &self,
        ctx: &ActorContext,
        draft: AircraftDraft,
    ) -> Result<Aircraft, InventoryError> {
        self.authorize(ctx, FLEET_WRITE)?;
        let flight_hours = validate_draft(&draft).inspect_err(|err| {
            record_validation_failure();
            warn!(
                target: "fleet.inventory",
                actor = %ctx.user_id,
                error = %err,
                "aircraft_register_invalid"
            );
        })?;
        let serial = draft.serial.trim().to_string();
        let existing = self
            .aircraft_store
            .find_by_serial(ctx, &serial)
            .await
            .map_err(|err| InventoryError::Storage(err.to_string()))?;
        if existing.is_some() {
            record_validation_failure();
            return Err(InventoryError::DuplicateSerial(serial));
        }

        let record = Aircraft {
            id: format!(
                "AC-{}",
                uuid::Uuid::new_v4().simple().to_string()[..8].to_ascii_uppercase()
            ),
            model: draft.model.trim().to_string(),
            serial,
            manufacturer: draft.manufacturer.trim().to_string(),
            aircraft_type: draft.aircraft_type.trim().to_string(),
            status: draft.status.unwrap_or(AircraftStatus::InService),
            flight_hours,
            location: draft.location.trim().to_string(),
            history: Vec::new(),
        };
        let record = self
            .aircraft_store
            .create_aircraft(ctx, record)
            .await
            .map_err(|err| InventoryError::Storage(err.to_string()))?;
        info!(
            target: "fleet.inventory",
            actor = %ctx.user_id,
            aircraft_id = %record.id,
            serial = %record.serial,
            "aircraft_registered"
        );
        log_activity(
            self.activity_store.as_ref(),
            ctx,
            ActivityKind::Add,
            format!("registered aircraft {} ({})", record.model, record.serial),
            format!("aircraft:{}", record.id),
        )
        .await;
        Ok(record)
    }

    pub async fn set_status(
        &self,
        ctx: &ActorContext,
        aircraft_id: &str,
        status: AircraftStatus,
    ) -> Result<Aircraft, InventoryError> {
        self.authorize(ctx, FLEET_WRITE)?;
        let current = self.load(ctx, aircraft_id).await?;
        let previous = current.status;
        let next = self.save(ctx, Aircraft { status, ..current }).await?;
        info!(
            target: "fleet.inventory",
            actor = %ctx.user_id,
            aircraft_id = %next.id,
            from = %previous,
            to = %next.status,
            "aircraft_status_changed"
        );
        log_activity(
            self.activity_store.as_ref(),
            ctx,
            ActivityKind::Update,
            format!("set {} status to {}", next.model, next.status),
            format!("aircraft:{}", next.id),
        )
        .await;
        Ok(next)
    }

    /// 更新飞行小时；低于当前值时拒绝。
    pub async fn record_flight_hours(
        &self,
        ctx: &ActorContext,
        aircraft_id: &str,
        raw_hours: &str,
    ) -> Result<Aircraft, InventoryError> {
        self.authorize(ctx, FLEET_WRITE)?;
        let current = self.load(ctx, aircraft_id).await?;
        let hours = parse_flight_hours(raw_hours)
            .and_then(|hours| {
                if current.flight_hours.is_finite() && hours < current.flight_hours {
                    Err(ValidationError::invalid(
                        "flightHours",
                        format!("must not decrease below {}", current.flight_hours),
                    ))
                } else {
                    Ok(hours)
                }
            })
            .inspect_err(|err| {
                record_validation_failure();
                warn!(
                    target: "fleet.inventory",
                    actor = %ctx.user_id,
                    aircraft_id = %aircraft_id,
                    error = %err,
                    "flight_hours_rejected"
                );
            })?;
        let next = self
            .save(
                ctx,
                Aircraft {
                    flight_hours: hours,
                    ..current
                },
            )
            .await?;
        info!(
            target: "fleet.inventory",
            actor = %ctx.user_id,
            aircraft_id = %next.id,
            flight_hours = next.flight_hours,
            "flight_hours_recorded"
        );
        log_activity(
            self.activity_store.as_ref(),
            ctx,
            ActivityKind::Update,
            format!("recorded {} flight hours on {}", next.flight_hours, next.model),
            format!("aircraft:{}", next.id),
        )
        .await;
        Ok(next)
    }

    /// 追加维修履历；定检项目代码必须属于机体所属类别。
    pub async fn record_service(
        &self,
        ctx: &ActorContext,
        aircraft_id: &str,
        draft: ServiceRecordDraft,
    ) -> Result<Aircraft, InventoryError> {
        self.authorize(ctx, FLEET_WRITE)?;
        let mut aircraft = self.load(ctx, aircraft_id).await?;
        let completed_interval = self
            .validate_service_record(&aircraft, &draft)
            .inspect_err(|err| {
                record_validation_failure();
                warn!(
                    target: "fleet.inventory",
                    actor = %ctx.user_id,
                    aircraft_id = %aircraft_id,
                    error = %err,
                    "service_record_invalid"
                );
            })?;
        aircraft.history.push(ServiceHistoryEntry {
            title: draft.title.trim().to_string(),
            date: draft.date,
            notes: draft.notes,
            files: draft.files,
            completed_interval,
        });
        let next = self.save(ctx, aircraft).await?;
        info!(
            target: "fleet.inventory",
            actor = %ctx.user_id,
            aircraft_id = %next.id,
            history_len = next.history.len(),
            "service_recorded"
        );
        log_activity(
            self.activity_store.as_ref(),
            ctx,
            ActivityKind::Update,
            format!("recorded service on {}", next.model),
            format!("aircraft:{}", next.id),
        )
        .await;
        Ok(next)
    }

    pub async fn find_aircraft(
        &self,
        ctx: &ActorContext,
        aircraft_id: &str,
    ) -> Result<Aircraft, InventoryError> {
        self.authorize(ctx, FLEET_READ)?;
        self.load(ctx, aircraft_id).await
    }

    /// 状态筛选 + 型号/序列号搜索后分页。
    pub async fn list_fleet(
        &self,
        ctx: &ActorContext,
        query: &FleetQuery,
    ) -> Result<Page<Aircraft>, InventoryError> {
        self.authorize(ctx, FLEET_READ)?;
        let fleet = self.list_all(ctx).await?;
        let matched = fleet
            .into_iter()
            .filter(|aircraft| query.matches(aircraft))
            .collect();
        Ok(paginate(matched, query.page, query.page_size))
    }

    /// 全部机体及其定检评估。
    pub async fn fleet_overview(&self, ctx: &ActorContext) -> Result<Vec<FleetEntry>, InventoryError> {
        self.authorize(ctx, FLEET_READ)?;
        let fleet = self.list_all(ctx).await?;
        Ok(fleet
            .into_iter()
            .map(|aircraft| {
                let assessment = self.evaluator.evaluate(&aircraft);
                record_assessment();
                FleetEntry {
                    aircraft,
                    assessment,
                }
            })
            .collect())
    }

    fn authorize(&self, ctx: &ActorContext, permission: &str) -> Result<(), InventoryError> {
        require_permission(ctx, permission).map_err(|err| {
            record_permission_denial();
            warn!(
                target: "fleet.inventory",
                actor = %ctx.user_id,
                permission = %permission,
                "inventory_permission_denied"
            );
            InventoryError::from(err)
        })
    }

    fn validate_service_record(
        &self,
        aircraft: &Aircraft,
        draft: &ServiceRecordDraft,
    ) -> Result<Option<String>, ValidationError> {
        require_text("title", &draft.title)?;
        let Some(code) = draft.completed_interval.as_deref() else {
            return Ok(None);
        };
        let category = self.evaluator.resolve_category(aircraft);
        category
            .items
            .iter()
            .find(|item| item.code.eq_ignore_ascii_case(code.trim()))
            .map(|item| Some(item.code.clone()))
            .ok_or_else(|| {
                ValidationError::invalid(
                    "completedInterval",
                    format!("{code} is not scheduled for category {}", category.key),
                )
            })
    }

    async fn list_all(&self, ctx: &ActorContext) -> Result<Vec<Aircraft>, InventoryError> {
        self.aircraft_store
            .list_aircraft(ctx)
            .await
            .map_err(|err| InventoryError::Storage(err.to_string()))
    }

    async fn load(&self, ctx: &ActorContext, aircraft_id: &str) -> Result<Aircraft, InventoryError> {
        self.aircraft_store
            .find_aircraft(ctx, aircraft_id)
            .await
            .map_err(|err| InventoryError::Storage(err.to_string()))?
            .ok_or_else(|| InventoryError::NotFound(aircraft_id.to_string()))
    }

    async fn save(&self, ctx: &ActorContext, aircraft: Aircraft) -> Result<Aircraft, InventoryError> {
        let aircraft_id = aircraft.id.clone();
        let saved = self
            .aircraft_store
            .update_aircraft(ctx, aircraft)
            .await
            .map_err(|err| InventoryError::Storage(err.to_string()))?
            .ok_or(InventoryError::NotFound(aircraft_id))?;
        record_transition_applied();
        Ok(saved)
    }
}

fn validate_draft(draft: &AircraftDraft) -> Result<f64, ValidationError> {
    require_text("model", &draft.model)?;
    require_text("serial", &draft.serial)?;
    require_text("manufacturer", &draft.manufacturer)?;
    parse_flight_hours(&draft.flight_hours)
}
