//! 电池生命周期：入库 → 装机 → 退役。
//!
//! 只有入库电池可装机，只有装机电池可退役；退役为终态。每次流转追加一条审计记录。

use chrono::NaiveDate;
use domain::permissions::BATTERY_WRITE;
use domain::{
    Assignment, AuditAction, AuditEntry, AuditTrail, Battery, BatteryHealth, BatteryStatus,
    CapabilityCheck, PermissionDenied, Placement, ValidationError, require_permission,
    require_text,
};
use std::fmt;

/// 循环次数达到该值即显示告警角标。
pub const CRITICAL_CYCLE_THRESHOLD: u32 = 300;

/// 由循环次数推导健康度：100/200/300/400 四级阶梯。
pub fn health_for_cycles(cycles: u32) -> BatteryHealth {
    match cycles {
        400.. => BatteryHealth::Expired,
        300.. => BatteryHealth::Critical,
        200.. => BatteryHealth::Weak,
        100.. => BatteryHealth::Good,
        _ => BatteryHealth::Excellent,
    }
}

pub fn is_critical(cycles: u32) -> bool {
    cycles >= CRITICAL_CYCLE_THRESHOLD
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BatteryAction {
    Assign,
    Decommission,
}

impl fmt::Display for BatteryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Assign => f.write_str("assign"),
            Self::Decommission => f.write_str("decommission"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BatteryError {
    #[error(transparent)]
    PermissionDenied(#[from] PermissionDenied),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("cannot {action} battery {battery_id}: status is {status}")]
    InvalidTransition {
        battery_id: String,
        action: BatteryAction,
        status: BatteryStatus,
    },
}

/// 采购入库表单。
#[derive(Debug, Clone, Default)]
pub struct PurchaseDraft {
    pub tag: String,
    pub kind: String,
    pub chemistry: String,
    pub capacity: String,
    pub voltage: String,
    pub manufacturer: String,
    pub supplier: String,
    /// 缺省为登记当天。
    pub purchase_date: Option<NaiveDate>,
    pub storage_location: String,
}

/// 装机表单。
#[derive(Debug, Clone, Default)]
pub struct AssignmentDraft {
    pub aircraft_number: String,
    pub aircraft: String,
    pub call_sign: String,
    pub assigned_date: Option<NaiveDate>,
}

/// 登记新采购电池：入库、0 循环、一条 PURCHASED 记录。
pub fn register_purchase<C>(
    actor: &C,
    draft: PurchaseDraft,
    on: NaiveDate,
) -> Result<Battery, BatteryError>
where
    C: CapabilityCheck + ?Sized,
{
    require_permission(actor, BATTERY_WRITE)?;
    require_text("Tag", &draft.tag)?;
    require_text("Storage Location", &draft.storage_location)?;

    let tag = draft.tag.trim().to_string();
    let mut audit_trail = AuditTrail::new();
    audit_trail.push(AuditEntry {
        action: AuditAction::Purchased,
        by: actor.actor_name().to_string(),
        date: on,
    });
    Ok(Battery {
        id: tag.clone(),
        tag,
        kind: draft.kind,
        chemistry: draft.chemistry,
        capacity: draft.capacity,
        voltage: draft.voltage,
        manufacturer: draft.manufacturer,
        supplier: draft.supplier,
        purchase_date: Some(draft.purchase_date.unwrap_or(on)),
        cycles: 0,
        placement: Placement::InStore {
            storage_location: draft.storage_location.trim().to_string(),
        },
        audit_trail,
    })
}

/// 装机：仅限入库状态；清除存放位置并追加一条 ASSIGNED 记录。
pub fn assign<C>(
    actor: &C,
    battery: &Battery,
    draft: AssignmentDraft,
    on: NaiveDate,
) -> Result<Battery, BatteryError>
where
    C: CapabilityCheck + ?Sized,
{
    require_permission(actor, BATTERY_WRITE)?;
    if battery.status() != BatteryStatus::InStore {
        return Err(BatteryError::InvalidTransition {
            battery_id: battery.id.clone(),
            action: BatteryAction::Assign,
            status: battery.status(),
        });
    }
    require_text("Aircraft Number", &draft.aircraft_number)?;
    require_text("Aircraft", &draft.aircraft)?;
    require_text("Call Sign", &draft.call_sign)?;
    let assigned_date = draft
        .assigned_date
        .ok_or_else(|| ValidationError::Missing("Assigned Date".to_string()))?;

    let mut next = battery.clone();
    next.placement = Placement::InUse {
        assignment: Assignment {
            aircraft_number: draft.aircraft_number.trim().to_string(),
            aircraft: draft.aircraft.trim().to_string(),
            call_sign: draft.call_sign.trim().to_string(),
            assigned_by: actor.actor_name().to_string(),
            assigned_date,
        },
    };
    next.audit_trail.push(AuditEntry {
        action: AuditAction::Assigned,
        by: actor.actor_name().to_string(),
        date: on,
    });
    Ok(next)
}

/// 退役：仅限装机状态；追加一条 DECOMMISSIONED 记录。
pub fn decommission<C>(actor: &C, battery: &Battery, on: NaiveDate) -> Result<Battery, BatteryError>
where
    C: CapabilityCheck + ?Sized,
{
    require_permission(actor, BATTERY_WRITE)?;
    if battery.status() != BatteryStatus::InUse {
        return Err(BatteryError::InvalidTransition {
            battery_id: battery.id.clone(),
            action: BatteryAction::Decommission,
            status: battery.status(),
        });
    }
    let mut next = battery.clone();
    next.placement = Placement::Decommissioned {
        decommissioned_date: on,
    };
    next.audit_trail.push(AuditEntry {
        action: AuditAction::Decommissioned,
        by: actor.actor_name().to_string(),
        date: on,
    });
    Ok(next)
}
