//! 权限码、角色与统一的能力校验接口。
//!
//! 所有状态流转函数都通过 [`CapabilityCheck`] 校验操作者权限，
//! 页面层不再各自维护布尔判断。

use crate::ActorContext;

pub const FLEET_READ: &str = "FLEET.READ";
pub const FLEET_WRITE: &str = "FLEET.WRITE";
pub const MAINTENANCE_REQUEST: &str = "MAINTENANCE.REQUEST";
pub const MAINTENANCE_APPROVE: &str = "MAINTENANCE.APPROVE";
pub const MAINTENANCE_WORK: &str = "MAINTENANCE.WORK";
pub const BATTERY_WRITE: &str = "BATTERY.WRITE";
pub const REPORT_UPLOAD: &str = "REPORT.UPLOAD";
pub const ACTIVITY_READ: &str = "ACTIVITY.READ";
pub const USER_MANAGE: &str = "USER.MANAGE";

/// 全部权限码（按展示顺序）。
pub const PERMISSION_CODES: &[&str] = &[
    FLEET_READ,
    FLEET_WRITE,
    MAINTENANCE_REQUEST,
    MAINTENANCE_APPROVE,
    MAINTENANCE_WORK,
    BATTERY_WRITE,
    REPORT_UPLOAD,
    ACTIVITY_READ,
    USER_MANAGE,
];

pub const ROLE_SUPERADMIN: &str = "SUPERADMIN";
pub const ROLE_ADMIN: &str = "ADMIN";
pub const ROLE_TECHNICAL: &str = "TECHNICAL";
pub const ROLE_COO: &str = "COO";
pub const ROLE_MD: &str = "MD";
pub const ROLE_QHSE: &str = "QHSE";
pub const ROLE_GENERAL: &str = "GENERAL";

pub const ROLE_CODES: &[&str] = &[
    ROLE_SUPERADMIN,
    ROLE_ADMIN,
    ROLE_TECHNICAL,
    ROLE_COO,
    ROLE_MD,
    ROLE_QHSE,
    ROLE_GENERAL,
];

const ADMIN_PERMISSIONS: &[&str] = &[
    FLEET_READ,
    FLEET_WRITE,
    MAINTENANCE_REQUEST,
    MAINTENANCE_APPROVE,
    MAINTENANCE_WORK,
    BATTERY_WRITE,
    REPORT_UPLOAD,
    ACTIVITY_READ,
];

const TECHNICAL_PERMISSIONS: &[&str] = &[
    FLEET_READ,
    MAINTENANCE_REQUEST,
    MAINTENANCE_WORK,
    BATTERY_WRITE,
    REPORT_UPLOAD,
    ACTIVITY_READ,
];

const EXECUTIVE_PERMISSIONS: &[&str] = &[FLEET_READ, MAINTENANCE_REQUEST, ACTIVITY_READ];

const QHSE_PERMISSIONS: &[&str] = &[FLEET_READ, MAINTENANCE_REQUEST, REPORT_UPLOAD, ACTIVITY_READ];

const GENERAL_PERMISSIONS: &[&str] = &[FLEET_READ, MAINTENANCE_REQUEST];

/// 把角色名规范为 [`ROLE_CODES`] 中的角色码（大小写不敏感）；未知角色返回 None。
pub fn normalize_role(role: &str) -> Option<&'static str> {
    let role = role.trim();
    ROLE_CODES
        .iter()
        .copied()
        .find(|code| code.eq_ignore_ascii_case(role))
}

/// 角色对应的权限码；未知角色无权限。
pub fn permissions_for_role(role: &str) -> &'static [&'static str] {
    match normalize_role(role) {
        Some(ROLE_SUPERADMIN) => PERMISSION_CODES,
        Some(ROLE_ADMIN) => ADMIN_PERMISSIONS,
        Some(ROLE_TECHNICAL) => TECHNICAL_PERMISSIONS,
        Some(ROLE_COO | ROLE_MD) => EXECUTIVE_PERMISSIONS,
        Some(ROLE_QHSE) => QHSE_PERMISSIONS,
        Some(ROLE_GENERAL) => GENERAL_PERMISSIONS,
        _ => &[],
    }
}

/// 多个角色的权限并集，按 [`PERMISSION_CODES`] 顺序去重。
pub fn permissions_for_roles(roles: &[String]) -> Vec<String> {
    PERMISSION_CODES
        .iter()
        .filter(|code| {
            roles
                .iter()
                .any(|role| permissions_for_role(role).contains(code))
        })
        .map(|code| (*code).to_string())
        .collect()
}

/// 能力校验接口：所有流转函数统一依赖此 trait。
pub trait CapabilityCheck {
    /// 操作者标识（写入审计与活动记录）。
    fn actor_id(&self) -> &str;
    /// 操作者展示名。
    fn actor_name(&self) -> &str;
    fn has_permission(&self, permission: &str) -> bool;
}

impl CapabilityCheck for ActorContext {
    fn actor_id(&self) -> &str {
        &self.user_id
    }

    fn actor_name(&self) -> &str {
        if self.display_name.is_empty() {
            &self.user_id
        } else {
            &self.display_name
        }
    }

    fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|code| code == permission)
    }
}

/// 缺少权限。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("permission denied: {actor} lacks {permission}")]
pub struct PermissionDenied {
    pub actor: String,
    pub permission: String,
}

/// 校验操作者拥有指定权限。
pub fn require_permission<C>(actor: &C, permission: &str) -> Result<(), PermissionDenied>
where
    C: CapabilityCheck + ?Sized,
{
    if actor.has_permission(permission) {
        return Ok(());
    }
    Err(PermissionDenied {
        actor: actor.actor_id().to_string(),
        permission: permission.to_string(),
    })
}
