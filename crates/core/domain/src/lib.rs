//! 机队维护领域模型：机体、维修申请、电池、报告、活动记录与权限。

pub mod activity;
pub mod aircraft;
pub mod attachment;
pub mod battery;
pub mod maintenance;
pub mod permissions;
pub mod report;
pub mod validation;

pub use activity::{ActivityEntry, ActivityKind};
pub use aircraft::{Aircraft, AircraftStatus, ServiceHistoryEntry, parse_flight_hours};
pub use attachment::{Attachment, AttachmentPolicy, DEFAULT_ATTACHMENT_MAX_BYTES};
pub use battery::{
    Assignment, AuditAction, AuditEntry, AuditTrail, Battery, BatteryHealth, BatteryStatus,
    Placement,
};
pub use maintenance::{
    ApprovalStatus, CompletionReport, MaintenanceRequest, MaintenanceType, SCHEDULED_REASONS,
    WorkStatus,
};
pub use permissions::{CapabilityCheck, PermissionDenied, require_permission};
pub use report::MaintenanceReport;
pub use validation::{ValidationError, require_text};

/// 操作者上下文：所有规则与存储调用共享的身份信息。
#[derive(Debug, Clone)]
pub struct ActorContext {
    pub user_id: String,
    pub display_name: String,
    pub roles: Vec<String>,
    pub permissions: Vec<String>,
}

impl ActorContext {
    /// 构造显式身份与权限的操作者上下文。
    pub fn new(
        user_id: impl Into<String>,
        display_name: impl Into<String>,
        roles: Vec<String>,
        permissions: Vec<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: display_name.into(),
            roles,
            permissions,
        }
    }

    /// 按角色展开权限码构造上下文。
    pub fn with_roles(
        user_id: impl Into<String>,
        display_name: impl Into<String>,
        roles: Vec<String>,
    ) -> Self {
        let permissions = permissions::permissions_for_roles(&roles);
        Self::new(user_id, display_name, roles, permissions)
    }

    /// 系统身份（种子数据、批处理），拥有全部权限。
    pub fn system() -> Self {
        Self::with_roles(
            "system",
            "System",
            vec![permissions::ROLE_SUPERADMIN.to_string()],
        )
    }
}

impl Default for ActorContext {
    /// 空上下文（仅用于测试或占位）。
    fn default() -> Self {
        Self {
            user_id: "".to_string(),
            display_name: "".to_string(),
            roles: Vec::new(),
            permissions: Vec::new(),
        }
    }
}
