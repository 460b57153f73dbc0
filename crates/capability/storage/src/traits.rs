//! 存储接口 Trait 定义
//!
//! 定义所有资源存储的异步接口：
//! - AircraftStore：机体存储
//! - MaintenanceRequestStore：维修申请存储
//! - BatteryStore：电池存储
//! - ReportStore：维修报告存储
//! - ActivityStore：动态存储
//!
//! 设计原则：
//! - 所有接口显式接收 ActorContext
//! - 所有接口返回 StorageError
//! - 使用 async_trait 支持动态分发
//! - 列表按写入顺序返回（动态除外：按时间倒序）

use crate::error::StorageError;
use async_trait::async_trait;
use domain::{
    ActivityEntry, ActivityKind, ActorContext, Aircraft, Battery, MaintenanceReport,
    MaintenanceRequest,
};

/// 机体存储接口
#[async_trait]
pub trait AircraftStore: Send + Sync {
    /// 列出全部机体
    async fn list_aircraft(&self, ctx: &ActorContext) -> Result<Vec<Aircraft>, StorageError>;

    /// 查找指定机体
    async fn find_aircraft(
        &self,
        ctx: &ActorContext,
        aircraft_id: &str,
    ) -> Result<Option<Aircraft>, StorageError>;

    /// 按序列号查找（大小写不敏感）
    async fn find_by_serial(
        &self,
        ctx: &ActorContext,
        serial: &str,
    ) -> Result<Option<Aircraft>, StorageError>;

    /// 登记新机体（ID 或序列号重复时报错）
    async fn create_aircraft(
        &self,
        ctx: &ActorContext,
        record: Aircraft,
    ) -> Result<Aircraft, StorageError>;

    /// 以新状态整体替换机体；不存在时返回 None
    async fn update_aircraft(
        &self,
        ctx: &ActorContext,
        record: Aircraft,
    ) -> Result<Option<Aircraft>, StorageError>;
}

/// 维修申请存储接口
#[async_trait]
pub trait MaintenanceRequestStore: Send + Sync {
    async fn list_requests(
        &self,
        ctx: &ActorContext,
    ) -> Result<Vec<MaintenanceRequest>, StorageError>;

    async fn find_request(
        &self,
        ctx: &ActorContext,
        request_id: &str,
    ) -> Result<Option<MaintenanceRequest>, StorageError>;

    async fn create_request(
        &self,
        ctx: &ActorContext,
        record: MaintenanceRequest,
    ) -> Result<MaintenanceRequest, StorageError>;

    /// 以流转后的新记录替换旧记录；不存在时返回 None
    async fn update_request(
        &self,
        ctx: &ActorContext,
        record: MaintenanceRequest,
    ) -> Result<Option<MaintenanceRequest>, StorageError>;
}

/// 电池存储接口
#[async_trait]
pub trait BatteryStore: Send + Sync {
    async fn list_batteries(&self, ctx: &ActorContext) -> Result<Vec<Battery>, StorageError>;

    async fn find_battery(
        &self,
        ctx: &ActorContext,
        battery_id: &str,
    ) -> Result<Option<Battery>, StorageError>;

    async fn create_battery(
        &self,
        ctx: &ActorContext,
        record: Battery,
    ) -> Result<Battery, StorageError>;

    /// 替换电池记录；审计轨迹不得缩短，否则报错
    async fn update_battery(
        &self,
        ctx: &ActorContext,
        record: Battery,
    ) -> Result<Option<Battery>, StorageError>;
}

/// 维修报告存储接口
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// 按日期倒序列出报告
    async fn list_reports(
        &self,
        ctx: &ActorContext,
    ) -> Result<Vec<MaintenanceReport>, StorageError>;

    async fn create_report(
        &self,
        ctx: &ActorContext,
        record: MaintenanceReport,
    ) -> Result<MaintenanceReport, StorageError>;
}

/// 动态存储接口（只追加）
#[async_trait]
pub trait ActivityStore: Send + Sync {
    async fn append_activity(
        &self,
        ctx: &ActorContext,
        entry: ActivityEntry,
    ) -> Result<ActivityEntry, StorageError>;

    /// 按时间倒序列出动态，可按类型筛选
    async fn list_activities(
        &self,
        ctx: &ActorContext,
        kind: Option<ActivityKind>,
    ) -> Result<Vec<ActivityEntry>, StorageError>;
}
