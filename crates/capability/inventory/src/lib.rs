//! 机队台账与动态流。
//!
//! - [`InventoryService`]：机体登记、状态/小时/履历更新、带定检评估的机队列表
//! - [`ActivityService`]：按权限读取动态流

pub mod activity;
pub mod inventory;

pub use activity::{ActivityFeedError, ActivityService};
pub use inventory::{
    AircraftDraft, FleetEntry, InventoryError, InventoryService, ServiceRecordDraft,
};
