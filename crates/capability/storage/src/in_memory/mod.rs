//! 内存存储实现模块
//!
//! 对应原管理端的页面本地状态，用于巡检程序和测试。
//!
//! 包含以下实现：
//! - AircraftStore: InMemoryAircraftStore
//! - MaintenanceRequestStore: InMemoryMaintenanceRequestStore
//! - BatteryStore: InMemoryBatteryStore
//! - ReportStore: InMemoryReportStore
//! - ActivityStore: InMemoryActivityStore

pub mod activity;
pub mod aircraft;
pub mod battery;
pub mod maintenance;
pub mod report;

pub use activity::*;
pub use aircraft::*;
pub use battery::*;
pub use maintenance::*;
pub use report::*;
