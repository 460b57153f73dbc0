//! # Fleet Storage 模块
//!
//! 机队维护数据的存储抽象层。
//!
//! ## 分层
//!
//! 1. **接口抽象层** (`traits.rs`)：机体、维修申请、电池、报告、动态的异步 Trait
//! 2. **错误处理层** (`error.rs`)：统一的存储错误类型
//! 3. **验证辅助层** (`validation.rs`)：操作者身份校验
//! 4. **查询辅助层** (`query.rs`)：分页与筛选
//! 5. **实现层** (`in_memory/`)：内存存储实现
//!
//! ## 约束
//!
//! - 所有数据访问方法必须显式接收 `ActorContext`
//! - 状态流转由上层规则计算新记录后整体替换，存储层不做业务判断
//! - 电池审计轨迹只增不减，更新时由存储层再次校验
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use domain::ActorContext;
//! use fleet_storage::{AircraftStore, InMemoryAircraftStore};
//!
//! let store = InMemoryAircraftStore::new();
//! let ctx = ActorContext::system();
//! let fleet = store.list_aircraft(&ctx).await?;
//! ```

pub mod activity;
pub mod error;
pub mod in_memory;
pub mod query;
pub mod traits;
pub mod validation;

pub use activity::log_activity;
pub use error::*;
pub use query::*;
pub use traits::*;
pub use validation::*;

pub use in_memory::{
    InMemoryActivityStore, InMemoryAircraftStore, InMemoryBatteryStore,
    InMemoryMaintenanceRequestStore, InMemoryReportStore,
};
