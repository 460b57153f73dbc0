//! 动态写入辅助：业务流转成功后追加一条动态。
//!
//! 写入失败只记日志，不回滚已完成的流转。

use crate::traits::ActivityStore;
use chrono::Utc;
use domain::{ActivityEntry, ActivityKind, ActorContext};
use fleet_telemetry::record_activity;
use tracing::warn;

/// 以操作者身份追加一条动态，返回是否写入成功。
pub async fn log_activity(
    store: &dyn ActivityStore,
    ctx: &ActorContext,
    kind: ActivityKind,
    action: impl Into<String>,
    resource: impl Into<String>,
) -> bool {
    let entry = ActivityEntry::by(
        uuid::Uuid::new_v4().to_string(),
        ctx,
        kind,
        action,
        resource,
        Utc::now(),
    );
    match store.append_activity(ctx, entry).await {
        Ok(_) => {
            record_activity();
            true
        }
        Err(err) => {
            warn!(
                target: "fleet.activity",
                actor = %ctx.user_id,
                error = %err,
                "activity_append_failed"
            );
            false
        }
    }
}
