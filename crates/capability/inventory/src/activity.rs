//! 动态流读取（需要 ACTIVITY.READ）。

use domain::permissions::ACTIVITY_READ;
use domain::{ActivityEntry, ActorContext, PermissionDenied, require_permission};
use fleet_storage::{ActivityQuery, ActivityStore, Page, paginate};
use fleet_telemetry::record_permission_denial;
use std::sync::Arc;
use tracing::warn;

#[derive(Debug, thiserror::Error)]
pub enum ActivityFeedError {
    #[error(transparent)]
    PermissionDenied(#[from] PermissionDenied),
    #[error("storage error: {0}")]
    Storage(String),
}

pub struct ActivityService {
    activity_store: Arc<dyn ActivityStore>,
}

impl ActivityService {
    pub fn new(activity_store: Arc<dyn ActivityStore>) -> Self {
        Self { activity_store }
    }

    /// 按类型筛选后分页，最新在前。
    pub async fn list(
        &self,
        ctx: &ActorContext,
        query: &ActivityQuery,
    ) -> Result<Page<ActivityEntry>, ActivityFeedError> {
        self.authorize(ctx)?;
        let entries = self
            .activity_store
            .list_activities(ctx, query.kind)
            .await
            .map_err(|err| ActivityFeedError::Storage(err.to_string()))?;
        Ok(paginate(entries, query.page, query.page_size))
    }

    /// 最新的 `limit` 条动态。
    pub async fn latest(
        &self,
        ctx: &ActorContext,
        limit: usize,
    ) -> Result<Vec<ActivityEntry>, ActivityFeedError> {
        self.authorize(ctx)?;
        let mut entries = self
            .activity_store
            .list_activities(ctx, None)
            .await
            .map_err(|err| ActivityFeedError::Storage(err.to_string()))?;
        entries.truncate(limit);
        Ok(entries)
    }

    fn authorize(&self, ctx: &ActorContext) -> Result<(), ActivityFeedError> {
        require_permission(ctx, ACTIVITY_READ).map_err(|err| {
            record_permission_denial();
            warn!(
                target: "fleet.activity",
                actor = %ctx.user_id,
                "activity_read_denied"
            );
            ActivityFeedError::from(err)
        })
    }
}
