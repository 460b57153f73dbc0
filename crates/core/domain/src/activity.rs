//! 活动记录（动态流）。

use crate::permissions::CapabilityCheck;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Add,
    Update,
    Approve,
    Decline,
    Delete,
}

/// 一条动态：谁在何时对哪个资源做了什么。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub id: String,
    pub actor_id: String,
    pub actor_name: String,
    pub kind: ActivityKind,
    pub action: String,
    pub resource: String,
    pub at: DateTime<Utc>,
}

impl ActivityEntry {
    /// 以操作者身份构造动态。
    pub fn by<C>(
        id: impl Into<String>,
        actor: &C,
        kind: ActivityKind,
        action: impl Into<String>,
        resource: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Self
    where
        C: CapabilityCheck + ?Sized,
    {
        Self {
            id: id.into(),
            actor_id: actor.actor_id().to_string(),
            actor_name: actor.actor_name().to_string(),
            kind,
            action: action.into(),
            resource: resource.into(),
            at,
        }
    }
}
