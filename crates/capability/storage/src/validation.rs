//! 验证辅助函数
//!
//! - ensure_actor：验证操作者 ID 非空
//!
//! 所有数据访问前都需要可追溯的操作者身份。

use crate::error::StorageError;
use domain::ActorContext;

/// 验证操作者 ID 非空
pub fn ensure_actor(ctx: &ActorContext) -> Result<(), StorageError> {
    if ctx.user_id.trim().is_empty() {
        return Err(StorageError::new("actor required"));
    }
    Ok(())
}
