//! 存储层错误：携带面向用户的消息。
//!
//! 内存存储的锁中毒、记录冲突（重复 ID / 序列号）与操作者缺失都归到这里。

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct StorageError {
    message: String,
}

impl StorageError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn lock_failed() -> Self {
        Self::new("lock failed")
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
