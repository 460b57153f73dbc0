//! 本地校验错误（表单必填项、数值、附件）。

/// 面向用户的校验错误，均不致命。
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(String),
    #[error("{field} must be a number, got {value:?}")]
    NotANumber { field: String, value: String },
    #[error("invalid value for {field}: {reason}")]
    Invalid { field: String, reason: String },
    #[error("only PDF attachments are accepted, got {0}")]
    AttachmentType(String),
    #[error("PDF must not exceed {max_bytes} bytes (got {size_bytes})")]
    AttachmentTooLarge { size_bytes: u64, max_bytes: u64 },
}

impl ValidationError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// 必填文本（去除首尾空白后非空）。
pub fn require_text(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Missing(field.to_string()));
    }
    Ok(())
}
