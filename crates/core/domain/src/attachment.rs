//! 附件引用与上传规则（仅 PDF，大小上限）。

use crate::validation::ValidationError;
use serde::{Deserialize, Serialize};

/// 默认附件上限：10 MiB。
pub const DEFAULT_ATTACHMENT_MAX_BYTES: u64 = 10 * 1024 * 1024;

const PDF_CONTENT_TYPE: &str = "application/pdf";

/// 已上传文件的引用（文件本身由外部存储保管）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub file_name: String,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub size_bytes: u64,
}

impl Attachment {
    /// 仅凭文件名构造（类型由扩展名推断，大小未知记 0）。
    pub fn named(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            size_bytes: 0,
        }
    }
}

/// 附件校验策略。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachmentPolicy {
    pub max_bytes: u64,
}

impl Default for AttachmentPolicy {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_ATTACHMENT_MAX_BYTES,
        }
    }
}

impl AttachmentPolicy {
    pub fn new(max_bytes: u64) -> Self {
        Self { max_bytes }
    }

    /// 校验附件：文件名非空、PDF 类型、不超过上限。
    ///
    /// 声明了 content type 时以其为准，否则按 `.pdf` 扩展名判断。
    pub fn validate(&self, attachment: &Attachment) -> Result<(), ValidationError> {
        let file_name = attachment.file_name.trim();
        if file_name.is_empty() {
            return Err(ValidationError::Missing("attachment".to_string()));
        }
        let is_pdf = match attachment.content_type.as_deref() {
            Some(content_type) => content_type.trim().eq_ignore_ascii_case(PDF_CONTENT_TYPE),
            None => file_name.to_ascii_lowercase().ends_with(".pdf"),
        };
        if !is_pdf {
            let kind = attachment
                .content_type
                .clone()
                .unwrap_or_else(|| file_name.to_string());
            return Err(ValidationError::AttachmentType(kind));
        }
        if attachment.size_bytes > self.max_bytes {
            return Err(ValidationError::AttachmentTooLarge {
                size_bytes: attachment.size_bytes,
                max_bytes: self.max_bytes,
            });
        }
        Ok(())
    }
}
