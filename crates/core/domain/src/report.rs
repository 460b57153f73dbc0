//! 维修报告。

use crate::attachment::Attachment;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceReport {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    pub content: String,
    #[serde(default)]
    pub attachment: Option<Attachment>,
    pub uploaded_by: String,
}
