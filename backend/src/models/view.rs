// src/models/view.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::models::file::FileInfo;

/// Everything the page needs to show one document across its three tabs.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentView {
    pub file: FileInfo,

    /// Pretty-printed source for the raw JSON tab.
    pub raw_json: String,

    pub questions: Vec<QuestionView>,

    /// Last modification of the file on disk. Absent for previews.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    /// 1-based position in the export's annotations list.
    pub number: usize,
    pub category: String,
    pub sections: Vec<SectionView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionView {
    pub title: String,

    /// DOM id for the client-side delta editor. Unique within a view.
    pub container_id: String,

    pub delta: Value,

    /// Rendered and sanitized HTML.
    pub html: String,
}

/// DTO for viewing a dropped file without storing it.
#[derive(Debug, Deserialize, Validate)]
pub struct PreviewRequest {
    #[validate(length(min = 1, max = 255))]
    pub file_name: String,
    pub document: Value,
}

#[derive(Debug, Deserialize)]
pub struct SanitizeRequest {
    pub html: String,
}

#[derive(Debug, Serialize)]
pub struct HtmlResponse {
    pub html: String,
}
