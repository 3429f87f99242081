// src/viewer.rs

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::{
    error::AppError,
    models::{
        document::{Annotation, ExamDocument, TextSegment},
        file::{FileInfo, display_name},
        view::{DocumentView, QuestionView, SectionView},
    },
    utils::{delta::render_value, html::sanitize, json::display_or},
};

pub const UNKNOWN_CATEGORY: &str = "Unknown";
pub const DEFAULT_SECTION_TITLE: &str = "본문";
const DEFAULT_CONTAINER_TAG: &str = "content";
const MISSING_META: &str = "N/A";

/// Rendered output keyed by container id, owned by whoever builds a view.
///
/// Ids handed out by [`RenderRegistry::register`] are unique for the
/// registry's lifetime; entries live until disposed or the registry drops.
#[derive(Debug, Default)]
pub struct RenderRegistry {
    entries: HashMap<String, String>,
}

impl RenderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `html` under `id`, or under `id-2`, `id-3`, ... if `id` is taken.
    /// Returns the id actually used.
    pub fn register(&mut self, id: &str, html: String) -> String {
        let mut unique = id.to_string();
        let mut suffix = 2;
        while self.entries.contains_key(&unique) {
            unique = format!("{id}-{suffix}");
            suffix += 1;
        }
        self.entries.insert(unique.clone(), html);
        unique
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.entries.get(id).map(String::as_str)
    }

    pub fn dispose(&mut self, id: &str) -> Option<String> {
        self.entries.remove(id)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builds the header line for a document.
pub fn file_info(name: &str, document: &ExamDocument) -> FileInfo {
    let meta = document
        .metadata
        .as_ref()
        .map(|meta| {
            format!(
                "파일 크기: {} | 페이지: {}",
                display_or(meta.file_size.as_ref(), MISSING_META),
                display_or(meta.total_pages.as_ref(), MISSING_META),
            )
        })
        .unwrap_or_default();

    FileInfo {
        name: name.to_string(),
        display_name: display_name(name),
        meta,
    }
}

/// Builds the full view of a document from its raw JSON.
pub fn build_view(
    name: &str,
    raw: &Value,
    modified_at: Option<DateTime<Utc>>,
) -> Result<DocumentView, AppError> {
    let document = ExamDocument::from_value(raw)?;
    let raw_json = serde_json::to_string_pretty(raw)?;

    let mut registry = RenderRegistry::new();
    let questions: Vec<QuestionView> = document
        .questions()
        .map(|(index, annotation, segments)| {
            build_question(&mut registry, index, annotation, segments)
        })
        .collect();

    tracing::debug!(
        "Built view for {}: {} questions, {} sections",
        name,
        questions.len(),
        registry.len()
    );

    Ok(DocumentView {
        file: file_info(name, &document),
        raw_json,
        questions,
        modified_at,
    })
}

fn build_question(
    registry: &mut RenderRegistry,
    index: usize,
    annotation: &Annotation,
    segments: &[TextSegment],
) -> QuestionView {
    let sections = segments
        .iter()
        .filter_map(|segment| {
            let delta = segment.displayable_delta()?;
            let tag = segment.tag.as_deref().filter(|tag| !tag.is_empty());

            let html = sanitize(&render_value(delta));
            let id = format!("quill-{}-{}", index, tag.unwrap_or(DEFAULT_CONTAINER_TAG));
            let container_id = registry.register(&id, html.clone());

            Some(SectionView {
                title: tag.unwrap_or(DEFAULT_SECTION_TITLE).to_string(),
                container_id,
                delta: delta.clone(),
                html,
            })
        })
        .collect();

    QuestionView {
        number: index + 1,
        category: annotation
            .category
            .as_deref()
            .filter(|category| !category.is_empty())
            .unwrap_or(UNKNOWN_CATEGORY)
            .to_string(),
        sections,
    }
}
