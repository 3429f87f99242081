// src/models/document.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::json::is_truthy;

/// An exported annotation file.
///
/// Only the fields the viewer reads are modelled; everything else in the
/// export is ignored here and still shown on the raw JSON tab.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExamDocument {
    #[serde(default)]
    pub metadata: Option<Metadata>,

    #[serde(default)]
    pub annotations: Option<Vec<Annotation>>,
}

/// File-level metadata written by the exporter.
/// Values are kept as raw JSON since exporters disagree on number vs string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(rename = "fileSize", default)]
    pub file_size: Option<Value>,

    #[serde(rename = "totalPages", default)]
    pub total_pages: Option<Value>,
}

/// One annotated question.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Annotation {
    /// Question category (e.g. "reading", "grammar").
    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub data: Option<AnnotationData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnnotationData {
    #[serde(default)]
    pub text_segments: Option<Vec<TextSegment>>,
}

/// A tagged piece of question content (passage, stem, choices...).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextSegment {
    #[serde(default)]
    pub tag: Option<String>,

    /// Quill delta, kept as raw JSON so the client-side editor gets it untouched.
    #[serde(default)]
    pub quill_delta: Option<Value>,
}

impl ExamDocument {
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(value)
    }

    /// Annotations that carry text segments, paired with their position in
    /// the full annotations list.
    pub fn questions(&self) -> impl Iterator<Item = (usize, &Annotation, &[TextSegment])> {
        self.annotations
            .iter()
            .flatten()
            .enumerate()
            .filter_map(|(index, annotation)| {
                let segments = annotation.data.as_ref()?.text_segments.as_deref()?;
                Some((index, annotation, segments))
            })
    }
}

impl TextSegment {
    /// The delta to display, if the segment has one with operations.
    pub fn displayable_delta(&self) -> Option<&Value> {
        self.quill_delta
            .as_ref()
            .filter(|delta| delta.get("ops").is_some_and(is_truthy))
    }
}
