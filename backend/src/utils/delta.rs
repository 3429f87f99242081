// src/utils/delta.rs

use serde_json::Value;

use crate::utils::json::{display_text, is_truthy};

/// A rich-text delta: the ordered insert operations of a Quill document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Delta {
    pub ops: Vec<DeltaOp>,
}

/// One insert operation. `insert` is kept as raw JSON because embeds
/// (images, formulas) arrive as objects and are skipped when rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeltaOp {
    pub insert: Value,
    pub attributes: Attributes,
}

/// The formatting attributes the renderer understands. Unknown keys are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub color: Option<String>,
    pub background: Option<String>,
}

impl Delta {
    /// Reads a delta out of arbitrary JSON. A missing or non-array `ops`
    /// yields an empty delta; malformed operations never fail.
    pub fn from_value(value: &Value) -> Self {
        let ops = value
            .get("ops")
            .and_then(Value::as_array)
            .map(|ops| ops.iter().map(DeltaOp::from_value).collect())
            .unwrap_or_default();

        Self { ops }
    }
}

impl DeltaOp {
    fn from_value(value: &Value) -> Self {
        Self {
            insert: value.get("insert").cloned().unwrap_or(Value::Null),
            attributes: value
                .get("attributes")
                .map(Attributes::from_value)
                .unwrap_or_default(),
        }
    }
}

impl Attributes {
    pub fn from_value(value: &Value) -> Self {
        let flag = |key: &str| value.get(key).is_some_and(is_truthy);
        let text = |key: &str| value.get(key).filter(|v| is_truthy(v)).map(display_text);

        Self {
            bold: flag("bold"),
            italic: flag("italic"),
            underline: flag("underline"),
            color: text("color"),
            background: text("background"),
        }
    }
}

/// Renders a delta into an HTML string.
///
/// Each text insert has its line feeds turned into `<br>` and is then wrapped
/// according to its attributes. Wraps nest in a fixed order regardless of how
/// the attributes were keyed: `<strong>` outermost, then `<em>`, `<u>`, the
/// color span, and the background span innermost.
///
/// Inserted text is NOT escaped. Callers that put the output in front of a
/// browser must run it through [`crate::utils::html::sanitize`].
pub fn render(delta: &Delta) -> String {
    delta.ops.iter().filter_map(render_op).collect()
}

/// Convenience for rendering straight from JSON.
pub fn render_value(value: &Value) -> String {
    render(&Delta::from_value(value))
}

fn render_op(op: &DeltaOp) -> Option<String> {
    let text = op.insert.as_str()?;
    let attrs = &op.attributes;

    let mut html = text.replace('\n', "<br>");

    // Innermost first.
    if let Some(background) = &attrs.background {
        html = format!("<span style=\"background-color: {background}\">{html}</span>");
    }
    if let Some(color) = &attrs.color {
        html = format!("<span style=\"color: {color}\">{html}</span>");
    }
    if attrs.underline {
        html = format!("<u>{html}</u>");
    }
    if attrs.italic {
        html = format!("<em>{html}</em>");
    }
    if attrs.bold {
        html = format!("<strong>{html}</strong>");
    }

    Some(html)
}
