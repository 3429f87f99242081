// src/utils/html.rs

use std::{
    collections::{HashMap, HashSet},
    rc::Rc,
    sync::LazyLock,
};

use html5ever::{
    ParseOpts, QualName, local_name, namespace_url, ns, parse_fragment,
    serialize::{SerializeOpts, TraversalScope, serialize},
    tendril::TendrilSink,
};
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};

/// Tags that survive sanitization. Everything else is unwrapped.
pub const ALLOWED_TAGS: [&str; 12] = [
    "div", "span", "p", "br", "strong", "em", "u", "b", "i", "ul", "ol", "li",
];

/// Attributes kept on allowed tags. Event handlers (`onclick`, ...) and
/// anything carrying a URL are dropped. `style` values pass through as-is.
pub const ALLOWED_ATTRIBUTES: [&str; 5] = ["class", "style", "title", "lang", "dir"];

/// Upper bound on clean passes. Unwrapping can leave allowed elements
/// misnested (`<p>` directly inside `<p>`), which the parser restructures on
/// the next pass; one extra pass settles every case seen so far.
const MAX_PASSES: usize = 4;

static SANITIZER: LazyLock<HtmlSanitizer> = LazyLock::new(HtmlSanitizer::new);

/// Allow-list sanitizer for annotation HTML.
///
/// Unlike `ammonia::clean`, disallowed elements are unwrapped rather than
/// dropped wholesale: `<script>alert(1)</script>` leaves `alert(1)` behind as
/// text. Only the wrapper element goes; the text it contained keeps its
/// place and order. This holds for SVG/MathML and `<template>` content too,
/// which is why the unwrapping runs over the html5ever tree before `ammonia`
/// filters attributes.
pub struct HtmlSanitizer {
    cleaner: ammonia::Builder<'static>,
}

impl HtmlSanitizer {
    pub fn new() -> Self {
        let mut cleaner = ammonia::Builder::default();
        cleaner
            .tags(HashSet::from(ALLOWED_TAGS))
            .clean_content_tags(HashSet::new())
            .generic_attributes(HashSet::from(ALLOWED_ATTRIBUTES))
            .tag_attributes(HashMap::new())
            .link_rel(None)
            .strip_comments(true);
        Self { cleaner }
    }

    /// Cleans until the output is stable, so cleaning the result again is a
    /// no-op.
    pub fn clean(&self, html: &str) -> String {
        let mut current = html.to_string();
        for _ in 0..MAX_PASSES {
            let next = self.clean_once(&current);
            if next == current {
                break;
            }
            current = next;
        }
        current
    }

    fn clean_once(&self, html: &str) -> String {
        if html.is_empty() {
            return String::new();
        }
        let unwrapped = unwrap_disallowed(html);
        self.cleaner.clean(&unwrapped).to_string()
    }
}

impl Default for HtmlSanitizer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HtmlSanitizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HtmlSanitizer")
            .field("tags", &ALLOWED_TAGS)
            .field("attributes", &ALLOWED_ATTRIBUTES)
            .finish()
    }
}

/// Sanitizes an HTML fragment with the shared allow-list sanitizer.
pub fn sanitize(html: &str) -> String {
    SANITIZER.clean(html)
}

enum Removal {
    /// Splice the element's children into its parent.
    Unwrap(Handle),
    /// Remove the node and everything under it (comments, doctypes, ...).
    Drop(Handle),
}

/// Parses `html` as a fragment, unwraps every element that is not an allowed
/// HTML-namespace tag, drops non-text leaves, and serializes the rest.
fn unwrap_disallowed(html: &str) -> String {
    let dom = parse_fragment(
        RcDom::default(),
        ParseOpts::default(),
        QualName::new(None, ns!(html), local_name!("div")),
        Vec::new(),
    )
    .one(html);

    // Fragment nodes hang off a synthetic <html> element.
    let Some(root) = dom.document.children.borrow().first().cloned() else {
        return String::new();
    };

    // Collect first, mutate after: the walk never sees a half-edited tree.
    let mut removals = Vec::new();
    collect_removals(&root, &mut removals);
    for removal in &removals {
        match removal {
            Removal::Unwrap(node) => unwrap(node),
            Removal::Drop(node) => detach(node),
        }
    }

    let opts = SerializeOpts {
        traversal_scope: TraversalScope::ChildrenOnly(None),
        ..Default::default()
    };
    let mut out = Vec::new();
    if let Err(e) = serialize(&mut out, &SerializableHandle::from(root), opts) {
        tracing::warn!("Failed to serialize sanitized fragment: {}", e);
        return String::new();
    }
    String::from_utf8(out).unwrap_or_default()
}

fn is_allowed(name: &QualName) -> bool {
    name.ns == ns!(html) && ALLOWED_TAGS.contains(&&*name.local)
}

/// Depth-first, document order. `<template>` content lives outside the
/// children list, so it is walked explicitly.
fn collect_removals(node: &Handle, removals: &mut Vec<Removal>) {
    for child in node.children.borrow().iter() {
        match &child.data {
            NodeData::Element {
                name,
                template_contents,
                ..
            } => {
                if !is_allowed(name) {
                    removals.push(Removal::Unwrap(child.clone()));
                }
                if let Some(contents) = template_contents.borrow().as_ref() {
                    collect_removals(contents, removals);
                }
                collect_removals(child, removals);
            }
            NodeData::Text { .. } => {}
            _ => removals.push(Removal::Drop(child.clone())),
        }
    }
}

fn parent_of(node: &Handle) -> Option<Handle> {
    let weak = node.parent.take()?;
    let parent = weak.upgrade();
    node.parent.set(Some(weak));
    parent
}

fn unwrap(node: &Handle) {
    let Some(parent) = parent_of(node) else {
        return;
    };

    let mut children = node.children.take();
    if let NodeData::Element {
        template_contents, ..
    } = &node.data
    {
        if let Some(contents) = template_contents.borrow_mut().take() {
            children.extend(contents.children.take());
        }
    }
    for child in &children {
        child.parent.set(Some(Rc::downgrade(&parent)));
    }

    let mut siblings = parent.children.borrow_mut();
    if let Some(index) = siblings.iter().position(|s| Rc::ptr_eq(s, node)) {
        siblings.splice(index..=index, children);
    }
}

fn detach(node: &Handle) {
    if let Some(parent) = parent_of(node) {
        parent
            .children
            .borrow_mut()
            .retain(|sibling| !Rc::ptr_eq(sibling, node));
    }
}
