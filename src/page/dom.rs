//! Report page DOM
//!
//! Parses an HTML page with html5ever into an `RcDom` and offers the few
//! lookups the exporters need: element by id, descendants by tag name,
//! rendered text and form values.

use crate::error::{Error, Result};
use crate::string_utils::normalize_text;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use log::debug;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use std::fs;
use std::path::Path;

/// Largest page accepted by default (5MB).
pub const DEFAULT_MAX_PAGE_BYTES: usize = 5_000_000;

/// Elements whose boundaries start a new line of rendered text.
const BLOCK_TAGS: &[&str] = &[
    "address",
    "article",
    "blockquote",
    "dd",
    "div",
    "dl",
    "dt",
    "figure",
    "footer",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "li",
    "ol",
    "p",
    "pre",
    "section",
    "table",
    "tr",
    "ul",
];

/// Elements whose content is never rendered.
const HIDDEN_TAGS: &[&str] = &["script", "style", "template", "noscript", "head"];

// ─────────────────────────────────────────────────────────────────────────────
// Page
// ─────────────────────────────────────────────────────────────────────────────

/// A parsed HTML page.
pub struct Page {
    dom: RcDom,
}

impl Page {
    /// Parse a page from an HTML string.
    pub fn parse(html: &str) -> Result<Self> {
        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut html.as_bytes())
            .map_err(|e| Error::HtmlParse(e.to_string()))?;

        Ok(Self { dom })
    }

    /// Read and parse a page from disk.
    ///
    /// # Errors
    ///
    /// - `Error::FileRead` if the file cannot be read
    /// - `Error::PageTooLarge` if it is larger than `max_bytes`
    pub fn load(path: &Path, max_bytes: usize) -> Result<Self> {
        let read_error = |e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        };

        let size = fs::metadata(path).map_err(read_error)?.len();
        if size > max_bytes as u64 {
            return Err(Error::PageTooLarge(usize::try_from(size).unwrap_or(usize::MAX)));
        }

        let bytes = fs::read(path).map_err(read_error)?;
        // The file may have grown since the metadata was read
        if bytes.len() > max_bytes {
            return Err(Error::PageTooLarge(bytes.len()));
        }

        debug!("Parsing {} ({} bytes)", path.display(), bytes.len());
        Self::parse(&String::from_utf8_lossy(&bytes))
    }

    /// The root `<html>` element.
    fn root(&self) -> Option<Element> {
        self.dom
            .document
            .children
            .borrow()
            .iter()
            .find(|child| matches!(child.data, NodeData::Element { .. }))
            .cloned()
            .map(Element)
    }

    /// First element in document order whose `id` attribute equals `id`.
    pub fn element_by_id(&self, id: &str) -> Option<Element> {
        let root = self.root()?;
        if root.id().as_deref() == Some(id) {
            return Some(root);
        }
        root.find_descendant(&|el| el.id().as_deref() == Some(id))
    }

    /// Every element with the given tag name, in document order.
    pub fn elements_by_tag(&self, tag: &str) -> Vec<Element> {
        let Some(root) = self.root() else {
            return Vec::new();
        };
        let mut found = Vec::new();
        if root.tag() == tag {
            found.push(root.clone());
        }
        found.extend(root.descendants(tag));
        found
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Element
// ─────────────────────────────────────────────────────────────────────────────

/// A handle to an element node in a [`Page`].
#[derive(Clone)]
pub struct Element(Handle);

impl Element {
    /// Lowercase tag name.
    pub fn tag(&self) -> String {
        match &self.0.data {
            NodeData::Element { name, .. } => name.local.to_string(),
            _ => String::new(),
        }
    }

    /// Value of an attribute, if present.
    pub fn attr(&self, attr_name: &str) -> Option<String> {
        match &self.0.data {
            NodeData::Element { attrs, .. } => attrs
                .borrow()
                .iter()
                .find(|attr| attr.name.local.as_ref() == attr_name)
                .map(|attr| attr.value.to_string()),
            _ => None,
        }
    }

    /// The `id` attribute.
    pub fn id(&self) -> Option<String> {
        self.attr("id")
    }

    fn parent(&self) -> Option<Element> {
        let weak = self.0.parent.take();
        let parent = weak.as_ref().and_then(|w| w.upgrade());
        self.0.parent.set(weak);
        parent
            .filter(|p| matches!(p.data, NodeData::Element { .. }))
            .map(Element)
    }

    /// Whether any ancestor element has the given tag name.
    pub fn has_ancestor(&self, tag: &str) -> bool {
        let mut current = self.parent();
        while let Some(el) = current {
            if el.tag() == tag {
                return true;
            }
            current = el.parent();
        }
        false
    }

    /// First descendant in document order matching `pred`.
    fn find_descendant(&self, pred: &dyn Fn(&Element) -> bool) -> Option<Element> {
        let mut stack = Vec::new();
        push_element_children(&self.0, &mut stack);

        while let Some(handle) = stack.pop() {
            let el = Element(handle);
            if pred(&el) {
                return Some(el);
            }
            push_element_children(&el.0, &mut stack);
        }
        None
    }

    /// Descendants (not including `self`) with the given tag, in document order.
    pub fn descendants(&self, tag: &str) -> Vec<Element> {
        let mut found = Vec::new();
        let mut stack = Vec::new();
        push_element_children(&self.0, &mut stack);

        while let Some(handle) = stack.pop() {
            push_element_children(&handle, &mut stack);
            let el = Element(handle);
            if el.tag() == tag {
                found.push(el);
            }
        }
        found
    }

    /// Descendants with tag `tag` that sit somewhere below a `scope` element,
    /// like the CSS selector `scope tag` evaluated from this element.
    ///
    /// The `scope` element may also be this element or one of its ancestors.
    pub fn select(&self, scope: &str, tag: &str) -> Vec<Element> {
        let in_scope = self.tag() == scope || self.has_ancestor(scope);

        let mut found = Vec::new();
        let mut children = Vec::new();
        push_element_children(&self.0, &mut children);
        let mut stack: Vec<(Handle, bool)> = children
            .into_iter()
            .map(|handle| (handle, in_scope))
            .collect();

        while let Some((handle, in_scope)) = stack.pop() {
            let el = Element(handle);
            let el_tag = el.tag();
            let below = in_scope || el_tag == scope;

            let mut children = Vec::new();
            push_element_children(&el.0, &mut children);
            stack.extend(children.into_iter().map(|handle| (handle, below)));

            if in_scope && el_tag == tag {
                found.push(el);
            }
        }
        found
    }

    /// Concatenation of every descendant text node, unmodified.
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        let mut stack: Vec<Handle> = self.0.children.borrow().iter().rev().cloned().collect();

        while let Some(handle) = stack.pop() {
            match &handle.data {
                NodeData::Text { contents } => text.push_str(&contents.borrow()),
                NodeData::Element { .. } => {
                    stack.extend(handle.children.borrow().iter().rev().cloned());
                }
                _ => {}
            }
        }
        text
    }

    /// Text as a browser renders it: whitespace collapsed, block boundaries
    /// and `<br>` as line breaks, hidden content skipped.
    pub fn inner_text(&self) -> String {
        let mut collector = TextCollector::default();
        for child in self.0.children.borrow().iter() {
            collector.walk(child);
        }
        collector.finish()
    }

    /// The payload held by the element, unmodified.
    ///
    /// `input` yields its `value` attribute; every other element its raw
    /// text content.
    pub fn value(&self) -> String {
        match self.tag().as_str() {
            "input" => self.attr("value").unwrap_or_default(),
            _ => self.text_content(),
        }
    }
}

/// Push the element children of `handle` so they pop in document order.
fn push_element_children(handle: &Handle, stack: &mut Vec<Handle>) {
    stack.extend(
        handle
            .children
            .borrow()
            .iter()
            .rev()
            .filter(|child| matches!(child.data, NodeData::Element { .. }))
            .cloned(),
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Rendered Text
// ─────────────────────────────────────────────────────────────────────────────

enum Visit {
    Enter(Handle),
    LeaveBlock,
}

/// Accumulates rendered text line by line.
#[derive(Default)]
struct TextCollector {
    lines: Vec<String>,
}

impl TextCollector {
    fn current(&mut self) -> &mut String {
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        let last = self.lines.len() - 1;
        &mut self.lines[last]
    }

    /// `<br>`: always starts a new line.
    fn hard_break(&mut self) {
        self.current();
        self.lines.push(String::new());
    }

    /// Block boundary: starts a new line unless the current one is blank.
    fn soft_break(&mut self) {
        if !self.current().trim().is_empty() {
            self.lines.push(String::new());
        }
    }

    fn walk(&mut self, handle: &Handle) {
        let mut stack = vec![Visit::Enter(handle.clone())];

        while let Some(visit) = stack.pop() {
            let handle = match visit {
                Visit::Enter(handle) => handle,
                Visit::LeaveBlock => {
                    self.soft_break();
                    continue;
                }
            };

            match &handle.data {
                NodeData::Text { contents } => self.current().push_str(&contents.borrow()),
                NodeData::Element { name, .. } => {
                    let tag = name.local.as_ref();
                    if HIDDEN_TAGS.contains(&tag) {
                        continue;
                    }
                    if tag == "br" {
                        self.hard_break();
                        continue;
                    }

                    if BLOCK_TAGS.contains(&tag) {
                        self.soft_break();
                        stack.push(Visit::LeaveBlock);
                    }
                    stack.extend(handle.children.borrow().iter().rev().cloned().map(Visit::Enter));
                }
                _ => {}
            }
        }
    }

    fn finish(self) -> String {
        let lines: Vec<String> = self.lines.iter().map(|line| normalize_text(line)).collect();
        let start = lines.iter().position(|l| !l.is_empty());
        let end = lines.iter().rposition(|l| !l.is_empty());
        match (start, end) {
            (Some(start), Some(end)) => lines[start..=end].join("\n"),
            _ => String::new(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
