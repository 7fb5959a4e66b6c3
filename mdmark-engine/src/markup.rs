//! Inline highlight markup inside the content string
//!
//! The content string is markdown with embedded HTML, so it is never parsed
//! as HTML as a whole. comrak tells which bytes are raw HTML; `<mark>` tags are
//! matched only there (by regex, tracking nesting), so tags inside code stay
//! literal text. Each located element is handed to html5ever on its own when
//! its attributes or text are needed. Every other byte of the content is left
//! alone.

use crate::annotation::{AnnotationId, HighlightColor};
use crate::regions::SourceRegions;
use crate::view::{HighlightElement, LiveView, COMMENT_ATTR, HIGHLIGHT_TAG, ID_ATTR};
use regex::Regex;
use std::ops::Range;
use std::sync::OnceLock;

/// One `<mark>` element found in the content string (byte ranges)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkSpan {
    pub open: Range<usize>,
    pub inner: Range<usize>,
    /// Missing when the element is never closed; it then runs to end of input
    pub close: Option<Range<usize>>,
}

impl MarkSpan {
    pub fn whole(&self) -> Range<usize> {
        self.open.start..self.close.as_ref().map_or(self.inner.end, |c| c.end)
    }

    /// Parse this element on its own to read its attributes and text
    pub fn element(&self, content: &str) -> Option<HighlightElement> {
        let snippet = format!(
            "{}</{HIGHLIGHT_TAG}>",
            &content[self.open.start..self.inner.end]
        );
        LiveView::parse(&snippet).highlights().into_iter().next()
    }

    /// Value of the id attribute, read straight from the open tag
    pub fn id<'a>(&self, content: &'a str) -> Option<&'a str> {
        let caps = id_attr_re().captures(&content[self.open.clone()])?;
        caps.get(1)
            .or_else(|| caps.get(2))
            .or_else(|| caps.get(3))
            .map(|m| m.as_str())
    }
}

fn open_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)<mark\b(?:[^>"']|"[^"]*"|'[^']*')*>"#).expect("valid open tag regex")
    })
}

fn close_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)</mark\s*>").expect("valid close tag regex"))
}

fn id_attr_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)\sdata-highlight-id\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+))"#)
            .expect("valid id attribute regex")
    })
}

/// All `<mark>` elements in document order (by open tag position)
pub fn mark_spans(content: &str) -> Vec<MarkSpan> {
    mark_spans_in(content, &SourceRegions::scan(content))
}

fn mark_spans_in(content: &str, regions: &SourceRegions) -> Vec<MarkSpan> {
    enum Tag {
        Open(Range<usize>),
        Close(Range<usize>),
    }

    let mut tags: Vec<Tag> = Vec::new();
    for region in &regions.html {
        let html = &content[region.clone()];
        let shift = |r: Range<usize>| region.start + r.start..region.start + r.end;
        tags.extend(open_tag_re().find_iter(html).map(|m| Tag::Open(shift(m.range()))));
        tags.extend(close_tag_re().find_iter(html).map(|m| Tag::Close(shift(m.range()))));
    }
    tags.sort_by_key(|tag| match tag {
        Tag::Open(r) | Tag::Close(r) => r.start,
    });

    let mut spans: Vec<MarkSpan> = Vec::new();
    let mut stack: Vec<usize> = Vec::new();
    for tag in tags {
        match tag {
            Tag::Open(open) => {
                stack.push(spans.len());
                spans.push(MarkSpan {
                    inner: open.end..content.len(),
                    open,
                    close: None,
                });
            }
            Tag::Close(close) => {
                // Stray closing tags are ignored, as an HTML parser would.
                if let Some(index) = stack.pop() {
                    spans[index].inner.end = close.start;
                    spans[index].close = Some(close);
                }
            }
        }
    }
    spans
}

/// The element tagged with `id`, if any
pub fn find_by_id(content: &str, id: &AnnotationId) -> Option<MarkSpan> {
    mark_spans(content)
        .into_iter()
        .find(|span| span.id(content) == Some(id.as_str()))
}

/// First element whose text is exactly `text` and which is not tagged with
/// any of the `claimed` ids
pub fn find_by_text(content: &str, text: &str, claimed: &[&AnnotationId]) -> Option<MarkSpan> {
    mark_spans(content).into_iter().find(|span| {
        let owned_elsewhere = span
            .id(content)
            .is_some_and(|id| claimed.iter().any(|c| c.as_str() == id));
        !owned_elsewhere && span.element(content).is_some_and(|el| el.text() == text)
    })
}

/// Replace an element with its inner content
pub fn strip(content: &str, span: &MarkSpan) -> String {
    splice(content, span.whole(), &content[span.inner.clone()])
}

pub fn splice(content: &str, range: Range<usize>, replacement: &str) -> String {
    let mut out = String::with_capacity(content.len() + replacement.len());
    out.push_str(&content[..range.start]);
    out.push_str(replacement);
    out.push_str(&content[range.end..]);
    out
}

/// First byte range where `text` occurs in prose: outside raw HTML, code and
/// every highlight element
pub fn find_plain_text(content: &str, text: &str) -> Option<Range<usize>> {
    if text.is_empty() {
        return None;
    }
    let regions = SourceRegions::scan(content);
    let marks: Vec<Range<usize>> = mark_spans_in(content, &regions)
        .iter()
        .map(MarkSpan::whole)
        .collect();

    content
        .match_indices(text)
        .map(|(start, matched)| start..start + matched.len())
        .find(|candidate| {
            regions.is_prose(candidate)
                && marks
                    .iter()
                    .all(|m| candidate.end <= m.start || candidate.start >= m.end)
        })
}

/// Canonical round-trippable form of one highlight
pub fn canonical_markup(color: &HighlightColor, text: &str, comment: &str) -> String {
    format!(
        "{}{}</{HIGHLIGHT_TAG}>",
        canonical_open_tag(color, comment),
        escape_text(text)
    )
}

/// Open tag of the canonical form: style, then the comment when there is one
pub fn canonical_open_tag(color: &HighlightColor, comment: &str) -> String {
    let mut out = format!(
        "<{HIGHLIGHT_TAG} style=\"background-color: {}\"",
        escape_attr(color.as_str())
    );
    if !comment.is_empty() {
        out.push_str(&format!(" {COMMENT_ATTR}=\"{}\"", escape_attr(comment)));
    }
    out.push('>');
    out
}

/// Open tag with the given attributes, replacing any id attribute with `id`
pub fn open_tag_with_id(attributes: &[(String, String)], id: &AnnotationId) -> String {
    let mut out = format!("<{HIGHLIGHT_TAG}");
    for (name, value) in attributes {
        if name.eq_ignore_ascii_case(ID_ATTR) {
            continue;
        }
        out.push_str(&format!(" {name}=\"{}\"", escape_attr(value)));
    }
    out.push_str(&format!(" {ID_ATTR}=\"{}\">", escape_attr(id.as_str())));
    out
}

fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;").replace('"', "&quot;")
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
