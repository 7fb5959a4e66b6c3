//! The live view: the rendered, selectable representation of a document
//!
//! The view is an html5ever/rcdom tree built from renderer output. Everything the
//! core needs from a browser DOM is implemented here over that tree:
//! concatenated text content, `<mark>` lookup by id, wrapping a character range
//! in a new element and unwrapping an element back to plain text.
//!
//! Nodes are moved between parents without maintaining rcdom's weak parent
//! pointers. Nothing in this crate reads them; all traversal goes top-down from
//! the view root.
//!
//! Dropping an rcdom document empties every node below it, including nodes
//! still referenced elsewhere. [`LiveView`] and every [`HighlightElement`]
//! therefore hold the document handle for as long as they live.

use crate::annotation::{AnnotationId, HighlightColor};
use crate::error::AnnotateError;
use crate::selection::TextSelection;
use html5ever::tendril::TendrilSink;
use html5ever::{
    ns, parse_document, serialize, serialize::SerializeOpts, serialize::TraversalScope,
    Attribute, LocalName, ParseOpts, QualName,
};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Tag name of the inline highlight element
pub const HIGHLIGHT_TAG: &str = "mark";
/// Attribute carrying the annotation id
pub const ID_ATTR: &str = "data-highlight-id";
/// Attribute carrying the user's comment
pub const COMMENT_ATTR: &str = "data-comment";

/// Rendered document the user selects text within
pub struct LiveView {
    document: Handle,
    root: Handle,
}

/// Offsets of a wrapped range inside its start and end text nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeRange {
    pub start_offset: usize,
    pub end_offset: usize,
}

struct TextSlot {
    parent: Handle,
    node: Handle,
    start: usize,
    len: usize,
}

impl LiveView {
    /// Parse rendered HTML. Malformed markup is recovered the way browsers do.
    pub fn parse(html: &str) -> Self {
        let dom = parse_document(RcDom::default(), ParseOpts::default()).one(html);
        let document = dom.document.clone();
        let root = find_element(&document, "body").unwrap_or_else(|| document.clone());
        Self { document, root }
    }

    /// Serialize the view's body content back to HTML
    pub fn to_html(&self) -> Result<String, AnnotateError> {
        let mut output = Vec::new();
        let opts = SerializeOpts {
            traversal_scope: TraversalScope::ChildrenOnly(None),
            ..Default::default()
        };
        let serializable = SerializableHandle::from(self.root.clone());
        serialize(&mut output, &serializable, opts).map_err(|e| {
            AnnotateError::SerializationError(format!("HTML serialization failed: {e}"))
        })?;
        String::from_utf8(output)
            .map_err(|e| AnnotateError::SerializationError(format!("UTF-8 conversion failed: {e}")))
    }

    /// Concatenated text of every text node, in document order
    pub fn text_content(&self) -> String {
        text_of(&self.root)
    }

    /// Every highlight element in document order
    pub fn highlights(&self) -> Vec<HighlightElement> {
        let mut found = Vec::new();
        collect_highlights(&self.document, &self.root, &mut found);
        found
    }

    /// The highlight element carrying `id`, if it is in the view
    pub fn highlight(&self, id: &AnnotationId) -> Option<HighlightElement> {
        self.highlights()
            .into_iter()
            .find(|el| el.id().as_ref() == Some(id))
    }

    /// Selection covering the `nth` (0-based) occurrence of `needle` in the text content
    pub fn find_text(&self, needle: &str, nth: usize) -> Option<TextSelection> {
        if needle.is_empty() {
            return None;
        }
        let text = self.text_content();
        let (byte_start, _) = text.match_indices(needle).nth(nth)?;
        let start = text[..byte_start].chars().count();
        Some(TextSelection::new(start, start + needle.chars().count()))
    }

    /// Text covered by `selection`, or `None` when it is out of bounds
    pub fn selected_text(&self, selection: TextSelection) -> Option<String> {
        let text = self.text_content();
        if selection.end() > text.chars().count() {
            return None;
        }
        Some(
            text.chars()
                .skip(selection.start())
                .take(selection.len())
                .collect(),
        )
    }

    /// Move the selected content into `wrapper` and put the wrapper in its place.
    ///
    /// Follows the DOM `surroundContents` rule: the range may cut through text
    /// nodes but must not partially contain an element, so both boundary text
    /// nodes have to share a parent. On error the tree is left untouched.
    pub(crate) fn surround(
        &mut self,
        selection: TextSelection,
        wrapper: Handle,
    ) -> Result<NativeRange, AnnotateError> {
        if selection.is_collapsed() {
            return Err(AnnotateError::SelectionWrapFailure(
                "selection is empty".to_string(),
            ));
        }

        let mut slots = Vec::new();
        let mut cursor = 0;
        collect_text_slots(&self.root, &mut slots, &mut cursor);
        if selection.end() > cursor {
            return Err(AnnotateError::SelectionWrapFailure(format!(
                "selection {}..{} is outside the document ({cursor} characters)",
                selection.start(), selection.end()
            )));
        }

        // Start binds to the node that follows a boundary, end to the one before it.
        let first = slots
            .iter()
            .find(|s| s.start <= selection.start() && selection.start() < s.start + s.len);
        let last = slots
            .iter()
            .find(|s| s.start < selection.end() && selection.end() <= s.start + s.len);
        let (Some(first), Some(last)) = (first, last) else {
            return Err(AnnotateError::SelectionWrapFailure(
                "selection does not start and end in text".to_string(),
            ));
        };
        if !Rc::ptr_eq(&first.parent, &last.parent) {
            return Err(AnnotateError::SelectionWrapFailure(
                "selection partially contains an element".to_string(),
            ));
        }

        let start_offset = selection.start() - first.start;
        let end_offset = selection.end() - last.start;
        let parent = first.parent.clone();
        let mut children = parent.children.borrow_mut();
        let index_of = |node: &Handle| children.iter().position(|c| Rc::ptr_eq(c, node));
        let (Some(first_idx), Some(last_idx)) = (index_of(&first.node), index_of(&last.node))
        else {
            return Err(AnnotateError::SelectionWrapFailure(
                "selection boundary is detached from the view".to_string(),
            ));
        };

        let first_text = text_of(&first.node);
        let last_text = text_of(&last.node);
        let (before, _) = split_chars(&first_text, start_offset);
        let (_, after) = split_chars(&last_text, end_offset);

        {
            let mut inner = wrapper.children.borrow_mut();
            if first_idx == last_idx {
                let (_, rest) = split_chars(&first_text, start_offset);
                let (selected, _) = split_chars(rest, end_offset - start_offset);
                inner.push(create_text(selected));
            } else {
                let (_, head) = split_chars(&first_text, start_offset);
                let (tail, _) = split_chars(&last_text, end_offset);
                if !head.is_empty() {
                    inner.push(create_text(head));
                }
                inner.extend(children[first_idx + 1..last_idx].iter().cloned());
                if !tail.is_empty() {
                    inner.push(create_text(tail));
                }
            }
        }

        let mut replacement = Vec::with_capacity(3);
        if !before.is_empty() {
            replacement.push(create_text(before));
        }
        replacement.push(wrapper);
        if !after.is_empty() {
            replacement.push(create_text(after));
        }
        children.splice(first_idx..=last_idx, replacement);

        Ok(NativeRange {
            start_offset,
            end_offset,
        })
    }

    /// Replace the highlight carrying `id` with its own children.
    ///
    /// Returns the text that was highlighted, or `None` if no element carries
    /// the id.
    pub(crate) fn unwrap_highlight(&mut self, id: &AnnotationId) -> Option<String> {
        unwrap_in(&self.root, id)
    }
}

/// Handle to one `<mark>` element of a [`LiveView`]
#[derive(Clone)]
pub struct HighlightElement {
    /// Owning document; the element's subtree is emptied once it is dropped
    _document: Handle,
    handle: Handle,
}

impl HighlightElement {
    pub fn id(&self) -> Option<AnnotationId> {
        get_attr(&self.handle, ID_ATTR).map(AnnotationId::new)
    }

    /// Background color from the inline style, or the default when unset
    pub fn color(&self) -> HighlightColor {
        get_attr(&self.handle, "style")
            .and_then(|style| style_property(&style, "background-color"))
            .map(|value| HighlightColor::from_css(&value))
            .unwrap_or_default()
    }

    pub fn comment(&self) -> String {
        get_attr(&self.handle, COMMENT_ATTR).unwrap_or_default()
    }

    pub fn text(&self) -> String {
        text_of(&self.handle)
    }

    /// Attributes in source order
    pub fn attributes(&self) -> Vec<(String, String)> {
        match &self.handle.data {
            NodeData::Element { attrs, .. } => attrs
                .borrow()
                .iter()
                .map(|a| (a.name.local.to_string(), a.value.to_string()))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Set the comment attribute, or drop it when `comment` is empty
    pub fn set_comment(&self, comment: &str) {
        if comment.is_empty() {
            remove_attr(&self.handle, COMMENT_ATTR);
        } else {
            set_attr(&self.handle, COMMENT_ATTR, comment);
        }
    }
}

/// Build a highlight element with a background color and an id
pub(crate) fn create_highlight_element(color: &HighlightColor, id: &AnnotationId) -> Handle {
    let style = format!("background-color: {color}");
    create_element(
        HIGHLIGHT_TAG,
        vec![("style", style.as_str()), (ID_ATTR, id.as_str())],
    )
}

/// Read one declaration from an inline `style` attribute
pub fn style_property(style: &str, property: &str) -> Option<String> {
    style.split(';').find_map(|declaration| {
        let (name, value) = declaration.split_once(':')?;
        if name.trim().eq_ignore_ascii_case(property) {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        } else {
            None
        }
    })
}

fn find_element(node: &Handle, tag: &str) -> Option<Handle> {
    if is_element(node, tag) {
        return Some(node.clone());
    }
    node.children
        .borrow()
        .iter()
        .find_map(|child| find_element(child, tag))
}

fn is_element(node: &Handle, tag: &str) -> bool {
    matches!(
        &node.data,
        NodeData::Element { name, .. } if str::eq_ignore_ascii_case(&name.local, tag)
    )
}

fn collect_highlights(document: &Handle, node: &Handle, found: &mut Vec<HighlightElement>) {
    for child in node.children.borrow().iter() {
        if is_element(child, HIGHLIGHT_TAG) {
            found.push(HighlightElement {
                _document: document.clone(),
                handle: child.clone(),
            });
        }
        collect_highlights(document, child, found);
    }
}

fn collect_text_slots(node: &Handle, slots: &mut Vec<TextSlot>, cursor: &mut usize) {
    for child in node.children.borrow().iter() {
        match &child.data {
            NodeData::Text { contents } => {
                let len = contents.borrow().chars().count();
                slots.push(TextSlot {
                    parent: node.clone(),
                    node: child.clone(),
                    start: *cursor,
                    len,
                });
                *cursor += len;
            }
            NodeData::Element { .. } => collect_text_slots(child, slots, cursor),
            _ => {}
        }
    }
}

fn text_of(node: &Handle) -> String {
    let mut out = String::new();
    push_text(node, &mut out);
    out
}

fn push_text(node: &Handle, out: &mut String) {
    match &node.data {
        NodeData::Text { contents } => out.push_str(&contents.borrow()),
        NodeData::Element { .. } | NodeData::Document => {
            for child in node.children.borrow().iter() {
                push_text(child, out);
            }
        }
        _ => {}
    }
}

fn unwrap_in(node: &Handle, id: &AnnotationId) -> Option<String> {
    let position = node.children.borrow().iter().position(|child| {
        is_element(child, HIGHLIGHT_TAG) && get_attr(child, ID_ATTR).as_deref() == Some(id.as_str())
    });
    if let Some(index) = position {
        let mut children = node.children.borrow_mut();
        let mark = children[index].clone();
        let text = text_of(&mark);
        let inner = std::mem::take(&mut *mark.children.borrow_mut());
        children.splice(index..=index, inner);
        return Some(text);
    }
    let children: Vec<Handle> = node.children.borrow().clone();
    children.iter().find_map(|child| unwrap_in(child, id))
}

/// Split at a character offset (clamped to the string length)
fn split_chars(text: &str, at: usize) -> (&str, &str) {
    let byte = text
        .char_indices()
        .nth(at)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    text.split_at(byte)
}

fn get_attr(node: &Handle, attr: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|a| str::eq_ignore_ascii_case(&a.name.local, attr))
            .map(|a| a.value.to_string()),
        _ => None,
    }
}

fn set_attr(node: &Handle, attr: &str, value: &str) {
    if let NodeData::Element { attrs, .. } = &node.data {
        let mut attrs = attrs.borrow_mut();
        match attrs
            .iter_mut()
            .find(|a| str::eq_ignore_ascii_case(&a.name.local, attr))
        {
            Some(existing) => existing.value = value.to_string().into(),
            None => attrs.push(Attribute {
                name: QualName::new(None, ns!(), LocalName::from(attr)),
                value: value.to_string().into(),
            }),
        }
    }
}

fn remove_attr(node: &Handle, attr: &str) {
    if let NodeData::Element { attrs, .. } = &node.data {
        attrs
            .borrow_mut()
            .retain(|a| !str::eq_ignore_ascii_case(&a.name.local, attr));
    }
}

/// Create an HTML element with attributes
fn create_element(tag: &str, attrs: Vec<(&str, &str)>) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .into_iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.to_string().into(),
        })
        .collect();

    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: qual_name,
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

/// Create a text node
fn create_text(text: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}
