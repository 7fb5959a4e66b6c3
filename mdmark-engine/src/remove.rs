//! Removing highlights
//!
//! Removal touches three things: the live view, the content string and the
//! store. The view and the store are exact (they are keyed by id). The
//! content string is best effort: the id-tagged element is preferred, and only
//! when no markup carries the id does removal fall back to matching the
//! highlighted text, which cannot tell duplicate texts apart.

use crate::annotation::{Annotation, AnnotationId};
use crate::error::AnnotateError;
use crate::markup::{find_by_id, find_by_text, strip};
use crate::store::AnnotationStore;
use crate::view::LiveView;

/// How the content string was updated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentMatch {
    /// Markup tagged with the annotation id was stripped
    Id,
    /// A highlight wrapping the text found in the view was stripped
    ViewText,
    /// A highlight wrapping the caller's fallback text was stripped
    FallbackText,
    /// Nothing matched; the content string is unchanged
    Miss,
}

/// Outcome of [`remove_highlight`]
#[derive(Debug, Clone)]
pub struct Removal {
    /// The record taken out of the store, `None` if it was already gone
    pub removed: Option<Annotation>,
    /// Whether an element was unwrapped in the live view
    pub view_unwrapped: bool,
    pub content_match: ContentMatch,
}

/// Remove a highlight from the view, the content string and the store.
///
/// Unconditional once called. Removing an id twice is a harmless no-op.
/// Text-based fallbacks never strip markup tagged with another annotation's
/// id.
pub fn remove_highlight(
    store: &mut AnnotationStore,
    view: &mut LiveView,
    id: &AnnotationId,
    fallback_text: Option<&str>,
) -> Removal {
    let view_text = view.unwrap_highlight(id);
    let view_unwrapped = view_text.is_some();

    let content = store.content();
    let claimed = store.other_ids(id);
    let (rewritten, content_match) = if let Some(span) = find_by_id(content, id) {
        (Some(strip(content, &span)), ContentMatch::Id)
    } else if let Some(span) = view_text
        .as_deref()
        .and_then(|text| find_by_text(content, text, &claimed))
    {
        (Some(strip(content, &span)), ContentMatch::ViewText)
    } else if let Some(span) = fallback_text.and_then(|text| find_by_text(content, text, &claimed))
    {
        (Some(strip(content, &span)), ContentMatch::FallbackText)
    } else {
        (None, ContentMatch::Miss)
    };

    match rewritten {
        Some(next) => store.replace_content(next),
        None => log::warn!(
            "{}",
            AnnotateError::ContentMatchMiss(format!("no markup for highlight {id} in content"))
        ),
    }

    let removed = store.remove(id);
    log::debug!(
        "removed highlight {id}: listed={} view={view_unwrapped} content={content_match:?}",
        removed.is_some()
    );
    Removal {
        removed,
        view_unwrapped,
        content_match,
    }
}
