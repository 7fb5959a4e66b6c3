//! Creating highlights from a selection in the live view

use crate::annotation::{Annotation, HighlightColor};
use crate::error::AnnotateError;
use crate::ids::IdGenerator;
use crate::selection::TextSelection;
use crate::store::AnnotationStore;
use crate::view::{create_highlight_element, LiveView};
use chrono::Utc;

/// Wrap `selection` in a new highlight and append its record to the store.
///
/// Only the live view changes; the content string picks the highlight up on
/// export. On [`AnnotateError::SelectionWrapFailure`] neither the view nor
/// the store is touched.
pub fn create_highlight(
    store: &mut AnnotationStore,
    view: &mut LiveView,
    selection: TextSelection,
    color: HighlightColor,
    ids: &mut dyn IdGenerator,
) -> Result<Annotation, AnnotateError> {
    let text = view.selected_text(selection).ok_or_else(|| {
        AnnotateError::SelectionWrapFailure(format!(
            "selection {}..{} is outside the document",
            selection.start(), selection.end()
        ))
    })?;

    let id = ids.next_id();
    let element = create_highlight_element(&color, &id);
    let range = view.surround(selection, element)?;

    let annotation = Annotation {
        id,
        text,
        created_at: Utc::now(),
        start_offset: range.start_offset,
        end_offset: range.end_offset,
        color,
        comment: String::new(),
    };
    log::debug!("created highlight {} over {:?}", annotation.id, annotation.text);
    store.push(annotation.clone());
    Ok(annotation)
}
