//! Session: the state a viewer page holds while a document is open
//!
//! A [`Session`] owns the store, the live view and the collaborators (renderer
//! and id generator), and routes user actions to the core components. The
//! components themselves never reach for this state; they receive exactly the
//! pieces they mutate.

use crate::annotation::{Annotation, AnnotationId, HighlightColor};
use crate::error::AnnotateError;
use crate::export::{serialize_content, ExportArtifact};
use crate::extract::extract_annotations;
use crate::highlight::create_highlight;
use crate::ids::{IdGenerator, UuidIds};
use crate::remove::{remove_highlight, Removal};
use crate::render::{ComrakRenderer, Renderer};
use crate::selection::{Rect, TextSelection, ToolbarState};
use crate::store::AnnotationStore;
use crate::view::LiveView;
use std::fs;
use std::path::Path;

/// Document shown before anything is loaded
pub const WELCOME_DOCUMENT: &str = include_str!("../defaults/welcome.md");

pub struct Session {
    store: AnnotationStore,
    view: LiveView,
    renderer: Box<dyn Renderer>,
    ids: Box<dyn IdGenerator>,
    selection: Option<TextSelection>,
    toolbar: ToolbarState,
}

impl Session {
    /// Start a session showing [`WELCOME_DOCUMENT`]
    pub fn new(renderer: Box<dyn Renderer>, ids: Box<dyn IdGenerator>) -> Self {
        Self::with_document(renderer, ids, WELCOME_DOCUMENT)
    }

    /// Start a session showing `markdown`
    pub fn with_document(
        renderer: Box<dyn Renderer>,
        ids: Box<dyn IdGenerator>,
        markdown: &str,
    ) -> Self {
        let mut session = Self {
            store: AnnotationStore::default(),
            view: LiveView::parse(""),
            renderer,
            ids,
            selection: None,
            toolbar: ToolbarState::hidden(),
        };
        session.load_str(markdown);
        session
    }

    /// Replace the document, recovering any highlights it already contains
    pub fn load_str(&mut self, text: &str) {
        let extraction = extract_annotations(text, self.ids.as_mut());
        self.view = LiveView::parse(&self.renderer.render(&extraction.content));
        self.store = AnnotationStore::new(extraction.content, extraction.annotations);
        self.clear_selection();
        log::debug!("loaded document with {} highlight(s)", self.store.len());
    }

    /// Load a UTF-8 file. On failure the current document stays as it was.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<(), AnnotateError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            AnnotateError::FileReadFailure(format!("'{}': {e}", path.display()))
        })?;
        self.load_str(&text);
        Ok(())
    }

    /// Close the document, leaving an empty view and no highlights
    pub fn close(&mut self) {
        self.store.clear();
        self.view = LiveView::parse("");
        self.clear_selection();
    }

    /// Track the user's selection; a collapsed one hides the toolbar
    pub fn select(&mut self, selection: TextSelection, bounds: Rect) {
        if selection.is_collapsed() {
            self.clear_selection();
            return;
        }
        self.selection = Some(selection);
        self.toolbar = ToolbarState::above(bounds);
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
        self.toolbar = ToolbarState::hidden();
    }

    /// Highlight the current selection.
    ///
    /// The selection and toolbar are cleared whether or not wrapping succeeds.
    pub fn highlight(&mut self, color: HighlightColor) -> Result<Annotation, AnnotateError> {
        let selection = self.selection.take();
        self.toolbar = ToolbarState::hidden();
        let selection = selection.ok_or_else(|| {
            AnnotateError::SelectionWrapFailure("nothing is selected".to_string())
        })?;

        create_highlight(
            &mut self.store,
            &mut self.view,
            selection,
            color,
            self.ids.as_mut(),
        )
        .inspect_err(|e| log::warn!("{e}"))
    }

    /// Set or clear a comment on the record and its element in the view
    pub fn set_comment(&mut self, id: &AnnotationId, comment: &str) -> bool {
        if let Some(element) = self.view.highlight(id) {
            element.set_comment(comment);
        }
        self.store.set_comment(id, comment)
    }

    /// Delete a highlight. Callers confirm with the user before calling.
    pub fn remove(&mut self, id: &AnnotationId, fallback_text: Option<&str>) -> Removal {
        remove_highlight(&mut self.store, &mut self.view, id, fallback_text)
    }

    pub fn export(&self) -> ExportArtifact {
        serialize_content(self.store.content(), &self.view)
    }

    pub fn annotations(&self) -> &[Annotation] {
        self.store.annotations()
    }

    pub fn content(&self) -> &str {
        self.store.content()
    }

    pub fn view(&self) -> &LiveView {
        &self.view
    }

    pub fn selection(&self) -> Option<TextSelection> {
        self.selection
    }

    pub fn toolbar(&self) -> ToolbarState {
        self.toolbar
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Box::new(ComrakRenderer::default()), Box::new(UuidIds))
    }
}
