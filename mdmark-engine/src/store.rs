//! Annotation store: the ordered highlight list and the content string

use crate::annotation::{Annotation, AnnotationId};

/// Process-local document state.
///
/// The list keeps insertion order. The content string is only ever replaced
/// as a whole.
#[derive(Debug, Clone, Default)]
pub struct AnnotationStore {
    annotations: Vec<Annotation>,
    content: String,
}

impl AnnotationStore {
    pub fn new(content: impl Into<String>, annotations: Vec<Annotation>) -> Self {
        Self {
            annotations,
            content: content.into(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn replace_content(&mut self, content: String) {
        self.content = content;
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    pub fn get(&self, id: &AnnotationId) -> Option<&Annotation> {
        self.annotations.iter().find(|a| &a.id == id)
    }

    pub fn contains(&self, id: &AnnotationId) -> bool {
        self.get(id).is_some()
    }

    /// Append at the end of the list
    pub fn push(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }

    pub fn remove(&mut self, id: &AnnotationId) -> Option<Annotation> {
        let index = self.annotations.iter().position(|a| &a.id == id)?;
        Some(self.annotations.remove(index))
    }

    /// Update a comment in place. Returns `false` for unknown ids.
    pub fn set_comment(&mut self, id: &AnnotationId, comment: &str) -> bool {
        match self.annotations.iter_mut().find(|a| &a.id == id) {
            Some(annotation) => {
                annotation.comment = comment.to_string();
                true
            }
            None => false,
        }
    }

    /// Drop every annotation and the content string
    pub fn clear(&mut self) {
        self.annotations.clear();
        self.content.clear();
    }

    /// Ids of every annotation except `id`
    pub fn other_ids(&self, id: &AnnotationId) -> Vec<&AnnotationId> {
        self.annotations
            .iter()
            .map(|a| &a.id)
            .filter(|other| *other != id)
            .collect()
    }
}
