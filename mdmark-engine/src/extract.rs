//! Extraction of existing highlights from loaded content
//!
//! Every `<mark>` in the input becomes an [`Annotation`] and receives a fresh
//! id, even when it already carried one: ids are never trusted across loads.
//! Only the open tags are rewritten, so the rest of the markdown comes back
//! byte for byte.

use crate::annotation::Annotation;
use crate::error::AnnotateError;
use crate::ids::IdGenerator;
use crate::markup::{mark_spans, open_tag_with_id};
use chrono::Utc;

/// Normalized content plus the highlights found in it
#[derive(Debug, Clone)]
pub struct Extraction {
    /// Input with a fresh id injected into every highlight
    pub content: String,
    pub annotations: Vec<Annotation>,
}

pub fn extract_annotations(input: &str, ids: &mut dyn IdGenerator) -> Extraction {
    let extracted_at = Utc::now();
    let mut content = String::with_capacity(input.len());
    let mut annotations = Vec::new();
    let mut cursor = 0;

    for span in mark_spans(input) {
        let Some(element) = span.element(input) else {
            log::warn!(
                "{}",
                AnnotateError::ParseError(format!(
                    "skipping unreadable highlight at byte {}",
                    span.open.start
                ))
            );
            continue;
        };
        let text = element.text();
        let id = ids.next_id();

        content.push_str(&input[cursor..span.open.start]);
        content.push_str(&open_tag_with_id(&element.attributes(), &id));
        cursor = span.open.end;

        annotations.push(Annotation {
            id,
            end_offset: text.chars().count(),
            start_offset: 0,
            text,
            created_at: extracted_at,
            color: element.color(),
            comment: element.comment(),
        });
    }
    content.push_str(&input[cursor..]);

    log::debug!("extracted {} highlight(s)", annotations.len());
    Extraction {
        content,
        annotations,
    }
}
