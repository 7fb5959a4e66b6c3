//! Export: syncing live-view highlights back into the markdown
//!
//! Every `<mark>` in the live view is written into the content string in its
//! canonical form (color style, optional comment, text). An element whose id
//! tags markup in the content gets a canonical open tag in place of that
//! markup's open tag; its inner markdown, nested highlights included, is kept.
//! Otherwise (the highlight was made during this session, or carries no id)
//! the first plain occurrence of its text in prose is wrapped. That fallback
//! is best effort and can pick the wrong occurrence of a repeated text.

use crate::error::AnnotateError;
use crate::markup::{
    canonical_markup, canonical_open_tag, find_by_id, find_plain_text, splice, MarkSpan,
};
use crate::view::HIGHLIGHT_TAG;
use crate::view::LiveView;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File name of every export
pub const EXPORT_FILENAME: &str = "highlighted-content.md";
/// MIME type of every export
pub const EXPORT_MIME: &str = "text/markdown";

/// Export-ready markdown
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub filename: &'static str,
    pub mime: &'static str,
    pub markdown: String,
    /// Highlights that could not be placed in the content string
    pub misses: Vec<AnnotateError>,
}

impl ExportArtifact {
    /// Write the artifact into `dir` under its fixed file name
    pub fn write_to(&self, dir: impl AsRef<Path>) -> io::Result<PathBuf> {
        let path = dir.as_ref().join(self.filename);
        fs::write(&path, &self.markdown)?;
        Ok(path)
    }
}

/// Merge the live view's highlights onto `content`
pub fn serialize_content(content: &str, view: &LiveView) -> ExportArtifact {
    let mut markdown = content.to_string();
    let mut misses = Vec::new();

    for element in view.highlights() {
        let text = element.text();
        let color = element.color();
        let comment = element.comment();

        if let Some(span) = element.id().and_then(|id| find_by_id(&markdown, &id)) {
            markdown = retag(&markdown, &span, &canonical_open_tag(&color, &comment));
            continue;
        }

        match find_plain_text(&markdown, &text) {
            Some(range) => {
                markdown = splice(&markdown, range, &canonical_markup(&color, &text, &comment))
            }
            None => {
                let miss = AnnotateError::ContentMatchMiss(format!(
                    "highlight {:?} has no place in the content",
                    text
                ));
                log::warn!("{miss}");
                misses.push(miss);
            }
        }
    }

    ExportArtifact {
        filename: EXPORT_FILENAME,
        mime: EXPORT_MIME,
        markdown,
        misses,
    }
}

/// Swap a located element's open tag, closing it if it never was
fn retag(content: &str, span: &MarkSpan, open_tag: &str) -> String {
    let closing = span.close.as_ref().map_or_else(
        || format!("</{HIGHLIGHT_TAG}>"),
        |close| content[close.clone()].to_string(),
    );
    format!(
        "{}{open_tag}{}{closing}{}",
        &content[..span.open.start],
        &content[span.inner.clone()],
        &content[span.whole().end..]
    )
}
