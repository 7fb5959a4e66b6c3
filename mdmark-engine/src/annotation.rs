//! Annotation records
//!
//! An [`Annotation`] pairs a span of highlighted text with a color and an
//! optional comment. Its [`AnnotationId`] is the only reliable link between the
//! record and the `<mark>` element that carries it in the rendered view and in
//! the content string.

use crate::palette::{default_swatch, find_swatch};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, session-unique highlight identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationId(String);

impl AnnotationId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AnnotationId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// Highlight background color, normalized at construction.
///
/// Palette ids ("red") and palette display colors ("#FFCEE0") resolve to the
/// palette overlay value. Any other CSS color is kept as written, and an empty
/// value falls back to the default overlay.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighlightColor(String);

impl HighlightColor {
    pub fn from_css(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::default();
        }
        match find_swatch(trimmed) {
            Some(swatch) => Self(swatch.overlay.to_string()),
            None => Self(trimmed.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for HighlightColor {
    fn default() -> Self {
        Self(default_swatch().overlay.to_string())
    }
}

impl fmt::Display for HighlightColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A highlight and its metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    pub id: AnnotationId,
    /// Highlighted text as it was when the highlight was created or extracted
    pub text: String,
    /// Creation time, or extraction time for highlights recovered from markup
    pub created_at: DateTime<Utc>,
    /// Positional hint only. Not an offset into the content string.
    pub start_offset: usize,
    /// Positional hint only. Not an offset into the content string.
    pub end_offset: usize,
    pub color: HighlightColor,
    #[serde(default)]
    pub comment: String,
}

impl Annotation {
    pub fn has_comment(&self) -> bool {
        !self.comment.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_keys_normalize_to_overlay() {
        assert_eq!(
            HighlightColor::from_css("red").as_str(),
            "rgba(253, 164, 175, 0.5)"
        );
        assert_eq!(
            HighlightColor::from_css(" #FFCEE0 ").as_str(),
            "rgba(253, 164, 175, 0.5)"
        );
    }

    #[test]
    fn other_colors_are_kept_verbatim() {
        assert_eq!(
            HighlightColor::from_css("rgba(255,249,177,0.5)").as_str(),
            "rgba(255,249,177,0.5)"
        );
        assert_eq!(HighlightColor::from_css("").as_str(), default_swatch().overlay);
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let annotation = Annotation {
            id: AnnotationId::new("hl-1"),
            text: "hello".to_string(),
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            start_offset: 0,
            end_offset: 5,
            color: HighlightColor::default(),
            comment: String::new(),
        };
        let json = serde_json::to_value(&annotation).unwrap();
        assert_eq!(json["id"], "hl-1");
        assert_eq!(json["endOffset"], 5);
        assert_eq!(json["color"], "rgba(255, 249, 177, 0.5)");
        assert!(json.get("createdAt").is_some());
    }
}
