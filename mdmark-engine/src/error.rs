//! Error types for annotation operations

use std::fmt;

/// Errors that can occur while loading, annotating or exporting a document.
///
/// None of these are fatal: each one leaves the affected artifact untouched and
/// the caller may simply retry.
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotateError {
    /// The selection cannot be legally wrapped in a highlight element
    SelectionWrapFailure(String),
    /// Removal or export could not locate the target markup in the content string
    ContentMatchMiss(String),
    /// Reading an input file failed
    FileReadFailure(String),
    /// The rendered view could not be built from markup
    ParseError(String),
    /// The rendered view could not be serialized back to markup
    SerializationError(String),
}

impl fmt::Display for AnnotateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotateError::SelectionWrapFailure(msg) => {
                write!(f, "Failed to highlight selection: {msg}")
            }
            AnnotateError::ContentMatchMiss(msg) => write!(f, "No matching markup: {msg}"),
            AnnotateError::FileReadFailure(msg) => write!(f, "Failed to read file: {msg}"),
            AnnotateError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            AnnotateError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
        }
    }
}

impl std::error::Error for AnnotateError {}
