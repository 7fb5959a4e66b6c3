//! Shared helpers for the integration tests

use mdmark_engine::markup::mark_spans;
use mdmark_engine::{ComrakRenderer, SequentialIds, Session};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::PathBuf;

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name)).expect("fixture to exist")
}

/// Session with deterministic ids, loaded with `markdown`
pub fn session_with(markdown: &str) -> Session {
    let mut session = Session::new(
        Box::new(ComrakRenderer::default()),
        Box::new(SequentialIds::with_prefix("t")),
    );
    session.load_str(markdown);
    session
}

/// (text, color, comment) of every highlight in a content string
pub fn highlight_tuples(content: &str) -> Vec<(String, String, String)> {
    mark_spans(content)
        .iter()
        .filter_map(|span| span.element(content))
        .map(|el| (el.text(), el.color().to_string(), el.comment()))
        .collect()
}

/// Replace every highlight id with a fixed placeholder
pub fn without_ids(html: &str) -> String {
    static ID_REGEX: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r#"data-highlight-id="[^"]*""#).expect("valid regex for highlight ids")
    });
    ID_REGEX
        .replace_all(html, "data-highlight-id=\"*\"")
        .into_owned()
}
