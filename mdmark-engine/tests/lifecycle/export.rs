use crate::common::{fixture, fixture_path, highlight_tuples, session_with};
use mdmark_engine::{AnnotateError, HighlightColor, Rect, EXPORT_FILENAME};

fn bounds() -> Rect {
    Rect {
        top: 200.0,
        left: 40.0,
        width: 100.0,
        height: 18.0,
    }
}

#[test]
fn export_round_trips_loaded_highlights() {
    let source = fixture("annotated.md");
    let session = session_with(&source);
    let artifact = session.export();

    assert_eq!(highlight_tuples(&artifact.markdown), highlight_tuples(&source));
    assert!(!artifact.markdown.contains("data-highlight-id"));
    assert!(artifact.misses.is_empty());
}

#[test]
fn export_writes_canonical_markup_only() {
    let source = fixture("annotated.md");
    let artifact = session_with(&source).export();

    // Palette display colors are stored as their overlay value
    let expected = source.replace("#A6CCF5", "rgba(147, 197, 253, 0.5)");
    assert_eq!(artifact.markdown, expected);
}

#[test]
fn export_leaves_session_content_alone() {
    let session = session_with(&fixture("annotated.md"));
    let before = session.content().to_string();
    let _ = session.export();
    let _ = session.export();
    assert_eq!(session.content(), before);
    assert_eq!(session.annotations().len(), 3);
}

#[test]
fn edited_comment_is_exported() {
    let mut session = session_with(&fixture("annotated.md"));
    let id = session.annotations()[1].id.clone();
    assert!(session.set_comment(&id, "add mulch"));

    let artifact = session.export();
    assert!(artifact.markdown.contains(
        "<mark style=\"background-color: rgba(163, 230, 53, 0.5)\" data-comment=\"add mulch\">raised beds</mark>"
    ));
}

#[test]
fn session_highlight_is_exported() {
    let mut session = session_with(&fixture("annotated.md"));
    let selection = session.view().find_text("Tomatoes pulled", 0).unwrap();
    session.select(selection, bounds());
    session.highlight(HighlightColor::from_css("blue")).unwrap();

    let artifact = session.export();
    assert!(artifact.markdown.contains(
        "- <mark style=\"background-color: rgba(147, 197, 253, 0.5)\">Tomatoes pulled</mark>"
    ));
    assert_eq!(highlight_tuples(&artifact.markdown).len(), 4);
}

#[test]
fn removed_highlight_is_not_exported() {
    let mut session = session_with(&fixture("annotated.md"));
    let id = session.annotations()[0].id.clone();
    session.remove(&id, None);

    let artifact = session.export();
    let texts: Vec<_> = highlight_tuples(&artifact.markdown)
        .into_iter()
        .map(|(text, _, _)| text)
        .collect();
    assert_eq!(texts, ["raised beds", "leeks"]);
    assert!(artifact.markdown.contains("The first frost arrived early"));
}

#[test]
fn export_artifact_lands_in_directory() {
    let dir = tempfile::tempdir().unwrap();
    let artifact = session_with(&fixture("annotated.md")).export();
    let path = artifact.write_to(dir.path()).unwrap();

    assert_eq!(path, dir.path().join(EXPORT_FILENAME));
    assert_eq!(std::fs::read_to_string(path).unwrap(), artifact.markdown);
}

#[test]
fn failed_load_keeps_current_document() {
    let mut session = session_with(&fixture("annotated.md"));
    let dir = tempfile::tempdir().unwrap();

    let err = session.load_file(dir.path().join("missing.md")).unwrap_err();

    assert!(matches!(err, AnnotateError::FileReadFailure(_)));
    assert_eq!(session.annotations().len(), 3);
    assert!(session.content().contains("Field notes"));
}

#[test]
fn loading_a_file_assigns_fresh_ids() {
    let mut session = session_with("");
    session.load_file(fixture_path("annotated.md")).unwrap();
    let first: Vec<_> = session.annotations().iter().map(|a| a.id.clone()).collect();

    session.load_file(fixture_path("annotated.md")).unwrap();
    let second: Vec<_> = session.annotations().iter().map(|a| a.id.clone()).collect();

    assert_eq!(first.len(), 3);
    assert!(first.iter().all(|id| !second.contains(id)));
}

#[test]
fn nested_highlights_round_trip() {
    let source = "a <mark style=\"background-color: red\">x <mark style=\"background-color: blue\">y</mark></mark> b\n";
    let session = session_with(source);
    let artifact = session.export();

    assert!(artifact.misses.is_empty());
    assert_eq!(highlight_tuples(&artifact.markdown), highlight_tuples(source));
    assert_eq!(
        artifact.markdown,
        "a <mark style=\"background-color: rgba(253, 164, 175, 0.5)\">x <mark style=\"background-color: rgba(147, 197, 253, 0.5)\">y</mark></mark> b\n"
    );
}

#[test]
fn code_keeps_its_literal_markup_on_export() {
    let indented = "para\n\n    <mark>x</mark>\n";
    let artifact = session_with(indented).export();
    assert_eq!(artifact.markdown, indented);
    assert!(artifact.misses.is_empty());

    let inline = "```a``` then <mark>x</mark>\n";
    let artifact = session_with(inline).export();
    assert_eq!(
        artifact.markdown,
        "```a``` then <mark style=\"background-color: rgba(255, 249, 177, 0.5)\">x</mark>\n"
    );
}
