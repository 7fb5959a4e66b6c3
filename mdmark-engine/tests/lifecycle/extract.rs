use crate::common::{fixture, session_with};
use mdmark_engine::extract::extract_annotations;
use mdmark_engine::{SequentialIds, UuidIds};
use std::collections::HashSet;

#[test]
fn extracts_every_highlight_with_unique_ids() {
    let source = fixture("annotated.md");
    let extraction = extract_annotations(&source, &mut UuidIds);

    let texts: Vec<_> = extraction.annotations.iter().map(|a| a.text.as_str()).collect();
    assert_eq!(texts, ["first frost", "raised beds", "leeks"]);

    let ids: HashSet<_> = extraction.annotations.iter().map(|a| &a.id).collect();
    assert_eq!(ids.len(), 3);
    for id in ids {
        assert!(extraction
            .content
            .contains(&format!("data-highlight-id=\"{id}\"")));
    }
}

#[test]
fn reads_colors_and_comments() {
    let extraction = extract_annotations(&fixture("annotated.md"), &mut UuidIds);
    let [frost, beds, leeks] = extraction.annotations.as_slice() else {
        panic!("expected three annotations");
    };

    assert_eq!(frost.color.as_str(), "rgba(253, 164, 175, 0.5)");
    assert_eq!(frost.comment, "check the date");
    assert_eq!(beds.color.as_str(), "rgba(163, 230, 53, 0.5)");
    assert!(beds.comment.is_empty());
    // Palette display colors normalize to their overlay
    assert_eq!(leeks.color.as_str(), "rgba(147, 197, 253, 0.5)");
}

#[test]
fn re_extraction_finds_the_same_number_of_highlights() {
    let source = fixture("annotated.md");
    let first = extract_annotations(&source, &mut SequentialIds::with_prefix("a"));
    let second = extract_annotations(&first.content, &mut SequentialIds::with_prefix("b"));

    assert_eq!(first.annotations.len(), second.annotations.len());
    for (a, b) in first.annotations.iter().zip(&second.annotations) {
        assert_ne!(a.id, b.id);
        assert_eq!(a.text, b.text);
    }
    assert!(!second.content.contains("\"a-"));
}

#[test]
fn leaves_code_and_markdown_untouched() {
    let source = fixture("annotated.md");
    let extraction = extract_annotations(&source, &mut SequentialIds::new());
    assert!(extraction
        .content
        .contains("> Keep `<mark>` tags out of code; they stay literal."));
    assert!(extraction.content.starts_with("# Field notes\n"));
    assert!(extraction.content.ends_with("leeks</mark> |\n"));
}

#[test]
fn scenario_comment_and_rgba_color() {
    let input =
        "<mark data-comment=\"note\" style=\"background-color: rgba(255,249,177,0.5)\">hello</mark> world";
    let extraction = extract_annotations(input, &mut SequentialIds::new());

    assert_eq!(extraction.annotations.len(), 1);
    let hello = &extraction.annotations[0];
    assert_eq!(hello.text, "hello");
    assert_eq!(hello.color.as_str(), "rgba(255,249,177,0.5)");
    assert_eq!(hello.comment, "note");
    assert!(extraction
        .content
        .contains(&format!("data-highlight-id=\"{}\">hello</mark> world", hello.id)));
}

#[test]
fn inline_triple_backticks_leave_later_highlights_alone() {
    let session = session_with("```a``` then <mark>x</mark>\n");

    assert_eq!(session.annotations().len(), 1);
    assert_eq!(session.annotations()[0].text, "x");
    assert_eq!(session.view().highlights().len(), 1);
}

#[test]
fn indented_code_is_never_extracted() {
    let source = "para\n\n    <mark>x</mark>\n";
    let session = session_with(source);

    assert!(session.annotations().is_empty());
    assert!(session.view().highlights().is_empty());
    assert_eq!(session.content(), source);
}

#[test]
fn nested_highlights_are_both_extracted() {
    let session = session_with(
        "a <mark style=\"background-color: red\">x <mark style=\"background-color: blue\">y</mark></mark> b",
    );
    let texts: Vec<_> = session.annotations().iter().map(|a| a.text.as_str()).collect();
    assert_eq!(texts, ["x y", "y"]);
}
