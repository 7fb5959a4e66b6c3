use crate::common::{session_with, without_ids};
use mdmark_engine::{AnnotateError, HighlightColor, Rect, Session, TextSelection};

fn bounds() -> Rect {
    Rect {
        top: 120.0,
        left: 10.0,
        width: 80.0,
        height: 16.0,
    }
}

#[test]
fn selecting_world_with_red_appends_last() {
    let mut session = session_with("<mark>hello</mark> world\n");
    let before = session.annotations().len();

    let selection = session.view().find_text("world", 0).unwrap();
    session.select(selection, bounds());
    assert!(session.toolbar().visible);

    let created = session.highlight(HighlightColor::from_css("red")).unwrap();

    assert_eq!(created.text, "world");
    assert_eq!(created.color.as_str(), "rgba(253, 164, 175, 0.5)");
    assert_eq!(session.annotations().len(), before + 1);
    assert_eq!(session.annotations().last(), Some(&created));

    let tagged: Vec<_> = session
        .view()
        .highlights()
        .into_iter()
        .filter(|el| el.id().as_ref() == Some(&created.id))
        .collect();
    assert_eq!(tagged.len(), 1);
    assert_eq!(tagged[0].text(), "world");

    assert!(session.selection().is_none());
    assert!(!session.toolbar().visible);
}

#[test]
fn selection_across_emphasis_boundary_is_rejected() {
    let mut session = session_with("plain *emphasis* tail\n");
    let html_before = session.view().to_html().unwrap();

    // "plain emph" starts in a text node and ends inside <em>
    session.select(TextSelection::new(0, 10), bounds());
    let err = session.highlight(HighlightColor::default()).unwrap_err();

    assert!(matches!(err, AnnotateError::SelectionWrapFailure(_)));
    assert!(session.annotations().is_empty());
    assert_eq!(session.view().to_html().unwrap(), html_before);
    assert!(!session.toolbar().visible);
}

#[test]
fn selection_enclosing_whole_emphasis_is_wrapped() {
    let mut session = session_with("plain *emphasis* tail\n");
    let selection = session.view().find_text("plain emphasis tail", 0).unwrap();
    session.select(selection, bounds());
    let created = session.highlight(HighlightColor::default()).unwrap();

    assert_eq!(created.text, "plain emphasis tail");
    let html = session.view().to_html().unwrap();
    assert!(html.contains("<em>emphasis</em> tail</mark>"));
}

#[test]
fn comments_reach_the_view_element() {
    let mut session = session_with("note this\n");
    let selection = session.view().find_text("this", 0).unwrap();
    session.select(selection, bounds());
    let created = session.highlight(HighlightColor::default()).unwrap();

    assert!(session.set_comment(&created.id, "why?"));
    assert_eq!(session.view().highlight(&created.id).unwrap().comment(), "why?");
    assert_eq!(session.annotations()[0].comment, "why?");

    assert!(session.set_comment(&created.id, ""));
    assert!(session
        .view()
        .highlight(&created.id)
        .unwrap()
        .attributes()
        .iter()
        .all(|(name, _)| name != "data-comment"));
}

#[test]
fn view_markup_after_highlighting() {
    let mut session = Session::default();
    session.load_str("Hello world\n");
    let selection = session.view().find_text("world", 0).unwrap();
    session.select(selection, bounds());
    session.highlight(HighlightColor::from_css("#FFCEE0")).unwrap();

    assert_eq!(
        without_ids(&session.view().to_html().unwrap()),
        "<p>Hello <mark style=\"background-color: rgba(253, 164, 175, 0.5)\" data-highlight-id=\"*\">world</mark></p>\n"
    );
}
