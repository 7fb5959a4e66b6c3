use crate::common::{fixture, session_with};
use mdmark_engine::markup::{find_by_id, mark_spans};
use mdmark_engine::remove::ContentMatch;
use mdmark_engine::{HighlightColor, Rect};

fn bounds() -> Rect {
    Rect {
        top: 40.0,
        left: 0.0,
        width: 30.0,
        height: 12.0,
    }
}

#[test]
fn removal_drops_record_element_and_markup() {
    let mut session = session_with(&fixture("annotated.md"));
    let target = session.annotations()[1].clone();
    assert_eq!(target.text, "raised beds");

    let removal = session.remove(&target.id, None);

    assert_eq!(removal.removed.as_ref(), Some(&target));
    assert!(removal.view_unwrapped);
    assert_eq!(removal.content_match, ContentMatch::Id);
    assert_eq!(session.annotations().len(), 2);
    assert!(session.view().highlight(&target.id).is_none());
    assert!(find_by_id(session.content(), &target.id).is_none());
    assert!(session.content().contains("raised beds"));
    assert!(session.view().text_content().contains("raised beds"));
}

#[test]
fn removing_twice_is_harmless() {
    let mut session = session_with(&fixture("annotated.md"));
    let id = session.annotations()[0].id.clone();

    session.remove(&id, None);
    let content = session.content().to_string();
    let second = session.remove(&id, Some("first frost"));

    assert!(second.removed.is_none());
    assert!(!second.view_unwrapped);
    assert_eq!(second.content_match, ContentMatch::Miss);
    assert_eq!(session.content(), content);
    assert_eq!(session.annotations().len(), 2);
}

#[test]
fn removing_second_of_duplicate_loaded_highlights_keeps_first() {
    let mut session = session_with("<mark>foo</mark> and <mark>foo</mark>\n");
    let first = session.annotations()[0].id.clone();
    let second = session.annotations()[1].id.clone();

    let removal = session.remove(&second, None);

    assert_eq!(removal.content_match, ContentMatch::Id);
    assert!(session.view().highlight(&first).is_some());
    assert!(session.view().highlight(&second).is_none());
    let spans = mark_spans(session.content());
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].id(session.content()), Some(first.as_str()));
    assert!(session.content().ends_with(" and foo\n"));
}

#[test]
fn removing_session_duplicate_leaves_loaded_markup_alone() {
    let mut session = session_with("<mark>foo</mark> and foo\n");
    let loaded = session.annotations()[0].id.clone();

    let selection = session.view().find_text("foo", 1).unwrap();
    session.select(selection, bounds());
    let created = session.highlight(HighlightColor::default()).unwrap();
    let content = session.content().to_string();

    let removal = session.remove(&created.id, Some("foo"));

    assert!(removal.view_unwrapped);
    assert_eq!(removal.content_match, ContentMatch::Miss);
    assert_eq!(session.content(), content);
    assert!(find_by_id(session.content(), &loaded).is_some());
    assert_eq!(session.view().highlights().len(), 1);
    assert!(session.view().highlight(&loaded).is_some());
    assert_eq!(session.annotations().len(), 1);
}
