use scrollspy::{find_element, query_all, Element, Selector, SelectorError};

fn doc() -> Element {
    Element::box_()
        .id("doc")
        .class("page")
        .child(
            Element::box_()
                .id("intro")
                .class("section")
                .child(Element::text("Introduction").id("intro-title").class("title")),
        )
        .child(
            Element::box_()
                .id("body")
                .class("section")
                .class("wide")
                .child(Element::text("Body").id("body-title").class("title")),
        )
}

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn test_parse_rejects_empty_input() {
    assert_eq!(Selector::parse(""), Err(SelectorError::Empty));
    assert_eq!(Selector::parse("   "), Err(SelectorError::Empty));
}

#[test]
fn test_parse_rejects_empty_list_entry() {
    assert_eq!(Selector::parse(".a,,.b"), Err(SelectorError::EmptyPart));
    assert_eq!(Selector::parse(".a,"), Err(SelectorError::EmptyPart));
}

#[test]
fn test_parse_rejects_dangling_prefix() {
    assert_eq!(Selector::parse("."), Err(SelectorError::MissingName('.')));
    assert_eq!(Selector::parse("#"), Err(SelectorError::MissingName('#')));
    assert_eq!(Selector::parse("box."), Err(SelectorError::MissingName('.')));
}

#[test]
fn test_parse_rejects_unsupported_syntax() {
    // Combinators and attribute selectors are out of scope.
    assert_eq!(
        Selector::parse(".a > .b"),
        Err(SelectorError::InvalidChar(' '))
    );
    assert_eq!(
        Selector::parse("box[title]"),
        Err(SelectorError::InvalidChar('['))
    );
}

// ============================================================================
// Matching
// ============================================================================

#[test]
fn test_class_selector_matches() {
    let selector = Selector::parse(".section").unwrap();
    let tree = doc();

    assert_eq!(query_all(&tree, &selector), vec!["intro", "body"]);
}

#[test]
fn test_id_selector_matches_single_element() {
    let selector = Selector::parse("#body-title").unwrap();
    assert_eq!(query_all(&doc(), &selector), vec!["body-title"]);
}

#[test]
fn test_tag_and_compound_selectors() {
    let tree = doc();

    let texts = Selector::parse("text").unwrap();
    assert_eq!(query_all(&tree, &texts), vec!["intro-title", "body-title"]);

    // Compound: every part must hold.
    let wide = Selector::parse("box.section.wide").unwrap();
    assert_eq!(query_all(&tree, &wide), vec!["body"]);

    let mismatch = Selector::parse("text.section").unwrap();
    assert!(query_all(&tree, &mismatch).is_empty());
}

#[test]
fn test_universal_selector_matches_everything() {
    let selector = Selector::parse("*").unwrap();
    assert_eq!(query_all(&doc(), &selector).len(), 5);
}

#[test]
fn test_selector_list_unions_matches_in_tree_order() {
    let selector = Selector::parse("#intro, .title").unwrap();
    assert_eq!(
        query_all(&doc(), &selector),
        vec!["intro", "intro-title", "body-title"]
    );
}

#[test]
fn test_root_participates_in_matching() {
    let selector = Selector::parse(".page").unwrap();
    assert_eq!(query_all(&doc(), &selector), vec!["doc"]);
}

#[test]
fn test_query_results_resolve_to_elements() {
    let tree = doc();
    let selector = Selector::parse(".title").unwrap();

    for id in query_all(&tree, &selector) {
        let element = find_element(&tree, &id).unwrap();
        assert_eq!(element.tag, "text");
        assert!(element.has_class("title"));
    }
}
