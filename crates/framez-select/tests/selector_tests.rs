//! Tests for selector parsing and tree-order lookup.

use framez_dom::{AttributesMap, DomTree, ElementData, NodeId, NodeType};
use framez_select::{
    Combinator, Selector, SimpleSelector, parse_selector, query_selector, query_selector_all,
};

/// Helper to create an element with attributes and append it to a parent.
fn append_element(tree: &mut DomTree, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
    let attrs: AttributesMap = attrs
        .iter()
        .map(|&(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let id = tree.alloc(NodeType::Element(ElementData {
        tag_name: tag.to_string(),
        attrs,
    }));
    tree.append_child(parent, id);
    id
}

/// Build `<html><body><div id="main" class="row"><p>..</p></div><p>..</p></body></html>`.
fn sample_tree() -> (DomTree, NodeId, NodeId, NodeId) {
    let mut tree = DomTree::new();
    let html = append_element(&mut tree, NodeId::ROOT, "html", &[]);
    let body = append_element(&mut tree, html, "body", &[]);
    let div = append_element(&mut tree, body, "div", &[("id", "main"), ("class", "row")]);
    let inner_p = append_element(&mut tree, div, "p", &[]);
    let outer_p = append_element(&mut tree, body, "p", &[]);
    (tree, div, inner_p, outer_p)
}

// ========== parsing ==========

#[test]
fn test_parse_id_selector() {
    let sel = parse_selector("#target").unwrap();
    assert_eq!(
        sel.subject.simple_selectors,
        vec![SimpleSelector::Id("target".to_string())]
    );
    assert!(sel.combinators.is_empty());
}

#[test]
fn test_parse_compound_selector() {
    let sel = parse_selector("div.row#main").unwrap();
    assert_eq!(
        sel.subject.simple_selectors,
        vec![
            SimpleSelector::Type("div".to_string()),
            SimpleSelector::Class("row".to_string()),
            SimpleSelector::Id("main".to_string()),
        ]
    );
}

#[test]
fn test_parse_descendant_and_child_combinators() {
    let sel = parse_selector("div > ul li").unwrap();
    assert_eq!(
        sel.subject.simple_selectors,
        vec![SimpleSelector::Type("li".to_string())]
    );
    // Right-to-left: li's ancestor ul, ul's parent div
    assert_eq!(sel.combinators.len(), 2);
    assert_eq!(sel.combinators[0].0, Combinator::Descendant);
    assert_eq!(sel.combinators[1].0, Combinator::Child);
}

#[test]
fn test_parse_glued_child_combinator() {
    let sel = parse_selector("div>p>span").unwrap();
    assert_eq!(sel.combinators.len(), 2);
    assert!(sel.combinators.iter().all(|(c, _)| *c == Combinator::Child));
}

#[test]
fn test_parse_rejects_unsupported_syntax() {
    assert_eq!(parse_selector(""), None);
    assert_eq!(parse_selector("   "), None);
    assert_eq!(parse_selector("#"), None);
    assert_eq!(parse_selector("> div"), None);
    assert_eq!(parse_selector("div >"), None);
    assert_eq!(parse_selector("a >> b"), None);
    assert_eq!(parse_selector("[href]"), None);
    assert_eq!(parse_selector("p:first-child"), None);
    assert_eq!(parse_selector("#1leading-digit"), None);
}

// ========== matching ==========

#[test]
fn test_matches_id() {
    let (tree, div, _, _) = sample_tree();
    let sel = parse_selector("#main").unwrap();
    assert!(sel.matches(&tree, div));
}

#[test]
fn test_matches_compound_requires_all() {
    let (tree, div, _, _) = sample_tree();
    assert!(parse_selector("div.row").unwrap().matches(&tree, div));
    assert!(!parse_selector("div.other").unwrap().matches(&tree, div));
    assert!(!parse_selector("span.row").unwrap().matches(&tree, div));
}

#[test]
fn test_matches_child_combinator() {
    let (tree, _, inner_p, outer_p) = sample_tree();
    let sel = parse_selector("div > p").unwrap();
    assert!(sel.matches(&tree, inner_p));
    assert!(!sel.matches(&tree, outer_p));
}

#[test]
fn test_matches_descendant_combinator() {
    let (tree, _, inner_p, outer_p) = sample_tree();
    let sel = parse_selector("html p").unwrap();
    assert!(sel.matches(&tree, inner_p));
    assert!(sel.matches(&tree, outer_p));

    let sel = parse_selector("div p").unwrap();
    assert!(sel.matches(&tree, inner_p));
    assert!(!sel.matches(&tree, outer_p));
}

#[test]
fn test_combinator_walk_takes_nearest_ancestor() {
    // <html><a><b><b><c> — the walk is greedy: "a > b c" binds the nearest
    // <b> ancestor of the subject, whose parent is the outer <b>, not <a>.
    // Full CSS would match via the outer <b>; see the crate docs.
    let mut tree = DomTree::new();
    let html = append_element(&mut tree, NodeId::ROOT, "html", &[]);
    let a = append_element(&mut tree, html, "a", &[]);
    let outer_b = append_element(&mut tree, a, "b", &[]);
    let inner_b = append_element(&mut tree, outer_b, "b", &[]);
    let c = append_element(&mut tree, inner_b, "c", &[]);

    assert!(!parse_selector("a > b c").unwrap().matches(&tree, c));

    // Pure descendant chains are unaffected
    assert!(parse_selector("a b c").unwrap().matches(&tree, c));
}

#[test]
fn test_matches_ignores_non_elements() {
    let mut tree = DomTree::new();
    let html = append_element(&mut tree, NodeId::ROOT, "html", &[]);
    let text = tree.alloc(NodeType::Text("hello".to_string()));
    tree.append_child(html, text);

    let sel = parse_selector("*").unwrap();
    assert!(!sel.matches(&tree, text));
}

// ========== query_selector ==========

#[test]
fn test_query_selector_first_in_tree_order() {
    let (tree, _, inner_p, _) = sample_tree();
    // Both <p> elements match; the one inside <div> comes first in tree order
    let sel = parse_selector("p").unwrap();
    assert_eq!(query_selector(&tree, NodeId::ROOT, &sel), Some(inner_p));
}

#[test]
fn test_query_selector_no_match() {
    let (tree, _, _, _) = sample_tree();
    let sel = parse_selector("#missing").unwrap();
    assert_eq!(query_selector(&tree, NodeId::ROOT, &sel), None);
}

#[test]
fn test_query_selector_scoped_to_subtree() {
    let (tree, div, inner_p, _) = sample_tree();
    let sel = parse_selector("p").unwrap();
    assert_eq!(query_selector(&tree, div, &sel), Some(inner_p));

    // The subject itself is not a descendant of the search root
    let sel_div = parse_selector("#main").unwrap();
    assert_eq!(query_selector(&tree, div, &sel_div), None);
}

#[test]
fn test_query_selector_all() {
    let (tree, _, inner_p, outer_p) = sample_tree();
    let sel = parse_selector("p").unwrap();
    assert_eq!(
        query_selector_all(&tree, NodeId::ROOT, &sel),
        vec![inner_p, outer_p]
    );
}

#[test]
fn test_selector_reexport_shape() {
    // Selector is constructible from parts for callers that build one directly
    let sel = Selector {
        subject: parse_selector("p").unwrap().subject,
        combinators: Vec::new(),
    };
    let (tree, _, inner_p, _) = sample_tree();
    assert!(sel.matches(&tree, inner_p));
}
