//! Tests for DOM tree mutation methods: remove_child, insert_before,
//! move_children, detach, replace_with, and cross-tree adoption.

use framez_dom::{DomTree, ElementData, NodeId, NodeType};

/// Helper to create an element node and return its NodeId.
fn alloc_element(tree: &mut DomTree, tag: &str) -> NodeId {
    tree.alloc(NodeType::Element(ElementData::new(tag)))
}

// ========== remove_child ==========

#[test]
fn test_remove_child_single_child() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let child = alloc_element(&mut tree, "p");
    tree.append_child(parent, child);

    assert_eq!(tree.children(parent).len(), 1);

    tree.remove_child(parent, child);

    assert_eq!(tree.children(parent).len(), 0);
    assert_eq!(tree.parent(child), None);
    assert_eq!(tree.prev_sibling(child), None);
    assert_eq!(tree.next_sibling(child), None);

    // The detached node keeps its arena slot
    assert!(!tree.is_empty());
    assert_eq!(tree.len(), 3);
}

#[test]
fn test_remove_child_middle_of_three() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let a = alloc_element(&mut tree, "a");
    let b = alloc_element(&mut tree, "b");
    let c = alloc_element(&mut tree, "c");
    tree.append_child(parent, a);
    tree.append_child(parent, b);
    tree.append_child(parent, c);

    tree.remove_child(parent, b);

    // a and c are siblings now
    assert_eq!(tree.children(parent), &[a, c]);
    assert_eq!(tree.next_sibling(a), Some(c));
    assert_eq!(tree.prev_sibling(c), Some(a));
}

#[test]
fn test_remove_child_keeps_subtree() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let child = alloc_element(&mut tree, "ul");
    let grandchild = alloc_element(&mut tree, "li");
    tree.append_child(parent, child);
    tree.append_child(child, grandchild);

    tree.remove_child(parent, child);

    // The detached node still owns its own children
    assert_eq!(tree.children(child), &[grandchild]);
    assert_eq!(tree.parent(grandchild), Some(child));
}

// ========== insert_before ==========

#[test]
fn test_insert_before_first_child() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let existing = alloc_element(&mut tree, "b");
    tree.append_child(parent, existing);

    let new_child = alloc_element(&mut tree, "a");
    tree.insert_before(parent, new_child, existing);

    // new_child should be first, existing second
    assert_eq!(tree.children(parent), &[new_child, existing]);
    assert_eq!(tree.first_child(parent), Some(new_child));
    assert_eq!(tree.parent(new_child), Some(parent));
    assert_eq!(tree.next_sibling(new_child), Some(existing));
    assert_eq!(tree.prev_sibling(new_child), None);
    assert_eq!(tree.prev_sibling(existing), Some(new_child));
}

#[test]
fn test_insert_before_middle() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let a = alloc_element(&mut tree, "a");
    let c = alloc_element(&mut tree, "c");
    tree.append_child(parent, a);
    tree.append_child(parent, c);

    let b = alloc_element(&mut tree, "b");
    tree.insert_before(parent, b, c);

    assert_eq!(tree.children(parent), &[a, b, c]);
    assert_eq!(tree.next_sibling(a), Some(b));
    assert_eq!(tree.prev_sibling(b), Some(a));
    assert_eq!(tree.next_sibling(b), Some(c));
    assert_eq!(tree.prev_sibling(c), Some(b));
}

// ========== move_children ==========

#[test]
fn test_move_children_basic() {
    let mut tree = DomTree::new();
    let from = alloc_element(&mut tree, "div");
    let to = alloc_element(&mut tree, "span");
    tree.append_child(NodeId::ROOT, from);
    tree.append_child(NodeId::ROOT, to);

    let a = alloc_element(&mut tree, "a");
    let b = alloc_element(&mut tree, "b");
    tree.append_child(from, a);
    tree.append_child(from, b);

    tree.move_children(from, to);

    // from should be empty
    assert_eq!(tree.children(from).len(), 0);
    // to should have both children
    assert_eq!(tree.children(to), &[a, b]);
    assert_eq!(tree.parent(a), Some(to));
    assert_eq!(tree.parent(b), Some(to));
}

#[test]
fn test_move_children_appends_to_existing() {
    let mut tree = DomTree::new();
    let from = alloc_element(&mut tree, "div");
    let to = alloc_element(&mut tree, "span");
    tree.append_child(NodeId::ROOT, from);
    tree.append_child(NodeId::ROOT, to);

    let existing = alloc_element(&mut tree, "x");
    tree.append_child(to, existing);

    let moved = alloc_element(&mut tree, "y");
    tree.append_child(from, moved);

    tree.move_children(from, to);

    assert_eq!(tree.children(to), &[existing, moved]);
    // Sibling links between existing and moved
    assert_eq!(tree.next_sibling(existing), Some(moved));
    assert_eq!(tree.prev_sibling(moved), Some(existing));
}

// ========== detach ==========

#[test]
fn test_detach_is_noop_without_parent() {
    let mut tree = DomTree::new();
    let orphan = alloc_element(&mut tree, "div");

    tree.detach(orphan);

    assert_eq!(tree.parent(orphan), None);
}

#[test]
fn test_detach_removes_from_parent() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);
    let child = alloc_element(&mut tree, "p");
    tree.append_child(parent, child);

    tree.detach(child);

    assert_eq!(tree.children(parent).len(), 0);
    assert_eq!(tree.parent(child), None);
}

// ========== replace_with ==========

#[test]
fn test_replace_with_two_nodes_preserves_order() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let before = alloc_element(&mut tree, "x");
    let target = alloc_element(&mut tree, "old");
    let after = alloc_element(&mut tree, "y");
    tree.append_child(parent, before);
    tree.append_child(parent, target);
    tree.append_child(parent, after);

    let a = alloc_element(&mut tree, "a");
    let b = alloc_element(&mut tree, "b");
    tree.replace_with(target, &[a, b]);

    assert_eq!(tree.children(parent), &[before, a, b, after]);
    assert_eq!(tree.parent(target), None);
    assert_eq!(tree.next_sibling(before), Some(a));
    assert_eq!(tree.next_sibling(a), Some(b));
    assert_eq!(tree.next_sibling(b), Some(after));
}

#[test]
fn test_replace_with_empty_removes_target() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);
    let target = alloc_element(&mut tree, "old");
    tree.append_child(parent, target);

    tree.replace_with(target, &[]);

    assert_eq!(tree.children(parent).len(), 0);
    assert_eq!(tree.parent(target), None);
}

#[test]
fn test_replace_with_last_child_appends() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let first = alloc_element(&mut tree, "x");
    let target = alloc_element(&mut tree, "old");
    tree.append_child(parent, first);
    tree.append_child(parent, target);

    let a = alloc_element(&mut tree, "a");
    tree.replace_with(target, &[a]);

    assert_eq!(tree.children(parent), &[first, a]);
    assert_eq!(tree.next_sibling(first), Some(a));
    assert_eq!(tree.next_sibling(a), None);
}

#[test]
fn test_replace_with_detached_target_is_noop() {
    let mut tree = DomTree::new();
    let target = alloc_element(&mut tree, "old");
    let a = alloc_element(&mut tree, "a");

    tree.replace_with(target, &[a]);

    assert_eq!(tree.parent(a), None);
}

// ========== adopt_children ==========

#[test]
fn test_adopt_children_moves_content() {
    let mut host = DomTree::new();
    let slot = alloc_element(&mut host, "div");
    host.append_child(NodeId::ROOT, slot);

    let mut content = DomTree::new();
    let body = alloc_element(&mut content, "body");
    content.append_child(NodeId::ROOT, body);
    let p = alloc_element(&mut content, "p");
    let text = content.alloc(NodeType::Text("new".to_string()));
    content.append_child(body, p);
    content.append_child(p, text);

    let adopted = host.adopt_children(&mut content, body);

    // Source body is now empty: the content moved, it was not copied
    assert_eq!(content.children(body).len(), 0);

    assert_eq!(adopted.len(), 1);
    let p_host = adopted[0];
    assert_eq!(host.as_element(p_host).map(|e| e.tag_name.as_str()), Some("p"));
    // The subtree came along
    let kids = host.children(p_host);
    assert_eq!(kids.len(), 1);
    assert_eq!(host.as_text(kids[0]), Some("new"));
    // Adopted roots are detached, ready for replace_with/append_child
    assert_eq!(host.parent(p_host), None);
}

#[test]
fn test_adopt_children_preserves_order_and_attrs() {
    let mut host = DomTree::new();

    let mut content = DomTree::new();
    let body = alloc_element(&mut content, "body");
    content.append_child(NodeId::ROOT, body);
    let first = content.alloc(NodeType::Element(ElementData {
        tag_name: "p".to_string(),
        attrs: [("class".to_string(), "new".to_string())].into(),
    }));
    let second = alloc_element(&mut content, "span");
    content.append_child(body, first);
    content.append_child(body, second);

    let adopted = host.adopt_children(&mut content, body);

    assert_eq!(adopted.len(), 2);
    assert!(host.as_element(adopted[0]).is_some_and(|e| e.tag_name == "p"));
    assert!(
        host.as_element(adopted[0])
            .is_some_and(|e| e.classes().contains("new"))
    );
    assert!(host.as_element(adopted[1]).is_some_and(|e| e.tag_name == "span"));
}

#[test]
fn test_adopt_children_empty_source() {
    let mut host = DomTree::new();
    let mut content = DomTree::new();
    let body = alloc_element(&mut content, "body");
    content.append_child(NodeId::ROOT, body);

    let adopted = host.adopt_children(&mut content, body);

    assert!(adopted.is_empty());
}

// ========== descendants ==========

#[test]
fn test_descendants_tree_order() {
    let mut tree = DomTree::new();
    let html = alloc_element(&mut tree, "html");
    tree.append_child(NodeId::ROOT, html);
    let head = alloc_element(&mut tree, "head");
    let body = alloc_element(&mut tree, "body");
    tree.append_child(html, head);
    tree.append_child(html, body);
    let div = alloc_element(&mut tree, "div");
    let p = alloc_element(&mut tree, "p");
    tree.append_child(body, div);
    tree.append_child(div, p);

    let order: Vec<_> = tree.descendants(NodeId::ROOT).collect();
    assert_eq!(order, vec![html, head, body, div, p]);

    // Excludes the starting node itself
    let from_body: Vec<_> = tree.descendants(body).collect();
    assert_eq!(from_body, vec![div, p]);
}
