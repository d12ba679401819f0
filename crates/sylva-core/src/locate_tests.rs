use crate::fixture::FakeNode;
use crate::locate::{find_on_straight_line, first_descendant};
use crate::node::SyntaxNode;

fn chain() -> FakeNode {
    // a > b > c, single-child all the way down
    FakeNode::new("a").with_child(FakeNode::new("b").with_child(FakeNode::new("c")))
}

#[test]
fn straight_line_finds_self() {
    let tree = chain();
    let found = find_on_straight_line(&tree, "a").unwrap();
    assert_eq!(found.kind(), "a");
}

#[test]
fn straight_line_descends_single_child_chain() {
    let tree = chain();
    assert_eq!(find_on_straight_line(&tree, "b").unwrap().kind(), "b");
    assert_eq!(find_on_straight_line(&tree, "c").unwrap().kind(), "c");
}

#[test]
fn straight_line_misses_absent_kind() {
    let tree = chain();
    assert!(find_on_straight_line(&tree, "z").is_none());
}

#[test]
fn straight_line_stops_at_branch_point() {
    // The target exists, but only below a node with two children.
    let tree = FakeNode::new("root").with_child(
        FakeNode::new("fork")
            .with_child(FakeNode::new("left").with_child(FakeNode::new("target")))
            .with_child(FakeNode::new("right")),
    );
    assert!(find_on_straight_line(&tree, "target").is_none());
    // The fork itself is still reachable: root has a single child.
    assert_eq!(find_on_straight_line(&tree, "fork").unwrap().kind(), "fork");
}

#[test]
fn straight_line_stops_at_leaf() {
    let tree = FakeNode::new("leaf");
    assert!(find_on_straight_line(&tree, "below").is_none());
}

#[test]
fn straight_line_is_deterministic() {
    let tree = chain();
    let first = find_on_straight_line(&tree, "c").map(|n| n.kind().to_owned());
    let second = find_on_straight_line(&tree, "c").map(|n| n.kind().to_owned());
    assert_eq!(first, second);
}

#[test]
fn first_descendant_excludes_start_node() {
    let tree = FakeNode::new("x").with_child(FakeNode::new("x").with_text("inner"));
    let found = first_descendant(&tree, "x").unwrap();
    assert_eq!(found.text(), "inner");
}

#[test]
fn first_descendant_prefers_document_order() {
    let tree = FakeNode::new("root")
        .with_child(FakeNode::new("stmt").with_child(FakeNode::new("hit").with_text("first")))
        .with_child(FakeNode::new("hit").with_text("second"));
    assert_eq!(first_descendant(&tree, "hit").unwrap().text(), "first");
}

#[test]
fn first_descendant_misses_absent_kind() {
    assert!(first_descendant(&chain(), "z").is_none());
}
