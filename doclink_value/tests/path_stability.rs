// Copyright 2025 the Doclink Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paths and expansion state survive edits and re-renders of a document.

use doclink_links::Role;
use doclink_value::{ExpansionState, FieldPath, NodeKey, VisualNode, render};
use serde_json::{Value, json};

fn link_paths(tree: &VisualNode) -> Vec<(String, String, Role)> {
    tree.leaves()
        .into_iter()
        .filter_map(|node| {
            node.link()
                .map(|l| (node.key.path.to_string(), l.value.clone(), l.role))
        })
        .collect()
}

#[test]
fn appending_a_field_keeps_existing_paths() {
    let mut doc = json!({
        "_id": "507f1f77bcf86cd799439011",
        "profile": {"manager": "507f191e810c19729de860ea"},
    });
    let before = link_paths(&render(&doc, "d"));

    if let Value::Object(fields) = &mut doc {
        fields.insert("aaa_first_alphabetically".to_owned(), json!(1));
    }
    let after = link_paths(&render(&doc, "d"));
    assert_eq!(before, after);
}

#[test]
fn expansion_survives_rerender() {
    let doc = json!({"items": [1, 2, 3]});
    let mut expansion = ExpansionState::new();
    expansion.expand(NodeKey::new("d", FieldPath::root().child_key("items")));

    let first = render(&doc, "d");
    let second = render(&doc, "d");
    assert_eq!(first.visible_rows(&expansion).len(), 4);
    assert_eq!(second.visible_rows(&expansion).len(), 4);

    // Another document with the same shape stays collapsed.
    let other = render(&doc, "e");
    assert_eq!(other.visible_rows(&expansion).len(), 1);
}

#[test]
fn collapsed_children_are_not_visible_but_still_rendered() {
    let doc = json!({
        "_id": "507f1f77bcf86cd799439011",
        "refs": ["507f191e810c19729de860ea", "507f191e810c19729de860eb"],
    });
    let tree = render(&doc, "d");
    let expansion = ExpansionState::new();

    let visible_links = tree
        .visible_rows(&expansion)
        .iter()
        .filter(|row| row.node.link().is_some())
        .count();
    assert_eq!(visible_links, 1);
    assert_eq!(link_paths(&tree).len(), 3);
}
