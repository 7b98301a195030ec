// Copyright 2025 the Doclink Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Connection segments between identifier leaves across placed documents.

use core::time::Duration;

use doclink_canvas::{CanvasSurface, DocumentId};
use doclink_value::{FieldPath, NodeKey};
use kurbo::Point;
use serde_json::json;

const A: &str = "aaaaaaaaaaaaaaaaaaaaaaaa";
const B: &str = "bbbbbbbbbbbbbbbbbbbbbbbb";

fn key(owner: &str, dotted: &str) -> NodeKey {
    let mut path = FieldPath::root();
    for part in dotted.split('.') {
        path = match part.parse::<usize>() {
            Ok(index) => path.child_index(index),
            Err(_) => path.child_key(part),
        };
    }
    NodeKey::new(owner, path)
}

fn close(a: Point, b: Point) -> bool {
    (a - b).hypot() < 1e-9
}

#[test]
fn owner_of_links_to_the_other_documents_id() {
    let mut canvas = CanvasSurface::default();
    canvas.add_document(json!({"_id": A, "ownerOf": B}), Point::new(0.0, 0.0), "t.a");
    canvas.add_document(json!({"_id": B}), Point::new(500.0, 200.0), "t.b");

    let segments = canvas.reconcile_now().to_vec();
    assert_eq!(segments.len(), 1);
    let seg = &segments[0];
    assert_eq!(seg.value, B);

    // Header 28, rows 20, card 320 wide: `ownerOf` is A's second row,
    // `_id` is B's first.
    assert_eq!(seg.start, Point::new(160.0, 58.0));
    assert_eq!(seg.end, Point::new(660.0, 238.0));

    let reference = canvas.node_screen_rect(&key(A, "ownerOf")).unwrap();
    let definition = canvas.node_screen_rect(&key(B, "_id")).unwrap();
    assert_eq!(seg.start, reference.center());
    assert_eq!(seg.end, definition.center());
    assert_eq!(canvas.token_for(&key(A, "ownerOf")), Some(seg.reference));
    assert_eq!(canvas.token_for(&key(B, "_id")), Some(seg.definition));
}

#[test]
fn segments_are_in_screen_space() {
    let mut canvas = CanvasSurface::default();
    canvas.add_document(json!({"_id": A, "ownerOf": B}), Point::new(40.0, 40.0), "t.a");
    canvas.add_document(json!({"_id": B}), Point::new(600.0, 120.0), "t.b");

    canvas.wheel(Point::new(300.0, 200.0), -500.0);
    canvas.reconcile_now();
    let seg = canvas.segments()[0].clone();

    let vp = canvas.viewport();
    let b_id = canvas.scene().card(&DocumentId::new(B)).unwrap().rows[0].rect;
    assert!(close(seg.end, vp.to_screen(b_id.center())));
    assert!(close(seg.start, canvas.node_screen_rect(&key(A, "ownerOf")).unwrap().center()));
    assert!(vp.zoom() > 1.0);
}

#[test]
fn collapsed_references_do_not_link() {
    let mut canvas = CanvasSurface::default();
    canvas.add_document(json!({"_id": A, "refs": [B, B]}), Point::new(0.0, 0.0), "t.a");
    canvas.add_document(json!({"_id": B}), Point::new(500.0, 0.0), "t.b");
    assert!(canvas.reconcile_now().is_empty());
    assert_eq!(canvas.registry().len(), 2);

    assert!(canvas.toggle_section(&key(A, "refs")).unwrap());
    assert_eq!(canvas.registry().len(), 4);
    assert_eq!(canvas.reconcile_now().len(), 2);

    assert!(!canvas.toggle_section(&key(A, "refs")).unwrap());
    assert_eq!(canvas.registry().len(), 2);
    assert!(canvas.reconcile_now().is_empty());

    assert!(canvas.toggle_section(&key(A, "_id")).is_err());
}

#[test]
fn deleting_a_definition_drops_its_links() {
    let mut canvas = CanvasSurface::default();
    canvas.add_document(json!({"_id": A, "ownerOf": B}), Point::new(0.0, 0.0), "t.a");
    let b = canvas.add_document(json!({"_id": B}), Point::new(500.0, 0.0), "t.b");
    assert_eq!(canvas.reconcile_now().len(), 1);

    canvas.delete_document(&b).unwrap();
    assert_eq!(canvas.registry().len(), 2);
    assert!(canvas.reconcile_now().is_empty());
    assert!(canvas.delete_document(&b).is_err());
}

#[test]
fn a_cloned_definition_fans_out() {
    let mut canvas = CanvasSurface::default();
    canvas.add_document(json!({"_id": A, "ownerOf": B}), Point::new(0.0, 0.0), "t.a");
    let b = canvas.add_document(json!({"_id": B}), Point::new(500.0, 0.0), "t.b");
    let copy = canvas.clone_document(&b).unwrap();

    assert_ne!(copy, b);
    assert!(copy.as_str().starts_with(B));
    assert_eq!(
        canvas.document(&copy).unwrap().position,
        Point::new(524.0, 24.0)
    );
    let segments = canvas.reconcile_now();
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].reference, segments[1].reference);
    assert_ne!(segments[0].definition, segments[1].definition);
}

#[test]
fn clear_unmounts_everything() {
    let mut canvas = CanvasSurface::default();
    canvas.add_document(json!({"_id": A, "ownerOf": B}), Point::new(0.0, 0.0), "t.a");
    canvas.add_document(json!({"_id": B}), Point::new(500.0, 0.0), "t.b");
    canvas.reconcile_now();
    canvas.clear();
    assert!(canvas.is_empty());
    assert!(canvas.registry().is_empty());
    assert!(canvas.segments().is_empty());
}

#[test]
fn frame_reconciles_on_the_interval() {
    let mut canvas = CanvasSurface::default();
    canvas.add_document(json!({"_id": A, "ownerOf": B}), Point::new(0.0, 0.0), "t.a");
    canvas.add_document(json!({"_id": B}), Point::new(500.0, 0.0), "t.b");

    assert!(canvas.frame(Duration::ZERO));
    assert_eq!(canvas.segments().len(), 1);
    let revision = canvas.links_revision();
    assert!(!canvas.frame(Duration::from_millis(5)));
    assert_eq!(canvas.links_revision(), revision);
    assert!(canvas.frame(Duration::from_millis(16)));
    assert_eq!(canvas.links_revision(), revision + 1);
}

#[test]
fn documents_without_id_get_random_ids() {
    let mut canvas = CanvasSurface::default();
    let first = canvas.add_document(json!({"name": "x"}), Point::ZERO, "t.a");
    let second = canvas.add_document(json!({"name": "x"}), Point::ZERO, "t.a");
    assert_ne!(first, second);
    assert_eq!(canvas.len(), 2);
}
