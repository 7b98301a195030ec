// Copyright 2025 the Doclink Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scripted canvas session.
//!
//! Queries the sample shop, follows a reference, drags a card, zooms with the
//! wheel, runs a few frames, and saves the canvas. Segments are logged as
//! they change.
//!
//! Set `DOCLINK_CONFIG` to a TOML file to override the canvas config.
//!
//! Run:
//! - `cargo run -p doclink_demos --example canvas_session`
//! - `RUST_LOG=doclink_canvas=debug cargo run -p doclink_demos --example canvas_session`

use std::time::Duration;

use doclink_backend::FindRequest;
use doclink_canvas::{CanvasConfig, CanvasStore, CanvasSurface, MemoryStore, PointerOutcome};
use doclink_demos::{ids, init_tracing, sample_backend};
use doclink_event_state::gesture::PointerButton;
use kurbo::{Point, Vec2};

fn load_config() -> Result<CanvasConfig, Box<dyn std::error::Error>> {
    match std::env::var("DOCLINK_CONFIG") {
        Ok(path) => {
            let text = std::fs::read_to_string(&path)?;
            Ok(CanvasConfig::from_toml_str(&text)?)
        }
        Err(_) => Ok(CanvasConfig::default()),
    }
}

fn log_segments(canvas: &CanvasSurface) {
    for seg in canvas.segments() {
        tracing::info!(
            value = %seg.value,
            from = ?(seg.start.x, seg.start.y),
            to = ?(seg.end.x, seg.end.y),
            "segment"
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let backend = sample_backend();
    let users = backend.collection_ref("shop", "users");
    let stores = backend.collection_ref("shop", "stores");
    let orders = backend.collection_ref("shop", "orders");

    let mut canvas = CanvasSurface::new(load_config()?);

    let placed = canvas.add_from_query(&backend, &FindRequest::new(&users), Point::new(40.0, 40.0))?;
    canvas.add_from_query(&backend, &FindRequest::new(&orders), Point::new(40.0, 420.0))?;
    tracing::info!(documents = canvas.len(), "queried");

    // Ada owns Oslo; open it next to her card.
    let ada = placed[0].clone();
    canvas.open_reference(&backend, &stores, ids::OSLO, &ada)?;

    // A miss shows up in the banner, not as a crash.
    if canvas.open_reference(&backend, &stores, "000000000000000000000000", &ada).is_err() {
        tracing::info!(banner = canvas.error_message().unwrap_or_default(), "lookup failed");
        canvas.dismiss_error();
    }

    let mut now = Duration::ZERO;
    let step = canvas.config().reconcile_interval();
    canvas.frame(now);
    log_segments(&canvas);

    // Drag Ada's card by its header.
    let header = canvas
        .scene()
        .card(&ada)
        .map(|card| canvas.viewport().to_screen(card.header.center()))
        .ok_or("Ada is not on the canvas")?;
    if let PointerOutcome::DragStarted(id) = canvas.pointer_down(header, PointerButton::Primary) {
        for i in 1..=5 {
            let offset = f64::from(i) * 12.0;
            canvas.pointer_move(header + Vec2::new(offset, offset * 0.5));
            now += step;
            canvas.frame(now);
        }
        canvas.pointer_up(header + Vec2::new(60.0, 30.0));
        tracing::info!(%id, "dragged");
    }

    // Open Bob's friends list so its reference mounts.
    let bob_friends = canvas
        .tree(&canvas.documents().nth(1).ok_or("Bob is missing")?.id)
        .and_then(|tree| tree.visible_rows(canvas.expansion()).into_iter().find(|row| row.node.section().is_some()))
        .map(|row| row.node.key.clone());
    if let Some(key) = bob_friends {
        canvas.toggle_section(&key)?;
    }

    canvas.wheel(Point::new(400.0, 300.0), -200.0);
    now += step;
    canvas.frame(now);
    log_segments(&canvas);

    let stats = canvas.reconcile_stats();
    tracing::info!(
        entries = stats.entries,
        pairs = stats.candidate_pairs,
        emitted = stats.emitted,
        skipped = stats.skipped,
        revision = canvas.links_revision(),
        zoom = canvas.viewport().zoom(),
        "links"
    );

    let mut store = MemoryStore::new();
    canvas.save(&mut store, "demo")?;
    for blob in store.list_blobs()? {
        tracing::info!(name = %blob.name, saved_at = %blob.saved_at, "saved");
    }

    Ok(())
}
