// Copyright 2025 the Doclink Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Doclink Canvas: a headless, freeform canvas of database documents with live reference links.
//!
//! [`CanvasSurface`] composes the other Doclink crates:
//!
//! - documents are rendered into row trees by `doclink_value` and laid out as
//!   cards in canvas space ([`Scene`]);
//! - `doclink_view2d` pans and zooms the view, and a fixed [`Hud`] offers
//!   zoom buttons;
//! - `doclink_event_state` arbitrates card drags and background pans;
//! - every visible identifier leaf is mounted in a `doclink_links` registry,
//!   and on each [`frame`](CanvasSurface::frame) the reconciler pairs
//!   references with definitions and publishes screen-space
//!   [`ConnectionSegment`](doclink_links::ConnectionSegment)s.
//!
//! There is no renderer here. A host feeds pointer and wheel input, calls
//! `frame` from its animation clock, and draws the grid, the cards of
//! [`CanvasSurface::scene`] through [`Viewport::transform`](doclink_view2d::Viewport::transform),
//! the segments untransformed, and the HUD on top.
//!
//! Documents come from a [`DocumentBackend`](doclink_backend::DocumentBackend)
//! and canvases are saved to a [`CanvasStore`].
//!
//! ## Minimal example
//!
//! ```rust
//! use doclink_canvas::CanvasSurface;
//! use kurbo::Point;
//! use serde_json::json;
//!
//! let a = "aaaaaaaaaaaaaaaaaaaaaaaa";
//! let b = "bbbbbbbbbbbbbbbbbbbbbbbb";
//!
//! let mut canvas = CanvasSurface::default();
//! canvas.add_document(json!({"_id": a, "ownerOf": b}), Point::new(0.0, 0.0), "shop.users");
//! canvas.add_document(json!({"_id": b}), Point::new(500.0, 200.0), "shop.stores");
//!
//! let segments = canvas.reconcile_now();
//! assert_eq!(segments.len(), 1);
//! assert_eq!(segments[0].value, b);
//! ```

mod config;
mod document;
mod error;
mod grid;
mod hud;
mod mount;
mod scene;
mod snapshot;
mod store;
mod surface;

pub use config::CanvasConfig;
pub use document::{DocumentId, PlacedDocument};
pub use error::{CanvasError, ConfigError, StoreError};
pub use grid::{GridLines, grid_lines};
pub use hud::{Hud, HudAction, HudButton};
pub use scene::{CardHit, CardLayout, RowLayout, Scene, ScreenBounds};
pub use snapshot::{BlobInfo, CanvasSnapshot};
pub use store::{CanvasStore, DirStore, MemoryStore};
pub use surface::{CanvasSurface, PointerOutcome};
