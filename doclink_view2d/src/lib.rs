// Copyright 2025 the Doclink Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Doclink View 2D: the pan/zoom viewport of the document canvas.
//!
//! This crate provides a small, headless model of the canvas camera. It
//! focuses on:
//! - Camera state (pan + uniform zoom), with zoom clamped to a configured range.
//! - Coordinate conversion between canvas space and screen space.
//! - Anchored zoom: the canvas point under the cursor stays under the cursor.
//! - Grid spacing suggestions for the background grid.
//!
//! It does **not** own any scene or rendering backend. Callers are expected to:
//! - Keep their own placed content in canvas space.
//! - Use [`Viewport::transform`] for the content layer and draw overlays
//!   (connection lines, HUD) untransformed in screen space.
//! - Wire wheel and pointer input into [`Viewport::wheel_at`] and
//!   [`Viewport::pan_by`] at a higher layer.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use doclink_view2d::Viewport;
//!
//! let mut view = Viewport::new(Size::new(800.0, 600.0));
//!
//! let cursor = Point::new(200.0, 150.0);
//! let before = view.to_canvas(cursor);
//!
//! // Zoom in around the cursor.
//! view.apply_zoom_at(cursor, 500.0);
//! assert!(view.zoom() > 1.0);
//!
//! let after = view.to_canvas(cursor);
//! assert!((before - after).hypot() < 1e-9);
//! ```
//!
//! ## Design notes
//!
//! - Screen space is local to the canvas surface: its origin is the top-left
//!   corner of the drawing area, so `to_screen(c) = c * zoom + pan`.
//! - Panning is unclamped; the canvas is conceptually infinite.
//! - Zoom deltas are additive (`zoom + delta * sensitivity`) and clamped to
//!   `[min_zoom, max_zoom]`, `[0.1, 5]` by default.
//!
//! This crate is `no_std`.

#![no_std]

mod viewport;

pub use viewport::{
    DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, DEFAULT_ZOOM_SENSITIVITY, Viewport, ViewportDebugInfo,
    ViewportState,
};
