// Copyright 2025 the Doclink Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Doclink Event State: pointer gesture state machines for the document canvas.
//!
//! This crate provides small, focused state machines for the two modal pointer
//! gestures the canvas supports:
//!
//! - [`drag`]: track a pointer drag, either as incremental deltas (panning) or
//!   as an anchored, zoom-scaled position for a grabbed card.
//! - [`gesture`]: decide which gesture owns the pointer. A card drag and a
//!   background pan are mutually exclusive, and only a release ends either one.
//!
//! ## Design Philosophy
//!
//! Each state manager is designed to be:
//!
//! - **Minimal and focused**: Each handles one specific interaction pattern
//! - **Stateful but simple**: Track just enough state to compute transitions
//! - **Integration-friendly**: Work with any event routing or hit-testing system
//! - **Generic**: Accept application-specific card ID types
//!
//! Gesture exclusivity is explicit state ([`gesture::ActiveGesture`]) checked
//! before a gesture starts, rather than relying on event propagation being
//! stopped somewhere in a widget tree.
//!
//! ## Card drag
//!
//! ```rust
//! use kurbo::Point;
//! use doclink_event_state::gesture::{GestureEnd, GestureState, PointerButton};
//!
//! let mut gestures = GestureState::<u32>::new();
//!
//! // Press on card 7's handle; the card sits at (100, 100) in canvas space.
//! assert!(gestures.begin_drag(7, PointerButton::Primary, Point::new(10.0, 10.0), Point::new(100.0, 100.0)));
//!
//! // A pan cannot start while the drag is active.
//! assert!(!gestures.begin_pan(PointerButton::Middle, Point::new(0.0, 0.0)));
//!
//! // Release at 2x zoom: 40 screen pixels move the card 20 canvas units.
//! let end = gestures.on_release(Point::new(50.0, 10.0), 2.0);
//! assert_eq!(end, Some(GestureEnd::DragCommitted { card: 7, position: Point::new(120.0, 100.0) }));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

pub mod drag;
pub mod gesture;
