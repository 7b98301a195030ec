// Copyright 2025 the Doclink Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Doclink Links: discover and draw references between rendered document fields.
//!
//! Every identifier-like value shown on the canvas is *mounted* as a node with a
//! [`NodeToken`]. Nodes holding an `_id` field are **definitions**; every other
//! node holding the same shape of value is a **reference**. This crate keeps the
//! live set of such nodes and, on a fixed cadence, turns it into connection
//! segments between references and the definitions sharing their value.
//!
//! - [`ReferenceRegistry`]: token-keyed map of mounted identifier nodes.
//!   Register on mount, unregister on unmount (idempotent).
//! - [`LinkReconciler`]: groups entries by value, pairs every reference with
//!   every definition, reads current geometry through a [`BoundsSource`], and
//!   publishes a fresh segment set in one swap.
//! - [`ReconcileSchedule`]: fixed-interval cadence for the reconciler.
//!
//! The crate does not render anything. Geometry comes from whatever layer draws
//! the nodes, through the [`BoundsSource`] capability. Bounds must be in the same
//! space as the overlay the segments are drawn on; for a zoomed canvas that is
//! screen space.
//!
//! ## Minimal example
//!
//! ```rust
//! use hashbrown::HashMap;
//! use kurbo::Rect;
//! use doclink_links::{LinkReconciler, ReferenceRegistry, Role};
//!
//! let mut registry = ReferenceRegistry::new();
//! let id_node = registry.issue_token();
//! let ref_node = registry.issue_token();
//! registry.register(id_node, "507f1f77bcf86cd799439011", Role::Definition);
//! registry.register(ref_node, "507f1f77bcf86cd799439011", Role::Reference);
//!
//! let mut bounds = HashMap::new();
//! bounds.insert(id_node, Rect::new(0.0, 0.0, 100.0, 20.0));
//! bounds.insert(ref_node, Rect::new(300.0, 200.0, 400.0, 220.0));
//!
//! let mut reconciler = LinkReconciler::new();
//! let segments = reconciler.reconcile(&registry, &bounds);
//! assert_eq!(segments.len(), 1);
//! assert_eq!(segments[0].start, kurbo::Point::new(350.0, 210.0));
//! assert_eq!(segments[0].end, kurbo::Point::new(50.0, 10.0));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod reconcile;
mod registry;
mod schedule;

pub use reconcile::{
    BoundsSource, ConnectionSegment, DetachedHandle, LinkReconciler, ReconcileStats, compute_segments,
};
pub use registry::{NodeToken, ReferenceRegistry, RegistryEntry, Role, ValueGroup};
pub use schedule::{DEFAULT_RECONCILE_INTERVAL, ReconcileSchedule};
