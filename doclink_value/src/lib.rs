// Copyright 2025 the Doclink Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Doclink Value: classify document values and lay documents out as row trees.
//!
//! Documents arrive as arbitrary JSON-like values ([`serde_json::Value`], with
//! field insertion order preserved). This crate turns one document into a tree
//! of [`VisualNode`]s that a canvas card can draw row by row:
//!
//! - [`classify`] decides what a scalar *looks like*: an identifier (24 hex
//!   digits), a timestamp, a plain string, a number, and so on.
//! - [`render`] walks the document, assigns each node a [`FieldPath`] relative
//!   to the owning document (`items.2.sku`), and marks identifier leaves as
//!   link candidates with a [`Role`](doclink_links::Role).
//! - [`ExpansionState`] remembers which nested sections are open; nested
//!   arrays and objects start collapsed.
//! - [`VisualNode::visible_rows`] flattens the tree into the rows currently
//!   visible, which is also the set of nodes a host should mount.
//!
//! ## Minimal example
//!
//! ```rust
//! use serde_json::json;
//! use doclink_value::{ExpansionState, Kind, render};
//!
//! let doc = json!({
//!     "_id": "507f1f77bcf86cd799439011",
//!     "owner": "507f191e810c19729de860ea",
//!     "tags": ["a", "b"],
//! });
//! let tree = render(&doc, "507f1f77bcf86cd799439011");
//!
//! let mut expansion = ExpansionState::new();
//! let rows = tree.visible_rows(&expansion);
//! assert_eq!(rows.len(), 3);
//! assert_eq!(rows[1].node.key.path.to_string(), "owner");
//! assert_eq!(rows[1].node.leaf().map(|l| l.kind), Some(Kind::IdentifierString));
//!
//! // Open the `tags` section: its two elements become visible.
//! expansion.toggle(rows[2].node.key.clone());
//! assert_eq!(tree.visible_rows(&expansion).len(), 5);
//! ```

mod classify;
mod expansion;
mod path;
mod tree;

pub use classify::{Kind, classify, classify_slot, display_text, is_identifier_like, is_timestamp_like};
pub use expansion::ExpansionState;
pub use path::{FieldPath, NodeKey, PathSegment};
pub use tree::{
    LinkCandidate, NodeBody, RowLabel, ScalarLeaf, Section, SectionKind, VisibleRow, VisualNode,
    render, render_at,
};
