// Copyright 2025 the Doclink Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless card layout and hit testing.
//!
//! Cards and rows are laid out in canvas space. A host draws them through the
//! viewport transform; the link reconciler reads them through
//! [`ScreenBounds`], which applies the same transform, so segment endpoints
//! land on the drawn rows.

use doclink_links::{BoundsSource, DetachedHandle, NodeToken};
use doclink_value::{ExpansionState, NodeBody, NodeKey, RowLabel, VisualNode};
use doclink_view2d::Viewport;
use hashbrown::HashMap;
use kurbo::{Point, Rect};

use crate::config::CanvasConfig;
use crate::document::{DocumentId, PlacedDocument};
use crate::mount::MountTable;

/// One visible field row.
#[derive(Clone, Debug, PartialEq)]
pub struct RowLayout {
    /// Node drawn on this row.
    pub key: NodeKey,
    /// Row label.
    pub label: RowLabel,
    /// Text after the label.
    pub value_text: String,
    /// Nesting depth; the document's own fields are at 0.
    pub depth: usize,
    /// Row box, canvas space. Indented by depth.
    pub rect: Rect,
    /// `Some(open)` for collapsible sections.
    pub expanded: Option<bool>,
    /// The `_id` row.
    pub is_id_field: bool,
    /// Registry token of an identifier leaf.
    pub token: Option<NodeToken>,
}

/// One card.
#[derive(Clone, Debug, PartialEq)]
pub struct CardLayout {
    /// Document drawn by this card.
    pub id: DocumentId,
    /// Provenance label drawn in the header.
    pub label: String,
    /// Whole card, canvas space.
    pub rect: Rect,
    /// Drag handle band at the top.
    pub header: Rect,
    /// Visible rows, top to bottom.
    pub rows: Vec<RowLayout>,
}

/// What a canvas point lands on.
#[derive(Clone, Debug, PartialEq)]
pub enum CardHit {
    /// The card's drag handle.
    Handle(DocumentId),
    /// The card body, optionally on a row.
    Body {
        /// Card pressed.
        card: DocumentId,
        /// Row under the point.
        row: Option<NodeKey>,
    },
}

/// Laid-out cards in draw order (last on top).
#[derive(Clone, Debug, Default)]
pub struct Scene {
    cards: Vec<CardLayout>,
    node_rects: HashMap<NodeToken, Rect>,
}

impl Scene {
    pub(crate) fn build<'a>(
        cards: impl IntoIterator<Item = (&'a PlacedDocument, &'a VisualNode)>,
        expansion: &ExpansionState,
        config: &CanvasConfig,
        mounts: &MountTable,
    ) -> Self {
        let mut scene = Self::default();
        for (doc, tree) in cards {
            let origin = doc.position;
            let right = origin.x + config.card_width;
            let header = Rect::new(origin.x, origin.y, right, origin.y + config.header_height);
            let mut y = header.y1;
            let mut rows = Vec::new();
            for row in tree.visible_rows(expansion) {
                let node = row.node;
                // Deep rows stop indenting one step short of the right edge.
                let left = (origin.x + config.indent * row.depth as f64)
                    .min(right - config.indent)
                    .max(origin.x);
                let rect = Rect::new(left, y, right, y + config.row_height);
                y = rect.y1;
                let token = node.link().and_then(|_| mounts.token(&node.key));
                if let Some(token) = token {
                    scene.node_rects.insert(token, rect);
                }
                rows.push(RowLayout {
                    key: node.key.clone(),
                    label: node.label.clone(),
                    value_text: node.value_text(),
                    depth: row.depth,
                    rect,
                    expanded: match &node.body {
                        NodeBody::Section(s) if s.collapsible => {
                            Some(expansion.is_expanded(&node.key))
                        }
                        _ => None,
                    },
                    is_id_field: node.is_id_field(),
                    token,
                });
            }
            scene.cards.push(CardLayout {
                id: doc.id.clone(),
                label: doc.collection_label.clone(),
                rect: Rect::new(origin.x, origin.y, right, y),
                header,
                rows,
            });
        }
        scene
    }

    /// Cards in draw order.
    #[must_use]
    pub fn cards(&self) -> &[CardLayout] {
        &self.cards
    }

    /// Layout of card `id`.
    #[must_use]
    pub fn card(&self, id: &DocumentId) -> Option<&CardLayout> {
        self.cards.iter().find(|c| &c.id == id)
    }

    /// Canvas-space box of a mounted identifier leaf.
    #[must_use]
    pub fn node_rect(&self, token: NodeToken) -> Option<Rect> {
        self.node_rects.get(&token).copied()
    }

    /// Topmost card part under `canvas_pt`.
    ///
    /// A body hit reports the row spanning the point's height, indent included.
    #[must_use]
    pub fn hit(&self, canvas_pt: Point) -> Option<CardHit> {
        let card = self.cards.iter().rev().find(|c| c.rect.contains(canvas_pt))?;
        if card.header.contains(canvas_pt) {
            return Some(CardHit::Handle(card.id.clone()));
        }
        Some(CardHit::Body {
            card: card.id.clone(),
            row: card
                .rows
                .iter()
                .find(|r| (r.rect.y0..r.rect.y1).contains(&canvas_pt.y))
                .map(|r| r.key.clone()),
        })
    }

    /// Bounds of mounted leaves as currently drawn through `viewport`.
    #[must_use]
    pub fn screen_bounds<'a>(&'a self, viewport: &'a Viewport) -> ScreenBounds<'a> {
        ScreenBounds {
            scene: self,
            viewport,
        }
    }
}

/// Screen-space [`BoundsSource`] over a [`Scene`].
#[derive(Clone, Copy, Debug)]
pub struct ScreenBounds<'a> {
    scene: &'a Scene,
    viewport: &'a Viewport,
}

impl BoundsSource for ScreenBounds<'_> {
    fn bounds(&self, handle: NodeToken) -> Result<Rect, DetachedHandle> {
        self.scene
            .node_rect(handle)
            .map(|rect| self.viewport.to_screen_rect(rect))
            .ok_or(DetachedHandle(handle))
    }
}
