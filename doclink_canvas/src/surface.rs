// Copyright 2025 the Doclink Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use chrono::Utc;
use doclink_backend::{CollectionRef, DocumentBackend, FindRequest};
use doclink_event_state::gesture::{ActiveGesture, GestureEnd, GestureState, GestureUpdate, PointerButton};
use doclink_links::{ConnectionSegment, LinkReconciler, NodeToken, ReconcileSchedule, ReconcileStats, ReferenceRegistry};
use doclink_value::{ExpansionState, LinkCandidate, NodeKey, VisualNode, render};
use doclink_view2d::Viewport;
use kurbo::{Point, Rect, Size};
use serde_json::Value;

use crate::config::CanvasConfig;
use crate::document::{DocumentId, PlacedDocument};
use crate::error::CanvasError;
use crate::grid::{GridLines, grid_lines};
use crate::hud::{Hud, HudAction};
use crate::mount::MountTable;
use crate::scene::{CardHit, Scene};
use crate::snapshot::CanvasSnapshot;
use crate::store::CanvasStore;

/// What a pointer press did.
#[derive(Clone, Debug, PartialEq)]
pub enum PointerOutcome {
    /// The press landed on the HUD and was consumed.
    Hud(Option<HudAction>),
    /// A card drag started.
    DragStarted(DocumentId),
    /// The press landed in a card body; nothing started.
    Body {
        /// Card pressed.
        card: DocumentId,
        /// Row under the pointer.
        row: Option<NodeKey>,
    },
    /// A background pan started.
    PanStarted,
    /// Nothing happened: a gesture is already active or the button does nothing here.
    Ignored,
}

#[derive(Clone, Debug)]
struct Card {
    doc: PlacedDocument,
    tree: VisualNode,
}

impl Card {
    fn new(doc: PlacedDocument) -> Self {
        let tree = render(&doc.payload, doc.id.as_str());
        Self { doc, tree }
    }
}

/// The document canvas.
///
/// Owns the placed documents, the viewport, the reference registry, and the
/// published connection segments. Every structural change (add, delete,
/// clone, clear, toggle, load) mounts and unmounts identifier leaves before
/// returning, so the registry never lags what is on screen.
///
/// Input handlers only update state. Backend and store calls happen only in
/// the operations that take a backend or store.
#[derive(Debug)]
pub struct CanvasSurface {
    config: CanvasConfig,
    viewport: Viewport,
    hud: Hud,
    cards: Vec<Card>,
    expansion: ExpansionState,
    registry: ReferenceRegistry,
    mounts: MountTable,
    scene: Scene,
    gesture: GestureState<DocumentId>,
    reconciler: LinkReconciler,
    schedule: ReconcileSchedule,
    error: Option<String>,
}

impl Default for CanvasSurface {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}

impl CanvasSurface {
    /// Creates an empty canvas.
    #[must_use]
    pub fn new(config: CanvasConfig) -> Self {
        Self {
            viewport: config.viewport(),
            hud: Hud::new(config.view_size()),
            schedule: ReconcileSchedule::new(config.reconcile_interval()),
            config,
            cards: Vec::new(),
            expansion: ExpansionState::new(),
            registry: ReferenceRegistry::new(),
            mounts: MountTable::default(),
            scene: Scene::default(),
            gesture: GestureState::new(),
            reconciler: LinkReconciler::new(),
            error: None,
        }
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    /// Current viewport.
    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// HUD layout.
    #[must_use]
    pub fn hud(&self) -> &Hud {
        &self.hud
    }

    /// Current layout.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Live reference registry.
    #[must_use]
    pub fn registry(&self) -> &ReferenceRegistry {
        &self.registry
    }

    /// Open sections.
    #[must_use]
    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    /// The gesture owning the pointer.
    #[must_use]
    pub fn active_gesture(&self) -> &ActiveGesture<DocumentId> {
        self.gesture.active()
    }

    /// Placed documents in draw order.
    pub fn documents(&self) -> impl Iterator<Item = &PlacedDocument> + '_ {
        self.cards.iter().map(|c| &c.doc)
    }

    /// Number of placed documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns `true` if nothing is placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Placed document `id`.
    #[must_use]
    pub fn document(&self, id: &DocumentId) -> Option<&PlacedDocument> {
        self.index_of(id).map(|i| &self.cards[i].doc)
    }

    /// Rendered tree of document `id`.
    #[must_use]
    pub fn tree(&self, id: &DocumentId) -> Option<&VisualNode> {
        self.index_of(id).map(|i| &self.cards[i].tree)
    }

    /// Registry token of the mounted identifier leaf at `key`.
    #[must_use]
    pub fn token_for(&self, key: &NodeKey) -> Option<NodeToken> {
        self.mounts.token(key)
    }

    /// Screen-space box of the mounted identifier leaf at `key`.
    #[must_use]
    pub fn node_screen_rect(&self, key: &NodeKey) -> Option<Rect> {
        let token = self.mounts.token(key)?;
        self.scene
            .node_rect(token)
            .map(|rect| self.viewport.to_screen_rect(rect))
    }

    /// Background grid for the current view.
    #[must_use]
    pub fn grid(&self) -> GridLines {
        grid_lines(&self.viewport, self.config.grid_base)
    }

    /// Resizes the drawing surface.
    pub fn set_view_size(&mut self, size: Size) {
        self.viewport.set_view_size(size);
        self.hud = Hud::new(size);
    }

    // --- documents ---

    /// Places `payload` with its top-left corner at `position` (canvas space).
    ///
    /// The canvas id is the payload's `_id`, or a random one if it has none.
    /// An id already on the canvas gets a random suffix.
    pub fn add_document(
        &mut self,
        payload: Value,
        position: Point,
        collection_label: impl Into<String>,
    ) -> DocumentId {
        let base = DocumentId::from_payload(&payload).unwrap_or_else(DocumentId::random);
        let id = self.unique_id(base);
        tracing::debug!(%id, x = position.x, y = position.y, "add document");
        self.cards.push(Card::new(PlacedDocument::new(
            id.clone(),
            payload,
            position,
            collection_label,
        )));
        self.refresh();
        id
    }

    /// Places a copy of `id`, offset by the clone offset. Open sections are copied too.
    pub fn clone_document(&mut self, id: &DocumentId) -> Result<DocumentId, CanvasError> {
        let source = self
            .document(id)
            .cloned()
            .ok_or_else(|| CanvasError::UnknownDocument(id.clone()))?;
        let copy_id = self.unique_id(source.id.clone());
        self.expansion.copy_owner(id.as_str(), copy_id.as_str());
        tracing::debug!(source = %id, copy = %copy_id, "clone document");
        self.cards.push(Card::new(PlacedDocument::new(
            copy_id.clone(),
            source.payload,
            source.position + self.config.clone_offset,
            source.collection_label,
        )));
        self.refresh();
        Ok(copy_id)
    }

    /// Removes `id` from the canvas. A drag of it is dropped without committing.
    pub fn delete_document(&mut self, id: &DocumentId) -> Result<PlacedDocument, CanvasError> {
        let index = self
            .index_of(id)
            .ok_or_else(|| CanvasError::UnknownDocument(id.clone()))?;
        let card = self.cards.remove(index);
        self.expansion.forget_owner(id.as_str());
        self.gesture.forget_card(id);
        tracing::debug!(%id, "delete document");
        self.refresh();
        Ok(card.doc)
    }

    /// Removes every document.
    pub fn clear(&mut self) {
        tracing::debug!(count = self.cards.len(), "clear canvas");
        self.cards.clear();
        self.expansion.clear();
        self.gesture = GestureState::new();
        self.refresh();
        self.reconciler.clear();
    }

    /// Moves `id` so its top-left corner is at `position` (canvas space).
    pub fn move_document(&mut self, id: &DocumentId, position: Point) -> Result<(), CanvasError> {
        let index = self
            .index_of(id)
            .ok_or_else(|| CanvasError::UnknownDocument(id.clone()))?;
        self.cards[index].doc.position = position;
        self.relayout();
        Ok(())
    }

    /// Opens or closes the section at `key`, returning whether it is now open.
    pub fn toggle_section(&mut self, key: &NodeKey) -> Result<bool, CanvasError> {
        let id = DocumentId::new(key.owner.clone());
        let tree = self
            .tree(&id)
            .ok_or_else(|| CanvasError::UnknownDocument(id.clone()))?;
        let collapsible = tree
            .find(&key.path)
            .and_then(VisualNode::section)
            .is_some_and(|s| s.collapsible);
        if !collapsible {
            return Err(CanvasError::NotCollapsible(key.clone()));
        }
        let open = self.expansion.toggle(key.clone());
        self.refresh();
        Ok(open)
    }

    // --- input ---

    /// Handles a pointer press at `pos` (screen space).
    ///
    /// The HUD consumes presses over it. A primary press on a card header
    /// starts a drag. A press in a card body starts nothing. A primary or
    /// middle press on the background starts a pan. No gesture starts while
    /// another is active.
    pub fn pointer_down(&mut self, pos: Point, button: PointerButton) -> PointerOutcome {
        if !self.gesture.is_idle() {
            return PointerOutcome::Ignored;
        }
        if self.hud.contains(pos) {
            let action = self.hud.hit(pos).filter(|_| button == PointerButton::Primary);
            if let Some(action) = action {
                self.apply_hud(action);
            }
            return PointerOutcome::Hud(action);
        }
        match self.scene.hit(self.viewport.to_canvas(pos)) {
            Some(CardHit::Handle(id)) => {
                let Some(origin) = self.document(&id).map(|d| d.position) else {
                    return PointerOutcome::Ignored;
                };
                if self.gesture.begin_drag(id.clone(), button, pos, origin) {
                    PointerOutcome::DragStarted(id)
                } else {
                    PointerOutcome::Ignored
                }
            }
            Some(CardHit::Body { card, row }) => PointerOutcome::Body { card, row },
            None => {
                if self.gesture.begin_pan(button, pos) {
                    PointerOutcome::PanStarted
                } else {
                    PointerOutcome::Ignored
                }
            }
        }
    }

    /// Handles a pointer move to `pos` (screen space).
    pub fn pointer_move(&mut self, pos: Point) -> Option<GestureUpdate<DocumentId>> {
        let update = self.gesture.on_move(pos, self.viewport.zoom())?;
        match &update {
            GestureUpdate::Drag { card, position } => self.place(card, *position),
            GestureUpdate::Pan { delta } => self.viewport.pan_by(*delta),
        }
        Some(update)
    }

    /// Handles the pointer release at `pos` (screen space), wherever it happens.
    ///
    /// Ends the active gesture exactly once; a drag commits its final
    /// position. A release with no active gesture does nothing.
    pub fn pointer_up(&mut self, pos: Point) -> Option<GestureEnd<DocumentId>> {
        let end = self.gesture.on_release(pos, self.viewport.zoom())?;
        match &end {
            GestureEnd::DragCommitted { card, position } => {
                self.place(card, *position);
                tracing::debug!(id = %card, x = position.x, y = position.y, "drag committed");
            }
            GestureEnd::PanEnded { delta } => self.viewport.pan_by(*delta),
        }
        Some(end)
    }

    /// Zooms about `pos` (screen space) for a wheel event.
    pub fn wheel(&mut self, pos: Point, delta_y: f64) {
        self.viewport.wheel_at(pos, delta_y);
    }

    /// Applies a HUD button.
    pub fn apply_hud(&mut self, action: HudAction) {
        match action {
            HudAction::ZoomIn => self.viewport.zoom_by_step(self.config.zoom_step),
            HudAction::ZoomOut => self.viewport.zoom_by_step(-self.config.zoom_step),
            HudAction::Reset => self.viewport.reset(),
        }
    }

    // --- links ---

    /// Frame tick at `now` (any monotonic clock). Reconciles if the interval elapsed.
    ///
    /// Returns `true` if a reconciliation ran.
    pub fn frame(&mut self, now: Duration) -> bool {
        if self.schedule.poll(now) {
            self.reconcile_now();
            true
        } else {
            false
        }
    }

    /// Reconciles immediately and returns the new segments.
    pub fn reconcile_now(&mut self) -> &[ConnectionSegment] {
        let bounds = self.scene.screen_bounds(&self.viewport);
        self.reconciler.reconcile(&self.registry, &bounds)
    }

    /// Segments from the last reconciliation, screen space.
    #[must_use]
    pub fn segments(&self) -> &[ConnectionSegment] {
        self.reconciler.segments()
    }

    /// Counters from the last reconciliation.
    #[must_use]
    pub fn reconcile_stats(&self) -> ReconcileStats {
        self.reconciler.stats()
    }

    /// Number of reconciliations so far.
    #[must_use]
    pub fn links_revision(&self) -> u64 {
        self.reconciler.revision()
    }

    // --- backend ---

    /// Runs `request` and places each result, cascading down-right from `at`.
    ///
    /// On failure nothing is placed and the error banner is set.
    pub fn add_from_query<B: DocumentBackend + ?Sized>(
        &mut self,
        backend: &B,
        request: &FindRequest,
        at: Point,
    ) -> Result<Vec<DocumentId>, CanvasError> {
        let response = backend
            .fetch_documents(request)
            .map_err(|err| self.fail(err.into()))?;
        let label = request.target().label();
        let mut position = at;
        let mut ids = Vec::with_capacity(response.documents.len());
        for payload in response.documents {
            ids.push(self.add_document(payload, position, label.clone()));
            position += self.config.cascade_offset;
        }
        Ok(ids)
    }

    /// Follows a reference: fetches the document whose `_id` is `value` from
    /// `target` and places it to the right of `near`.
    pub fn open_reference<B: DocumentBackend + ?Sized>(
        &mut self,
        backend: &B,
        target: &CollectionRef,
        value: &str,
        near: &DocumentId,
    ) -> Result<DocumentId, CanvasError> {
        let Some(anchor) = self.document(near).map(|d| d.position) else {
            return Err(self.fail(CanvasError::UnknownDocument(near.clone())));
        };
        let response = backend
            .fetch_documents(&FindRequest::by_id(target, value))
            .map_err(|err| self.fail(err.into()))?;
        let Some(payload) = response.documents.into_iter().next() else {
            return Err(self.fail(CanvasError::ReferenceNotFound {
                value: value.to_owned(),
                collection: target.label(),
            }));
        };
        let position = Point::new(anchor.x + self.config.card_width + self.config.reference_gap, anchor.y);
        Ok(self.add_document(payload, position, target.label()))
    }

    /// Message of the last failed backend or store operation.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Hides the error banner.
    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    // --- persistence ---

    /// Captures documents and viewport, stamped with the current time.
    #[must_use]
    pub fn snapshot(&self) -> CanvasSnapshot {
        CanvasSnapshot {
            documents: self.documents().cloned().collect(),
            viewport: self.viewport.state(),
            saved_at: Utc::now(),
        }
    }

    /// Replaces documents and viewport with `snapshot`.
    ///
    /// Any gesture in progress is dropped. Sections start collapsed. Segments
    /// of the previous canvas are withdrawn until the next reconciliation.
    pub fn restore(&mut self, snapshot: CanvasSnapshot) {
        tracing::debug!(documents = snapshot.documents.len(), "restore canvas");
        self.cards.clear();
        self.expansion.clear();
        self.gesture = GestureState::new();
        for mut doc in snapshot.documents {
            doc.id = self.unique_id(doc.id);
            self.cards.push(Card::new(doc));
        }
        self.viewport.restore(snapshot.viewport);
        self.refresh();
        self.reconciler.clear();
        self.schedule.reset();
    }

    /// Saves the canvas to `store` as `name`.
    pub fn save<S: CanvasStore + ?Sized>(&mut self, store: &mut S, name: &str) -> Result<(), CanvasError> {
        let snapshot = self.snapshot();
        store
            .save_blob(name, &snapshot)
            .map_err(|err| self.fail(err.into()))?;
        tracing::debug!(name, documents = snapshot.documents.len(), "saved canvas");
        Ok(())
    }

    /// Replaces the canvas with the one saved in `store` as `name`.
    ///
    /// On failure the canvas is unchanged and the error banner is set.
    pub fn load<S: CanvasStore + ?Sized>(&mut self, store: &S, name: &str) -> Result<(), CanvasError> {
        let snapshot = store.load_blob(name).map_err(|err| self.fail(err.into()))?;
        self.restore(snapshot);
        Ok(())
    }

    // --- internals ---

    fn index_of(&self, id: &DocumentId) -> Option<usize> {
        self.cards.iter().position(|c| &c.doc.id == id)
    }

    fn unique_id(&self, base: DocumentId) -> DocumentId {
        let mut id = base;
        while self.index_of(&id).is_some() {
            id = id.with_random_suffix();
        }
        id
    }

    fn place(&mut self, id: &DocumentId, position: Point) {
        if let Some(index) = self.index_of(id) {
            self.cards[index].doc.position = position;
            self.relayout();
        }
    }

    fn fail(&mut self, err: CanvasError) -> CanvasError {
        tracing::warn!(%err, "canvas operation failed");
        self.error = Some(err.user_message());
        err
    }

    /// Mounts what is visible, unmounts the rest, then lays out.
    fn refresh(&mut self) {
        let expansion = &self.expansion;
        let visible: Vec<(NodeKey, LinkCandidate)> = self
            .cards
            .iter()
            .flat_map(|card| {
                card.tree
                    .visible_rows(expansion)
                    .into_iter()
                    .filter_map(|row| row.node.link().map(|l| (row.node.key.clone(), l.clone())))
                    .collect::<Vec<_>>()
            })
            .collect();
        let diff = self.mounts.sync(visible, &mut self.registry);
        tracing::trace!(
            mounted = diff.mounted,
            unmounted = diff.unmounted,
            live = self.mounts.len(),
            "mount diff"
        );
        self.relayout();
    }

    fn relayout(&mut self) {
        self.scene = Scene::build(
            self.cards.iter().map(|c| (&c.doc, &c.tree)),
            &self.expansion,
            &self.config,
            &self.mounts,
        );
    }
}
