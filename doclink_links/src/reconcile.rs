// Copyright 2025 the Doclink Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Turning registry contents into connection segments.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::{Point, Rect};

use crate::registry::{NodeToken, ReferenceRegistry};

/// A node's geometry could not be read.
///
/// This happens when a node left the render tree without unregistering yet,
/// or never got laid out. It is an expected transient race.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("node {0:?} has no rendered geometry")]
pub struct DetachedHandle(pub NodeToken);

/// Source of current on-screen bounds for mounted nodes.
///
/// Bounds must be expressed in the space the segments are drawn in.
pub trait BoundsSource {
    /// Returns the current bounding box of `handle`.
    fn bounds(&self, handle: NodeToken) -> Result<Rect, DetachedHandle>;
}

impl<T: BoundsSource + ?Sized> BoundsSource for &T {
    fn bounds(&self, handle: NodeToken) -> Result<Rect, DetachedHandle> {
        (**self).bounds(handle)
    }
}

impl<S: core::hash::BuildHasher> BoundsSource for HashMap<NodeToken, Rect, S> {
    fn bounds(&self, handle: NodeToken) -> Result<Rect, DetachedHandle> {
        self.get(&handle).copied().ok_or(DetachedHandle(handle))
    }
}

/// A line from a reference node to a definition node sharing its value.
#[derive(Clone, Debug, PartialEq)]
pub struct ConnectionSegment {
    /// Center of the reference node.
    pub start: Point,
    /// Center of the definition node.
    pub end: Point,
    /// Identifier shared by both ends.
    pub value: String,
    /// Reference node.
    pub reference: NodeToken,
    /// Definition node.
    pub definition: NodeToken,
}

/// Counters from the most recent reconciliation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    /// Number of registry entries seen.
    pub entries: usize,
    /// (reference, definition) pairs considered.
    pub candidate_pairs: usize,
    /// Segments published.
    pub emitted: usize,
    /// Pairs dropped because an end was detached or had zero width.
    pub skipped: usize,
}

/// Recomputes connection segments from a [`ReferenceRegistry`].
///
/// Each run pairs every reference with every definition sharing its value.
/// Definitions are expected to be unique per value; when they are not (the
/// same document placed twice) the links fan out rather than guessing.
///
/// A pair is skipped when either end cannot report bounds or reports a
/// zero-width box (collapsed, hidden, or not yet laid out). Skips are silent;
/// the next run picks the pair up again once both ends are visible.
#[derive(Clone, Debug, Default)]
pub struct LinkReconciler {
    segments: Vec<ConnectionSegment>,
    stats: ReconcileStats,
    revision: u64,
}

impl LinkReconciler {
    /// Creates a reconciler with no published segments.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs one reconciliation and publishes the result.
    ///
    /// The published set is replaced as a whole; readers never see a mix of
    /// two runs.
    pub fn reconcile<B: BoundsSource + ?Sized>(
        &mut self,
        registry: &ReferenceRegistry,
        bounds: &B,
    ) -> &[ConnectionSegment] {
        let (segments, stats) = compute_segments(registry, bounds);
        self.segments = segments;
        self.stats = stats;
        self.revision = self.revision.wrapping_add(1);
        &self.segments
    }

    /// Segments published by the last run.
    #[must_use]
    pub fn segments(&self) -> &[ConnectionSegment] {
        &self.segments
    }

    /// Counters from the last run.
    #[must_use]
    pub fn stats(&self) -> ReconcileStats {
        self.stats
    }

    /// Number of runs so far. Bumps on every publish, changed or not.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Drops the published segments.
    pub fn clear(&mut self) {
        self.segments.clear();
        self.stats = ReconcileStats::default();
        self.revision = self.revision.wrapping_add(1);
    }
}

/// Computes segments without publishing them.
///
/// Output order: values ascending, then reference token, then definition token.
pub fn compute_segments<B: BoundsSource + ?Sized>(
    registry: &ReferenceRegistry,
    bounds: &B,
) -> (Vec<ConnectionSegment>, ReconcileStats) {
    let groups = registry.groups();
    let mut stats = ReconcileStats {
        entries: registry.len(),
        ..ReconcileStats::default()
    };
    let mut segments = Vec::new();
    // A definition usually pairs with several references; read each box once.
    let mut centers: HashMap<NodeToken, Option<Point>> = HashMap::new();
    let mut center_of = |token: NodeToken| {
        *centers
            .entry(token)
            .or_insert_with(|| visible_center(bounds, token))
    };

    for (value, group) in groups.iter().filter(|(_, g)| g.is_linkable()) {
        for &reference in &group.references {
            for &definition in &group.definitions {
                stats.candidate_pairs += 1;
                match (center_of(reference), center_of(definition)) {
                    (Some(start), Some(end)) => segments.push(ConnectionSegment {
                        start,
                        end,
                        value: String::from(*value),
                        reference,
                        definition,
                    }),
                    _ => stats.skipped += 1,
                }
            }
        }
    }
    stats.emitted = segments.len();
    (segments, stats)
}

fn visible_center<B: BoundsSource + ?Sized>(bounds: &B, token: NodeToken) -> Option<Point> {
    let rect = bounds.bounds(token).ok()?;
    (rect.width() > 0.0).then(|| rect.center())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Role;

    const OID: &str = "507f1f77bcf86cd799439011";

    fn row(x: f64, y: f64) -> Rect {
        Rect::new(x, y, x + 100.0, y + 20.0)
    }

    #[test]
    fn one_definition_three_references_gives_three_segments() {
        let mut registry = ReferenceRegistry::new();
        let mut bounds = HashMap::new();
        let def = registry.issue_token();
        registry.register(def, OID, Role::Definition);
        bounds.insert(def, row(0.0, 0.0));
        for i in 0..3 {
            let r = registry.issue_token();
            registry.register(r, OID, Role::Reference);
            bounds.insert(r, row(200.0, 50.0 * f64::from(i)));
        }

        let mut reconciler = LinkReconciler::new();
        let segments = reconciler.reconcile(&registry, &bounds);
        assert_eq!(segments.len(), 3);
        assert!(segments.iter().all(|s| s.end == Point::new(50.0, 10.0)));
        assert!(segments.iter().all(|s| s.definition == def));
    }

    #[test]
    fn no_definition_no_segments() {
        let mut registry = ReferenceRegistry::new();
        let mut bounds = HashMap::new();
        for i in 0..5 {
            let r = registry.issue_token();
            registry.register(r, OID, Role::Reference);
            bounds.insert(r, row(0.0, 30.0 * f64::from(i)));
        }
        let mut reconciler = LinkReconciler::new();
        assert!(reconciler.reconcile(&registry, &bounds).is_empty());
        assert_eq!(reconciler.stats().candidate_pairs, 0);
    }

    #[test]
    fn duplicate_definitions_fan_out() {
        let mut registry = ReferenceRegistry::new();
        let mut bounds = HashMap::new();
        for (i, role) in [Role::Definition, Role::Definition, Role::Reference, Role::Reference]
            .into_iter()
            .enumerate()
        {
            let t = registry.issue_token();
            registry.register(t, OID, role);
            bounds.insert(t, row(0.0, 40.0 * i as f64));
        }
        let (segments, stats) = compute_segments(&registry, &bounds);
        assert_eq!(segments.len(), 4);
        assert_eq!(stats.candidate_pairs, 4);
    }

    #[test]
    fn zero_width_and_detached_ends_are_skipped() {
        let mut registry = ReferenceRegistry::new();
        let mut bounds = HashMap::new();
        let def = registry.issue_token();
        let hidden = registry.issue_token();
        let detached = registry.issue_token();
        let shown = registry.issue_token();
        registry.register(def, OID, Role::Definition);
        registry.register(hidden, OID, Role::Reference);
        registry.register(detached, OID, Role::Reference);
        registry.register(shown, OID, Role::Reference);
        bounds.insert(def, row(0.0, 0.0));
        bounds.insert(hidden, Rect::new(10.0, 10.0, 10.0, 30.0));
        bounds.insert(shown, row(300.0, 0.0));

        let mut reconciler = LinkReconciler::new();
        let segments = reconciler.reconcile(&registry, &bounds);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].reference, shown);
        assert_eq!(
            reconciler.stats(),
            ReconcileStats {
                entries: 4,
                candidate_pairs: 3,
                emitted: 1,
                skipped: 2,
            }
        );
    }

    #[test]
    fn segments_are_replaced_wholesale() {
        let mut registry = ReferenceRegistry::new();
        let mut bounds = HashMap::new();
        let def = registry.issue_token();
        let r = registry.issue_token();
        registry.register(def, OID, Role::Definition);
        registry.register(r, OID, Role::Reference);
        bounds.insert(def, row(0.0, 0.0));
        bounds.insert(r, row(0.0, 100.0));

        let mut reconciler = LinkReconciler::new();
        assert_eq!(reconciler.reconcile(&registry, &bounds).len(), 1);
        let first = reconciler.revision();

        registry.unregister(r);
        assert!(reconciler.reconcile(&registry, &bounds).is_empty());
        assert!(reconciler.revision() > first);
    }

    #[test]
    fn output_order_is_deterministic() {
        let mut registry = ReferenceRegistry::new();
        let mut bounds = HashMap::new();
        let values = ["cccccccccccccccccccccccc", "aaaaaaaaaaaaaaaaaaaaaaaa"];
        for value in values {
            for role in [Role::Reference, Role::Definition] {
                let t = registry.issue_token();
                registry.register(t, value, role);
                bounds.insert(t, row(0.0, 0.0));
            }
        }
        let (segments, _) = compute_segments(&registry, &bounds);
        let order: Vec<&str> = segments.iter().map(|s| s.value.as_str()).collect();
        assert_eq!(order, ["aaaaaaaaaaaaaaaaaaaaaaaa", "cccccccccccccccccccccccc"]);
    }
}
