// Copyright 2025 the Doclink Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture ownership: one card drag or one background pan at a time.
//!
//! [`GestureState`] owns the pointer between a press and the matching release.
//! A gesture can only begin while nothing is active, so a press that starts a
//! card drag can never also start a pan. There is no cancel: the release is the
//! only terminating event and it ends the gesture exactly once.
//!
//! Card drags move the card by `(pointer - press) / zoom` from where the card
//! was at press time. Pans report raw screen-space deltas.

use kurbo::{Point, Vec2};

use crate::drag::DragState;

/// Pointer button that pressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Main (usually left) button.
    Primary,
    /// Wheel button.
    Middle,
    /// Context (usually right) button.
    Secondary,
}

impl PointerButton {
    /// Whether this button can grab a card by its handle.
    #[must_use]
    pub fn can_drag(self) -> bool {
        matches!(self, Self::Primary)
    }

    /// Whether this button can pan the background.
    #[must_use]
    pub fn can_pan(self) -> bool {
        matches!(self, Self::Primary | Self::Middle)
    }
}

/// Which gesture currently owns the pointer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ActiveGesture<K> {
    /// No gesture in progress.
    #[default]
    None,
    /// A card is being dragged by its handle.
    Drag(K),
    /// The background is being panned.
    Pan,
}

/// Result of a pointer move during a gesture.
#[derive(Clone, Debug, PartialEq)]
pub enum GestureUpdate<K> {
    /// The dragged card should be drawn at `position` (canvas space).
    Drag {
        /// Card being dragged.
        card: K,
        /// Provisional canvas-space position.
        position: Point,
    },
    /// The view should pan by `delta` (screen space).
    Pan {
        /// Screen-space movement since the previous move.
        delta: Vec2,
    },
}

/// Result of releasing the pointer.
#[derive(Clone, Debug, PartialEq)]
pub enum GestureEnd<K> {
    /// The card drag finished; `position` is the value to commit.
    DragCommitted {
        /// Card that was dragged.
        card: K,
        /// Final canvas-space position.
        position: Point,
    },
    /// The pan finished, after a last `delta` to apply.
    PanEnded {
        /// Screen-space movement since the previous move.
        delta: Vec2,
    },
}

/// Pointer gesture arbiter for one canvas.
#[derive(Clone, Debug)]
pub struct GestureState<K> {
    active: ActiveGesture<K>,
    drag: DragState,
}

impl<K> Default for GestureState<K> {
    fn default() -> Self {
        Self {
            active: ActiveGesture::None,
            drag: DragState::default(),
        }
    }
}

impl<K: Clone + PartialEq> GestureState<K> {
    /// Creates an idle arbiter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the active gesture.
    #[must_use]
    pub fn active(&self) -> &ActiveGesture<K> {
        &self.active
    }

    /// Returns `true` if no gesture is in progress.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.active == ActiveGesture::None
    }

    /// Returns the card being dragged, if any.
    #[must_use]
    pub fn dragged_card(&self) -> Option<&K> {
        match &self.active {
            ActiveGesture::Drag(card) => Some(card),
            _ => None,
        }
    }

    /// Starts dragging `card`, pressed at `press` (screen) while it sat at `origin` (canvas).
    ///
    /// Returns `false`, leaving state untouched, if another gesture is active or
    /// the button cannot drag.
    pub fn begin_drag(&mut self, card: K, button: PointerButton, press: Point, origin: Point) -> bool {
        if !self.is_idle() || !button.can_drag() {
            return false;
        }
        self.drag.grab(press, origin);
        self.active = ActiveGesture::Drag(card);
        true
    }

    /// Starts panning from `press` (screen).
    ///
    /// Returns `false`, leaving state untouched, if another gesture is active or
    /// the button cannot pan.
    pub fn begin_pan(&mut self, button: PointerButton, press: Point) -> bool {
        if !self.is_idle() || !button.can_pan() {
            return false;
        }
        self.drag.start(press);
        self.active = ActiveGesture::Pan;
        true
    }

    /// Feeds a pointer move at `pos` (screen) with the current `zoom`.
    pub fn on_move(&mut self, pos: Point, zoom: f64) -> Option<GestureUpdate<K>> {
        match &self.active {
            ActiveGesture::None => None,
            ActiveGesture::Drag(card) => {
                let card = card.clone();
                self.drag.update(pos);
                let position = self.drag.position_at(pos, zoom)?;
                Some(GestureUpdate::Drag { card, position })
            }
            ActiveGesture::Pan => {
                let delta = self.drag.update(pos)?;
                Some(GestureUpdate::Pan { delta })
            }
        }
    }

    /// Feeds the pointer release at `pos` (screen) with the current `zoom`.
    ///
    /// Ends the active gesture and returns what to commit. A release while
    /// idle returns `None`.
    pub fn on_release(&mut self, pos: Point, zoom: f64) -> Option<GestureEnd<K>> {
        let active = core::mem::replace(&mut self.active, ActiveGesture::None);
        let end = match active {
            ActiveGesture::None => None,
            ActiveGesture::Drag(card) => self
                .drag
                .position_at(pos, zoom)
                .map(|position| GestureEnd::DragCommitted { card, position }),
            ActiveGesture::Pan => {
                let delta = self.drag.update(pos).unwrap_or(Vec2::ZERO);
                Some(GestureEnd::PanEnded { delta })
            }
        };
        self.drag.end();
        end
    }

    /// Drops a drag whose card no longer exists without committing anything.
    ///
    /// Returns `true` if `card` was being dragged.
    pub fn forget_card(&mut self, card: &K) -> bool {
        if self.dragged_card() == Some(card) {
            self.active = ActiveGesture::None;
            self.drag.end();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_blocks_pan_and_second_drag() {
        let mut g = GestureState::new();
        assert!(g.begin_drag(1_u32, PointerButton::Primary, Point::ZERO, Point::ZERO));
        assert!(!g.begin_pan(PointerButton::Primary, Point::ZERO));
        assert!(!g.begin_drag(2, PointerButton::Primary, Point::ZERO, Point::ZERO));
        assert_eq!(g.active(), &ActiveGesture::Drag(1));
    }

    #[test]
    fn pan_blocks_drag() {
        let mut g = GestureState::new();
        assert!(g.begin_pan(PointerButton::Middle, Point::ZERO));
        assert!(!g.begin_drag(1_u32, PointerButton::Primary, Point::ZERO, Point::ZERO));
        assert_eq!(g.active(), &ActiveGesture::Pan);
    }

    #[test]
    fn buttons_are_filtered() {
        let mut g = GestureState::<u32>::new();
        assert!(!g.begin_drag(1, PointerButton::Middle, Point::ZERO, Point::ZERO));
        assert!(!g.begin_drag(1, PointerButton::Secondary, Point::ZERO, Point::ZERO));
        assert!(!g.begin_pan(PointerButton::Secondary, Point::ZERO));
        assert!(g.is_idle());
    }

    #[test]
    fn drag_moves_report_provisional_position() {
        let mut g = GestureState::new();
        g.begin_drag("a", PointerButton::Primary, Point::new(10.0, 10.0), Point::new(0.0, 0.0));
        let update = g.on_move(Point::new(30.0, 10.0), 0.5);
        assert_eq!(
            update,
            Some(GestureUpdate::Drag {
                card: "a",
                position: Point::new(40.0, 0.0)
            })
        );
    }

    #[test]
    fn pan_moves_report_incremental_deltas() {
        let mut g = GestureState::<u32>::new();
        g.begin_pan(PointerButton::Primary, Point::new(0.0, 0.0));
        assert_eq!(
            g.on_move(Point::new(4.0, 1.0), 3.0),
            Some(GestureUpdate::Pan {
                delta: Vec2::new(4.0, 1.0)
            })
        );
        assert_eq!(
            g.on_release(Point::new(6.0, 1.0), 3.0),
            Some(GestureEnd::PanEnded {
                delta: Vec2::new(2.0, 0.0)
            })
        );
        assert!(g.is_idle());
    }

    #[test]
    fn release_ends_exactly_once() {
        let mut g = GestureState::new();
        g.begin_drag(9_u32, PointerButton::Primary, Point::ZERO, Point::new(1.0, 1.0));
        assert!(g.on_release(Point::new(1.0, 0.0), 1.0).is_some());
        assert_eq!(g.on_release(Point::new(1.0, 0.0), 1.0), None);
        assert_eq!(g.on_move(Point::new(2.0, 0.0), 1.0), None);
    }

    #[test]
    fn forget_card_only_drops_matching_drag() {
        let mut g = GestureState::new();
        g.begin_drag(3_u32, PointerButton::Primary, Point::ZERO, Point::ZERO);
        assert!(!g.forget_card(&4));
        assert!(g.forget_card(&3));
        assert!(g.is_idle());
    }
}
