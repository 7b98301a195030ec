// Copyright 2025 the Doclink Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag state helper: compute movement deltas and anchored positions from pointer moves.
//!
//! ## Usage
//!
//! 1) Start a drag with [`DragState::start`] (pointer only) or [`DragState::grab`]
//!    (pointer plus the canvas position of the grabbed object).
//! 2) On each move event, call [`DragState::update`] to get the movement delta since the
//!    last update, or [`DragState::position_at`] to get the grabbed object's new position.
//! 3) End the drag with [`DragState::end`] to reset state.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use doclink_event_state::drag::DragState;
//!
//! let mut drag = DragState::default();
//!
//! // Grab an object at canvas (50, 50) with the pointer at screen (10, 20).
//! drag.grab(Point::new(10.0, 20.0), Point::new(50.0, 50.0));
//! assert!(drag.is_dragging());
//!
//! // At zoom 0.5 a 5 pixel move is 10 canvas units.
//! let pos = drag.position_at(Point::new(15.0, 25.0), 0.5).unwrap();
//! assert_eq!(pos, Point::new(60.0, 60.0));
//! ```

use kurbo::{Point, Vec2};

/// Tracks drag state for move event processing
#[derive(Debug, Clone, Default, Copy)]
pub struct DragState {
    /// Pointer position where the drag started, in screen space
    pub start_pos: Option<Point>,
    /// Last recorded pointer position during drag
    pub last_pos: Option<Point>,
    /// Canvas-space position of the grabbed object at press time
    pub origin: Option<Point>,
}

impl DragState {
    /// Start tracking a new drag operation from the given position.
    pub fn start(&mut self, pos: Point) {
        self.start_pos = Some(pos);
        self.last_pos = Some(pos);
        self.origin = None;
    }

    /// Start dragging an object that sat at `origin` (canvas space) when grabbed at `pos`.
    pub fn grab(&mut self, pos: Point, origin: Point) {
        self.start(pos);
        self.origin = Some(origin);
    }

    /// Update the drag state with a new position, returning the movement delta since last update.
    pub fn update(&mut self, pos: Point) -> Option<Vec2> {
        if self.start_pos.is_some() {
            if let Some(last_pos) = self.last_pos {
                let delta = pos - last_pos;
                self.last_pos = Some(pos);
                Some(delta)
            } else {
                self.last_pos = Some(pos);
                None
            }
        } else {
            None
        }
    }

    /// Get total offset from drag start position.
    pub fn total_offset(&self, current_pos: Point) -> Option<Vec2> {
        self.start_pos.map(|start_pos| current_pos - start_pos)
    }

    /// Position of the grabbed object for the pointer at `current_pos`.
    ///
    /// This is `origin + (current_pos - start_pos) / zoom`. It depends only on
    /// the press and the current pointer, never on intermediate moves.
    /// Returns `None` unless the drag was started with [`DragState::grab`] or
    /// `zoom` is not positive.
    pub fn position_at(&self, current_pos: Point, zoom: f64) -> Option<Point> {
        if zoom <= 0.0 {
            return None;
        }
        let origin = self.origin?;
        let offset = self.total_offset(current_pos)?;
        Some(origin + offset / zoom)
    }

    /// End the current drag operation and reset state.
    pub fn end(&mut self) {
        self.start_pos = None;
        self.last_pos = None;
        self.origin = None;
    }

    /// Returns `true` while a drag operation is active
    pub fn is_dragging(&self) -> bool {
        self.start_pos.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_drag_state_is_not_dragging() {
        let drag = DragState::default();
        assert!(!drag.is_dragging());
        assert!(drag.origin.is_none());
    }

    #[test]
    fn update_returns_incremental_deltas() {
        let mut drag = DragState::default();
        drag.start(Point::new(0.0, 0.0));

        assert_eq!(drag.update(Point::new(5.0, 3.0)), Some(Vec2::new(5.0, 3.0)));
        assert_eq!(drag.update(Point::new(8.0, 7.0)), Some(Vec2::new(3.0, 4.0)));
        assert_eq!(drag.update(Point::new(8.0, 7.0)), Some(Vec2::ZERO));
    }

    #[test]
    fn update_returns_none_when_not_dragging() {
        let mut drag = DragState::default();
        assert_eq!(drag.update(Point::new(15.0, 25.0)), None);
        assert!(drag.last_pos.is_none());
    }

    #[test]
    fn position_requires_grab() {
        let mut drag = DragState::default();
        drag.start(Point::new(1.0, 1.0));
        assert_eq!(drag.position_at(Point::new(3.0, 3.0), 1.0), None);
    }

    #[test]
    fn position_is_scaled_by_zoom() {
        let mut drag = DragState::default();
        drag.grab(Point::new(100.0, 100.0), Point::new(10.0, 20.0));

        assert_eq!(
            drag.position_at(Point::new(140.0, 80.0), 2.0),
            Some(Point::new(30.0, 10.0))
        );
        assert_eq!(
            drag.position_at(Point::new(140.0, 80.0), 1.0),
            Some(Point::new(50.0, 0.0))
        );
        assert_eq!(drag.position_at(Point::new(140.0, 80.0), 0.0), None);
    }

    #[test]
    fn position_ignores_intermediate_updates() {
        let mut drag = DragState::default();
        drag.grab(Point::new(0.0, 0.0), Point::new(5.0, 5.0));
        drag.update(Point::new(300.0, -40.0));
        drag.update(Point::new(-12.0, 9.0));

        assert_eq!(
            drag.position_at(Point::new(10.0, 10.0), 1.0),
            Some(Point::new(15.0, 15.0))
        );
    }

    #[test]
    fn start_after_grab_forgets_origin() {
        let mut drag = DragState::default();
        drag.grab(Point::new(0.0, 0.0), Point::new(5.0, 5.0));
        drag.start(Point::new(50.0, 60.0));

        assert!(drag.origin.is_none());
        assert_eq!(
            drag.total_offset(Point::new(55.0, 65.0)),
            Some(Vec2::new(5.0, 5.0))
        );
    }

    #[test]
    fn end_resets_drag_state() {
        let mut drag = DragState::default();
        drag.grab(Point::new(10.0, 20.0), Point::ZERO);
        drag.update(Point::new(15.0, 25.0));

        drag.end();

        assert!(!drag.is_dragging());
        assert!(drag.last_pos.is_none());
        assert!(drag.origin.is_none());
    }
}
