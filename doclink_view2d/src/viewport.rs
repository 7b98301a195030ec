// Copyright 2025 the Doclink Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Smallest zoom factor a [`Viewport`] allows by default.
pub const DEFAULT_MIN_ZOOM: f64 = 0.1;
/// Largest zoom factor a [`Viewport`] allows by default.
pub const DEFAULT_MAX_ZOOM: f64 = 5.0;
/// Zoom change per unit of wheel delta.
pub const DEFAULT_ZOOM_SENSITIVITY: f64 = 0.001;

/// Persistable pan/zoom pair.
///
/// This is what a saved canvas stores; it carries no limits or view size.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportState {
    /// Translation of the canvas origin onto the screen, in screen pixels.
    pub pan: Vec2,
    /// Uniform zoom factor.
    pub zoom: f64,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            pan: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

/// Pan/zoom camera over the unbounded canvas plane.
///
/// `Viewport` maps canvas-space coordinates (where documents live) into
/// screen space (where the pointer and the connection overlay live):
/// `screen = canvas * zoom + pan`.
#[derive(Clone, Debug)]
pub struct Viewport {
    view_size: Size,
    zoom: f64,
    pan: Vec2,
    min_zoom: f64,
    max_zoom: f64,
    sensitivity: f64,
    canvas_to_screen: Affine,
    screen_to_canvas: Affine,
}

impl Viewport {
    /// Creates a new viewport for a drawing surface of `view_size` pixels.
    ///
    /// - Initial zoom is `1.0`.
    /// - Initial pan is zero (canvas origin maps to the surface's top-left corner).
    /// - Zoom is clamped to `[DEFAULT_MIN_ZOOM, DEFAULT_MAX_ZOOM]`.
    #[must_use]
    pub fn new(view_size: Size) -> Self {
        let mut vp = Self {
            view_size,
            zoom: 1.0,
            pan: Vec2::ZERO,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            sensitivity: DEFAULT_ZOOM_SENSITIVITY,
            canvas_to_screen: Affine::IDENTITY,
            screen_to_canvas: Affine::IDENTITY,
        };
        vp.rebuild_transforms();
        vp
    }

    /// Returns the size of the drawing surface in screen pixels.
    #[must_use]
    pub fn view_size(&self) -> Size {
        self.view_size
    }

    /// Sets the size of the drawing surface.
    ///
    /// Pan and zoom are unchanged; only the visible canvas region moves.
    pub fn set_view_size(&mut self, size: Size) {
        self.view_size = size;
    }

    /// Returns the current uniform zoom factor.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Returns the current pan offset in screen pixels.
    #[must_use]
    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    /// Returns the zoom change applied per unit of zoom delta.
    #[must_use]
    pub fn sensitivity(&self) -> f64 {
        self.sensitivity
    }

    /// Sets the zoom change applied per unit of zoom delta.
    pub fn set_sensitivity(&mut self, sensitivity: f64) {
        self.sensitivity = sensitivity.abs();
    }

    /// Returns the `(min, max)` zoom limits.
    #[must_use]
    pub fn zoom_limits(&self) -> (f64, f64) {
        (self.min_zoom, self.max_zoom)
    }

    /// Sets the minimum and maximum zoom factors.
    ///
    /// The provided range is normalized so that `min_zoom <= max_zoom`. The
    /// current zoom is clamped into the new range.
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        let (min_zoom, max_zoom) = if min_zoom <= max_zoom {
            (min_zoom, max_zoom)
        } else {
            (max_zoom, min_zoom)
        };
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.set_zoom(self.zoom);
    }

    /// Sets the zoom factor, clamping it into the configured zoom range.
    ///
    /// Pan is left alone, so this zooms about the canvas origin's screen point.
    pub fn set_zoom(&mut self, zoom: f64) {
        let clamped = zoom.clamp(self.min_zoom, self.max_zoom);
        if (self.zoom - clamped).abs() < f64::EPSILON {
            return;
        }
        self.zoom = clamped;
        self.rebuild_transforms();
    }

    /// Pans the view by a delta in screen space. Unclamped.
    pub fn pan_by(&mut self, delta: Vec2) {
        if delta == Vec2::ZERO {
            return;
        }
        self.pan += delta;
        self.rebuild_transforms();
    }

    /// Adds `delta_zoom * sensitivity` to the zoom, keeping `screen_pt` fixed.
    ///
    /// The canvas point under `screen_pt` before the change is still under it
    /// afterwards:
    /// `new_pan = screen_pt - (screen_pt - old_pan) * (new_zoom / old_zoom)`.
    ///
    /// Positive deltas zoom in.
    pub fn apply_zoom_at(&mut self, screen_pt: Point, delta_zoom: f64) {
        let target = self.zoom + delta_zoom * self.sensitivity;
        self.zoom_to_at(screen_pt, target);
    }

    /// Applies a wheel event at `screen_pt`.
    ///
    /// Wheel deltas follow the usual convention where scrolling up (toward the
    /// user's screen top) is negative, so the delta is negated: wheel up zooms in.
    pub fn wheel_at(&mut self, screen_pt: Point, wheel_delta_y: f64) {
        self.apply_zoom_at(screen_pt, -wheel_delta_y);
    }

    /// Changes zoom by a fixed `step`, anchored at the center of the view.
    ///
    /// This is what zoom buttons use; the step is not scaled by sensitivity.
    pub fn zoom_by_step(&mut self, step: f64) {
        let center = self.view_size.to_rect().center();
        self.zoom_to_at(center, self.zoom + step);
    }

    /// Sets the zoom to `target` (clamped) while keeping `screen_pt` fixed.
    pub fn zoom_to_at(&mut self, screen_pt: Point, target: f64) {
        let old_zoom = self.zoom;
        let new_zoom = target.clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - old_zoom).abs() < f64::EPSILON {
            return;
        }
        let anchor = screen_pt.to_vec2();
        self.pan = anchor - (anchor - self.pan) * (new_zoom / old_zoom);
        self.zoom = new_zoom;
        self.rebuild_transforms();
    }

    /// Resets to zero pan and unit zoom.
    pub fn reset(&mut self) {
        self.pan = Vec2::ZERO;
        self.zoom = 1.0;
        self.rebuild_transforms();
    }

    /// Returns the persistable pan/zoom pair.
    #[must_use]
    pub fn state(&self) -> ViewportState {
        ViewportState {
            pan: self.pan,
            zoom: self.zoom,
        }
    }

    /// Restores a saved pan/zoom pair. The zoom is clamped into the current limits.
    pub fn restore(&mut self, state: ViewportState) {
        self.pan = state.pan;
        self.zoom = state.zoom.clamp(self.min_zoom, self.max_zoom);
        self.rebuild_transforms();
    }

    /// Canvas → screen transform, for drawing the content layer.
    #[must_use]
    pub fn transform(&self) -> Affine {
        self.canvas_to_screen
    }

    /// Converts a canvas-space point into screen coordinates.
    #[must_use]
    pub fn to_screen(&self, canvas_pt: Point) -> Point {
        self.canvas_to_screen * canvas_pt
    }

    /// Converts a screen-space point into canvas coordinates.
    #[must_use]
    pub fn to_canvas(&self, screen_pt: Point) -> Point {
        self.screen_to_canvas * screen_pt
    }

    /// Converts a canvas-space rectangle into screen coordinates.
    #[must_use]
    pub fn to_screen_rect(&self, rect: Rect) -> Rect {
        // Zoom is uniform and positive, so mapping two corners is enough.
        Rect::from_points(
            self.to_screen(rect.origin()),
            self.to_screen(Point::new(rect.x1, rect.y1)),
        )
    }

    /// Converts a screen-space rectangle into canvas coordinates.
    #[must_use]
    pub fn to_canvas_rect(&self, rect: Rect) -> Rect {
        Rect::from_points(
            self.to_canvas(rect.origin()),
            self.to_canvas(Point::new(rect.x1, rect.y1)),
        )
    }

    /// Returns the canvas-space rectangle currently visible on screen.
    #[must_use]
    pub fn visible_canvas_rect(&self) -> Rect {
        self.to_canvas_rect(self.view_size.to_rect())
    }

    /// Suggests a “nice” grid spacing in canvas units for the current zoom.
    ///
    /// The returned value is chosen so that grid lines appear roughly tens of
    /// pixels apart (using a 1‑2‑5 ladder), with `base` treated as a lower
    /// bound on the spacing in canvas units.
    #[must_use]
    pub fn suggest_grid_spacing(&self, base: f64) -> f64 {
        let base = base.abs().max(f64::MIN_POSITIVE);
        let target_px = 64.0_f64;
        let mut desired = target_px / self.zoom;
        if desired < base {
            desired = base;
        }

        let mut unit = 1.0_f64;
        while unit * 10.0 <= desired {
            unit *= 10.0;
        }

        loop {
            for m in [1.0_f64, 2.0, 5.0, 10.0] {
                let step = m * unit;
                if step >= desired {
                    return step;
                }
            }
            unit *= 10.0;
        }
    }

    /// Snapshot of the current viewport state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> ViewportDebugInfo {
        ViewportDebugInfo {
            view_size: self.view_size,
            visible_canvas_rect: self.visible_canvas_rect(),
            zoom: self.zoom,
            pan: self.pan,
            min_zoom: self.min_zoom,
            max_zoom: self.max_zoom,
            sensitivity: self.sensitivity,
        }
    }

    fn rebuild_transforms(&mut self) {
        // Canvas → screen: scale, then translate by pan.
        self.canvas_to_screen = Affine::translate(self.pan) * Affine::scale(self.zoom);
        self.screen_to_canvas = self.canvas_to_screen.inverse();
    }
}

/// Debug snapshot of a [`Viewport`] state.
#[derive(Clone, Copy, Debug)]
pub struct ViewportDebugInfo {
    /// Drawing surface size in screen pixels.
    pub view_size: Size,
    /// Canvas-space rectangle currently visible.
    pub visible_canvas_rect: Rect,
    /// Current uniform zoom factor.
    pub zoom: f64,
    /// Current pan offset in screen pixels.
    pub pan: Vec2,
    /// Minimum zoom factor.
    pub min_zoom: f64,
    /// Maximum zoom factor.
    pub max_zoom: f64,
    /// Zoom change per unit of delta.
    pub sensitivity: f64,
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Size, Vec2};

    use super::{Viewport, ViewportState};

    fn view() -> Viewport {
        Viewport::new(Size::new(800.0, 600.0))
    }

    #[test]
    fn screen_canvas_roundtrip() {
        let mut vp = view();
        vp.pan_by(Vec2::new(35.0, -12.0));
        vp.set_zoom(2.5);

        let canvas_pt = Point::new(10.0, -5.0);
        let screen_pt = vp.to_screen(canvas_pt);
        assert!((screen_pt.x - (10.0 * 2.5 + 35.0)).abs() < 1e-9);
        assert!((screen_pt.y - (-5.0 * 2.5 - 12.0)).abs() < 1e-9);

        let back = vp.to_canvas(screen_pt);
        assert!((back.x - canvas_pt.x).abs() < 1e-9);
        assert!((back.y - canvas_pt.y).abs() < 1e-9);
    }

    #[test]
    fn zoom_at_cursor_keeps_cursor_fixed() {
        let mut vp = view();
        vp.pan_by(Vec2::new(40.0, 20.0));
        let cursor = Point::new(310.0, 122.0);
        let before = vp.to_canvas(cursor);

        vp.apply_zoom_at(cursor, 750.0);
        assert!((vp.zoom() - 1.75).abs() < 1e-9);

        let after = vp.to_canvas(cursor);
        assert!((after.x - before.x).abs() < 1e-9);
        assert!((after.y - before.y).abs() < 1e-9);
    }

    #[test]
    fn pan_formula_matches_closed_form() {
        let mut vp = view();
        vp.pan_by(Vec2::new(10.0, 30.0));
        let p = Point::new(100.0, 50.0);
        vp.apply_zoom_at(p, 1000.0);

        // new_pan = p - (p - old_pan) * (2 / 1)
        assert!((vp.pan().x - (100.0 - 90.0 * 2.0)).abs() < 1e-9);
        assert!((vp.pan().y - (50.0 - 20.0 * 2.0)).abs() < 1e-9);
    }

    #[test]
    fn wheel_up_zooms_in() {
        let mut vp = view();
        vp.wheel_at(Point::new(5.0, 5.0), -100.0);
        assert!(vp.zoom() > 1.0);
        vp.wheel_at(Point::new(5.0, 5.0), 300.0);
        assert!(vp.zoom() < 1.0);
    }

    #[test]
    fn zoom_is_clamped_and_clamped_zoom_leaves_pan_alone() {
        let mut vp = view();
        vp.apply_zoom_at(Point::new(1.0, 1.0), 1.0e6);
        assert_eq!(vp.zoom(), 5.0);
        let pan = vp.pan();
        vp.apply_zoom_at(Point::new(400.0, 300.0), 10.0);
        assert_eq!(vp.pan(), pan);

        vp.apply_zoom_at(Point::new(1.0, 1.0), -1.0e6);
        assert_eq!(vp.zoom(), 0.1);
    }

    #[test]
    fn step_zoom_anchors_at_view_center() {
        let mut vp = view();
        let center = Point::new(400.0, 300.0);
        let before = vp.to_canvas(center);
        vp.zoom_by_step(0.1);
        assert!((vp.zoom() - 1.1).abs() < 1e-9);
        let after = vp.to_canvas(center);
        assert!((after - before).hypot() < 1e-9);
    }

    #[test]
    fn reset_restores_identity() {
        let mut vp = view();
        vp.pan_by(Vec2::new(-300.0, 99.0));
        vp.set_zoom(3.0);
        vp.reset();
        assert_eq!(vp.state(), ViewportState::default());
        assert_eq!(vp.to_screen(Point::new(7.0, 8.0)), Point::new(7.0, 8.0));
    }

    #[test]
    fn restore_clamps_zoom() {
        let mut vp = view();
        vp.restore(ViewportState {
            pan: Vec2::new(5.0, 6.0),
            zoom: 40.0,
        });
        assert_eq!(vp.zoom(), 5.0);
        assert_eq!(vp.pan(), Vec2::new(5.0, 6.0));
    }

    #[test]
    fn visible_rect_follows_pan_and_zoom() {
        let mut vp = view();
        vp.set_zoom(2.0);
        vp.pan_by(Vec2::new(-200.0, -100.0));
        let visible = vp.visible_canvas_rect();
        assert!((visible.x0 - 100.0).abs() < 1e-9);
        assert!((visible.y0 - 50.0).abs() < 1e-9);
        assert!((visible.width() - 400.0).abs() < 1e-9);
        assert!((visible.height() - 300.0).abs() < 1e-9);

        let screen = vp.to_screen_rect(Rect::new(100.0, 50.0, 110.0, 60.0));
        assert!((screen.x0).abs() < 1e-9);
        assert!((screen.width() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn grid_spacing_tracks_zoom() {
        let mut vp = view();
        let base = 20.0;
        let s0 = vp.suggest_grid_spacing(base);
        assert!(s0 >= base);

        vp.set_zoom(5.0);
        let s1 = vp.suggest_grid_spacing(base);
        assert!(s1 <= s0);

        vp.set_zoom(0.1);
        let s2 = vp.suggest_grid_spacing(base);
        assert!(s2 >= s0);

        let info = vp.debug_info();
        assert!(info.min_zoom <= info.max_zoom);
    }
}
