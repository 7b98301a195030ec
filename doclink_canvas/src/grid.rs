// Copyright 2025 the Doclink Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use doclink_view2d::Viewport;
use kurbo::Point;

/// Background grid lines for the current view, in screen space.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridLines {
    /// Line spacing in screen pixels.
    pub spacing: f64,
    /// X of each vertical line.
    pub vertical: Vec<f64>,
    /// Y of each horizontal line.
    pub horizontal: Vec<f64>,
}

/// Grid lines covering the view, at least `base` canvas units apart.
///
/// Lines sit on multiples of the spacing in canvas space, so they move with
/// pan and zoom like the documents do.
#[must_use]
pub fn grid_lines(viewport: &Viewport, base: f64) -> GridLines {
    let step = viewport.suggest_grid_spacing(base);
    let visible = viewport.visible_canvas_rect();
    let lines = |from: f64, to: f64, screen: &dyn Fn(f64) -> f64| -> Vec<f64> {
        let mut out = Vec::new();
        let mut at = (from / step).floor() * step;
        while at <= to {
            out.push(screen(at));
            at += step;
        }
        out
    };
    GridLines {
        spacing: step * viewport.zoom(),
        vertical: lines(visible.x0, visible.x1, &|x| viewport.to_screen(Point::new(x, 0.0)).x),
        horizontal: lines(visible.y0, visible.y1, &|y| viewport.to_screen(Point::new(0.0, y)).y),
    }
}
