// Copyright 2025 the Doclink Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed zoom controls drawn over the canvas.

use kurbo::{Point, Rect, Size};

const BUTTON: f64 = 32.0;
const GAP: f64 = 8.0;
const MARGIN: f64 = 16.0;
const PADDING: f64 = 6.0;

/// What a HUD button does.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HudAction {
    /// Zoom in one step about the view center.
    ZoomIn,
    /// Zoom out one step about the view center.
    ZoomOut,
    /// Zoom 1, pan 0.
    Reset,
}

/// One HUD button, screen space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HudButton {
    /// Action on press.
    pub action: HudAction,
    /// Hit and draw area.
    pub rect: Rect,
}

/// Zoom controls pinned to the bottom-right of the view.
///
/// The HUD is not transformed by the viewport. Any press inside its panel is
/// consumed, so clicking between buttons never starts a background pan.
#[derive(Clone, Debug)]
pub struct Hud {
    panel: Rect,
    buttons: [HudButton; 3],
}

impl Hud {
    /// Lays the HUD out for a view of `view_size`.
    #[must_use]
    pub fn new(view_size: Size) -> Self {
        let order = [HudAction::ZoomOut, HudAction::Reset, HudAction::ZoomIn];
        let right = view_size.width - MARGIN - PADDING;
        let top = view_size.height - MARGIN - PADDING - BUTTON;
        let left = right - 3.0 * BUTTON - 2.0 * GAP;
        let buttons = order.map(|action| {
            let slot = match action {
                HudAction::ZoomOut => 0.0,
                HudAction::Reset => 1.0,
                HudAction::ZoomIn => 2.0,
            };
            let x = left + slot * (BUTTON + GAP);
            HudButton {
                action,
                rect: Rect::new(x, top, x + BUTTON, top + BUTTON),
            }
        });
        let panel = Rect::new(left, top, right, top + BUTTON).inflate(PADDING, PADDING);
        Self { panel, buttons }
    }

    /// Whole HUD panel.
    #[must_use]
    pub fn panel(&self) -> Rect {
        self.panel
    }

    /// Buttons, left to right.
    #[must_use]
    pub fn buttons(&self) -> &[HudButton] {
        &self.buttons
    }

    /// Returns `true` if `screen_pt` is over the HUD.
    #[must_use]
    pub fn contains(&self, screen_pt: Point) -> bool {
        self.panel.contains(screen_pt)
    }

    /// The button under `screen_pt`.
    #[must_use]
    pub fn hit(&self, screen_pt: Point) -> Option<HudAction> {
        self.buttons
            .iter()
            .find(|b| b.rect.contains(screen_pt))
            .map(|b| b.action)
    }

    /// Zoom readout shown on the reset button, such as `150%`.
    #[must_use]
    pub fn zoom_label(zoom: f64) -> String {
        format!("{:.0}%", zoom * 100.0)
    }
}
