// Copyright 2025 the Doclink Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use doclink_view2d::{DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, DEFAULT_ZOOM_SENSITIVITY, Viewport};
use kurbo::{Size, Vec2};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tunables for a [`CanvasSurface`](crate::CanvasSurface).
///
/// Every field has a default, so a TOML file only needs the fields it
/// changes:
///
/// ```toml
/// max_zoom = 3.0
/// card_width = 400.0
/// clone_offset = { x = 40.0, y = 40.0 }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Smallest zoom factor.
    pub min_zoom: f64,
    /// Largest zoom factor.
    pub max_zoom: f64,
    /// Zoom change per unit of wheel delta.
    pub zoom_sensitivity: f64,
    /// Zoom change per HUD button press.
    pub zoom_step: f64,
    /// Milliseconds between link reconciliations.
    pub reconcile_interval_ms: u64,
    /// Card width, canvas units.
    pub card_width: f64,
    /// Height of the drag handle band at the top of a card.
    pub header_height: f64,
    /// Height of one field row.
    pub row_height: f64,
    /// Horizontal indent per nesting level.
    pub indent: f64,
    /// Smallest grid spacing, canvas units.
    pub grid_base: f64,
    /// Offset of a clone from its source.
    pub clone_offset: Vec2,
    /// Offset between successive documents placed by one query.
    pub cascade_offset: Vec2,
    /// Horizontal gap between a card and a document opened from one of its references.
    pub reference_gap: f64,
    /// Initial drawing surface width, screen pixels.
    pub view_width: f64,
    /// Initial drawing surface height, screen pixels.
    pub view_height: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            zoom_sensitivity: DEFAULT_ZOOM_SENSITIVITY,
            zoom_step: 0.1,
            reconcile_interval_ms: 16,
            card_width: 320.0,
            header_height: 28.0,
            row_height: 20.0,
            indent: 14.0,
            grid_base: 20.0,
            clone_offset: Vec2::new(24.0, 24.0),
            cascade_offset: Vec2::new(32.0, 32.0),
            reference_gap: 80.0,
            view_width: 1280.0,
            view_height: 800.0,
        }
    }
}

impl CanvasConfig {
    /// Parses and validates a TOML config.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that sizes are positive and the zoom range is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    message: format!("must be a positive number, got {value}"),
                })
            }
        }
        positive("min_zoom", self.min_zoom)?;
        positive("max_zoom", self.max_zoom)?;
        if self.min_zoom > self.max_zoom {
            return Err(ConfigError::Invalid {
                field: "min_zoom",
                message: format!("{} exceeds max_zoom {}", self.min_zoom, self.max_zoom),
            });
        }
        positive("zoom_sensitivity", self.zoom_sensitivity)?;
        positive("zoom_step", self.zoom_step)?;
        positive("card_width", self.card_width)?;
        positive("header_height", self.header_height)?;
        positive("row_height", self.row_height)?;
        positive("grid_base", self.grid_base)?;
        positive("view_width", self.view_width)?;
        positive("view_height", self.view_height)
    }

    /// Initial drawing surface size.
    #[must_use]
    pub fn view_size(&self) -> Size {
        Size::new(self.view_width, self.view_height)
    }

    /// Time between link reconciliations.
    #[must_use]
    pub fn reconcile_interval(&self) -> Duration {
        Duration::from_millis(self.reconcile_interval_ms)
    }

    /// A viewport with this config's zoom limits and sensitivity.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        let mut viewport = Viewport::new(self.view_size());
        viewport.set_zoom_limits(self.min_zoom, self.max_zoom);
        viewport.set_sensitivity(self.zoom_sensitivity);
        viewport
    }
}
