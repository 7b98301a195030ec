// Copyright 2025 the Doclink Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use chrono::{DateTime, Utc};
use doclink_view2d::ViewportState;
use serde::{Deserialize, Serialize};

use crate::document::PlacedDocument;

/// A saved canvas: documents, view, and when it was taken.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasSnapshot {
    /// Placed documents in draw order.
    pub documents: Vec<PlacedDocument>,
    /// Pan and zoom.
    pub viewport: ViewportState,
    /// Time of the save.
    pub saved_at: DateTime<Utc>,
}

/// Listing entry for a saved canvas.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlobInfo {
    /// Name the canvas was saved under.
    pub name: String,
    /// Time of the save.
    pub saved_at: DateTime<Utc>,
}

impl BlobInfo {
    /// Listing entry for `snapshot` saved as `name`.
    #[must_use]
    pub fn of(name: impl Into<String>, snapshot: &CanvasSnapshot) -> Self {
        Self {
            name: name.into(),
            saved_at: snapshot.saved_at,
        }
    }
}

/// Sorts newest first, then by name.
pub(crate) fn sort_newest_first(infos: &mut [BlobInfo]) {
    infos.sort_by(|a, b| b.saved_at.cmp(&a.saved_at).then_with(|| a.name.cmp(&b.name)));
}
