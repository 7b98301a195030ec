// Copyright 2025 the Doclink Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use doclink_backend::BackendError;
use doclink_value::NodeKey;

use crate::document::DocumentId;

/// Failure of a [`CanvasStore`](crate::CanvasStore) call.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// A snapshot could not be encoded or decoded.
    #[error("snapshot encoding error: {0}")]
    Serialize(#[from] serde_json::Error),
    /// No blob is saved under this name.
    #[error("no saved canvas named {name:?}")]
    NotFound {
        /// Requested name.
        name: String,
    },
    /// The name cannot be used as a key.
    #[error("invalid canvas name {name:?}")]
    InvalidName {
        /// Rejected name.
        name: String,
    },
}

/// Failure to read a [`CanvasConfig`](crate::CanvasConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The TOML text did not parse.
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// A value is out of range.
    #[error("invalid config value for `{field}`: {message}")]
    Invalid {
        /// Offending field.
        field: &'static str,
        /// What is wrong with it.
        message: String,
    },
}

/// Failure of a [`CanvasSurface`](crate::CanvasSurface) operation.
///
/// None of these leave the canvas half-updated: documents and the viewport
/// are unchanged when an operation fails.
#[derive(Debug, thiserror::Error)]
pub enum CanvasError {
    /// No placed document has this id.
    #[error("no document {0} on the canvas")]
    UnknownDocument(DocumentId),
    /// The node is not a collapsible section.
    #[error("{0} is not a collapsible section")]
    NotCollapsible(NodeKey),
    /// A reference lookup found nothing.
    #[error("no document with _id {value} in {collection}")]
    ReferenceNotFound {
        /// Identifier looked up.
        value: String,
        /// `database.collection` searched.
        collection: String,
    },
    /// Persistence failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The backend call failed.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl CanvasError {
    /// Text shown in the canvas's inline error banner.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Backend(err) => err.message().to_owned(),
            other => other.to_string(),
        }
    }
}
