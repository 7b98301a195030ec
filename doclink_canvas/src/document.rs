// Copyright 2025 the Doclink Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::borrow::Borrow;
use core::fmt;

use doclink_backend::{ID_FIELD, ObjectId};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Identity of a document on the canvas.
///
/// Usually the document's own `_id`. Canvas identity is unique, so a second
/// copy of the same document gets a suffixed id.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Wraps an id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// A fresh random id.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Reads the payload's `_id`: a string, a number, or `{"$oid": ..}`.
    #[must_use]
    pub fn from_payload(payload: &Value) -> Option<Self> {
        let id = payload.get(ID_FIELD)?;
        match id {
            Value::String(s) if !s.is_empty() => Some(Self(s.clone())),
            Value::Number(n) => Some(Self(n.to_string())),
            other => ObjectId::from_value(other).map(|oid| Self(oid.to_hex())),
        }
    }

    /// `self` with a short random suffix.
    #[must_use]
    pub fn with_random_suffix(&self) -> Self {
        let suffix = Uuid::new_v4().simple().to_string();
        Self(format!("{}-{}", self.0, &suffix[..8]))
    }

    /// The id text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for DocumentId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A document placed on the canvas.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedDocument {
    /// Canvas identity.
    pub id: DocumentId,
    /// The document itself.
    pub payload: Value,
    /// Top-left corner, canvas space.
    pub position: Point,
    /// Where the document came from, for display.
    pub collection_label: String,
}

impl PlacedDocument {
    /// Creates a placed document.
    #[must_use]
    pub fn new(
        id: DocumentId,
        payload: Value,
        position: Point,
        collection_label: impl Into<String>,
    ) -> Self {
        Self {
            id,
            payload,
            position,
            collection_label: collection_label.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn id_from_payload_spellings() {
        let oid = "507f1f77bcf86cd799439011";
        assert_eq!(DocumentId::from_payload(&json!({"_id": oid})).unwrap().as_str(), oid);
        assert_eq!(
            DocumentId::from_payload(&json!({"_id": {"$oid": oid}})).unwrap().as_str(),
            oid
        );
        assert_eq!(DocumentId::from_payload(&json!({"_id": 7})).unwrap().as_str(), "7");
        assert!(DocumentId::from_payload(&json!({"name": "x"})).is_none());
        assert!(DocumentId::from_payload(&json!({"_id": ""})).is_none());
        assert!(DocumentId::from_payload(&json!([1])).is_none());
    }

    #[test]
    fn random_ids_differ() {
        assert_ne!(DocumentId::random(), DocumentId::random());
        let base = DocumentId::new("abc");
        let suffixed = base.with_random_suffix();
        assert!(suffixed.as_str().starts_with("abc-"));
        assert_eq!(suffixed.as_str().len(), "abc-".len() + 8);
    }

    #[test]
    fn placed_document_wire_shape() {
        let doc = PlacedDocument::new(
            DocumentId::new("a"),
            json!({"_id": "a"}),
            Point::new(1.0, 2.0),
            "shop.users",
        );
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["id"], "a");
        assert_eq!(value["collectionLabel"], "shop.users");
        let back: PlacedDocument = serde_json::from_value(value).unwrap();
        assert_eq!(back, doc);
    }
}
