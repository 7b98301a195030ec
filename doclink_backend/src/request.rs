// Copyright 2025 the Doclink Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Request and response shapes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::BackendError;

/// Field holding a document's identity.
pub const ID_FIELD: &str = "_id";

/// Rows returned by a find when the caller gives no limit.
pub const DEFAULT_FETCH_LIMIT: usize = 10;

/// Documents sampled to build a collection's key list.
pub const SCHEMA_SAMPLE_SIZE: usize = 10;

/// One database visible through a connection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseInfo {
    /// Database name.
    pub name: String,
    /// Storage size reported by the server, in bytes.
    pub size_on_disk: u64,
}

/// One collection in a database.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionInfo {
    /// Collection name.
    pub name: String,
}

/// Field names seen in a sample of a collection, in first-seen order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaKeys {
    /// Top-level keys.
    pub keys: Vec<String>,
}

impl SchemaKeys {
    /// Unions the top-level keys of `documents`, keeping first-seen order.
    #[must_use]
    pub fn from_documents<'a>(documents: impl IntoIterator<Item = &'a Value>) -> Self {
        let mut keys: Vec<String> = Vec::new();
        for doc in documents {
            let Value::Object(fields) = doc else { continue };
            for key in fields.keys() {
                if !keys.iter().any(|k| k == key) {
                    keys.push(key.clone());
                }
            }
        }
        Self { keys }
    }
}

/// Where a collection lives.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionRef {
    /// Connection string of the server.
    pub connection_string: String,
    /// Database name.
    pub database: String,
    /// Collection name.
    pub collection: String,
}

impl CollectionRef {
    /// Creates a collection reference.
    #[must_use]
    pub fn new(
        connection_string: impl Into<String>,
        database: impl Into<String>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            connection_string: connection_string.into(),
            database: database.into(),
            collection: collection.into(),
        }
    }

    /// `database.collection`, used as a provenance label.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}.{}", self.database, self.collection)
    }
}

/// A find against one collection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindRequest {
    /// Connection string of the server.
    #[serde(default)]
    pub connection_string: String,
    /// Database name.
    #[serde(default)]
    pub database: String,
    /// Collection name.
    #[serde(default)]
    pub collection: String,
    /// Hard cap on returned documents.
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Filter document; an empty mapping matches everything.
    #[serde(default = "empty_query")]
    pub query: Value,
}

fn default_limit() -> usize {
    DEFAULT_FETCH_LIMIT
}

fn empty_query() -> Value {
    Value::Object(Map::new())
}

impl FindRequest {
    /// Finds everything in `target`, up to [`DEFAULT_FETCH_LIMIT`] documents.
    #[must_use]
    pub fn new(target: &CollectionRef) -> Self {
        Self {
            connection_string: target.connection_string.clone(),
            database: target.database.clone(),
            collection: target.collection.clone(),
            limit: DEFAULT_FETCH_LIMIT,
            query: empty_query(),
        }
    }

    /// Looks up the single document whose `_id` is `id`.
    #[must_use]
    pub fn by_id(target: &CollectionRef, id: &str) -> Self {
        let mut query = Map::new();
        query.insert(ID_FIELD.to_owned(), Value::String(id.to_owned()));
        Self::new(target)
            .with_limit(1)
            .with_query(Value::Object(query))
    }

    /// Sets the limit.
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Sets the filter.
    #[must_use]
    pub fn with_query(mut self, query: Value) -> Self {
        self.query = query;
        self
    }

    /// The collection this request targets.
    #[must_use]
    pub fn target(&self) -> CollectionRef {
        CollectionRef::new(&self.connection_string, &self.database, &self.collection)
    }

    /// Rejects requests missing a connection string, database, or collection.
    pub fn validate(&self) -> Result<(), BackendError> {
        require("connection string", &self.connection_string)?;
        require("database", &self.database)?;
        require("collection", &self.collection)
    }
}

pub(crate) fn require(what: &str, value: &str) -> Result<(), BackendError> {
    if value.trim().is_empty() {
        Err(BackendError::bad_request(format!("{what} is required")))
    } else {
        Ok(())
    }
}

/// Documents returned by a find.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FindResponse {
    /// Matching documents, at most `limit` of them.
    pub documents: Vec<Value>,
}
