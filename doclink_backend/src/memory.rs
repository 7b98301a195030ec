// Copyright 2025 the Doclink Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::collections::BTreeMap;

use serde_json::Value;

use crate::backend::{DocumentBackend, require_listing};
use crate::error::BackendError;
use crate::object_id::ObjectId;
use crate::request::{CollectionInfo, CollectionRef, DatabaseInfo};

type Collections = BTreeMap<String, Vec<Value>>;

/// An in-process backend holding documents in memory.
///
/// Accepts exactly one connection string. Filters match top-level fields by
/// equality, where an identifier matches both its hex text and its
/// `{"$oid": ..}` form. Missing databases and collections read as empty.
#[derive(Clone, Debug)]
pub struct MemoryBackend {
    connection_string: String,
    databases: BTreeMap<String, Collections>,
}

impl MemoryBackend {
    /// Creates an empty backend reachable at `connection_string`.
    #[must_use]
    pub fn new(connection_string: impl Into<String>) -> Self {
        Self {
            connection_string: connection_string.into(),
            databases: BTreeMap::new(),
        }
    }

    /// The connection string this backend accepts.
    #[must_use]
    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }

    /// Reference to `database.collection` on this backend.
    #[must_use]
    pub fn collection_ref(&self, database: &str, collection: &str) -> CollectionRef {
        CollectionRef::new(&self.connection_string, database, collection)
    }

    /// Appends a document to a collection, creating both as needed.
    pub fn insert(&mut self, database: &str, collection: &str, document: Value) {
        self.databases
            .entry(database.to_owned())
            .or_default()
            .entry(collection.to_owned())
            .or_default()
            .push(document);
    }

    /// Builder form of [`insert`](Self::insert) for many documents.
    #[must_use]
    pub fn with_documents(
        mut self,
        database: &str,
        collection: &str,
        documents: impl IntoIterator<Item = Value>,
    ) -> Self {
        for doc in documents {
            self.insert(database, collection, doc);
        }
        self
    }

    fn check(&self, connection_string: &str) -> Result<(), BackendError> {
        if connection_string == self.connection_string {
            Ok(())
        } else {
            Err(BackendError::connection(format!(
                "no server at {connection_string}"
            )))
        }
    }
}

impl DocumentBackend for MemoryBackend {
    fn connect(&self, connection_string: &str) -> Result<(), BackendError> {
        require_listing(connection_string, None)?;
        self.check(connection_string)
    }

    fn list_databases(&self, connection_string: &str) -> Result<Vec<DatabaseInfo>, BackendError> {
        self.connect(connection_string)?;
        Ok(self
            .databases
            .iter()
            .map(|(name, collections)| DatabaseInfo {
                name: name.clone(),
                size_on_disk: collections
                    .values()
                    .flatten()
                    .map(|doc| doc.to_string().len() as u64)
                    .sum(),
            })
            .collect())
    }

    fn list_collections(
        &self,
        connection_string: &str,
        database: &str,
    ) -> Result<Vec<CollectionInfo>, BackendError> {
        require_listing(connection_string, Some(database))?;
        self.check(connection_string)?;
        Ok(self
            .databases
            .get(database)
            .into_iter()
            .flat_map(|collections| collections.keys())
            .map(|name| CollectionInfo { name: name.clone() })
            .collect())
    }

    fn find_raw(
        &self,
        target: &CollectionRef,
        filter: &Value,
        limit: usize,
    ) -> Result<Vec<Value>, BackendError> {
        self.check(&target.connection_string)?;
        let Value::Object(conditions) = filter else {
            return Err(BackendError::Status {
                status: 500,
                message: "filter must be a document".into(),
            });
        };
        let documents = self
            .databases
            .get(&target.database)
            .and_then(|collections| collections.get(&target.collection));
        Ok(documents
            .into_iter()
            .flatten()
            .filter(|doc| {
                conditions
                    .iter()
                    .all(|(key, expected)| doc.get(key).is_some_and(|v| field_matches(v, expected)))
            })
            .take(limit)
            .cloned()
            .collect())
    }
}

fn field_matches(actual: &Value, expected: &Value) -> bool {
    if actual == expected {
        return true;
    }
    match (ObjectId::from_value(actual), ObjectId::from_value(expected)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}
