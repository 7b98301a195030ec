// Copyright 2025 the Doclink Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use serde_json::{Map, Value};

use crate::error::BackendError;
use crate::object_id::translate_query;
use crate::request::{
    CollectionInfo, CollectionRef, DatabaseInfo, FindRequest, FindResponse, SCHEMA_SAMPLE_SIZE,
    SchemaKeys, require,
};

/// A stateless proxy to a document database.
///
/// Implementors supply the raw driver calls. The provided methods layer on
/// the request rules every backend shares: required fields, the hard result
/// cap, and `_id` text-to-identifier translation.
///
/// Calls are synchronous and are made explicitly by a host, never from input
/// handling.
pub trait DocumentBackend {
    /// Checks that `connection_string` reaches a server that accepts it.
    fn connect(&self, connection_string: &str) -> Result<(), BackendError>;

    /// Lists databases on the server.
    fn list_databases(&self, connection_string: &str) -> Result<Vec<DatabaseInfo>, BackendError>;

    /// Lists collections in `database`.
    fn list_collections(
        &self,
        connection_string: &str,
        database: &str,
    ) -> Result<Vec<CollectionInfo>, BackendError>;

    /// Runs a find that has already been validated and translated.
    ///
    /// Implementations may return more than `limit` rows; callers truncate.
    fn find_raw(
        &self,
        target: &CollectionRef,
        filter: &Value,
        limit: usize,
    ) -> Result<Vec<Value>, BackendError>;

    /// Union of field names over the first few documents of a collection.
    fn fetch_schema(
        &self,
        connection_string: &str,
        database: &str,
        collection: &str,
    ) -> Result<SchemaKeys, BackendError> {
        let target = CollectionRef::new(connection_string, database, collection);
        FindRequest::new(&target).validate()?;
        let mut sample = self.find_raw(&target, &Value::Object(Map::new()), SCHEMA_SAMPLE_SIZE)?;
        sample.truncate(SCHEMA_SAMPLE_SIZE);
        Ok(SchemaKeys::from_documents(&sample))
    }

    /// Validates, translates, and runs `request`, returning at most `limit` documents.
    fn fetch_documents(&self, request: &FindRequest) -> Result<FindResponse, BackendError> {
        request.validate()?;
        let target = request.target();
        let filter = translate_query(&request.query);
        let mut documents = self.find_raw(&target, &filter, request.limit)?;
        documents.truncate(request.limit);
        tracing::debug!(
            collection = %target.label(),
            returned = documents.len(),
            limit = request.limit,
            "find"
        );
        Ok(FindResponse { documents })
    }
}

impl<T: DocumentBackend + ?Sized> DocumentBackend for &T {
    fn connect(&self, connection_string: &str) -> Result<(), BackendError> {
        (**self).connect(connection_string)
    }

    fn list_databases(&self, connection_string: &str) -> Result<Vec<DatabaseInfo>, BackendError> {
        (**self).list_databases(connection_string)
    }

    fn list_collections(
        &self,
        connection_string: &str,
        database: &str,
    ) -> Result<Vec<CollectionInfo>, BackendError> {
        (**self).list_collections(connection_string, database)
    }

    fn find_raw(
        &self,
        target: &CollectionRef,
        filter: &Value,
        limit: usize,
    ) -> Result<Vec<Value>, BackendError> {
        (**self).find_raw(target, filter, limit)
    }
}

/// Checks a listing call's arguments.
pub(crate) fn require_listing(connection_string: &str, database: Option<&str>) -> Result<(), BackendError> {
    require("connection string", connection_string)?;
    if let Some(database) = database {
        require("database", database)?;
    }
    Ok(())
}
