// Copyright 2025 the Doclink Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Doclink Backend: the document database proxy contract.
//!
//! The canvas pulls documents through a [`DocumentBackend`]: a thin,
//! stateless proxy that lists databases and collections, samples a
//! collection's field names, and runs finds. The trait's provided methods
//! apply the rules every backend shares:
//!
//! - a [`FindRequest`] missing its connection string, database, or collection
//!   is rejected with [`BackendError::BadRequest`] (status 400);
//! - `limit` is a hard cap on returned documents;
//! - a top-level `_id` holding 24 hex digits is rewritten to a native
//!   [`ObjectId`] ([`translate_query`]) so identifier lookups typed as text work.
//!
//! [`MemoryBackend`] keeps documents in process and is what tests and the demo
//! use.
//!
//! ## Minimal example
//!
//! ```rust
//! use doclink_backend::{DocumentBackend, FindRequest, MemoryBackend};
//! use serde_json::json;
//!
//! let backend = MemoryBackend::new("mem://local").with_documents(
//!     "shop",
//!     "users",
//!     [
//!         json!({"_id": {"$oid": "507f1f77bcf86cd799439011"}, "name": "Ada"}),
//!         json!({"_id": {"$oid": "507f191e810c19729de860ea"}, "name": "Bob"}),
//!     ],
//! );
//! let users = backend.collection_ref("shop", "users");
//!
//! let found = backend
//!     .fetch_documents(&FindRequest::by_id(&users, "507f191e810c19729de860ea"))
//!     .unwrap();
//! assert_eq!(found.documents.len(), 1);
//! assert_eq!(found.documents[0]["name"], "Bob");
//! ```

mod backend;
mod error;
mod memory;
mod object_id;
mod request;

pub use backend::DocumentBackend;
pub use error::BackendError;
pub use memory::MemoryBackend;
pub use object_id::{OID_KEY, ObjectId, translate_query};
pub use request::{
    CollectionInfo, CollectionRef, DEFAULT_FETCH_LIMIT, DatabaseInfo, FindRequest, FindResponse,
    ID_FIELD, SCHEMA_SAMPLE_SIZE, SchemaKeys,
};
