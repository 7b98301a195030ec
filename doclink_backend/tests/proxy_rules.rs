// Copyright 2025 the Doclink Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Request rules shared by every backend, exercised through `MemoryBackend`.

use doclink_backend::{
    BackendError, DEFAULT_FETCH_LIMIT, DocumentBackend, FindRequest, MemoryBackend,
    SCHEMA_SAMPLE_SIZE,
};
use serde_json::{Value, json};

const CONN: &str = "mem://local";

fn hex_id(n: usize) -> String {
    format!("{n:024x}")
}

fn populated(count: usize) -> MemoryBackend {
    MemoryBackend::new(CONN).with_documents(
        "shop",
        "orders",
        (0..count).map(|n| json!({"_id": {"$oid": hex_id(n)}, "n": n})),
    )
}

#[test]
fn limit_is_a_hard_cap() {
    let backend = populated(25);
    let orders = backend.collection_ref("shop", "orders");

    let default = backend.fetch_documents(&FindRequest::new(&orders)).unwrap();
    assert_eq!(default.documents.len(), DEFAULT_FETCH_LIMIT);

    let three = backend
        .fetch_documents(&FindRequest::new(&orders).with_limit(3))
        .unwrap();
    assert_eq!(three.documents.len(), 3);

    let all = backend
        .fetch_documents(&FindRequest::new(&orders).with_limit(100))
        .unwrap();
    assert_eq!(all.documents.len(), 25);
}

#[test]
fn text_id_finds_native_identifier() {
    let backend = populated(5);
    let orders = backend.collection_ref("shop", "orders");
    let found = backend
        .fetch_documents(&FindRequest::by_id(&orders, &hex_id(3)))
        .unwrap();
    assert_eq!(found.documents.len(), 1);
    assert_eq!(found.documents[0]["n"], 3);
}

#[test]
fn undecodable_id_falls_back_to_raw_equality() {
    let backend = MemoryBackend::new(CONN).with_documents(
        "shop",
        "odd",
        [json!({"_id": "not-a-real-identifier-zz", "v": 1})],
    );
    let odd = backend.collection_ref("shop", "odd");
    let found = backend
        .fetch_documents(&FindRequest::by_id(&odd, "not-a-real-identifier-zz"))
        .unwrap();
    assert_eq!(found.documents.len(), 1);
}

#[test]
fn missing_fields_are_client_errors() {
    let backend = populated(1);
    let mut request = FindRequest::new(&backend.collection_ref("shop", "orders"));
    request.database.clear();
    let err = backend.fetch_documents(&request).unwrap_err();
    assert!(matches!(err, BackendError::BadRequest { .. }));
    assert_eq!(err.status(), 400);
    assert_eq!(err.message(), "database is required");
}

#[test]
fn unknown_server_is_a_connection_error() {
    let backend = populated(1);
    let request = FindRequest::new(&doclink_backend::CollectionRef::new(
        "mem://elsewhere",
        "shop",
        "orders",
    ));
    let err = backend.fetch_documents(&request).unwrap_err();
    assert!(matches!(err, BackendError::Connection { .. }));
    assert!(!err.message().is_empty());
}

#[test]
fn schema_samples_a_prefix() {
    let mut docs: Vec<Value> = (0..SCHEMA_SAMPLE_SIZE)
        .map(|n| json!({"_id": n, "name": "x"}))
        .collect();
    docs[4] = json!({"_id": 4, "email": "e"});
    // Past the sample; never seen.
    docs.push(json!({"_id": 99, "late": true}));
    let backend = MemoryBackend::new(CONN).with_documents("crm", "people", docs);

    let schema = backend.fetch_schema(CONN, "crm", "people").unwrap();
    assert_eq!(schema.keys, ["_id", "name", "email"]);
}
