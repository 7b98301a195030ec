// Copyright 2025 the Doclink Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared fixtures for the Doclink demos.
//!
//! Run:
//! - `cargo run -p doclink_demos --example canvas_session`
//! - `cargo run -p doclink_demos --example link_scan`

use doclink_backend::MemoryBackend;
use serde_json::json;
use tracing_subscriber::EnvFilter;

/// Connection string of [`sample_backend`].
pub const SAMPLE_SERVER: &str = "mem://demo";

/// Ids used in the sample data.
pub mod ids {
    /// First user.
    pub const ADA: &str = "65f0a1b2c3d4e5f601234501";
    /// Second user.
    pub const BOB: &str = "65f0a1b2c3d4e5f601234502";
    /// Store owned by Ada.
    pub const OSLO: &str = "65f0a1b2c3d4e5f6012345a1";
    /// Store with no owner on the canvas.
    pub const BERGEN: &str = "65f0a1b2c3d4e5f6012345a2";
    /// An order.
    pub const ORDER: &str = "65f0a1b2c3d4e5f6012345f1";
}

/// A small shop database: users own stores, orders point at both.
pub fn sample_backend() -> MemoryBackend {
    MemoryBackend::new(SAMPLE_SERVER)
        .with_documents(
            "shop",
            "users",
            [
                json!({
                    "_id": {"$oid": ids::ADA},
                    "name": "Ada",
                    "ownerOf": ids::OSLO,
                    "joined": "2024-03-01T09:30:00Z",
                }),
                json!({
                    "_id": {"$oid": ids::BOB},
                    "name": "Bob",
                    "friends": [ids::ADA],
                }),
            ],
        )
        .with_documents(
            "shop",
            "stores",
            [
                json!({"_id": {"$oid": ids::OSLO}, "city": "Oslo", "open": true}),
                json!({"_id": {"$oid": ids::BERGEN}, "city": "Bergen", "open": false}),
            ],
        )
        .with_documents(
            "shop",
            "orders",
            [json!({
                "_id": ids::ORDER,
                "customer": ids::BOB,
                "lines": [{"store": ids::OSLO, "qty": 2}],
                "note": null,
            })],
        )
}

/// Installs a `fmt` subscriber filtered by `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
