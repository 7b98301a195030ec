// Copyright 2025 the Doclink Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reference discovery without a canvas.
//!
//! Renders every document of the sample shop, prints one as an outline, and
//! registers every identifier leaf (open or not) to show which values would
//! link on a canvas holding all of them.
//!
//! Run:
//! - `cargo run -p doclink_demos --example link_scan`

use doclink_backend::{DocumentBackend, FindRequest};
use doclink_demos::{SAMPLE_SERVER, init_tracing, sample_backend};
use doclink_links::ReferenceRegistry;
use doclink_value::{ExpansionState, RowLabel, render};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let backend = sample_backend();
    let mut registry = ReferenceRegistry::new();
    let mut trees = Vec::new();

    for db in backend.list_databases(SAMPLE_SERVER)? {
        for coll in backend.list_collections(SAMPLE_SERVER, &db.name)? {
            let target = backend.collection_ref(&db.name, &coll.name);
            let schema = backend.fetch_schema(SAMPLE_SERVER, &db.name, &coll.name)?;
            tracing::info!(collection = %target.label(), keys = ?schema.keys, "schema");
            for (i, doc) in backend
                .fetch_documents(&FindRequest::new(&target))?
                .documents
                .iter()
                .enumerate()
            {
                let owner = format!("{}#{i}", target.label());
                trees.push(render(doc, &owner));
            }
        }
    }

    if let Some(tree) = trees.first() {
        // Open the top-level sections.
        let mut expansion = ExpansionState::new();
        for row in tree.visible_rows(&ExpansionState::new()) {
            if row.node.section().is_some_and(|s| s.collapsible) {
                expansion.expand(row.node.key.clone());
            }
        }
        println!("{}", tree.key.owner);
        for row in tree.visible_rows(&expansion) {
            let label = match &row.node.label {
                RowLabel::Root => String::new(),
                RowLabel::Key(key) => key.clone(),
                RowLabel::Index(index) => index.to_string(),
            };
            println!(
                "{:indent$}{label}: {}",
                "",
                row.node.value_text(),
                indent = 2 + 2 * row.depth
            );
        }
    }

    for tree in &trees {
        for leaf in tree.leaves() {
            if let Some(link) = leaf.link() {
                let token = registry.issue_token();
                registry.register(token, link.value.clone(), link.role);
            }
        }
    }

    for (value, group) in registry.groups() {
        tracing::info!(
            value,
            definitions = group.definitions.len(),
            references = group.references.len(),
            links = group.pair_count(),
            "identifier"
        );
    }
    Ok(())
}
