// Copyright 2025 the Doclink Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Document → row tree rendering.

use doclink_links::Role;
use serde_json::{Map, Value};

use crate::classify::{Kind, classify, display_text, is_identifier_like};
use crate::expansion::ExpansionState;
use crate::path::{FieldPath, NodeKey, PathSegment};

/// Label shown at the start of a row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RowLabel {
    /// The document itself; never drawn as a row of its own when it is a mapping.
    Root,
    /// Field name.
    Key(String),
    /// Sequence index.
    Index(usize),
}

/// Registry data for an identifier leaf.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkCandidate {
    /// Raw identifier text.
    pub value: String,
    /// Definition for `_id` fields, reference otherwise.
    pub role: Role,
}

/// A scalar value drawn inline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScalarLeaf {
    /// Classification of the value.
    pub kind: Kind,
    /// Display text.
    pub text: String,
    /// Present for identifier leaves.
    pub link: Option<LinkCandidate>,
}

/// Whether a section holds a sequence or a mapping.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SectionKind {
    /// Ordered elements.
    Sequence,
    /// Keyed fields in insertion order.
    Mapping,
}

/// A non-empty array or object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section {
    /// Sequence or mapping.
    pub kind: SectionKind,
    /// One node per element or field, in order.
    pub children: Vec<VisualNode>,
    /// `false` only for the document root, which is always open.
    pub collapsible: bool,
}

impl Section {
    /// Number of children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns `true` if the section has no children (never produced by [`render`]).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Collapsed-row summary: `Array[n]` or `Object{n}`.
    #[must_use]
    pub fn summary(&self) -> String {
        match self.kind {
            SectionKind::Sequence => format!("Array[{}]", self.len()),
            SectionKind::Mapping => format!("Object{{{}}}", self.len()),
        }
    }
}

/// What a node draws.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeBody {
    /// Inline scalar.
    Leaf(ScalarLeaf),
    /// `[]` marker.
    EmptySequence,
    /// `{}` marker.
    EmptyMapping,
    /// Collapsible container.
    Section(Section),
}

/// One node of a rendered document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisualNode {
    /// Owning document and path.
    pub key: NodeKey,
    /// Row label.
    pub label: RowLabel,
    /// Content.
    pub body: NodeBody,
}

/// A row visible under the current expansion state.
#[derive(Clone, Copy, Debug)]
pub struct VisibleRow<'a> {
    /// Node drawn on this row.
    pub node: &'a VisualNode,
    /// Nesting depth below the document's top-level fields.
    pub depth: usize,
}

/// Renders `value` as the root of document `owner`.
#[must_use]
pub fn render(value: &Value, owner: &str) -> VisualNode {
    render_at(value, FieldPath::root(), owner)
}

/// Renders `value` found at `path` inside document `owner`.
///
/// `owner` is passed unchanged to every descendant.
#[must_use]
pub fn render_at(value: &Value, path: FieldPath, owner: &str) -> VisualNode {
    let label = match path.last() {
        None => RowLabel::Root,
        Some(PathSegment::Key(key)) => RowLabel::Key(key.clone()),
        Some(PathSegment::Index(index)) => RowLabel::Index(*index),
    };
    let collapsible = !path.is_root();
    let body = match value {
        Value::Array(items) if items.is_empty() => NodeBody::EmptySequence,
        Value::Array(items) => NodeBody::Section(Section {
            kind: SectionKind::Sequence,
            children: items
                .iter()
                .enumerate()
                .map(|(i, item)| render_at(item, path.child_index(i), owner))
                .collect(),
            collapsible,
        }),
        Value::Object(fields) => match extended_oid(fields) {
            Some(oid) => NodeBody::Leaf(identifier_leaf(oid, &path)),
            None if fields.is_empty() => NodeBody::EmptyMapping,
            None => NodeBody::Section(Section {
                kind: SectionKind::Mapping,
                children: fields
                    .iter()
                    .map(|(k, v)| render_at(v, path.child_key(k), owner))
                    .collect(),
                collapsible,
            }),
        },
        scalar => NodeBody::Leaf(scalar_leaf(scalar, &path)),
    };
    VisualNode {
        key: NodeKey::new(owner, path),
        label,
        body,
    }
}

fn scalar_leaf(value: &Value, path: &FieldPath) -> ScalarLeaf {
    let kind = classify(value);
    match value {
        Value::String(s) if kind == Kind::IdentifierString => identifier_leaf(s, path),
        _ => ScalarLeaf {
            kind,
            text: display_text(value, kind),
            link: None,
        },
    }
}

fn identifier_leaf(oid: &str, path: &FieldPath) -> ScalarLeaf {
    ScalarLeaf {
        kind: Kind::IdentifierString,
        text: format!("ObjectId(\"{oid}\")"),
        link: Some(LinkCandidate {
            value: oid.to_owned(),
            role: Role::for_field(path.last_key()),
        }),
    }
}

// Extended JSON spells an identifier as `{"$oid": "<24 hex>"}`.
fn extended_oid(fields: &Map<String, Value>) -> Option<&str> {
    if fields.len() != 1 {
        return None;
    }
    match fields.get("$oid") {
        Some(Value::String(s)) if is_identifier_like(s) => Some(s),
        _ => None,
    }
}

impl VisualNode {
    /// Returns the leaf, if this node is a scalar.
    #[must_use]
    pub fn leaf(&self) -> Option<&ScalarLeaf> {
        match &self.body {
            NodeBody::Leaf(leaf) => Some(leaf),
            _ => None,
        }
    }

    /// Returns the section, if this node is a non-empty container.
    #[must_use]
    pub fn section(&self) -> Option<&Section> {
        match &self.body {
            NodeBody::Section(section) => Some(section),
            _ => None,
        }
    }

    /// Returns the link candidate of an identifier leaf.
    #[must_use]
    pub fn link(&self) -> Option<&LinkCandidate> {
        self.leaf().and_then(|leaf| leaf.link.as_ref())
    }

    /// `true` for the `_id` field row, which hosts draw distinctly.
    #[must_use]
    pub fn is_id_field(&self) -> bool {
        matches!(&self.label, RowLabel::Key(key) if key == Role::ID_FIELD)
    }

    /// Text drawn after the label: scalar text, `[]`/`{}`, or the section summary.
    #[must_use]
    pub fn value_text(&self) -> String {
        match &self.body {
            NodeBody::Leaf(leaf) => leaf.text.clone(),
            NodeBody::EmptySequence => "[]".to_owned(),
            NodeBody::EmptyMapping => "{}".to_owned(),
            NodeBody::Section(section) => section.summary(),
        }
    }

    /// Finds the node at `path` below (or at) this node.
    #[must_use]
    pub fn find(&self, path: &FieldPath) -> Option<&Self> {
        if &self.key.path == path {
            return Some(self);
        }
        if !path.starts_with(&self.key.path) {
            return None;
        }
        self.section()?
            .children
            .iter()
            .find_map(|child| child.find(path))
    }

    /// Every scalar leaf below (or at) this node, depth first, ignoring expansion.
    #[must_use]
    pub fn leaves(&self) -> Vec<&Self> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Self>) {
        match &self.body {
            NodeBody::Leaf(_) => out.push(self),
            NodeBody::Section(section) => {
                for child in &section.children {
                    child.collect_leaves(out);
                }
            }
            NodeBody::EmptySequence | NodeBody::EmptyMapping => {}
        }
    }

    /// Rows visible under `expansion`, in drawing order.
    ///
    /// A root container is not a row itself; its children start at depth 0.
    /// Children of a collapsed section are omitted, so they are also the
    /// nodes a host should keep unmounted.
    #[must_use]
    pub fn visible_rows<'a>(&'a self, expansion: &ExpansionState) -> Vec<VisibleRow<'a>> {
        let mut rows = Vec::new();
        match &self.body {
            NodeBody::Section(section) if !section.collapsible => {
                for child in &section.children {
                    child.push_rows(0, expansion, &mut rows);
                }
            }
            _ => self.push_rows(0, expansion, &mut rows),
        }
        rows
    }

    fn push_rows<'a>(&'a self, depth: usize, expansion: &ExpansionState, rows: &mut Vec<VisibleRow<'a>>) {
        rows.push(VisibleRow { node: self, depth });
        if let NodeBody::Section(section) = &self.body {
            if !section.collapsible || expansion.is_expanded(&self.key) {
                for child in &section.children {
                    child.push_rows(depth + 1, expansion, rows);
                }
            }
        }
    }
}
