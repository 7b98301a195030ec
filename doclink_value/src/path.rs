// Copyright 2025 the Doclink Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural paths of values within their owning document.

use std::fmt;

/// One step from a container to a child.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathSegment {
    /// Field of a mapping.
    Key(String),
    /// Element of a sequence.
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

/// Location of a value relative to the root of its owning document.
///
/// Displays as dotted segments: `address.city`, `items.2.sku`. The root path
/// is empty. Paths depend only on the keys and indices leading to a value, so
/// adding a field to a mapping never changes the path of an existing one.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    /// The document root.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns `true` for the document root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of segments; the root has depth 0.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Returns the segments from the root down.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Returns the last segment, if any.
    #[must_use]
    pub fn last(&self) -> Option<&PathSegment> {
        self.0.last()
    }

    /// Returns the last segment if it is a field key.
    #[must_use]
    pub fn last_key(&self) -> Option<&str> {
        match self.0.last() {
            Some(PathSegment::Key(key)) => Some(key),
            _ => None,
        }
    }

    /// Path of field `key` under this path.
    #[must_use]
    pub fn child_key(&self, key: &str) -> Self {
        self.with(PathSegment::Key(key.to_owned()))
    }

    /// Path of element `index` under this path.
    #[must_use]
    pub fn child_index(&self, index: usize) -> Self {
        self.with(PathSegment::Index(index))
    }

    /// Returns `true` if `self` is `other` or lies below it.
    #[must_use]
    pub fn starts_with(&self, other: &Self) -> bool {
        self.0.starts_with(&other.0)
    }

    fn with(&self, segment: PathSegment) -> Self {
        let mut segments = Vec::with_capacity(self.0.len() + 1);
        segments.extend_from_slice(&self.0);
        segments.push(segment);
        Self(segments)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl FromIterator<PathSegment> for FieldPath {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Stable identity of a rendered node: owning document plus path.
///
/// This does not depend on how (or whether) the node is currently drawn, so
/// it survives collapse/expand and re-layout.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey {
    /// Canvas id of the owning document.
    pub owner: String,
    /// Path within that document.
    pub path: FieldPath,
}

impl NodeKey {
    /// Creates a key.
    #[must_use]
    pub fn new(owner: impl Into<String>, path: FieldPath) -> Self {
        Self {
            owner: owner.into(),
            path,
        }
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.owner, self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dotted_display() {
        let path = FieldPath::root().child_key("items").child_index(2).child_key("sku");
        assert_eq!(path.to_string(), "items.2.sku");
        assert_eq!(path.depth(), 3);
        assert_eq!(path.last_key(), Some("sku"));
        assert_eq!(FieldPath::root().to_string(), "");
    }

    #[test]
    fn index_is_not_a_key() {
        let path = FieldPath::root().child_key("ids").child_index(0);
        assert_eq!(path.last_key(), None);
        assert_eq!(path.last(), Some(&PathSegment::Index(0)));
    }

    #[test]
    fn prefix_relation() {
        let parent = FieldPath::root().child_key("a");
        let child = parent.child_key("b");
        assert!(child.starts_with(&parent));
        assert!(parent.starts_with(&FieldPath::root()));
        assert!(!parent.starts_with(&child));
    }

    #[test]
    fn node_key_display() {
        let key = NodeKey::new("doc-1", FieldPath::root().child_key("_id"));
        assert_eq!(key.to_string(), "doc-1:_id");
    }
}
