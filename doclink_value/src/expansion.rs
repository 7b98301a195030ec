// Copyright 2025 the Doclink Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Which collapsible sections are open.

use hashbrown::HashSet;

use crate::path::NodeKey;

/// Open sections, keyed by [`NodeKey`].
///
/// Sections start collapsed; only keys in this set are expanded. Because keys
/// name a document and a path rather than a drawn node, the state survives
/// re-rendering the same document.
#[derive(Clone, Debug, Default)]
pub struct ExpansionState {
    expanded: HashSet<NodeKey>,
}

impl ExpansionState {
    /// Creates a state with every section collapsed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the section at `key` is open.
    #[must_use]
    pub fn is_expanded(&self, key: &NodeKey) -> bool {
        self.expanded.contains(key)
    }

    /// Opens the section at `key`. Returns `true` if it was closed.
    pub fn expand(&mut self, key: NodeKey) -> bool {
        self.expanded.insert(key)
    }

    /// Closes the section at `key`. Returns `true` if it was open.
    pub fn collapse(&mut self, key: &NodeKey) -> bool {
        self.expanded.remove(key)
    }

    /// Flips the section at `key` and returns whether it is now open.
    pub fn toggle(&mut self, key: NodeKey) -> bool {
        if self.expanded.remove(&key) {
            false
        } else {
            self.expanded.insert(key);
            true
        }
    }

    /// Drops every open section of document `owner`.
    pub fn forget_owner(&mut self, owner: &str) {
        self.expanded.retain(|key| key.owner != owner);
    }

    /// Copies the open sections of `from` onto document `to`.
    ///
    /// Used when a document is cloned so the copy opens the same way.
    pub fn copy_owner(&mut self, from: &str, to: &str) {
        let copied: Vec<NodeKey> = self
            .expanded
            .iter()
            .filter(|key| key.owner == from)
            .map(|key| NodeKey::new(to, key.path.clone()))
            .collect();
        self.expanded.extend(copied);
    }

    /// Number of open sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    /// Returns `true` if every section is collapsed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    /// Collapses everything.
    pub fn clear(&mut self) {
        self.expanded.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::FieldPath;

    fn key(owner: &str, field: &str) -> NodeKey {
        NodeKey::new(owner, FieldPath::root().child_key(field))
    }

    #[test]
    fn toggle_flips() {
        let mut state = ExpansionState::new();
        assert!(!state.is_expanded(&key("a", "x")));
        assert!(state.toggle(key("a", "x")));
        assert!(state.is_expanded(&key("a", "x")));
        assert!(!state.toggle(key("a", "x")));
        assert!(state.is_empty());
    }

    #[test]
    fn forget_owner_is_scoped() {
        let mut state = ExpansionState::new();
        state.expand(key("a", "x"));
        state.expand(key("a", "y"));
        state.expand(key("b", "x"));
        state.forget_owner("a");
        assert_eq!(state.len(), 1);
        assert!(state.is_expanded(&key("b", "x")));
    }

    #[test]
    fn copy_owner_duplicates_paths() {
        let mut state = ExpansionState::new();
        state.expand(key("a", "x"));
        state.copy_owner("a", "a-copy");
        assert!(state.is_expanded(&key("a-copy", "x")));
        assert!(state.is_expanded(&key("a", "x")));
        assert!(state.collapse(&key("a", "x")));
        assert!(!state.collapse(&key("a", "x")));
    }
}
