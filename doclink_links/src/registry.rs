// Copyright 2025 the Doclink Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Registry of mounted identifier nodes.

use alloc::collections::BTreeMap;
use alloc::string::String;

use hashbrown::HashMap;
use smallvec::SmallVec;

/// Handle of a mounted node.
///
/// Tokens are issued by [`ReferenceRegistry::issue_token`] when a node mounts
/// and are never reused by the same registry, so a stale token can never alias
/// a newer node.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct NodeToken(u64);

impl NodeToken {
    /// Returns the raw token value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Whether a node defines an identifier or refers to one.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Role {
    /// The node is an `_id` field.
    Definition,
    /// The node is any other field holding an identifier-like value.
    Reference,
}

impl Role {
    /// Field key that marks a definition.
    pub const ID_FIELD: &'static str = "_id";

    /// Role of a leaf whose last path segment is `field_key`.
    ///
    /// Only a key of exactly `_id` defines; array elements (`None`) and every
    /// other key, at any depth, refer.
    #[must_use]
    pub fn for_field(field_key: Option<&str>) -> Self {
        if field_key == Some(Self::ID_FIELD) {
            Self::Definition
        } else {
            Self::Reference
        }
    }
}

/// What a mounted node currently shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistryEntry {
    /// Raw identifier text.
    pub value: String,
    /// Definition or reference.
    pub role: Role,
}

/// Tokens sharing one identifier value, split by role.
///
/// Tokens are in ascending order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValueGroup {
    /// Nodes showing the value under `_id`.
    pub definitions: SmallVec<[NodeToken; 1]>,
    /// Nodes showing the value under any other field.
    pub references: SmallVec<[NodeToken; 4]>,
}

impl ValueGroup {
    /// Returns `true` if the group can produce at least one link.
    #[must_use]
    pub fn is_linkable(&self) -> bool {
        !self.definitions.is_empty() && !self.references.is_empty()
    }

    /// Number of (reference, definition) pairs.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.definitions.len() * self.references.len()
    }
}

/// Live index of mounted identifier nodes, keyed by [`NodeToken`].
///
/// Many tokens may share one value: the same identifier shown by several
/// documents is expected. Entries must only exist while their node is mounted;
/// callers register on mount and unregister on unmount or value change.
#[derive(Clone, Debug, Default)]
pub struct ReferenceRegistry {
    entries: HashMap<NodeToken, RegistryEntry>,
    next_token: u64,
}

impl ReferenceRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a fresh token for a node that is about to mount.
    pub fn issue_token(&mut self) -> NodeToken {
        self.next_token += 1;
        NodeToken(self.next_token)
    }

    /// Records that `handle` shows `value` with `role`.
    ///
    /// Registering a handle again replaces its entry; the previous entry is returned.
    pub fn register(
        &mut self,
        handle: NodeToken,
        value: impl Into<String>,
        role: Role,
    ) -> Option<RegistryEntry> {
        self.entries.insert(
            handle,
            RegistryEntry {
                value: value.into(),
                role,
            },
        )
    }

    /// Removes the entry for `handle`.
    ///
    /// Absent handles are ignored, so calling this twice is the same as once.
    pub fn unregister(&mut self, handle: NodeToken) -> Option<RegistryEntry> {
        self.entries.remove(&handle)
    }

    /// Returns the entry for `handle`, if mounted.
    #[must_use]
    pub fn get(&self, handle: NodeToken) -> Option<&RegistryEntry> {
        self.entries.get(&handle)
    }

    /// Returns `true` if `handle` is registered.
    #[must_use]
    pub fn contains(&self, handle: NodeToken) -> bool {
        self.entries.contains_key(&handle)
    }

    /// Number of registered nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over all entries in unspecified order.
    pub fn entries(&self) -> impl Iterator<Item = (NodeToken, &RegistryEntry)> + '_ {
        self.entries.iter().map(|(token, entry)| (*token, entry))
    }

    /// Removes every entry. Issued tokens stay retired.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Partitions the entries by value.
    ///
    /// Values are in ascending order and tokens within each group ascend, so
    /// the result is deterministic for a given registry content.
    #[must_use]
    pub fn groups(&self) -> BTreeMap<&str, ValueGroup> {
        let mut groups: BTreeMap<&str, ValueGroup> = BTreeMap::new();
        for (token, entry) in &self.entries {
            let group = groups.entry(entry.value.as_str()).or_default();
            match entry.role {
                Role::Definition => group.definitions.push(*token),
                Role::Reference => group.references.push(*token),
            }
        }
        for group in groups.values_mut() {
            group.definitions.sort_unstable();
            group.references.sort_unstable();
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OID: &str = "507f1f77bcf86cd799439011";

    #[test]
    fn tokens_are_unique() {
        let mut registry = ReferenceRegistry::new();
        let a = registry.issue_token();
        let b = registry.issue_token();
        assert_ne!(a, b);
        assert!(b > a);
    }

    #[test]
    fn role_rule_uses_last_key_only() {
        assert_eq!(Role::for_field(Some("_id")), Role::Definition);
        assert_eq!(Role::for_field(Some("ownerId")), Role::Reference);
        assert_eq!(Role::for_field(Some("id")), Role::Reference);
        assert_eq!(Role::for_field(Some("_ID")), Role::Reference);
        assert_eq!(Role::for_field(None), Role::Reference);
    }

    #[test]
    fn same_value_many_handles() {
        let mut registry = ReferenceRegistry::new();
        let handles: [NodeToken; 3] = core::array::from_fn(|_| registry.issue_token());
        for handle in handles {
            assert!(registry.register(handle, OID, Role::Reference).is_none());
        }
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.groups()[OID].references.len(), 3);
    }

    #[test]
    fn unregister_is_idempotent() {
        let mut registry = ReferenceRegistry::new();
        let a = registry.issue_token();
        let b = registry.issue_token();
        registry.register(a, OID, Role::Definition);
        registry.register(b, OID, Role::Reference);

        assert!(registry.unregister(a).is_some());
        assert!(registry.unregister(a).is_none());

        assert!(!registry.contains(a));
        assert_eq!(
            registry.get(b),
            Some(&RegistryEntry {
                value: OID.into(),
                role: Role::Reference
            })
        );
    }

    #[test]
    fn reregister_replaces_value() {
        let mut registry = ReferenceRegistry::new();
        let a = registry.issue_token();
        registry.register(a, OID, Role::Reference);
        let previous = registry.register(a, "aaaaaaaaaaaaaaaaaaaaaaaa", Role::Reference);
        assert_eq!(previous.map(|e| e.value), Some(OID.into()));
        assert_eq!(registry.len(), 1);
        assert!(!registry.groups().contains_key(OID));
    }

    #[test]
    fn groups_split_roles_and_sort_tokens() {
        let mut registry = ReferenceRegistry::new();
        let t: [NodeToken; 4] = core::array::from_fn(|_| registry.issue_token());
        registry.register(t[3], OID, Role::Reference);
        registry.register(t[0], OID, Role::Definition);
        registry.register(t[1], OID, Role::Reference);
        registry.register(t[2], "bbbbbbbbbbbbbbbbbbbbbbbb", Role::Reference);

        let groups = registry.groups();
        assert_eq!(groups.len(), 2);
        let group = &groups[OID];
        assert_eq!(group.definitions.as_slice(), &[t[0]]);
        assert_eq!(group.references.as_slice(), &[t[1], t[3]]);
        assert!(group.is_linkable());
        assert_eq!(group.pair_count(), 2);
        assert!(!groups["bbbbbbbbbbbbbbbbbbbbbbbb"].is_linkable());
    }
}
