// Copyright 2025 the Doclink Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keeps the reference registry in step with the identifier leaves on screen.

use doclink_links::{NodeToken, ReferenceRegistry, Role};
use doclink_value::{LinkCandidate, NodeKey};
use hashbrown::HashMap;

#[derive(Clone, Debug)]
struct Mounted {
    token: NodeToken,
    value: String,
    role: Role,
}

/// Counts from one [`MountTable::sync`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct MountDiff {
    pub(crate) mounted: usize,
    pub(crate) unmounted: usize,
}

/// Mounted identifier leaves, keyed by node.
///
/// A leaf is mounted while it is visible. Each mount gets a fresh token; a
/// leaf whose value or role changed is unmounted and mounted again, so a
/// token never outlives the value it was registered with.
#[derive(Clone, Debug, Default)]
pub(crate) struct MountTable {
    by_key: HashMap<NodeKey, Mounted>,
}

impl MountTable {
    /// Mounts `visible` and unmounts everything else, updating `registry`.
    ///
    /// New mounts get tokens in the order of `visible`.
    pub(crate) fn sync(
        &mut self,
        visible: impl IntoIterator<Item = (NodeKey, LinkCandidate)>,
        registry: &mut ReferenceRegistry,
    ) -> MountDiff {
        let visible: Vec<(NodeKey, LinkCandidate)> = visible.into_iter().collect();
        let mut diff = MountDiff::default();

        {
            let lookup: HashMap<&NodeKey, &LinkCandidate> =
                visible.iter().map(|(k, c)| (k, c)).collect();
            self.by_key.retain(|key, mounted| {
                let keep = lookup
                    .get(key)
                    .is_some_and(|c| c.value == mounted.value && c.role == mounted.role);
                if !keep {
                    registry.unregister(mounted.token);
                    diff.unmounted += 1;
                }
                keep
            });
        }

        for (key, candidate) in visible {
            if self.by_key.contains_key(&key) {
                continue;
            }
            let token = registry.issue_token();
            registry.register(token, candidate.value.clone(), candidate.role);
            self.by_key.insert(
                key,
                Mounted {
                    token,
                    value: candidate.value,
                    role: candidate.role,
                },
            );
            diff.mounted += 1;
        }
        diff
    }

    /// Token of the mounted leaf at `key`.
    pub(crate) fn token(&self, key: &NodeKey) -> Option<NodeToken> {
        self.by_key.get(key).map(|m| m.token)
    }

    pub(crate) fn len(&self) -> usize {
        self.by_key.len()
    }
}
